//! Template commands: list, show, validate, deactivate.

use anyhow::{Context, Result};

use crate::cli::output::{format_template_table, truncate};
use crate::cli::TemplateCommands;
use crate::domain::models::config::Config;
use crate::domain::models::{Category, Complexity, TemplateFilters, WorkflowTemplate};
use crate::infrastructure::AppContext;

pub async fn execute(command: TemplateCommands, config: &Config, json: bool) -> Result<()> {
    let context = AppContext::init(config).await?;

    match command {
        TemplateCommands::List { category, complexity, search, tags } => {
            let filters = TemplateFilters {
                category: match category {
                    Some(raw) => Some(
                        Category::from_str(&raw)
                            .ok_or_else(|| anyhow::anyhow!("Unknown category: {raw}"))?,
                    ),
                    None => None,
                },
                complexity: match complexity {
                    Some(raw) => Some(
                        Complexity::from_str(&raw)
                            .ok_or_else(|| anyhow::anyhow!("Unknown complexity: {raw}"))?,
                    ),
                    None => None,
                },
                search,
                tags,
            };

            let templates = context
                .templates
                .list(&filters)
                .await
                .context("Failed to list templates")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&templates)?);
            } else if templates.is_empty() {
                println!("No templates found.");
            } else {
                println!("{}", format_template_table(&templates));
                println!("\nShowing {} template(s)", templates.len());
            }
        }

        TemplateCommands::Show { template_id } => {
            let template = context
                .templates
                .get(template_id)
                .await
                .context("Failed to retrieve template")?
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "Template {} not found. Use 'caseflow template list' to see available templates.",
                        template_id
                    )
                })?;

            if json {
                println!("{}", serde_json::to_string_pretty(&template)?);
            } else {
                print_template(&template);
            }
        }

        TemplateCommands::Validate { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let template: WorkflowTemplate = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse {}", file.display()))?;

            match template.validate() {
                Ok(()) => {
                    if json {
                        println!("{}", serde_json::json!({ "valid": true }));
                    } else {
                        println!("Template is valid ({} steps).", template.steps.len());
                    }
                }
                Err(reason) => {
                    if json {
                        println!(
                            "{}",
                            serde_json::json!({ "valid": false, "reason": reason })
                        );
                    } else {
                        println!("Template is invalid: {reason}");
                    }
                    std::process::exit(1);
                }
            }
        }

        TemplateCommands::Deactivate { template_id } => {
            let found = context
                .templates
                .deactivate(template_id)
                .await
                .context("Failed to deactivate template")?;
            if !found {
                anyhow::bail!("Template {} not found", template_id);
            }

            if json {
                println!(
                    "{}",
                    serde_json::json!({ "template_id": template_id, "is_active": false })
                );
            } else {
                println!("Template {template_id} deactivated.");
            }
        }
    }

    Ok(())
}

fn print_template(template: &WorkflowTemplate) {
    println!("Template Details:");
    println!("  ID: {}", template.id);
    println!("  Title: {}", template.title);
    if !template.description.is_empty() {
        println!("  Description: {}", truncate(&template.description, 100));
    }
    println!("  Category: {}", template.category.as_str());
    println!("  Complexity: {}", template.complexity.as_str());
    println!("  Version: {}", template.version);
    println!("  Active: {}", template.is_active);
    println!("  Estimated minutes: {}", template.estimated_minutes);
    println!("  Steps:");
    for step in &template.steps {
        let required_inputs = step.inputs.iter().filter(|i| i.required).count();
        println!(
            "    {}. {} ({}, {} required input(s))",
            step.order + 1,
            step.name,
            step.step_type.as_str(),
            required_inputs
        );
    }
}
