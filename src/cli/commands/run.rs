//! Execution commands: start, input, complete, pause, resume, status,
//! export.

use anyhow::{Context, Result};
use chrono::Utc;

use crate::cli::output::format_progress;
use crate::cli::RunCommands;
use crate::domain::models::config::Config;
use crate::domain::models::export::{ExportOptions, ExportSections};
use crate::domain::models::{InputValue, StepInputValue};
use crate::infrastructure::AppContext;

pub async fn execute(command: RunCommands, config: &Config, json: bool) -> Result<()> {
    let context = AppContext::init(config).await?;

    match command {
        RunCommands::Start { template_id, title, user } => {
            let execution = context
                .engine
                .create_execution(template_id, title, &user)
                .await
                .context("Failed to start execution")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&execution)?);
            } else {
                println!("Execution started!");
                println!("  Execution ID: {}", execution.id);
                println!("  Title: {}", execution.title);
                println!("  Steps: {}", execution.progress.total);
            }
        }

        RunCommands::Input {
            execution_id,
            step_id,
            input_id,
            text,
            selection,
            boolean,
            date,
            file,
            size_bytes,
        } => {
            let value = parse_input_value(text, selection, boolean, date, file, size_bytes)?;
            context
                .engine
                .add_step_input(
                    execution_id,
                    StepInputValue {
                        step_id: step_id.clone(),
                        input_id: input_id.clone(),
                        value,
                        submitted_at: Utc::now(),
                    },
                )
                .await
                .context("Failed to record input")?;

            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "execution_id": execution_id,
                        "step_id": step_id,
                        "input_id": input_id,
                    })
                );
            } else {
                println!("Recorded input '{input_id}' for step '{step_id}'.");
            }
        }

        RunCommands::Complete { execution_id, step_id } => {
            let progress = context
                .engine
                .complete_step(execution_id, &step_id)
                .await
                .context("Failed to complete step")?
                .ok_or_else(|| {
                    anyhow::anyhow!("Execution {} or step '{}' not found", execution_id, step_id)
                })?;

            if json {
                println!("{}", serde_json::to_string_pretty(&progress)?);
            } else {
                println!("Step '{step_id}' completed.");
                println!("{}", format_progress(&progress));
            }
        }

        RunCommands::Pause { execution_id } => {
            context
                .engine
                .pause_execution(execution_id)
                .await
                .context("Failed to pause execution")?;
            report_status_change(execution_id, "paused", json);
        }

        RunCommands::Resume { execution_id } => {
            context
                .engine
                .resume_execution(execution_id)
                .await
                .context("Failed to resume execution")?;
            report_status_change(execution_id, "in_progress", json);
        }

        RunCommands::Status { execution_id } => {
            let execution = context
                .engine
                .get_execution(execution_id)
                .await
                .context("Failed to retrieve execution")?
                .ok_or_else(|| anyhow::anyhow!("Execution {} not found", execution_id))?;
            let progress = context
                .engine
                .progress(execution_id)
                .await
                .context("Failed to compute progress")?;

            if json {
                let mut payload = serde_json::to_value(&execution)?;
                if let Some(progress) = &progress {
                    payload["progress_detail"] = serde_json::to_value(progress)?;
                }
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("Execution Details:");
                println!("  ID: {}", execution.id);
                println!("  Title: {}", execution.title);
                println!("  Status: {}", execution.status.as_str());
                if let Some(started_at) = execution.started_at {
                    println!(
                        "  Started at: {}",
                        started_at.format("%Y-%m-%d %H:%M:%S UTC")
                    );
                }
                if let Some(completed_at) = execution.completed_at {
                    println!(
                        "  Completed at: {}",
                        completed_at.format("%Y-%m-%d %H:%M:%S UTC")
                    );
                }
                if let Some(progress) = &progress {
                    println!("{}", format_progress(progress));
                }
            }
        }

        RunCommands::Export { execution_id, sections, include_inputs } => {
            let options = ExportOptions {
                sections: parse_sections(&sections)?,
                include_inputs,
            };
            let payload = context
                .exporter
                .export(execution_id, &options)
                .await
                .context("Failed to export execution")?
                .ok_or_else(|| anyhow::anyhow!("Execution {} not found", execution_id))?;

            // Export output is JSON by nature; --json only switches off
            // the trailing human summary.
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }

    Ok(())
}

fn report_status_change(execution_id: uuid::Uuid, status: &str, json: bool) {
    if json {
        println!(
            "{}",
            serde_json::json!({ "execution_id": execution_id, "status": status })
        );
    } else {
        println!("Execution {execution_id} is now {status}.");
    }
}

/// Exactly one value flag must be provided; clap's arg group enforces
/// mutual exclusion, this enforces presence.
fn parse_input_value(
    text: Option<String>,
    selection: Option<String>,
    boolean: Option<bool>,
    date: Option<chrono::NaiveDate>,
    file: Option<String>,
    size_bytes: u64,
) -> Result<InputValue> {
    if let Some(text) = text {
        Ok(InputValue::Text { text })
    } else if let Some(choice) = selection {
        Ok(InputValue::Selection { choice })
    } else if let Some(value) = boolean {
        Ok(InputValue::Boolean { value })
    } else if let Some(date) = date {
        Ok(InputValue::Date { date })
    } else if let Some(name) = file {
        Ok(InputValue::File { name, size_bytes })
    } else {
        anyhow::bail!(
            "A value is required: one of --text, --selection, --boolean, --date, or --file"
        )
    }
}

/// Empty selection means every section; otherwise only the named ones.
fn parse_sections(sections: &[String]) -> Result<ExportSections> {
    if sections.is_empty() {
        return Ok(ExportSections::default());
    }

    let mut parsed = ExportSections {
        summary: false,
        steps: false,
        outputs: false,
        timeline: false,
    };
    for section in sections {
        match section.as_str() {
            "summary" => parsed.summary = true,
            "steps" => parsed.steps = true,
            "outputs" => parsed.outputs = true,
            "timeline" => parsed.timeline = true,
            other => anyhow::bail!(
                "Unknown section '{other}'. Valid sections: summary, steps, outputs, timeline"
            ),
        }
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sections_defaults_to_all() {
        let sections = parse_sections(&[]).unwrap();
        assert!(sections.summary && sections.steps && sections.outputs && sections.timeline);
    }

    #[test]
    fn test_parse_sections_subset() {
        let sections = parse_sections(&["summary".to_string(), "timeline".to_string()]).unwrap();
        assert!(sections.summary && sections.timeline);
        assert!(!sections.steps && !sections.outputs);
    }

    #[test]
    fn test_parse_sections_rejects_unknown() {
        assert!(parse_sections(&["everything".to_string()]).is_err());
    }

    #[test]
    fn test_parse_input_value_requires_a_flag() {
        assert!(parse_input_value(None, None, None, None, None, 0).is_err());
    }

    #[test]
    fn test_parse_input_value_file() {
        let value =
            parse_input_value(None, None, None, None, Some("brief.pdf".to_string()), 512).unwrap();
        assert!(matches!(value, InputValue::File { size_bytes: 512, .. }));
    }
}
