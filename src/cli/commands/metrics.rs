//! Metrics commands.

use anyhow::{Context, Result};

use crate::cli::MetricsCommands;
use crate::domain::models::config::Config;
use crate::infrastructure::AppContext;

pub async fn execute(command: MetricsCommands, config: &Config, json: bool) -> Result<()> {
    let context = AppContext::init(config).await?;

    match command {
        MetricsCommands::Show { template_id: Some(template_id) } => {
            let metrics = context
                .metrics
                .get(template_id)
                .await
                .context("Failed to retrieve metrics")?
                .ok_or_else(|| {
                    anyhow::anyhow!("No metrics recorded for template {}", template_id)
                })?;

            if json {
                println!("{}", serde_json::to_string_pretty(&metrics)?);
            } else {
                println!("Metrics for template {template_id}:");
                println!("  Total executions: {}", metrics.total_executions);
                println!(
                    "  Average completion: {:.1}s",
                    metrics.average_completion_ms / 1000.0
                );
                println!("  Success rate: {:.0}%", metrics.success_rate * 100.0);
                if let Some(satisfaction) = metrics.user_satisfaction {
                    println!("  User satisfaction: {satisfaction:.1}");
                }
            }
        }

        MetricsCommands::Show { template_id: None } => {
            let summary = context
                .metrics
                .overall()
                .await
                .context("Failed to aggregate metrics")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Overall metrics:");
                println!("  Templates with activity: {}", summary.template_count);
                println!("  Total executions: {}", summary.total_executions);
                println!(
                    "  Average completion: {:.1}s",
                    summary.average_completion_ms / 1000.0
                );
                println!("  Success rate: {:.0}%", summary.success_rate * 100.0);
            }
        }
    }

    Ok(())
}
