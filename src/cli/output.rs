//! Output formatting utilities for the CLI.

use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};

use crate::domain::models::WorkflowTemplate;
use crate::services::WorkflowProgress;

/// Truncate a string to a maximum number of characters, appending "..."
/// if truncated. Counts characters, not bytes, so multibyte titles
/// never split mid-character.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Format a list of templates as a table.
pub fn format_template_table(templates: &[WorkflowTemplate]) -> String {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID").add_attribute(Attribute::Bold),
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("Category").add_attribute(Attribute::Bold),
        Cell::new("Complexity").add_attribute(Attribute::Bold),
        Cell::new("Steps").add_attribute(Attribute::Bold),
        Cell::new("Est. min").add_attribute(Attribute::Bold),
    ]);

    for template in templates {
        table.add_row(vec![
            Cell::new(&template.id.to_string()[..8]),
            Cell::new(truncate(&template.title, 40)),
            Cell::new(template.category.as_str()),
            Cell::new(template.complexity.as_str()),
            Cell::new(template.steps.len()),
            Cell::new(template.estimated_minutes),
        ]);
    }

    table.to_string()
}

/// Format a progress snapshot for human output.
pub fn format_progress(progress: &WorkflowProgress) -> String {
    let mut lines = vec![format!(
        "Progress: {}/{} steps ({}%)",
        progress.summary.completed, progress.summary.total, progress.summary.percent
    )];
    if let Some(next) = &progress.next_step_id {
        lines.push(format!("Next step: {next}"));
        lines.push(format!(
            "Ready to proceed: {}",
            if progress.can_proceed { "yes" } else { "no" }
        ));
    } else {
        lines.push("All steps completed.".to_string());
    }
    lines.join("\n")
}
