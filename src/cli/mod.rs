//! CLI type definitions and error reporting.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

pub mod commands;
pub mod output;

pub use output::truncate;

#[derive(Parser)]
#[command(name = "caseflow")]
#[command(about = "Caseflow - Legal workflow template and execution tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Path to a configuration file (overrides the default lookup)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Workflow template commands
    #[command(subcommand)]
    Template(TemplateCommands),

    /// Workflow execution commands
    #[command(subcommand)]
    Run(RunCommands),

    /// Metrics commands
    #[command(subcommand)]
    Metrics(MetricsCommands),
}

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// List active templates
    List {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,

        /// Filter by complexity
        #[arg(long)]
        complexity: Option<String>,

        /// Case-insensitive substring match on title and description
        #[arg(short, long)]
        search: Option<String>,

        /// Match templates carrying any of these tags (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// Show details for a specific template
    Show {
        /// Template ID
        template_id: Uuid,
    },

    /// Validate a template definition from a JSON file
    Validate {
        /// Path to a template JSON file
        file: PathBuf,
    },

    /// Deactivate a template so it no longer appears in listings
    Deactivate {
        /// Template ID
        template_id: Uuid,
    },
}

#[derive(Subcommand)]
pub enum RunCommands {
    /// Start a new execution from a template
    Start {
        /// Template ID
        template_id: Uuid,

        /// Title for the run (defaults to the template title)
        #[arg(short, long)]
        title: Option<String>,

        /// User the run belongs to
        #[arg(short, long, default_value = "local")]
        user: String,
    },

    /// Record an input value for a step
    Input {
        /// Execution ID
        execution_id: Uuid,

        /// Step ID within the template
        step_id: String,

        /// Input ID within the step
        input_id: String,

        /// Free-text value
        #[arg(long, group = "value")]
        text: Option<String>,

        /// Selected option
        #[arg(long, group = "value")]
        selection: Option<String>,

        /// Yes/no value
        #[arg(long, group = "value")]
        boolean: Option<bool>,

        /// Date value (YYYY-MM-DD)
        #[arg(long, group = "value")]
        date: Option<chrono::NaiveDate>,

        /// Uploaded file name
        #[arg(long, group = "value")]
        file: Option<String>,

        /// Uploaded file size in bytes (with --file)
        #[arg(long, requires = "file", default_value = "0")]
        size_bytes: u64,
    },

    /// Mark a step complete and advance the execution
    Complete {
        /// Execution ID
        execution_id: Uuid,

        /// Step ID within the template
        step_id: String,
    },

    /// Pause an execution
    Pause {
        /// Execution ID
        execution_id: Uuid,
    },

    /// Resume a paused execution
    Resume {
        /// Execution ID
        execution_id: Uuid,
    },

    /// Show execution status and progress
    Status {
        /// Execution ID
        execution_id: Uuid,
    },

    /// Export an execution report as JSON
    Export {
        /// Execution ID
        execution_id: Uuid,

        /// Sections to include (comma-separated: summary,steps,outputs,timeline)
        #[arg(short, long, value_delimiter = ',')]
        sections: Vec<String>,

        /// Include raw input values alongside outputs
        #[arg(long)]
        include_inputs: bool,
    },
}

#[derive(Subcommand)]
pub enum MetricsCommands {
    /// Show aggregated metrics
    Show {
        /// Restrict to one template
        #[arg(short, long)]
        template_id: Option<Uuid>,
    },
}

/// Print an error and exit non-zero.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let payload = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_default()
        );
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
