//! Caseflow CLI entry point.

use clap::Parser;

use caseflow::cli::{Cli, Commands};
use caseflow::infrastructure::{logging, ConfigLoader};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => caseflow::cli::handle_error(err, cli.json),
    };

    if let Err(err) = logging::init(&config.logging) {
        caseflow::cli::handle_error(err, cli.json);
    }

    let result = match cli.command {
        Commands::Template(command) => {
            caseflow::cli::commands::template::execute(command, &config, cli.json).await
        }
        Commands::Run(command) => {
            caseflow::cli::commands::run::execute(command, &config, cli.json).await
        }
        Commands::Metrics(command) => {
            caseflow::cli::commands::metrics::execute(command, &config, cli.json).await
        }
    };

    if let Err(err) = result {
        caseflow::cli::handle_error(err, cli.json);
    }
}
