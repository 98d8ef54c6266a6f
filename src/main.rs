//! orglens - Find collaborators outside a GitHub organization
//!
//! This is the main entry point for the CLI application.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use orglens::cli::{self, exit_codes, Cli, Commands};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    let config_path = cli.config.as_deref();

    // Execute the appropriate command
    let result = match cli.command {
        Commands::Collaborators(args) => cli::commands::collaborators::execute(args, config_path).await,
        Commands::Forks(args) => cli::commands::forks::execute(args, config_path).await,
        Commands::Cache(args) => cli::commands::cache::execute(args, config_path).await,
    };

    // Handle exit codes for scheduled runs
    match result {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            let code = if e.is_config() {
                exit_codes::CONFIG_ERROR
            } else {
                exit_codes::ERROR
            };
            std::process::exit(code);
        }
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Reports go to stdout; keep diagnostics on stderr.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}
