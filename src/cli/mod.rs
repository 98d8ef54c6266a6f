//! # CLI Module
//!
//! This module defines the command-line interface for orglens using `clap`.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `collaborators` | Find direct collaborators outside the organization |
//! | `forks` | Find collaborators of repository forks outside the organization |
//! | `cache clear` | Delete every cached entry |
//!
//! ## Submodules
//!
//! - [`commands`] - Command implementations
//! - [`exit_codes`] - Standardized exit codes
//! - [`output`] - Report output formatters (JSON, Terminal)
//!
//! ## Global Options
//!
//! - `-v, --verbose` - Increase verbosity level (use multiple times: -v, -vv, -vvv)
//! - `-c, --config <FILE>` - Path to configuration file
//!
//! ## Examples
//!
//! ```bash
//! # Audit direct collaborators
//! GITHUB_TOKEN=... orglens collaborators --organization acme
//!
//! # Audit forks without printing who forked what
//! orglens forks -o acme --shield
//!
//! # Start from a clean cache
//! orglens collaborators -o acme --clear-cache
//! ```

pub mod commands;
pub mod exit_codes;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{CacheArgs, CollaboratorsArgs, ForksArgs};

/// orglens - Find collaborators outside a GitHub organization
#[derive(Parser, Debug)]
#[command(name = "orglens")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Audit the direct collaborators of every repository
    Collaborators(CollaboratorsArgs),

    /// Audit the collaborators of every fork of every repository
    Forks(ForksArgs),

    /// Manage the cache
    Cache(CacheArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use commands::{CacheAction, OutputFormat};

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_forks_with_shield() {
        let cli = Cli::parse_from([
            "orglens", "-vv", "forks", "--organization", "acme", "--shield", "--format", "json",
        ]);

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Forks(args) => {
                assert!(args.shield);
                assert_eq!(args.audit.organization.as_deref(), Some("acme"));
                assert_eq!(args.audit.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_collaborators_cache_flags() {
        let cli = Cli::parse_from([
            "orglens",
            "collaborators",
            "-o",
            "acme",
            "--clear-cache",
            "--cache-dir",
            "/tmp/orglens",
        ]);

        match cli.command {
            Commands::Collaborators(args) => {
                assert!(args.audit.clear_cache);
                assert!(!args.audit.no_cache);
                assert_eq!(args.audit.cache_dir, Some(PathBuf::from("/tmp/orglens")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_no_cache_conflicts_with_clear_cache() {
        let result = Cli::try_parse_from([
            "orglens",
            "collaborators",
            "-o",
            "acme",
            "--clear-cache",
            "--no-cache",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_cache_clear() {
        let cli = Cli::parse_from(["orglens", "cache", "clear"]);
        match cli.command {
            Commands::Cache(args) => match args.action {
                CacheAction::Clear { cache_dir } => assert!(cache_dir.is_none()),
            },
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
