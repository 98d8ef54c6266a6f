//! CLI commands module

pub mod cache;
pub mod collaborators;
pub mod forks;

use clap::{Args, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use crate::audit::AuditOptions;
use crate::cache::{self as cache_store, CacheStore};
use crate::cli::output::{JsonOutput, ReportRenderer, TerminalOutput};
use crate::config::{loader::require_organization, Config, ORGANIZATION_ENV};
use crate::error::OrgLensError;

/// Options shared by both audit commands
#[derive(Args, Debug, Clone)]
pub struct AuditArgs {
    /// GitHub organization to audit
    #[arg(short, long, env = ORGANIZATION_ENV, value_name = "ORG")]
    pub organization: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "terminal")]
    pub format: OutputFormat,

    /// Clear the cache before running the audit
    #[arg(long)]
    pub clear_cache: bool,

    /// Disable the cache: nothing is read or written
    #[arg(long, conflicts_with = "clear_cache")]
    pub no_cache: bool,

    /// Custom cache directory path
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,
}

/// Arguments for the collaborators command
#[derive(Args, Debug)]
pub struct CollaboratorsArgs {
    #[command(flatten)]
    pub audit: AuditArgs,
}

/// Arguments for the forks command
#[derive(Args, Debug)]
pub struct ForksArgs {
    #[command(flatten)]
    pub audit: AuditArgs,

    /// Only print fork counts, never forker identities
    #[arg(short, long)]
    pub shield: bool,
}

/// Arguments for the cache command
#[derive(Args, Debug)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub action: CacheAction,
}

#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Delete every cached entry
    Clear {
        /// Custom cache directory path
        #[arg(long, value_name = "DIR")]
        cache_dir: Option<PathBuf>,
    },
}

/// Output format for audit reports
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl OutputFormat {
    pub fn renderer(self, shield: bool) -> Box<dyn ReportRenderer> {
        match self {
            OutputFormat::Terminal => Box::new(TerminalOutput::shielded(shield)),
            OutputFormat::Json => Box::new(JsonOutput::shielded(shield)),
        }
    }
}

/// Everything an audit command needs before touching the network
pub(crate) struct Prepared {
    pub config: Config,
    pub organization: String,
    pub options: AuditOptions,
}

/// Load configuration and validate the organization
pub(crate) fn prepare(config_path: Option<&Path>, args: &AuditArgs) -> Result<Prepared, OrgLensError> {
    let mut config = Config::load(config_path)?;
    let organization = require_organization(args.organization.clone())?;

    apply_cache_overrides(&mut config, args.no_cache, args.cache_dir.as_deref());

    Ok(Prepared {
        config,
        organization,
        options: AuditOptions {
            clear_cache: args.clear_cache,
        },
    })
}

/// Command-line cache flags take precedence over the configuration file
pub(crate) fn apply_cache_overrides(config: &mut Config, no_cache: bool, cache_dir: Option<&Path>) {
    if no_cache {
        config.cache.enabled = false;
    }
    if let Some(dir) = cache_dir {
        config.cache.directory = dir.display().to_string();
    }
}

/// Open the cache relative to the working directory
pub(crate) fn open_cache(config: &Config) -> Box<dyn CacheStore> {
    cache_store::open(Path::new("."), &config.cache)
}
