//! Cache command - Manage the on-disk cache

use colored::Colorize;
use std::path::Path;

use super::{apply_cache_overrides, open_cache, CacheAction, CacheArgs};
use crate::cache::CacheStore;
use crate::cli::exit_codes;
use crate::config::Config;
use crate::error::OrgLensError;

pub async fn execute(args: CacheArgs, config_path: Option<&Path>) -> Result<i32, OrgLensError> {
    let mut config = Config::load(config_path)?;

    match args.action {
        CacheAction::Clear { cache_dir } => {
            apply_cache_overrides(&mut config, false, cache_dir.as_deref());
            // Clearing works even when caching is disabled for audits.
            config.cache.enabled = true;

            open_cache(&config).clear_all()?;
            eprintln!(
                "{} Cleared cache at {}",
                "Success:".green().bold(),
                config.cache.directory.cyan()
            );
        }
    }

    Ok(exit_codes::SUCCESS)
}
