//! Configuration loader

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::cache::CacheConfig;
use crate::error::{ConfigError, OrgLensError};

use super::{FetchConfig, GitHubConfig, TOKEN_ENV};

const CONFIG_FILENAME: &str = ".orglens.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// GitHub API configuration
    #[serde(default)]
    pub github: GitHubConfig,

    /// Pagination configuration
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Load configuration from file or return default
    pub fn load_or_default() -> Result<Self, OrgLensError> {
        let config_path = Path::new(CONFIG_FILENAME);

        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, OrgLensError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(ConfigError::from)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from `path` when given, otherwise from the working directory
    pub fn load(path: Option<&Path>) -> Result<Self, OrgLensError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load_or_default(),
        }
    }
}

/// Read the API token from the environment
///
/// An unset or blank variable is a fatal configuration error.
pub fn token_from_env() -> Result<String, ConfigError> {
    match std::env::var(TOKEN_ENV) {
        Ok(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(ConfigError::MissingToken {
            variable: TOKEN_ENV.to_string(),
        }),
    }
}

/// Validate the organization after command-line and environment defaulting
pub fn require_organization(organization: Option<String>) -> Result<String, ConfigError> {
    organization
        .map(|org| org.trim().to_string())
        .filter(|org| !org.is_empty())
        .ok_or(ConfigError::MissingOrganization)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.github.repositories_url, "{api}/orgs/{org}/repos?type=private");
        assert_eq!(config.fetch.max_pages, 10_000);
        assert!(config.cache.enabled);
    }

    #[test]
    fn test_partial_config_parsing() {
        let toml_content = r#"
[github]
api_url = "https://github.example.com/api/v3"
timeout_secs = 10

[fetch]
max_pages = 50

[cache]
directory = "/tmp/orglens-cache"
"#;
        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.github.api_url, "https://github.example.com/api/v3");
        assert_eq!(config.github.timeout_secs, 10);
        assert_eq!(config.github.members_url, "{api}/orgs/{org}/members");
        assert_eq!(config.fetch.max_pages, 50);
        assert_eq!(config.cache.directory, "/tmp/orglens-cache");
        assert!(config.cache.enabled);
    }

    #[test]
    fn test_load_from_file_errors() {
        let temp_dir = TempDir::new().unwrap();

        let missing = Config::load_from_file(&temp_dir.path().join("absent.toml"));
        assert!(matches!(
            missing,
            Err(OrgLensError::Config(ConfigError::FileRead { .. }))
        ));

        let broken = temp_dir.path().join("broken.toml");
        fs::write(&broken, "[fetch]\nmax_pages = \"lots\"\n").unwrap();
        assert!(matches!(
            Config::load_from_file(&broken),
            Err(OrgLensError::Config(ConfigError::Parse(_)))
        ));
    }

    #[test]
    fn test_require_organization() {
        assert_eq!(require_organization(Some("acme".into())).unwrap(), "acme");
        assert!(require_organization(Some("  ".into())).is_err());
        assert!(require_organization(None).is_err());
    }

    #[test]
    #[serial]
    fn test_token_from_env() {
        let previous = std::env::var(TOKEN_ENV).ok();

        std::env::remove_var(TOKEN_ENV);
        assert!(matches!(
            token_from_env(),
            Err(ConfigError::MissingToken { .. })
        ));

        std::env::set_var(TOKEN_ENV, "ghp_example");
        assert_eq!(token_from_env().unwrap(), "ghp_example");

        match previous {
            Some(value) => std::env::set_var(TOKEN_ENV, value),
            None => std::env::remove_var(TOKEN_ENV),
        }
    }
}
