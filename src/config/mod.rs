//! Configuration module

pub mod loader;

pub use loader::Config;

use serde::{Deserialize, Serialize};

use crate::providers::pagination::DEFAULT_MAX_PAGES;

/// Environment variable holding the API token
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Environment variable supplying the default organization
pub const ORGANIZATION_ENV: &str = "ORGANIZATION";

/// GitHub API configuration
///
/// Endpoint settings are URL templates. `{api}` expands to `api_url`,
/// `{org}` to the audited organization and `{repo}` to a repository's
/// full name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// Base URL of the REST API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Organization members listing
    #[serde(default = "default_members_url")]
    pub members_url: String,

    /// Organization repositories listing (private repositories by default)
    #[serde(default = "default_repositories_url")]
    pub repositories_url: String,

    /// Repository forks listing
    #[serde(default = "default_forks_url")]
    pub forks_url: String,

    /// Organization record, used for the report header
    #[serde(default = "default_organization_url")]
    pub organization_url: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_members_url() -> String {
    "{api}/orgs/{org}/members".to_string()
}

fn default_repositories_url() -> String {
    "{api}/orgs/{org}/repos?type=private".to_string()
}

fn default_forks_url() -> String {
    "{api}/repos/{repo}/forks".to_string()
}

fn default_organization_url() -> String {
    "{api}/orgs/{org}".to_string()
}

fn default_user_agent() -> String {
    format!("orglens/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            members_url: default_members_url(),
            repositories_url: default_repositories_url(),
            forks_url: default_forks_url(),
            organization_url: default_organization_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Pagination configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Hard cap on pages requested per endpoint
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

fn default_max_pages() -> u32 {
    DEFAULT_MAX_PAGES
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}
