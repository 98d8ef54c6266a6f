//! GitHub provider - Listing endpoints of the GitHub REST API

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use super::pagination::Fetcher;
use super::template::UrlTemplate;
use super::transport::{HttpTransport, ReqwestTransport};
use crate::config::{loader::token_from_env, Config, GitHubConfig, TOKEN_ENV};
use crate::error::{ConfigError, FetchError, OrgLensError};

const ORG_VARIABLES: &[&str] = &["api", "org"];
const REPO_VARIABLES: &[&str] = &["api", "repo"];

/// Parse an endpoint template that may only use the `allowed` variables
fn endpoint(template: &str, allowed: &[&str]) -> Result<UrlTemplate, ConfigError> {
    let parsed = UrlTemplate::parse(template)?;
    if let Some(unknown) = parsed.placeholders().find(|name| !allowed.contains(name)) {
        return Err(ConfigError::InvalidTemplate {
            template: template.to_string(),
            reason: format!(
                "unknown placeholder '{}' (expected {})",
                unknown,
                allowed.join(", ")
            ),
        });
    }
    Ok(parsed)
}

/// Endpoint templates resolved from configuration
#[derive(Debug, Clone)]
pub struct Endpoints {
    api_url: String,
    members: UrlTemplate,
    repositories: UrlTemplate,
    forks: UrlTemplate,
    organization: UrlTemplate,
}

impl Endpoints {
    pub fn from_config(config: &GitHubConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            members: endpoint(&config.members_url, ORG_VARIABLES)?,
            repositories: endpoint(&config.repositories_url, ORG_VARIABLES)?,
            forks: endpoint(&config.forks_url, REPO_VARIABLES)?,
            organization: endpoint(&config.organization_url, ORG_VARIABLES)?,
        })
    }

    pub fn members(&self, organization: &str) -> String {
        self.members
            .expand(&[("api", self.api_url.as_str()), ("org", organization)])
    }

    pub fn repositories(&self, organization: &str) -> String {
        self.repositories
            .expand(&[("api", self.api_url.as_str()), ("org", organization)])
    }

    pub fn forks(&self, repository: &str) -> String {
        self.forks
            .expand(&[("api", self.api_url.as_str()), ("repo", repository)])
    }

    pub fn organization(&self, organization: &str) -> String {
        self.organization
            .expand(&[("api", self.api_url.as_str()), ("org", organization)])
    }
}

/// GitHub provider for organization audits
#[derive(Clone)]
pub struct GitHubClient {
    fetcher: Fetcher,
    endpoints: Endpoints,
}

impl GitHubClient {
    pub fn new(transport: Arc<dyn HttpTransport>, config: &Config) -> Result<Self, OrgLensError> {
        Ok(Self {
            fetcher: Fetcher::new(transport, config.fetch.max_pages),
            endpoints: Endpoints::from_config(&config.github)?,
        })
    }

    /// Create a client authenticated with the `GITHUB_TOKEN` environment variable
    ///
    /// Fails before any network access when the token is missing.
    pub fn from_env(config: &Config) -> Result<Self, OrgLensError> {
        let token = token_from_env()?;
        let transport = ReqwestTransport::new(
            &token,
            TOKEN_ENV,
            &config.github.user_agent,
            Duration::from_secs(config.github.timeout_secs),
        )?;
        Self::new(Arc::new(transport), config)
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Organization members
    pub async fn list_members(&self, organization: &str) -> Result<Vec<Value>, FetchError> {
        self.fetcher
            .fetch_all(&self.endpoints.members(organization))
            .await
    }

    /// Organization repositories, as selected by the repositories endpoint
    pub async fn list_repositories(&self, organization: &str) -> Result<Vec<Value>, FetchError> {
        self.fetcher
            .fetch_all(&self.endpoints.repositories(organization))
            .await
    }

    /// Forks of a repository, by full name
    pub async fn list_forks(&self, repository: &str) -> Result<Vec<Value>, FetchError> {
        self.fetcher.fetch_all(&self.endpoints.forks(repository)).await
    }

    /// Collaborators of a repository or fork, from its listing endpoint
    pub async fn list_collaborators(&self, collaborators_url: &str) -> Result<Vec<Value>, FetchError> {
        self.fetcher.fetch_all(collaborators_url).await
    }

    /// The organization record; an error status yields an empty object
    pub async fn organization(&self, organization: &str) -> Result<Value, FetchError> {
        self.fetcher
            .fetch_one(&self.endpoints.organization(organization))
            .await
    }
}
