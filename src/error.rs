//! Error types for OrgLens
//!
//! This module defines custom error types using `thiserror`. The top-level
//! [`OrgLensError`] wraps one enum per concern so callers can decide which
//! failures abort a run and which are contained.

use thiserror::Error;

/// Main error type for OrgLens
#[derive(Error, Debug)]
pub enum OrgLensError {
    /// Configuration errors, always fatal and raised before any network access
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Remote fetch errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Cache storage errors
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The API token is not present in the environment
    #[error("{variable} missing from environment")]
    MissingToken {
        /// Name of the environment variable that was read
        variable: String,
    },

    /// The API token cannot be sent as an HTTP header
    #[error("{variable} contains characters that are not valid in an HTTP header")]
    InvalidToken {
        /// Name of the environment variable that was read
        variable: String,
    },

    /// No organization was given on the command line or in the environment
    #[error("Organization required to run the audit (use --organization or set ORGANIZATION)")]
    MissingOrganization,

    /// Failed to read the configuration file
    #[error("Failed to read configuration file '{path}': {source}")]
    FileRead {
        /// Path to the configuration file
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Failed to parse the configuration file
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// An endpoint URL template could not be parsed
    #[error("Invalid URL template '{template}': {reason}")]
    InvalidTemplate {
        /// The offending template
        template: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Errors raised while talking to the remote API
#[derive(Error, Debug)]
pub enum FetchError {
    /// A request returned a non-success status on a page that carried data
    #[error("Encountered error during GET request to {url} ({status}): {body}")]
    Status {
        /// The URL of the failing request, including the page parameter
        url: String,
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Pagination did not end within the configured page cap
    #[error("Pagination of {url} did not terminate within {limit} pages")]
    PageLimitExceeded {
        /// The endpoint being paginated
        url: String,
        /// The page cap that was reached
        limit: u32,
    },

    /// The request could not be sent or its body could not be read
    #[error("Request to {url} failed: {message}")]
    Transport {
        /// The URL of the failing request
        url: String,
        /// Description of the transport failure
        message: String,
    },

    /// A successful response carried a body that is not the expected JSON
    #[error("Unexpected response body from {url}: {message}")]
    Decode {
        /// The URL of the request
        url: String,
        /// Description of the decode failure
        message: String,
    },

    /// The endpoint is not a valid absolute URL
    #[error("Invalid endpoint URL '{url}': {source}")]
    InvalidUrl {
        /// The rejected URL
        url: String,
        /// The underlying parse error
        source: url::ParseError,
    },
}

/// Errors raised by the cache store
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to create the directories holding an entry
    #[error("Could not create cache directory '{path}': {source}")]
    CreateDir {
        /// Directory that could not be created
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Failed to write an entry
    #[error("Could not write cache entry '{path}': {source}")]
    Write {
        /// File that could not be written
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Failed to remove the cache tree
    #[error("Could not remove cache directory '{path}': {source}")]
    Remove {
        /// Directory that could not be removed
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Failed to encode a payload
    #[error("Could not encode cache entry '{key}': {source}")]
    Serialize {
        /// Cache key of the entry
        key: String,
        /// The underlying JSON error
        source: serde_json::Error,
    },
}

impl OrgLensError {
    /// Whether this error stems from configuration rather than runtime I/O
    pub fn is_config(&self) -> bool {
        matches!(self, OrgLensError::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_mentions_url_and_body() {
        let err = FetchError::Status {
            url: "https://api.github.com/orgs/acme/members?page=2".to_string(),
            status: 500,
            body: "boom".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("orgs/acme/members?page=2"));
        assert!(message.contains("500"));
        assert!(message.contains("boom"));
    }

    #[test]
    fn test_config_errors_are_classified() {
        let err: OrgLensError = ConfigError::MissingOrganization.into();
        assert!(err.is_config());

        let err: OrgLensError = FetchError::PageLimitExceeded {
            url: "https://example.test".to_string(),
            limit: 3,
        }
        .into();
        assert!(!err.is_config());
    }

    #[test]
    fn test_missing_token_message() {
        let err = ConfigError::MissingToken {
            variable: "GITHUB_TOKEN".to_string(),
        };
        assert_eq!(err.to_string(), "GITHUB_TOKEN missing from environment");
    }
}
