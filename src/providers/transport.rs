//! HTTP transport
//!
//! The fetcher only needs "GET this URL, give me status and body", so that is
//! the whole seam. [`ReqwestTransport`] talks to GitHub; [`ScriptedTransport`]
//! replays canned responses for tests.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::error::{ConfigError, FetchError, OrgLensError};

/// Media type for GitHub's structured JSON responses
pub const GITHUB_JSON: &str = "application/vnd.github+json";

/// Status and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `200 OK` with a JSON body
    pub fn ok(body: serde_json::Value) -> Self {
        Self::new(200, body.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can perform an authenticated GET
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue a GET. Only failures to complete the exchange are errors; any
    /// HTTP status is returned as a response.
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

/// Transport backed by a shared `reqwest` client
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a client that sends the bearer token and requests GitHub JSON
    pub fn new(
        token: &str,
        token_variable: &str,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, OrgLensError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            ConfigError::InvalidToken {
                variable: token_variable.to_string(),
            }
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport {
                url: String::new(),
                message: e.to_string(),
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let transport_error = |e: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        let resp = self.client.get(url).send().await.map_err(transport_error)?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(transport_error)?;

        tracing::trace!("GET {} -> {}", url, status);
        Ok(HttpResponse { status, body })
    }
}

/// Replays canned responses keyed by exact URL
///
/// Unknown URLs answer `404` with GitHub's usual `{"message": "Not Found"}`
/// body. Every request is recorded, in order.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<String, HttpResponse>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with `response`
    pub fn respond(self, url: impl Into<String>, response: HttpResponse) -> Self {
        self.routes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(url.into(), response);
        self
    }

    /// Serve `pages` as pages 1..=n of `endpoint`, followed by an empty page
    pub fn paginated(self, endpoint: &str, pages: Vec<serde_json::Value>) -> Self {
        let sep = if endpoint.contains('?') { '&' } else { '?' };
        let count = pages.len();
        let mut this = self;
        for (idx, page) in pages.into_iter().enumerate() {
            this = this.respond(
                format!("{}{}page={}", endpoint, sep, idx + 1),
                HttpResponse::ok(page),
            );
        }
        this.respond(
            format!("{}{}page={}", endpoint, sep, count + 1),
            HttpResponse::ok(serde_json::json!([])),
        )
    }

    /// URLs requested so far
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of requests whose URL starts with `prefix`
    pub fn count_with_prefix(&self, prefix: &str) -> usize {
        self.requests()
            .iter()
            .filter(|url| url.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(url.to_string());

        let routes = self.routes.lock().unwrap_or_else(|e| e.into_inner());
        Ok(routes.get(url).cloned().unwrap_or_else(|| {
            HttpResponse::new(404, r#"{"message":"Not Found"}"#)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_success_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(304, "").is_success());
        assert!(!HttpResponse::new(500, "").is_success());
    }

    #[tokio::test]
    async fn test_scripted_transport_records_requests() {
        let transport = ScriptedTransport::new()
            .paginated("https://api.test/orgs/acme/members", vec![json!([{"login": "alice"}])]);

        let first = transport
            .get("https://api.test/orgs/acme/members?page=1")
            .await
            .unwrap();
        assert_eq!(first.status, 200);

        let second = transport
            .get("https://api.test/orgs/acme/members?page=2")
            .await
            .unwrap();
        assert_eq!(second.body, "[]");

        let missing = transport.get("https://api.test/nowhere").await.unwrap();
        assert_eq!(missing.status, 404);

        assert_eq!(transport.requests().len(), 3);
        assert_eq!(transport.count_with_prefix("https://api.test/orgs/"), 2);
    }

    #[test]
    fn test_reqwest_transport_rejects_header_breaking_token() {
        let result = ReqwestTransport::new(
            "bad\ntoken",
            "GITHUB_TOKEN",
            "orglens",
            Duration::from_secs(5),
        );
        assert!(matches!(
            result,
            Err(OrgLensError::Config(ConfigError::InvalidToken { .. }))
        ));
    }
}
