//! Paginated fetching
//!
//! GitHub list endpoints return one JSON array per `page` query parameter.
//! [`Fetcher::fetch_pages`] walks pages from 1 until a page comes back
//! empty, accumulating records in the order received.
//!
//! # Termination
//!
//! - An empty page ends pagination normally, even when its status is not a
//!   success. That case is reported as [`Termination::EmptyErrorPage`] and
//!   logged, so it stays distinguishable from a clean end of data.
//! - A non-success status on a page with a body is a [`FetchError::Status`].
//! - Iteration is capped at `max_pages`; hitting the cap without an empty
//!   page is a [`FetchError::PageLimitExceeded`].

use serde_json::Value;
use std::sync::Arc;
use url::Url;

use super::transport::HttpTransport;
use crate::error::FetchError;

/// Default hard cap on pages requested per endpoint
pub const DEFAULT_MAX_PAGES: u32 = 10_000;

/// Why pagination stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A successful, empty page
    EndOfData,
    /// An empty page that carried a non-success status
    EmptyErrorPage { status: u16 },
}

/// Records gathered from every page of an endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Pages {
    pub records: Vec<Value>,
    /// Number of page requests issued, including the terminating one
    pub pages_requested: u32,
    pub termination: Termination,
}

/// Append the `page` query parameter to an endpoint
///
/// Uses `?` when the endpoint has no query string and `&` otherwise.
pub fn page_url(endpoint: &str, page: u32) -> Result<String, FetchError> {
    let mut url = Url::parse(endpoint).map_err(|source| FetchError::InvalidUrl {
        url: endpoint.to_string(),
        source,
    })?;
    url.query_pairs_mut()
        .append_pair("page", &page.to_string());
    Ok(url.into())
}

/// Whether a response body is the end-of-data signal
fn is_empty_page(body: &str) -> bool {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return true;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Null) => true,
        Ok(Value::Array(items)) => items.is_empty(),
        Ok(Value::Object(fields)) => fields.is_empty(),
        Ok(Value::String(s)) => s.is_empty(),
        _ => false,
    }
}

/// Issues requests against the remote API
#[derive(Clone)]
pub struct Fetcher {
    transport: Arc<dyn HttpTransport>,
    max_pages: u32,
}

impl Fetcher {
    pub fn new(transport: Arc<dyn HttpTransport>, max_pages: u32) -> Self {
        Self {
            transport,
            max_pages,
        }
    }

    /// Fetch every page of `endpoint`, reporting how pagination ended
    pub async fn fetch_pages(&self, endpoint: &str) -> Result<Pages, FetchError> {
        let mut records = Vec::new();

        for page in 1..=self.max_pages {
            let url = page_url(endpoint, page)?;
            tracing::debug!("Requesting {}", url);
            let resp = self.transport.get(&url).await?;

            if is_empty_page(&resp.body) {
                let termination = if resp.is_success() {
                    Termination::EndOfData
                } else {
                    tracing::warn!(
                        "Treating empty page {} of {} (status {}) as end of data",
                        page,
                        endpoint,
                        resp.status
                    );
                    Termination::EmptyErrorPage {
                        status: resp.status,
                    }
                };
                return Ok(Pages {
                    records,
                    pages_requested: page,
                    termination,
                });
            }

            if !resp.is_success() {
                return Err(FetchError::Status {
                    url,
                    status: resp.status,
                    body: resp.body,
                });
            }

            match serde_json::from_str::<Value>(&resp.body) {
                Ok(Value::Array(items)) => {
                    tracing::trace!("Page {} of {}: {} records", page, endpoint, items.len());
                    records.extend(items);
                }
                Ok(other) => {
                    return Err(FetchError::Decode {
                        url,
                        message: format!("expected a JSON array, got {}", json_kind(&other)),
                    });
                }
                Err(e) => {
                    return Err(FetchError::Decode {
                        url,
                        message: e.to_string(),
                    });
                }
            }
        }

        Err(FetchError::PageLimitExceeded {
            url: endpoint.to_string(),
            limit: self.max_pages,
        })
    }

    /// Fetch every record of a paginated endpoint
    pub async fn fetch_all(&self, endpoint: &str) -> Result<Vec<Value>, FetchError> {
        Ok(self.fetch_pages(endpoint).await?.records)
    }

    /// Fetch a single, non-paginated record
    ///
    /// A non-success status is logged and yields an empty object instead of
    /// an error. Transport and decode failures still propagate.
    pub async fn fetch_one(&self, endpoint: &str) -> Result<Value, FetchError> {
        let resp = self.transport.get(endpoint).await?;

        if !resp.is_success() {
            tracing::warn!(
                "Encountered error during GET request to {} ({}): {}",
                endpoint,
                resp.status,
                resp.body
            );
            return Ok(Value::Object(serde_json::Map::new()));
        }

        serde_json::from_str(&resp.body).map_err(|e| FetchError::Decode {
            url: endpoint.to_string(),
            message: e.to_string(),
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::transport::{HttpResponse, ScriptedTransport};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const MEMBERS: &str = "https://api.test/orgs/acme/members";

    fn fetcher(transport: &Arc<ScriptedTransport>, max_pages: u32) -> Fetcher {
        Fetcher::new(transport.clone(), max_pages)
    }

    #[test]
    fn test_page_url_separator() {
        assert_eq!(
            page_url(MEMBERS, 1).unwrap(),
            "https://api.test/orgs/acme/members?page=1"
        );
        assert_eq!(
            page_url("https://api.test/orgs/acme/repos?type=private", 3).unwrap(),
            "https://api.test/orgs/acme/repos?type=private&page=3"
        );
        assert!(page_url("not a url", 1).is_err());
    }

    #[test]
    fn test_empty_page_detection() {
        assert!(is_empty_page(""));
        assert!(is_empty_page("  []\n"));
        assert!(is_empty_page("{}"));
        assert!(is_empty_page("null"));
        assert!(!is_empty_page(r#"[{"login":"alice"}]"#));
        assert!(!is_empty_page(r#"{"message":"Server Error"}"#));
        assert!(!is_empty_page("<html>Bad Gateway</html>"));
    }

    #[tokio::test]
    async fn test_fetch_all_stops_at_empty_page() {
        let transport = Arc::new(ScriptedTransport::new().paginated(
            MEMBERS,
            vec![json!(["A", "B"]), json!(["C"])],
        ));

        let pages = fetcher(&transport, DEFAULT_MAX_PAGES)
            .fetch_pages(MEMBERS)
            .await
            .unwrap();

        assert_eq!(pages.records, vec![json!("A"), json!("B"), json!("C")]);
        assert_eq!(pages.pages_requested, 3);
        assert_eq!(pages.termination, Termination::EndOfData);
        assert_eq!(transport.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_all_propagates_error_page() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond(format!("{}?page=1", MEMBERS), HttpResponse::ok(json!(["A"])))
                .respond(
                    format!("{}?page=2", MEMBERS),
                    HttpResponse::new(500, r#"{"message":"Server Error"}"#),
                )
                .respond(format!("{}?page=3", MEMBERS), HttpResponse::ok(json!(["C"]))),
        );

        let err = fetcher(&transport, DEFAULT_MAX_PAGES)
            .fetch_all(MEMBERS)
            .await
            .unwrap_err();

        match err {
            FetchError::Status { url, status, body } => {
                assert_eq!(url, format!("{}?page=2", MEMBERS));
                assert_eq!(status, 500);
                assert!(body.contains("Server Error"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_error_page_ends_pagination() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond(format!("{}?page=1", MEMBERS), HttpResponse::ok(json!(["A"])))
                .respond(format!("{}?page=2", MEMBERS), HttpResponse::new(502, "")),
        );

        let pages = fetcher(&transport, DEFAULT_MAX_PAGES)
            .fetch_pages(MEMBERS)
            .await
            .unwrap();

        assert_eq!(pages.records, vec![json!("A")]);
        assert_eq!(pages.termination, Termination::EmptyErrorPage { status: 502 });
    }

    #[tokio::test]
    async fn test_page_cap_is_enforced() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond(format!("{}?page=1", MEMBERS), HttpResponse::ok(json!(["A"])))
                .respond(format!("{}?page=2", MEMBERS), HttpResponse::ok(json!(["B"])))
                .respond(format!("{}?page=3", MEMBERS), HttpResponse::ok(json!(["C"]))),
        );

        let err = fetcher(&transport, 2).fetch_all(MEMBERS).await.unwrap_err();
        assert!(matches!(err, FetchError::PageLimitExceeded { limit: 2, .. }));
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_non_array_page_is_a_decode_error() {
        let transport = Arc::new(ScriptedTransport::new().respond(
            format!("{}?page=1", MEMBERS),
            HttpResponse::ok(json!({"login": "alice"})),
        ));

        let err = fetcher(&transport, DEFAULT_MAX_PAGES)
            .fetch_all(MEMBERS)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_fetch_one_defaults_on_error_status() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond("https://api.test/orgs/acme", HttpResponse::ok(json!({"login": "acme"}))),
        );
        let fetcher = fetcher(&transport, DEFAULT_MAX_PAGES);

        let found = fetcher.fetch_one("https://api.test/orgs/acme").await.unwrap();
        assert_eq!(found["login"], "acme");

        let missing = fetcher.fetch_one("https://api.test/orgs/ghost").await.unwrap();
        assert_eq!(missing, json!({}));

        // No page parameter on single fetches.
        assert_eq!(
            transport.requests(),
            vec!["https://api.test/orgs/acme", "https://api.test/orgs/ghost"]
        );
    }
}
