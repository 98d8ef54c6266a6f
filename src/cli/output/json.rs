//! JSON output formatting

use serde::Serialize;
use serde_json::Value;

use super::ReportRenderer;
use crate::audit::{CollaboratorReport, ForkReport};
use crate::error::OrgLensError;

pub struct JsonOutput {
    shield: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { shield: false }
    }

    /// Drop per-fork detail from fork reports
    pub fn shielded(shield: bool) -> Self {
        Self { shield }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    version: &'static str,
    audit: &'static str,
    foreign_count: usize,
    #[serde(flatten)]
    report: &'a T,
}

impl ReportRenderer for JsonOutput {
    fn render_collaborators(&self, report: &CollaboratorReport) -> Result<String, OrgLensError> {
        let output = Envelope {
            version: env!("CARGO_PKG_VERSION"),
            audit: "collaborators",
            foreign_count: report.foreign_count(),
            report,
        };
        Ok(serde_json::to_string_pretty(&output)?)
    }

    fn render_forks(&self, report: &ForkReport) -> Result<String, OrgLensError> {
        let output = Envelope {
            version: env!("CARGO_PKG_VERSION"),
            audit: "forks",
            foreign_count: report.foreign_count(),
            report,
        };
        let mut value = serde_json::to_value(&output)?;

        if self.shield {
            if let Some(Value::Array(repos)) = value.get_mut("repositories") {
                for repo in repos.iter_mut().filter_map(Value::as_object_mut) {
                    repo.remove("forks");
                }
            }
        }

        Ok(serde_json::to_string_pretty(&value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{
        CollaboratorSource, ForkAudit, Observation, RepositoryAudit, RepositoryForks, RunSummary,
    };
    use crate::model::Identity;
    use chrono::Utc;

    fn summary() -> RunSummary {
        RunSummary {
            organization: "acme".to_string(),
            display_name: None,
            snapshot_at: Utc::now(),
            repositories: 1,
            repositories_cached: false,
            members: 2,
            members_cached: false,
        }
    }

    fn carol_observation() -> Observation {
        Observation {
            collaborators: vec![Identity::from("alice"), Identity::from("carol")],
            source: CollaboratorSource::Fetched,
            foreign: vec![Identity::from("carol")],
        }
    }

    #[test]
    fn test_render_collaborators() {
        let report = CollaboratorReport {
            summary: summary(),
            repositories: vec![RepositoryAudit {
                repository: "acme/widgets".to_string(),
                observation: carol_observation(),
            }],
        };

        let rendered = JsonOutput::new().render_collaborators(&report).unwrap();
        let json: Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(json["audit"], "collaborators");
        assert_eq!(json["foreign_count"], 1);
        assert_eq!(json["summary"]["organization"], "acme");
        assert_eq!(json["repositories"][0]["repository"], "acme/widgets");
        assert_eq!(json["repositories"][0]["foreign"][0], "carol");
        assert_eq!(json["repositories"][0]["source"]["status"], "fetched");
    }

    #[test]
    fn test_render_forks_shielded_drops_detail() {
        let report = ForkReport {
            summary: summary(),
            repositories: vec![RepositoryForks {
                repository: "acme/widgets".to_string(),
                fork_count: 1,
                forks_cached: false,
                forks: vec![ForkAudit {
                    owner: Identity::from("mallory"),
                    observation: carol_observation(),
                }],
            }],
        };

        let full: Value =
            serde_json::from_str(&JsonOutput::new().render_forks(&report).unwrap()).unwrap();
        assert_eq!(full["repositories"][0]["forks"][0]["owner"], "mallory");

        let shielded: Value =
            serde_json::from_str(&JsonOutput::shielded(true).render_forks(&report).unwrap())
                .unwrap();
        assert_eq!(shielded["repositories"][0]["fork_count"], 1);
        assert!(shielded["repositories"][0].get("forks").is_none());
        assert_eq!(shielded["foreign_count"], 1);
    }
}
