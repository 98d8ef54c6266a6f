//! Direct-collaborator audit

use serde::Serialize;

use super::{baseline, AuditOptions, Observation, RunSummary};
use crate::error::OrgLensError;
use crate::resolver::Resolver;

/// Audit of one repository's direct collaborators
#[derive(Debug, Clone, Serialize)]
pub struct RepositoryAudit {
    pub repository: String,
    #[serde(flatten)]
    pub observation: Observation,
}

/// Result of auditing every repository of an organization
#[derive(Debug, Clone, Serialize)]
pub struct CollaboratorReport {
    pub summary: RunSummary,
    pub repositories: Vec<RepositoryAudit>,
}

impl CollaboratorReport {
    /// Whether any repository has a collaborator outside the organization
    pub fn has_foreign(&self) -> bool {
        self.repositories
            .iter()
            .any(|r| !r.observation.foreign.is_empty())
    }

    /// Total foreign collaborator entries across repositories
    pub fn foreign_count(&self) -> usize {
        self.repositories
            .iter()
            .map(|r| r.observation.foreign.len())
            .sum()
    }
}

/// Compare every repository's collaborators against the organization's members
///
/// Repositories are processed one at a time, in listing order.
pub async fn audit_collaborators(
    resolver: &Resolver<'_>,
    options: &AuditOptions,
) -> Result<CollaboratorReport, OrgLensError> {
    let baseline = baseline(resolver, options).await?;
    let mut repositories = Vec::with_capacity(baseline.repositories.len());

    for repo in &baseline.repositories {
        tracing::debug!("Auditing collaborators of {}", repo.full_name);
        let resolution = resolver.collaborators(repo).await;
        let observation = Observation::from_resolution(&repo.full_name, resolution, &baseline.members);

        if !observation.foreign.is_empty() {
            tracing::info!(
                "{}: {} collaborators not in the organization",
                repo.full_name,
                observation.foreign.len()
            );
        }

        repositories.push(RepositoryAudit {
            repository: repo.full_name.clone(),
            observation,
        });
    }

    Ok(CollaboratorReport {
        summary: baseline.summary,
        repositories,
    })
}
