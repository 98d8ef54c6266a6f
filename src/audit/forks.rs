//! Fork audit
//!
//! Forks of private repositories keep their own collaborator lists. For
//! every fork, the fork's collaborators are compared against the
//! organization's members.

use serde::Serialize;

use super::{baseline, AuditOptions, CollaboratorSource, Observation, RunSummary};
use crate::error::OrgLensError;
use crate::model::Identity;
use crate::resolver::Resolver;

/// Audit of a single fork
#[derive(Debug, Clone, Serialize)]
pub struct ForkAudit {
    pub owner: Identity,
    #[serde(flatten)]
    pub observation: Observation,
}

/// Forks of one organization repository
#[derive(Debug, Clone, Serialize)]
pub struct RepositoryForks {
    pub repository: String,
    /// Number of forks listed for the repository
    pub fork_count: usize,
    pub forks_cached: bool,
    /// Forks with at least one collaborator, or whose listing failed
    pub forks: Vec<ForkAudit>,
}

/// Result of auditing every fork of every repository
///
/// Repositories without forks do not appear.
#[derive(Debug, Clone, Serialize)]
pub struct ForkReport {
    pub summary: RunSummary,
    pub repositories: Vec<RepositoryForks>,
}

impl ForkReport {
    /// Whether any fork has a collaborator outside the organization
    pub fn has_foreign(&self) -> bool {
        self.repositories
            .iter()
            .flat_map(|r| &r.forks)
            .any(|f| !f.observation.foreign.is_empty())
    }

    /// Total foreign collaborator entries across forks
    pub fn foreign_count(&self) -> usize {
        self.repositories
            .iter()
            .flat_map(|r| &r.forks)
            .map(|f| f.observation.foreign.len())
            .sum()
    }
}

/// Compare every fork's collaborators against the organization's members
///
/// Repositories, and forks within a repository, are processed one at a
/// time. A failure to list a repository's forks aborts the run.
pub async fn audit_forks(
    resolver: &Resolver<'_>,
    options: &AuditOptions,
) -> Result<ForkReport, OrgLensError> {
    let baseline = baseline(resolver, options).await?;
    let mut repositories = Vec::new();

    for repo in &baseline.repositories {
        let forks = resolver.forks(repo).await?;
        if forks.data.is_empty() {
            continue;
        }
        tracing::debug!("Found {} forks of {}", forks.data.len(), repo.full_name);

        let mut audited = Vec::new();
        for fork in &forks.data {
            let subject = format!("{}'s fork of {}", fork.owner, fork.parent_name);
            let resolution = resolver.fork_collaborators(fork).await;
            let observation = Observation::from_resolution(&subject, resolution, &baseline.members);

            let failed = matches!(observation.source, CollaboratorSource::Unavailable { .. });
            if observation.collaborators.is_empty() && !failed {
                tracing::trace!("Skipping {}: no collaborators", subject);
                continue;
            }

            audited.push(ForkAudit {
                owner: fork.owner.clone(),
                observation,
            });
        }

        repositories.push(RepositoryForks {
            repository: repo.full_name.clone(),
            fork_count: forks.data.len(),
            forks_cached: forks.cached,
            forks: audited,
        });
    }

    Ok(ForkReport {
        summary: baseline.summary,
        repositories,
    })
}
