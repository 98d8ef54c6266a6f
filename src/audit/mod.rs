//! Access audits
//!
//! The comparison itself is [`find_foreign`]: everything else in this module
//! drives the resolvers over an organization and collects what the
//! comparison finds.
//!
//! - [`collaborators`] audits the direct collaborators of every repository.
//! - [`forks`] audits the collaborators of every fork of every repository.
//!
//! Both runners contain collaborator-listing failures per repository (or
//! fork): the failure is logged, recorded on the entry, and the listing is
//! treated as empty. Failures to list repositories, members or forks abort
//! the run.

pub mod collaborators;
pub mod forks;

pub use collaborators::{audit_collaborators, CollaboratorReport, RepositoryAudit};
pub use forks::{audit_forks, ForkAudit, ForkReport, RepositoryForks};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::OrgLensError;
use crate::model::{Identity, MembershipSet, RepositoryRef};
use crate::resolver::{Resolved, Resolver};

/// Identities in `observed` that are not in `authorized`
///
/// Keeps the order of `observed`, including any duplicates.
pub fn find_foreign(observed: &[Identity], authorized: &MembershipSet) -> Vec<Identity> {
    observed
        .iter()
        .filter(|identity| !authorized.contains(identity))
        .cloned()
        .collect()
}

/// Options shared by both audits
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditOptions {
    /// Clear the cache before resolving anything
    pub clear_cache: bool,
}

/// How a collaborator listing was obtained
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CollaboratorSource {
    /// Fetched from the API during this run
    Fetched,
    /// Served from the cache
    Cached,
    /// The listing failed and was treated as empty
    Unavailable { reason: String },
}

/// Collaborators observed on one repository or fork, and the foreign ones
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Observation {
    pub collaborators: Vec<Identity>,
    pub source: CollaboratorSource,
    pub foreign: Vec<Identity>,
}

impl Observation {
    /// Compare a collaborator resolution against the membership set
    ///
    /// A failed resolution is logged and becomes an empty observation.
    fn from_resolution(
        subject: &str,
        resolution: Result<Resolved<Vec<Identity>>, OrgLensError>,
        members: &MembershipSet,
    ) -> Self {
        match resolution {
            Ok(resolved) => {
                let foreign = find_foreign(&resolved.data, members);
                let source = if resolved.cached {
                    CollaboratorSource::Cached
                } else {
                    CollaboratorSource::Fetched
                };
                Self {
                    collaborators: resolved.data,
                    source,
                    foreign,
                }
            }
            Err(e) => {
                tracing::warn!("Could not list collaborators of {}: {}", subject, e);
                Self {
                    collaborators: Vec::new(),
                    source: CollaboratorSource::Unavailable {
                        reason: e.to_string(),
                    },
                    foreign: Vec::new(),
                }
            }
        }
    }
}

/// Header information shared by both reports
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub organization: String,
    /// Display name from the organization record, when it has one
    pub display_name: Option<String>,
    pub snapshot_at: DateTime<Utc>,
    pub repositories: usize,
    pub repositories_cached: bool,
    pub members: usize,
    pub members_cached: bool,
}

/// Everything both audits resolve before walking repositories
pub(crate) struct Baseline {
    pub summary: RunSummary,
    pub repositories: Vec<RepositoryRef>,
    pub members: MembershipSet,
}

/// Display name from the organization record
///
/// The header is cosmetic, so a failed lookup only loses the name.
async fn lookup_display_name(resolver: &Resolver<'_>, organization: &str) -> Option<String> {
    match resolver.client().organization(organization).await {
        Ok(record) => record
            .get("name")
            .and_then(|name| name.as_str())
            .filter(|name| !name.trim().is_empty())
            .map(str::to_string),
        Err(e) => {
            tracing::debug!("Organization lookup failed: {}", e);
            None
        }
    }
}

/// Clear the cache if asked, then resolve repositories, members and,
/// unless both came from the cache, the organization record
pub(crate) async fn baseline(
    resolver: &Resolver<'_>,
    options: &AuditOptions,
) -> Result<Baseline, OrgLensError> {
    if options.clear_cache {
        resolver.clear_cache()?;
        tracing::info!("Cleared all cached data");
    }

    let organization = resolver.organization().to_string();

    let repositories = resolver.repositories().await?;
    tracing::info!(
        "Found {} repos for the {} organization{}",
        repositories.data.len(),
        organization,
        if repositories.cached { " (cached)" } else { "" }
    );

    let members = resolver.members().await?;
    tracing::info!(
        "Found {} members for the {} organization{}",
        members.data.len(),
        organization,
        if members.cached { " (cached)" } else { "" }
    );

    // A run served entirely from the cache stays offline.
    let display_name = if repositories.cached && members.cached {
        None
    } else {
        lookup_display_name(resolver, &organization).await
    };

    Ok(Baseline {
        summary: RunSummary {
            organization,
            display_name,
            snapshot_at: Utc::now(),
            repositories: repositories.data.len(),
            repositories_cached: repositories.cached,
            members: members.data.len(),
            members_cached: members.cached,
        },
        repositories: repositories.data,
        members: members.data,
    })
}
