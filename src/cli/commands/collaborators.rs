//! Collaborators command - Audit direct repository collaborators

use std::path::Path;

use super::{open_cache, prepare, CollaboratorsArgs};
use crate::audit::audit_collaborators;
use crate::cli::exit_codes;
use crate::error::OrgLensError;
use crate::providers::github::GitHubClient;
use crate::resolver::Resolver;

/// Execute the collaborators command
///
/// Returns [`exit_codes::FOREIGN_FOUND`] when any repository has a
/// collaborator outside the organization.
pub async fn execute(args: CollaboratorsArgs, config_path: Option<&Path>) -> Result<i32, OrgLensError> {
    let prepared = prepare(config_path, &args.audit)?;
    let client = GitHubClient::from_env(&prepared.config)?;
    let cache = open_cache(&prepared.config);
    let resolver = Resolver::new(&client, cache.as_ref(), prepared.organization);

    let report = audit_collaborators(&resolver, &prepared.options).await?;

    let rendered = args.audit.format.renderer(false).render_collaborators(&report)?;
    println!("{}", rendered);

    Ok(if report.has_foreign() {
        exit_codes::FOREIGN_FOUND
    } else {
        exit_codes::SUCCESS
    })
}
