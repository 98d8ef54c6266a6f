//! Forks command - Audit collaborators of repository forks

use std::path::Path;

use super::{open_cache, prepare, ForksArgs};
use crate::audit::audit_forks;
use crate::cli::exit_codes;
use crate::error::OrgLensError;
use crate::providers::github::GitHubClient;
use crate::resolver::Resolver;

/// Execute the forks command
///
/// Shield mode hides forker identities from the output only; the audit
/// and the exit code are unaffected.
pub async fn execute(args: ForksArgs, config_path: Option<&Path>) -> Result<i32, OrgLensError> {
    let prepared = prepare(config_path, &args.audit)?;
    let client = GitHubClient::from_env(&prepared.config)?;
    let cache = open_cache(&prepared.config);
    let resolver = Resolver::new(&client, cache.as_ref(), prepared.organization);

    let report = audit_forks(&resolver, &prepared.options).await?;

    let rendered = args.audit.format.renderer(args.shield).render_forks(&report)?;
    println!("{}", rendered);

    Ok(if report.has_foreign() {
        exit_codes::FOREIGN_FOUND
    } else {
        exit_codes::SUCCESS
    })
}
