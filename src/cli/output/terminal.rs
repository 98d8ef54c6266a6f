//! Terminal output formatting with colors

use chrono::SecondsFormat;
use colored::Colorize;

use super::ReportRenderer;
use crate::audit::{CollaboratorReport, CollaboratorSource, ForkReport, Observation, RunSummary};
use crate::error::OrgLensError;

const INDENT_REPO: &str = "        ";
const INDENT_DETAIL: &str = "            ";
const INDENT_IDENTITY: &str = "                ";

pub struct TerminalOutput {
    shield: bool,
}

impl TerminalOutput {
    pub fn new() -> Self {
        Self { shield: false }
    }

    /// Suppress per-fork detail in fork reports
    pub fn shielded(shield: bool) -> Self {
        Self { shield }
    }

    fn format_header(&self, summary: &RunSummary) -> String {
        let organization = match &summary.display_name {
            Some(name) => format!("{} ({})", name, summary.organization),
            None => summary.organization.clone(),
        };

        format!(
            r#"
{} v{}

{} {}
{} {}

"#,
            "orglens".cyan().bold(),
            env!("CARGO_PKG_VERSION"),
            "Organization:".dimmed(),
            organization.white().bold(),
            "Snapshot:".dimmed(),
            summary
                .snapshot_at
                .to_rfc3339_opts(SecondsFormat::Secs, true)
                .yellow()
        )
    }

    fn format_counts(&self, summary: &RunSummary) -> String {
        format!(
            "{}\n{}\n",
            found_line(
                summary.repositories,
                "repos",
                &summary.organization,
                summary.repositories_cached
            ),
            found_line(
                summary.members,
                "members",
                &summary.organization,
                summary.members_cached
            )
        )
    }

    fn format_observation(&self, subject: &str, observation: &Observation, organization: &str) -> String {
        let mut output = String::new();

        match &observation.source {
            CollaboratorSource::Cached => {
                output.push_str(&format!(
                    "{}{}\n",
                    INDENT_DETAIL,
                    format!("Using cached collaborators for {}", subject).dimmed()
                ));
            }
            CollaboratorSource::Unavailable { reason } => {
                output.push_str(&format!("{}{}\n", INDENT_DETAIL, reason.red()));
            }
            CollaboratorSource::Fetched => {}
        }

        if !observation.foreign.is_empty() {
            output.push_str(&format!(
                "{}- {} found {} collaborators not in the {} organization.\n",
                INDENT_DETAIL,
                "Potential security vulnerability:".red().bold(),
                observation.foreign.len(),
                organization
            ));
            for identity in &observation.foreign {
                output.push_str(&format!("{}- {}\n", INDENT_IDENTITY, identity.as_str().yellow()));
            }
        }

        output
    }

    fn format_summary(&self, foreign: usize, audited: usize, unavailable: usize, what: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{}\n{}\n\n",
            "━".repeat(50).dimmed(),
            "  SUMMARY".bold()
        ));

        let count = if foreign > 0 {
            foreign.to_string().red().bold()
        } else {
            foreign.to_string().green().bold()
        };
        output.push_str(&format!(
            "Foreign collaborators: {} │ {}: {}\n",
            count,
            what,
            audited.to_string().bold()
        ));

        if unavailable > 0 {
            output.push_str(&format!(
                "\n{} {} collaborator listing(s) could not be read and were treated as empty.\n",
                "⚠️ ".yellow(),
                unavailable
            ));
        }

        output
    }
}

fn found_line(count: usize, what: &str, organization: &str, cached: bool) -> String {
    let line = format!("Found {} {} for the {} organization", count, what, organization);
    if cached {
        format!("{} {}", line, "(Cached)".dimmed())
    } else {
        line
    }
}

fn is_unavailable(observation: &Observation) -> bool {
    matches!(observation.source, CollaboratorSource::Unavailable { .. })
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for TerminalOutput {
    fn render_collaborators(&self, report: &CollaboratorReport) -> Result<String, OrgLensError> {
        let organization = &report.summary.organization;
        let mut output = String::new();

        output.push_str(&self.format_header(&report.summary));
        output.push_str(&self.format_counts(&report.summary));

        for audit in &report.repositories {
            output.push_str(&format!("{}- {}\n", INDENT_REPO, audit.repository.cyan()));
            output.push_str(&self.format_observation(&audit.repository, &audit.observation, organization));
        }

        let unavailable = report
            .repositories
            .iter()
            .filter(|r| is_unavailable(&r.observation))
            .count();
        output.push_str(&self.format_summary(
            report.foreign_count(),
            report.repositories.len(),
            unavailable,
            "Repositories",
        ));

        Ok(output)
    }

    fn render_forks(&self, report: &ForkReport) -> Result<String, OrgLensError> {
        let organization = &report.summary.organization;
        let mut output = String::new();

        output.push_str(&self.format_header(&report.summary));
        output.push_str(&self.format_counts(&report.summary));

        for repo in &report.repositories {
            output.push_str(&format!(
                "Found {} forks of repo: {}{}\n",
                repo.fork_count,
                repo.repository.cyan(),
                if repo.forks_cached { " (Cached)" } else { "" }
            ));

            if self.shield {
                continue;
            }

            output.push_str("    Forkers:\n");
            for fork in &repo.forks {
                output.push_str(&format!("{}- {}\n", INDENT_REPO, fork.owner));
                let subject = format!("{}/{}", fork.owner, repo.repository);
                output.push_str(&self.format_observation(&subject, &fork.observation, organization));
            }
        }

        let forks: Vec<_> = report.repositories.iter().flat_map(|r| &r.forks).collect();
        let unavailable = forks.iter().filter(|f| is_unavailable(&f.observation)).count();
        output.push_str(&self.format_summary(
            report.foreign_count(),
            report.repositories.iter().map(|r| r.fork_count).sum(),
            unavailable,
            "Forks",
        ));

        Ok(output)
    }
}
