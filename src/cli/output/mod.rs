//! Output formatting module for CLI

pub mod json;
mod terminal;

pub use json::JsonOutput;
pub use terminal::TerminalOutput;

use crate::audit::{CollaboratorReport, ForkReport};
use crate::error::OrgLensError;

/// Trait for rendering audit reports
pub trait ReportRenderer {
    fn render_collaborators(&self, report: &CollaboratorReport) -> Result<String, OrgLensError>;

    fn render_forks(&self, report: &ForkReport) -> Result<String, OrgLensError>;
}
