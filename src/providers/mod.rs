//! # Providers Module
//!
//! This module handles the integration with the GitHub REST API.
//!
//! - [`transport`] - the HTTP seam (`reqwest` in production, scripted in tests)
//! - [`pagination`] - page-by-page fetching with a hard page cap
//! - [`template`] - parsing of GitHub's `{/placeholder}` URL templates
//! - [`github`] - the organization, member, repository, fork and
//!   collaborator endpoints
//!
//! ## Prerequisites
//!
//! Requests are authenticated with a token read from `GITHUB_TOKEN`. The
//! token needs read access to the organization's members and private
//! repositories.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use orglens::config::Config;
//! use orglens::providers::github::GitHubClient;
//!
//! # async fn run() -> Result<(), orglens::OrgLensError> {
//! let client = GitHubClient::from_env(&Config::default())?;
//! let members = client.list_members("acme").await?;
//! println!("{} members", members.len());
//! # Ok(())
//! # }
//! ```

pub mod github;
pub mod pagination;
pub mod template;
pub mod transport;
