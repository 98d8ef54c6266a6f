//! orglens Library
//!
//! This crate audits a GitHub organization for repository collaborators,
//! and collaborators of repository forks, who are not members of the
//! organization.
//!
//! The pieces, bottom-up:
//!
//! - [`providers`] fetches paginated listings from the REST API.
//! - [`cache`] stores fetched listings so repeated runs stay offline.
//! - [`resolver`] serves each resource from the cache or the API.
//! - [`audit`] compares collaborators against the membership set.

pub mod audit;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod providers;
pub mod resolver;

pub use error::OrgLensError;
