//! Audit data model
//!
//! Snapshots built once per run: identities, repository and fork handles,
//! and the organization's membership set. Nothing here is mutated after
//! construction.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// An account login, compared by exact (case-sensitive) string equality
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(login: impl Into<String>) -> Self {
        Self(login.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(login: &str) -> Self {
        Self::new(login)
    }
}

impl From<String> for Identity {
    fn from(login: String) -> Self {
        Self(login)
    }
}

/// A repository of the audited organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRef {
    /// `owner/name`
    pub full_name: String,
    /// Base endpoint listing the repository's collaborators
    pub collaborators_url: String,
}

/// One fork of an organization repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForkRef {
    /// Full name of the forked (parent) repository
    pub parent_name: String,
    /// Login owning the fork
    pub owner: Identity,
    /// Base endpoint listing the fork's collaborators
    pub collaborators_url: String,
}

/// The organization's recognized members
///
/// Serialized as a plain list of logins so the cached form stays readable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Identity>", into = "Vec<Identity>")]
pub struct MembershipSet {
    members: HashSet<Identity>,
}

impl MembershipSet {
    pub fn contains(&self, identity: &Identity) -> bool {
        self.members.contains(identity)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl FromIterator<Identity> for MembershipSet {
    fn from_iter<I: IntoIterator<Item = Identity>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Identity>> for MembershipSet {
    fn from(members: Vec<Identity>) -> Self {
        members.into_iter().collect()
    }
}

impl From<MembershipSet> for Vec<Identity> {
    fn from(set: MembershipSet) -> Self {
        let mut members: Vec<Identity> = set.members.into_iter().collect();
        members.sort();
        members
    }
}

// Raw API records. Only the fields the audit needs are decoded.

/// Repository record from the organization repositories listing
#[derive(Debug, Deserialize)]
pub(crate) struct RawRepository {
    pub full_name: String,
    pub collaborators_url: String,
}

/// Account record from the members and collaborators listings
#[derive(Debug, Deserialize)]
pub(crate) struct RawAccount {
    pub login: String,
}

/// Fork record from the repository forks listing
#[derive(Debug, Deserialize)]
pub(crate) struct RawFork {
    pub owner: RawAccount,
    pub collaborators_url: String,
}
