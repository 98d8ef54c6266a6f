//! Result caching module
//!
//! Resolved API listings are cached under hierarchical keys so repeated
//! audits of the same organization skip the network. Keys have the shape
//! `{organization}/{resource-kind}[/{repository}]`.
//!
//! The cache is best-effort: a missing entry is a normal outcome, and a
//! failed write is reported to the caller who logs it and carries on with
//! the freshly fetched data. Entries live until [`CacheStore::clear_all`].
//!
//! Two stores ship with the crate: [`FileCacheStore`] persists JSON files
//! on disk, [`MemoryCacheStore`] keeps everything in a map. A
//! [`NoopCacheStore`] disables caching without touching what is on disk.

mod fs;
mod memory;

pub use fs::FileCacheStore;
pub use memory::{MemoryCacheStore, NoopCacheStore};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;

use crate::error::CacheError;
use crate::model::ForkRef;

/// Default cache directory, relative to the working directory
const DEFAULT_CACHE_DIR: &str = "cache";

/// Kind of resource held in a cache entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    OrganizationRepos,
    OrganizationMembers,
    Collaborators,
    Forks,
    ForkCollaborators,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::OrganizationRepos => "organization_repos",
            ResourceKind::OrganizationMembers => "organization_members",
            ResourceKind::Collaborators => "collaborators",
            ResourceKind::Forks => "forks",
            ResourceKind::ForkCollaborators => "fork_collaborators",
        }
    }
}

/// Hierarchical cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    organization: String,
    kind: ResourceKind,
    repository: Option<String>,
}

impl CacheKey {
    /// `{org}/organization_repos`
    pub fn repositories(organization: &str) -> Self {
        Self::new(organization, ResourceKind::OrganizationRepos, None)
    }

    /// `{org}/organization_members`
    pub fn members(organization: &str) -> Self {
        Self::new(organization, ResourceKind::OrganizationMembers, None)
    }

    /// `{org}/collaborators/{repo}`
    pub fn collaborators(organization: &str, repository: &str) -> Self {
        Self::new(organization, ResourceKind::Collaborators, Some(repository))
    }

    /// `{org}/forks/{repo}`
    pub fn forks(organization: &str, repository: &str) -> Self {
        Self::new(organization, ResourceKind::Forks, Some(repository))
    }

    /// `{org}/fork_collaborators/{owner}/{parent}`
    pub fn fork_collaborators(organization: &str, fork: &ForkRef) -> Self {
        let repository = format!("{}/{}", fork.owner, fork.parent_name);
        Self::new(
            organization,
            ResourceKind::ForkCollaborators,
            Some(&repository),
        )
    }

    fn new(organization: &str, kind: ResourceKind, repository: Option<&str>) -> Self {
        Self {
            organization: organization.to_string(),
            kind,
            repository: repository.map(str::to_string),
        }
    }

    /// Path segments, outermost first
    pub fn segments(&self) -> Vec<&str> {
        let mut segments = vec![self.organization.as_str(), self.kind.as_str()];
        if let Some(repo) = &self.repository {
            segments.extend(repo.split('/'));
        }
        segments
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments().join("/"))
    }
}

/// Key-value store for resolved listings
pub trait CacheStore: Send + Sync {
    /// Previously stored payload, or `None`. Never fails.
    fn get(&self, key: &CacheKey) -> Option<Value>;

    /// Store `payload` under `key`, replacing any existing entry
    fn put(&self, key: &CacheKey, payload: &Value) -> Result<(), CacheError>;

    /// Remove every entry. Clearing an empty store succeeds.
    fn clear_all(&self) -> Result<(), CacheError>;
}

/// Read an entry and decode it as `T`
///
/// An entry that no longer decodes (e.g. written by an older version) is
/// treated as absent.
pub fn load<T: DeserializeOwned>(store: &dyn CacheStore, key: &CacheKey) -> Option<T> {
    let payload = store.get(key)?;
    match serde_json::from_value(payload) {
        Ok(value) => {
            tracing::debug!("Cache hit for {}", key);
            Some(value)
        }
        Err(e) => {
            tracing::warn!("Ignoring unreadable cache entry {}: {}", key, e);
            None
        }
    }
}

/// Encode `value` and store it under `key`
pub fn save<T: Serialize>(store: &dyn CacheStore, key: &CacheKey, value: &T) -> Result<(), CacheError> {
    let payload = serde_json::to_value(value).map_err(|source| CacheError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.put(key, &payload)
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether caching is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Cache directory path (relative to the working directory or absolute)
    #[serde(default = "default_directory")]
    pub directory: String,
}

fn default_enabled() -> bool {
    true
}

fn default_directory() -> String {
    DEFAULT_CACHE_DIR.to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: DEFAULT_CACHE_DIR.to_string(),
        }
    }
}

/// Open the store described by `config`
pub fn open(project_root: &Path, config: &CacheConfig) -> Box<dyn CacheStore> {
    if !config.enabled {
        tracing::debug!("Caching disabled");
        return Box::new(NoopCacheStore);
    }
    Box::new(FileCacheStore::from_config(project_root, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Identity;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_key_layout() {
        assert_eq!(CacheKey::repositories("acme").to_string(), "acme/organization_repos");
        assert_eq!(CacheKey::members("acme").to_string(), "acme/organization_members");
        assert_eq!(
            CacheKey::collaborators("acme", "acme/widgets").to_string(),
            "acme/collaborators/acme/widgets"
        );
        assert_eq!(
            CacheKey::forks("acme", "acme/widgets").to_string(),
            "acme/forks/acme/widgets"
        );

        let fork = ForkRef {
            parent_name: "acme/widgets".to_string(),
            owner: Identity::from("mallory"),
            collaborators_url: "https://api.test/repos/mallory/widgets/collaborators".to_string(),
        };
        assert_eq!(
            CacheKey::fork_collaborators("acme", &fork).to_string(),
            "acme/fork_collaborators/mallory/acme/widgets"
        );
    }

    #[test]
    fn test_keys_do_not_collide_across_organizations_or_kinds() {
        let keys = [
            CacheKey::repositories("acme"),
            CacheKey::repositories("globex"),
            CacheKey::members("acme"),
            CacheKey::collaborators("acme", "acme/widgets"),
            CacheKey::forks("acme", "acme/widgets"),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a.to_string(), b.to_string());
            }
        }
    }

    #[test]
    fn test_typed_round_trip() {
        let store = MemoryCacheStore::new();
        let key = CacheKey::members("acme");
        let members = vec![Identity::from("alice"), Identity::from("bob")];

        save(&store, &key, &members).unwrap();
        let loaded: Vec<Identity> = load(&store, &key).unwrap();
        assert_eq!(loaded, members);
    }

    #[test]
    fn test_undecodable_entry_is_a_miss() {
        let store = MemoryCacheStore::new();
        let key = CacheKey::members("acme");
        store.put(&key, &json!({"unexpected": true})).unwrap();

        let loaded: Option<Vec<Identity>> = load(&store, &key);
        assert!(loaded.is_none());
    }

    #[test]
    fn test_open_respects_enabled_flag() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = CacheConfig {
            enabled: false,
            ..CacheConfig::default()
        };
        let store = open(temp_dir.path(), &config);
        store.put(&CacheKey::members("acme"), &json!(["alice"])).unwrap();
        assert!(store.get(&CacheKey::members("acme")).is_none());
        assert!(!temp_dir.path().join("cache").exists());
    }

    #[test]
    fn test_cache_config_defaults() {
        let config = CacheConfig::default();
        assert!(config.enabled);
        assert_eq!(config.directory, "cache");
    }
}
