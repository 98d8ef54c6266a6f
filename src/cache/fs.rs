//! Filesystem-backed cache store
//!
//! Each key maps to `{root}/{org}/{kind}[/{owner}/{repo}].json`.

use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{CacheConfig, CacheKey, CacheStore};
use crate::error::CacheError;

/// Cache persisted as a tree of JSON files
#[derive(Debug, Clone)]
pub struct FileCacheStore {
    root: PathBuf,
}

impl FileCacheStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at the configured directory
    pub fn from_config(project_root: &Path, config: &CacheConfig) -> Self {
        Self::new(Self::resolve_cache_dir(project_root, &config.directory))
    }

    /// Resolve the cache directory path
    fn resolve_cache_dir(project_root: &Path, directory: &str) -> PathBuf {
        let path = Path::new(directory);

        if path.is_absolute() {
            path.to_path_buf()
        } else if directory.starts_with("~") {
            // Handle home directory expansion
            if let Some(home) = dirs::home_dir() {
                home.join(directory.trim_start_matches("~/"))
            } else {
                project_root.join(directory)
            }
        } else {
            project_root.join(directory)
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        let segments = key.segments();
        let mut path = self.root.clone();
        if let Some((last, parents)) = segments.split_last() {
            for segment in parents {
                path.push(sanitize_segment(segment));
            }
            path.push(format!("{}.json", sanitize_segment(last)));
        }
        path
    }
}

/// Keep a key segment inside its directory level
fn sanitize_segment(segment: &str) -> String {
    match segment {
        "" => "_".to_string(),
        "." | ".." => segment.replace('.', "_"),
        _ => segment.replace(['\\', ':'], "_"),
    }
}

impl CacheStore for FileCacheStore {
    fn get(&self, key: &CacheKey) -> Option<Value> {
        let path = self.entry_path(key);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::trace!("Cache miss for {}", key);
                return None;
            }
            Err(e) => {
                tracing::debug!("Failed to read cache file {}: {}", path.display(), e);
                return None;
            }
        };

        if content.trim().is_empty() {
            return None;
        }

        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Failed to parse cache file {}: {}", path.display(), e);
                None
            }
        }
    }

    fn put(&self, key: &CacheKey, payload: &Value) -> Result<(), CacheError> {
        let path = self.entry_path(key);

        // create_dir_all succeeds when the directories already exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| CacheError::CreateDir {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let content = serde_json::to_string(payload).map_err(|source| CacheError::Serialize {
            key: key.to_string(),
            source,
        })?;

        // Write then rename so readers never observe a half-written entry.
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, content)
            .and_then(|_| fs::rename(&staging, &path))
            .map_err(|e| CacheError::Write {
                path: path.display().to_string(),
                source: e,
            })?;

        tracing::trace!("Cached {} at {}", key, path.display());
        Ok(())
    }

    fn clear_all(&self) -> Result<(), CacheError> {
        // Move the tree aside first so it disappears in one step.
        let doomed = match self.root.file_name() {
            Some(name) => self.root.with_file_name(format!(
                ".{}.clearing-{}",
                name.to_string_lossy(),
                std::process::id()
            )),
            None => self.root.clone(),
        };

        let target = match fs::rename(&self.root, &doomed) {
            Ok(()) => doomed,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No cache directory at {}", self.root.display());
                return Ok(());
            }
            Err(_) => self.root.clone(),
        };

        match fs::remove_dir_all(&target) {
            Ok(()) => {
                tracing::info!("Deleted cache directory: {}", self.root.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::Remove {
                path: self.root.display().to_string(),
                source: e,
            }),
        }
    }
}
