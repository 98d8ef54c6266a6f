//! In-process cache stores

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{CacheKey, CacheStore};
use crate::error::CacheError;

/// Cache held in a map for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheStore for MemoryCacheStore {
    fn get(&self, key: &CacheKey) -> Option<Value> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&key.to_string())
            .cloned()
    }

    fn put(&self, key: &CacheKey, payload: &Value) -> Result<(), CacheError> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), payload.clone());
        Ok(())
    }

    fn clear_all(&self) -> Result<(), CacheError> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
        Ok(())
    }
}

/// Store that never holds anything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCacheStore;

impl CacheStore for NoopCacheStore {
    fn get(&self, _key: &CacheKey) -> Option<Value> {
        None
    }

    fn put(&self, _key: &CacheKey, _payload: &Value) -> Result<(), CacheError> {
        Ok(())
    }

    fn clear_all(&self) -> Result<(), CacheError> {
        Ok(())
    }
}
