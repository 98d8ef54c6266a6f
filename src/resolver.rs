//! Resource resolution
//!
//! Every listing goes through the same steps: compute the cache key, return
//! the cached entry when there is one, otherwise fetch, normalize, cache and
//! return. A failed cache write is logged and does not fail the lookup.
//!
//! Resolution errors are returned as-is. Deciding which failures abort the
//! audit is the caller's job: the audit runners contain collaborator
//! failures per repository and let everything else propagate.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;

use crate::cache::{self, CacheKey, CacheStore};
use crate::error::{CacheError, FetchError, OrgLensError};
use crate::model::{ForkRef, Identity, MembershipSet, RawAccount, RawFork, RawRepository, RepositoryRef};
use crate::providers::github::GitHubClient;
use crate::providers::template::base_endpoint;

/// A resolved listing and where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub data: T,
    /// `true` when served from the cache without network access
    pub cached: bool,
}

/// Resolves organization resources through the cache
pub struct Resolver<'a> {
    client: &'a GitHubClient,
    cache: &'a dyn CacheStore,
    organization: String,
}

impl<'a> Resolver<'a> {
    pub fn new(
        client: &'a GitHubClient,
        cache: &'a dyn CacheStore,
        organization: impl Into<String>,
    ) -> Self {
        Self {
            client,
            cache,
            organization: organization.into(),
        }
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn client(&self) -> &GitHubClient {
        self.client
    }

    /// Drop every cached entry
    pub fn clear_cache(&self) -> Result<(), CacheError> {
        self.cache.clear_all()
    }

    /// The organization's repositories
    pub async fn repositories(&self) -> Result<Resolved<Vec<RepositoryRef>>, OrgLensError> {
        let key = CacheKey::repositories(&self.organization);
        self.lookup_or_fetch(&key, self.fetch_repositories()).await
    }

    /// The organization's members
    pub async fn members(&self) -> Result<Resolved<MembershipSet>, OrgLensError> {
        let key = CacheKey::members(&self.organization);
        let resolved = self.lookup_or_fetch(&key, self.fetch_members()).await?;

        Ok(Resolved {
            data: resolved.data.into_iter().collect(),
            cached: resolved.cached,
        })
    }

    /// Forks of an organization repository
    pub async fn forks(&self, repo: &RepositoryRef) -> Result<Resolved<Vec<ForkRef>>, OrgLensError> {
        let key = CacheKey::forks(&self.organization, &repo.full_name);
        self.lookup_or_fetch(&key, self.fetch_forks(repo)).await
    }

    /// Direct collaborators of an organization repository
    pub async fn collaborators(
        &self,
        repo: &RepositoryRef,
    ) -> Result<Resolved<Vec<Identity>>, OrgLensError> {
        let key = CacheKey::collaborators(&self.organization, &repo.full_name);
        self.lookup_or_fetch(&key, self.fetch_collaborators(&repo.collaborators_url))
            .await
    }

    /// Collaborators of a fork
    pub async fn fork_collaborators(
        &self,
        fork: &ForkRef,
    ) -> Result<Resolved<Vec<Identity>>, OrgLensError> {
        let key = CacheKey::fork_collaborators(&self.organization, fork);
        self.lookup_or_fetch(&key, self.fetch_collaborators(&fork.collaborators_url))
            .await
    }

    async fn fetch_repositories(&self) -> Result<Vec<RepositoryRef>, OrgLensError> {
        let url = self.client.endpoints().repositories(&self.organization);
        let raw: Vec<RawRepository> =
            decode(self.client.list_repositories(&self.organization).await?, &url)?;

        let mut repos = Vec::with_capacity(raw.len());
        for repo in raw {
            repos.push(RepositoryRef {
                collaborators_url: listing_endpoint(&repo.collaborators_url, &url)?,
                full_name: repo.full_name,
            });
        }
        Ok(repos)
    }

    async fn fetch_members(&self) -> Result<Vec<Identity>, OrgLensError> {
        let url = self.client.endpoints().members(&self.organization);
        let raw: Vec<RawAccount> = decode(self.client.list_members(&self.organization).await?, &url)?;
        Ok(raw.into_iter().map(|a| Identity::from(a.login)).collect())
    }

    async fn fetch_forks(&self, repo: &RepositoryRef) -> Result<Vec<ForkRef>, OrgLensError> {
        let url = self.client.endpoints().forks(&repo.full_name);
        let raw: Vec<RawFork> = decode(self.client.list_forks(&repo.full_name).await?, &url)?;

        let mut forks = Vec::with_capacity(raw.len());
        for fork in raw {
            forks.push(ForkRef {
                parent_name: repo.full_name.clone(),
                owner: Identity::from(fork.owner.login),
                collaborators_url: listing_endpoint(&fork.collaborators_url, &url)?,
            });
        }
        Ok(forks)
    }

    async fn fetch_collaborators(&self, url: &str) -> Result<Vec<Identity>, OrgLensError> {
        let raw: Vec<RawAccount> = decode(self.client.list_collaborators(url).await?, url)?;
        Ok(raw.into_iter().map(|a| Identity::from(a.login)).collect())
    }

    /// Serve `key` from the cache, or await `fetch` and cache its result
    ///
    /// `fetch` is only polled on a cache miss.
    async fn lookup_or_fetch<T, F>(&self, key: &CacheKey, fetch: F) -> Result<Resolved<T>, OrgLensError>
    where
        T: Serialize + DeserializeOwned,
        F: Future<Output = Result<T, OrgLensError>>,
    {
        if let Some(data) = cache::load::<T>(self.cache, key) {
            return Ok(Resolved { data, cached: true });
        }

        let data = fetch.await?;
        if let Err(e) = cache::save(self.cache, key, &data) {
            tracing::warn!("Could not cache {}: {}", key, e);
        }

        Ok(Resolved {
            data,
            cached: false,
        })
    }
}

/// Decode raw API records into `T`
fn decode<T: DeserializeOwned>(records: Vec<Value>, url: &str) -> Result<Vec<T>, FetchError> {
    records
        .into_iter()
        .map(|record| {
            serde_json::from_value(record).map_err(|e| FetchError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            })
        })
        .collect()
}

/// Base listing endpoint of a hypermedia collaborators URL
fn listing_endpoint(template: &str, source_url: &str) -> Result<String, OrgLensError> {
    let base = base_endpoint(template).map_err(|e| FetchError::Decode {
        url: source_url.to_string(),
        message: e.to_string(),
    })?;
    Ok(base)
}
