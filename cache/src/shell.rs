//! App shell cache: install, activate and fetch strategies.
//!
//! - Install downloads every shell asset and stores them only if all of them
//!   succeed with a 2xx status.
//! - Activate deletes every cache except the current version.
//! - Navigations go to the network first and fall back to the cached
//!   [`NAVIGATION_FALLBACK`] page when offline.
//! - Everything else is served from the cache first. Misses go to the network
//!   and the response is passed through without being stored.

use tracing::{debug, info, warn};

use crate::error::CacheError;
use crate::http::{Network, Request, Response};
use crate::storage::CacheStorage;

/// Current cache version. Bump to ship a new shell.
pub const DEFAULT_CACHE_NAME: &str = "nivel-pro-v3";

/// Files needed to start the app offline.
pub const SHELL_ASSETS: &[&str] = &[
    "./",
    "./index.html",
    "./manifest.json",
    "./icon.svg",
    "https://cdn.tailwindcss.com",
];

/// Page served for navigations while offline.
pub const NAVIGATION_FALLBACK: &str = "./index.html";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    pub name: String,
    pub shell: Vec<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_CACHE_NAME.to_owned(),
            shell: SHELL_ASSETS.iter().map(|&url| url.to_owned()).collect(),
        }
    }
}

/// Where a served response came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    Network,
    Cache,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Served {
    pub response: Response,
    pub origin: Origin,
}

pub struct ShellCache<S, N> {
    config: CacheConfig,
    storage: S,
    network: N,
}

impl<S: CacheStorage, N: Network> ShellCache<S, N> {
    pub const fn new(
        config: CacheConfig,
        storage: S,
        network: N,
    ) -> Self {
        Self {
            config,
            storage,
            network,
        }
    }

    #[inline]
    pub fn name(&self) -> &str { &self.config.name }

    #[inline]
    pub const fn storage(&self) -> &S { &self.storage }

    /// Download and store the shell. Nothing is stored unless every asset
    /// succeeds. Returns the number of stored entries.
    pub async fn install(&mut self) -> Result<usize, CacheError> {
        let mut entries = Vec::with_capacity(self.config.shell.len());

        for url in &self.config.shell {
            let response = self
                .network
                .fetch(&Request::asset(url.clone()))
                .await
                .map_err(|source| CacheError::Fetch {
                    url: url.clone(),
                    source,
                })?;

            if !response.is_ok() {
                return Err(CacheError::BadStatus {
                    url: url.clone(),
                    status: response.status,
                });
            }
            entries.push((url.clone(), response));
        }

        let count = entries.len();
        self.storage.put_all(&self.config.name, entries);
        info!(cache = %self.config.name, count, "shell installed");
        Ok(count)
    }

    /// Delete every cache other than the current version. Returns the
    /// deleted names.
    pub fn activate(&mut self) -> Vec<String> {
        let stale: Vec<String> = self
            .storage
            .names()
            .into_iter()
            .filter(|name| *name != self.config.name)
            .collect();

        for name in &stale {
            self.storage.delete(name);
            info!(cache = %name, "deleted stale cache");
        }
        stale
    }

    /// Answer a request with the strategy for its mode.
    pub async fn fetch(
        &self,
        request: &Request,
    ) -> Result<Served, CacheError> {
        if request.is_navigation() {
            self.network_first(request).await
        } else {
            self.cache_first(request).await
        }
    }

    async fn network_first(
        &self,
        request: &Request,
    ) -> Result<Served, CacheError> {
        match self.network.fetch(request).await {
            Ok(response) => Ok(Served {
                response,
                origin: Origin::Network,
            }),
            Err(source) => {
                warn!(url = %request.url, %source, "navigation failed, serving cached page");
                self.storage
                    .lookup(&self.config.name, NAVIGATION_FALLBACK)
                    .map(|response| Served {
                        response,
                        origin: Origin::Cache,
                    })
                    .ok_or_else(|| CacheError::Offline {
                        url: request.url.clone(),
                        source,
                    })
            }
        }
    }

    async fn cache_first(
        &self,
        request: &Request,
    ) -> Result<Served, CacheError> {
        if let Some(response) = self.storage.lookup(&self.config.name, &request.url) {
            debug!(url = %request.url, "cache hit");
            return Ok(Served {
                response,
                origin: Origin::Cache,
            });
        }

        debug!(url = %request.url, "cache miss");
        let response = self
            .network
            .fetch(request)
            .await
            .map_err(|source| CacheError::Offline {
                url: request.url.clone(),
                source,
            })?;

        Ok(Served {
            response,
            origin: Origin::Network,
        })
    }
}
