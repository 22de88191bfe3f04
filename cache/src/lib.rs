//! Offline cache for the level's app shell.
//!
//! Keeps the files needed to start the level without a connection in a
//! versioned cache:
//!
//! - [`http`]: Minimal request/response model and the [`Network`] trait
//! - [`storage`]: Named response caches ([`CacheStorage`], [`MemoryStorage`])
//! - [`shell`]: Install, activate and fetch strategies ([`ShellCache`])
//! - [`error`]: [`CacheError`]
//!
//! Bumping the cache name in [`CacheConfig`] ships a new shell; activating it
//! drops every older version.

pub mod error;
pub mod http;
pub mod shell;
pub mod storage;

pub use error::CacheError;
pub use http::{Network, NetworkError, Request, RequestMode, Response};
pub use shell::{CacheConfig, DEFAULT_CACHE_NAME, NAVIGATION_FALLBACK, Origin, SHELL_ASSETS, Served, ShellCache};
pub use storage::{CacheStorage, MemoryStorage};
