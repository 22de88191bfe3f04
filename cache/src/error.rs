//! Cache error type.

use crate::http::NetworkError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    /// A shell asset could not be downloaded during install.
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: NetworkError,
    },

    /// A shell asset answered with a non-2xx status during install.
    #[error("unexpected status {status} for {url}")]
    BadStatus { url: String, status: u16 },

    /// The network is down and there is no cached copy to serve.
    #[error("offline and {url} is not cached")]
    Offline {
        url: String,
        #[source]
        source: NetworkError,
    },
}

impl CacheError {
    /// URL of the request that failed.
    pub fn url(&self) -> &str {
        match self {
            Self::Fetch { url, .. } | Self::BadStatus { url, .. } | Self::Offline { url, .. } => url,
        }
    }
}
