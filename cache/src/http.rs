//! Request/response model and the network seam.

use core::future::Future;

/// How the browser issued a request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequestMode {
    /// Top-level page load.
    Navigate,
    /// Scripts, styles, images, manifests.
    #[default]
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub mode: RequestMode,
}

impl Request {
    pub fn navigate(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            mode: RequestMode::Navigate,
        }
    }

    pub fn asset(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            mode: RequestMode::Other,
        }
    }

    #[inline]
    pub fn is_navigation(&self) -> bool { self.mode == RequestMode::Navigate }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(
        status: u16,
        body: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx status.
    #[inline]
    pub fn is_ok(&self) -> bool { (200..300).contains(&self.status) }
}

/// Transport-level failure. An HTTP error status is still a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    #[error("network unreachable")]
    Unreachable,
    #[error("request timed out")]
    Timeout,
}

/// Where cache misses go.
pub trait Network {
    fn fetch(
        &self,
        request: &Request,
    ) -> impl Future<Output = Result<Response, NetworkError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_is_ok_range() {
        assert!(Response::new(200, "").is_ok());
        assert!(Response::new(204, "").is_ok());
        assert!(!Response::new(304, "").is_ok());
        assert!(!Response::new(404, "").is_ok());
        assert!(!Response::new(199, "").is_ok());
    }

    #[test]
    fn test_request_constructors() {
        assert!(Request::navigate("./").is_navigation());
        assert!(!Request::asset("./icon.svg").is_navigation());
        assert_eq!(RequestMode::default(), RequestMode::Other);
    }
}
