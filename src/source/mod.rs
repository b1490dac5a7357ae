//! Document sources
//!
//! A [`DocumentSource`] turns a resource string into raw HTML bytes. The
//! bundled implementation is [`RetryingSource`], which repeats a
//! [`Transport`] call under a [`RetryPolicy`]; with the `http` feature the
//! transport is a blocking reqwest client.

pub mod cancel;
#[cfg(feature = "http")]
pub mod http;
pub mod retry;

use url::Url;

use crate::error::FetchError;

pub use cancel::CancellationToken;
#[cfg(feature = "http")]
pub use http::{http_source, HttpTransport};
pub use retry::{RetryPolicy, RetryingSource};

/// Fetches the raw bytes of a resource
pub trait DocumentSource {
    fn fetch(&self, resource: &str, cancel: &CancellationToken) -> Result<Vec<u8>, FetchError>;
}

impl<S: DocumentSource + ?Sized> DocumentSource for &S {
    fn fetch(&self, resource: &str, cancel: &CancellationToken) -> Result<Vec<u8>, FetchError> {
        (**self).fetch(resource, cancel)
    }
}

/// One request attempt against a parsed URL
pub trait Transport: Send + Sync {
    fn get(&self, url: &Url) -> Result<Vec<u8>, FetchError>;
}

impl<F> Transport for F
where
    F: Fn(&Url) -> Result<Vec<u8>, FetchError> + Send + Sync,
{
    fn get(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        self(url)
    }
}

/// Validate and parse a resource string into a URL
pub fn parse_resource(resource: &str) -> Result<Url, FetchError> {
    let trimmed = resource.trim();
    if trimmed.is_empty() {
        return Err(FetchError::InvalidResource {
            resource: resource.to_string(),
            reason: "resource is empty".to_string(),
        });
    }
    Url::parse(trimmed).map_err(|e| FetchError::InvalidResource {
        resource: resource.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resource() {
        let url = parse_resource("  https://example.com/catalog?page=2 ").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.query(), Some("page=2"));

        assert!(matches!(
            parse_resource(""),
            Err(FetchError::InvalidResource { .. })
        ));
        assert!(matches!(
            parse_resource("not a url"),
            Err(FetchError::InvalidResource { .. })
        ));
    }

    #[test]
    fn test_closure_transport() {
        let transport = |url: &Url| -> Result<Vec<u8>, FetchError> {
            Ok(url.path().as_bytes().to_vec())
        };
        let source = RetryingSource::new(transport, RetryPolicy::no_retry());
        let body = source
            .fetch("https://example.com/page", &CancellationToken::new())
            .unwrap();
        assert_eq!(body, b"/page");
    }

    #[test]
    fn test_retryable_classification() {
        let status = |status| FetchError::Status {
            url: String::new(),
            status,
        };
        assert!(status(500).is_retryable());
        assert!(status(503).is_retryable());
        assert!(status(429).is_retryable());
        assert!(!status(404).is_retryable());
        assert!(!status(301).is_retryable());
        assert!(!FetchError::Cancelled.is_retryable());
    }
}
