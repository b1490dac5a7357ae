//! Blocking HTTP transport

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_CHARSET, CACHE_CONTROL};
use reqwest::StatusCode;
use url::Url;

use super::{RetryingSource, Transport};
use crate::config::FetchConfig;
use crate::error::FetchError;

/// GET over a shared reqwest client; anything but 200 is an error
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(ACCEPT_CHARSET, HeaderValue::from_static("utf-8"));

        let mut builder = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| FetchError::Transport {
            url: String::new(),
            message: e.to_string(),
        })?;
        Ok(HttpTransport { client })
    }

    /// Wrap an already configured client
    pub fn with_client(client: Client) -> Self {
        HttpTransport { client }
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let transport_error = |e: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(transport_error)?;
        log::debug!("fetched {} bytes from {url}", body.len());
        Ok(body.to_vec())
    }
}

/// HTTP document source built from a [`FetchConfig`]
pub fn http_source(config: &FetchConfig) -> Result<RetryingSource<HttpTransport>, FetchError> {
    Ok(RetryingSource::new(
        HttpTransport::new(config)?,
        config.retry.clone(),
    ))
}
