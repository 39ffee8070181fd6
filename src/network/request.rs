//! HTTP request types

use crate::utils::{Result, error::FetchError};
use url::Url;

/// Schemes the client knows how to load
const SUPPORTED_SCHEMES: &[&str] = &["http", "https", "file"];

/// GET request for a resource
#[derive(Debug, Clone)]
pub struct Request {
    url: Url,
}

impl Request {
    /// Create a request for an already parsed URL
    pub fn from_url(url: Url) -> Result<Self> {
        if !SUPPORTED_SCHEMES.contains(&url.scheme()) {
            return Err(FetchError::UnsupportedScheme(url.scheme().to_string()).into());
        }
        Ok(Self { url })
    }

    /// Get the URL
    pub fn url(&self) -> &Url {
        &self.url
    }
}
