//! Network stack for jubelogs
//!
//! Loads the layout fragment. `http(s)` goes through `reqwest`, `file:` URLs
//! are read from disk so a site can be composed without a server.

mod client;
mod request;
mod response;

pub use client::NetworkClient;
pub use request::Request;
pub use response::Response;

use crate::utils::{Result, error::FetchError};
use url::Url;

/// Anything that can load a URL
#[allow(async_fn_in_trait)]
pub trait Fetch {
    /// Fetch `url`. Non-2xx answers are reported as [`FetchError::Status`].
    async fn fetch(&self, url: &Url) -> Result<Response>;
}

/// Network stack handling all HTTP communications
pub struct NetworkStack {
    client: NetworkClient,
}

impl NetworkStack {
    /// Create a new network stack
    pub fn new() -> Self {
        Self {
            client: NetworkClient::new(),
        }
    }

    /// Fetch a resource from the given URL string
    pub async fn fetch_str(&self, url: &str) -> Result<Response> {
        let url = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
        self.fetch(&url).await
    }
}

impl Fetch for NetworkStack {
    async fn fetch(&self, url: &Url) -> Result<Response> {
        let request = Request::from_url(url.clone())?;
        let response = self.client.execute(request).await?;
        if !response.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status(),
            }
            .into());
        }
        Ok(response)
    }
}

impl Default for NetworkStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve `path` against `base`, accepting absolute URLs as-is
pub fn resolve(base: &Url, path: &str) -> Result<Url> {
    base.join(path)
        .map_err(|e| FetchError::InvalidUrl(format!("{path} relative to {base}: {e}")).into())
}
