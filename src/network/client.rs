//! HTTP client implementation

use super::{Request, Response};
use crate::utils::{Result, error::FetchError};
use std::io::ErrorKind;

/// Client for `http`, `https` and `file` URLs
pub struct NetworkClient {
    http: reqwest::Client,
}

impl NetworkClient {
    /// Create a new HTTP client
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Execute a request. Any answer, including non-2xx, is returned as a
    /// response; only transport failures are errors.
    pub async fn execute(&self, request: Request) -> Result<Response> {
        match request.url().scheme() {
            "file" => self.execute_file(&request).await,
            _ => self.execute_http(request).await,
        }
    }

    async fn execute_http(&self, request: Request) -> Result<Response> {
        let url = request.url().to_string();
        let transport = |e: reqwest::Error| FetchError::Transport {
            url: url.clone(),
            reason: e.to_string(),
        };
        let response = self
            .http
            .get(request.url().clone())
            .send()
            .await
            .map_err(transport)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport)?;

        log::debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(Response::new(status, body.to_vec()))
    }

    async fn execute_file(&self, request: &Request) -> Result<Response> {
        let url = request.url().to_string();
        let path = request
            .url()
            .to_file_path()
            .map_err(|_| FetchError::InvalidUrl(url.clone()))?;

        match tokio::fs::read(&path).await {
            Ok(body) => {
                log::debug!("read {} ({} bytes)", path.display(), body.len());
                Ok(Response::new(200, body))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Response::new(404, Vec::new())),
            Err(e) => Err(FetchError::Transport {
                url,
                reason: e.to_string(),
            }
            .into()),
        }
    }
}

impl Default for NetworkClient {
    fn default() -> Self {
        Self::new()
    }
}
