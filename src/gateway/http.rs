//! `reqwest`-backed gateway.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::{status_error, AuthToken, Gateway};
use crate::config::ApiConfig;
use crate::error::{ModrinthError, Result};

/// Gateway that talks to the API over HTTP
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Arc<Client>,
    base_url: String,
}

impl HttpGateway {
    /// Create a gateway from API settings
    pub fn new(api: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&api.user_agent)
            .timeout(Duration::from_secs(api.timeout_secs))
            .connect_timeout(Duration::from_secs(api.connect_timeout_secs))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| ModrinthError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Self::from_client(Arc::new(client), &api.base_url)
    }

    /// Create from an existing reqwest Client
    pub fn from_client(client: Arc<Client>, base_url: &str) -> Result<Self> {
        Url::parse(base_url).map_err(|e| {
            ModrinthError::InvalidArgument(format!("invalid base URL '{}': {}", base_url, e))
        })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the underlying client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Get the API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build request URL, encoding every query value
    fn build_url(&self, path: &str, query: &[(String, String)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path)).map_err(|e| {
            ModrinthError::InvalidArgument(format!("invalid request path '{}': {}", path, e))
        })?;

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn get_json(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        let url = self.build_url(path, query)?;
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ModrinthError::Transport(format!("Failed to GET {}: {}", path, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status.as_u16(), path));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ModrinthError::Transport(format!("Failed to read body of {}: {}", path, e)))?;

        serde_json::from_str(&body).map_err(|e| {
            ModrinthError::malformed(format!("Failed to parse JSON from {}: {}", path, e))
        })
    }

    async fn send(&self, method: ::http::Method, path: &str, token: &AuthToken) -> Result<()> {
        let url = self.build_url(path, &[])?;
        tracing::debug!(%method, %url, "sending authorized request");

        let response = self
            .client
            .request(method.clone(), url)
            .header(AUTHORIZATION, token.expose())
            .send()
            .await
            .map_err(|e| ModrinthError::Transport(format!("Failed to {} {}: {}", method, path, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status.as_u16(), path));
        }

        Ok(())
    }
}
