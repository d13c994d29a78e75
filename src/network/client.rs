//! HTTP client for talking to remote search nodes

use crate::config::OutgoingSettings;
use anyhow::Result;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;

/// HTTP client wrapper with repohound-specific configuration
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    default_timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs_f64(settings.request_timeout))
            .pool_max_idle_per_host(settings.pool_maxsize)
            .user_agent(format!("repohound/{}", crate::VERSION));

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            default_timeout: Duration::from_secs_f64(settings.request_timeout),
        })
    }

    /// GET request with an optional per-request timeout
    pub fn get(&self, url: &str, timeout: Option<Duration>) -> RequestBuilder {
        self.client
            .get(url)
            .timeout(timeout.unwrap_or(self.default_timeout))
    }

    /// POST request with an optional per-request timeout
    pub fn post(&self, url: &str, timeout: Option<Duration>) -> RequestBuilder {
        self.client
            .post(url)
            .timeout(timeout.unwrap_or(self.default_timeout))
    }

    /// Default request timeout
    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
        assert_eq!(client.unwrap().default_timeout(), Duration::from_secs(10));
    }
}
