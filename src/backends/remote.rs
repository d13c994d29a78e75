//! Backend that forwards searches to another search node over HTTP
//!
//! The pattern is sent wrapped in slashes so the remote node runs it
//! verbatim instead of compiling it a second time.

use super::traits::{Backend, RepoConfig};
use crate::config::BackendConfig;
use crate::error::BackendError;
use crate::network::HttpClient;
use crate::results::{SearchResponse, Stats};
use crate::search::SearchOptions;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Body of a remote `/api/v1/search` answer
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchEnvelope {
    #[serde(default)]
    results: HashMap<String, SearchResponse>,
    stats: Option<Stats>,
    error: Option<String>,
}

/// Repository served by a remote search node
pub struct RemoteBackend {
    name: String,
    remote_repo: String,
    base_url: String,
    timeout: Option<Duration>,
    repo: RepoConfig,
    client: HttpClient,
}

impl RemoteBackend {
    pub fn new(config: &BackendConfig, client: HttpClient) -> Self {
        Self {
            name: config.name.clone(),
            remote_repo: config.remote_repo().to_string(),
            base_url: config.url.trim_end_matches('/').to_string(),
            timeout: config.timeout.map(Duration::from_secs_f64),
            repo: config.display.clone(),
            client,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url, path)
    }

    fn query_params(&self, pattern: &str, options: &SearchOptions) -> Vec<(&'static str, String)> {
        vec![
            ("q", format!("/{}/", pattern)),
            ("repos", self.remote_repo.clone()),
            ("stats", "1".to_string()),
            ("rng", format!("{}:{}", options.offset, options.limit)),
            ("files", options.file_regexp.clone()),
            ("excludeFiles", options.exclude_file_regexp.clone()),
            ("i", options.ignore_case.to_string()),
            ("order", options.order_results.to_string()),
            ("ctx", options.lines_of_context.to_string()),
        ]
    }
}

#[async_trait]
impl Backend for RemoteBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn repo(&self) -> &RepoConfig {
        &self.repo
    }

    async fn search(
        &self,
        pattern: &str,
        options: &SearchOptions,
    ) -> Result<SearchResponse, BackendError> {
        let response = self
            .client
            .get(&self.endpoint("search"), self.timeout)
            .query(&self.query_params(pattern, options))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<SearchEnvelope>(&text)
                .ok()
                .and_then(|e| e.error)
                .unwrap_or(text);
            return Err(BackendError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        let mut envelope: SearchEnvelope = serde_json::from_str(&text)?;
        if let Some(message) = envelope.error {
            return Err(BackendError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        let files_opened = envelope.stats.map(|s| s.files_opened).unwrap_or(0);
        let response = envelope
            .results
            .remove(&self.remote_repo)
            .unwrap_or_else(SearchResponse::empty)
            .files_opened(files_opened);

        debug!(
            "Remote {} returned {} files for {}",
            self.base_url, response.files_with_match, self.name
        );

        Ok(response)
    }

    async fn excluded_files(&self) -> Result<String, BackendError> {
        let response = self
            .client
            .get(&self.endpoint("excludes"), self.timeout)
            .query(&[("repo", self.remote_repo.as_str())])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }

    async fn update(&self) -> Result<bool, BackendError> {
        if !self.repo.enable_push_updates {
            return Ok(false);
        }

        let response = self
            .client
            .post(&self.endpoint("update"), self.timeout)
            .form(&[("repos", self.remote_repo.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(true);
        }
        if status == reqwest::StatusCode::FORBIDDEN {
            return Ok(false);
        }

        Err(BackendError::Remote {
            status: status.as_u16(),
            message: response.text().await.unwrap_or_default(),
        })
    }
}
