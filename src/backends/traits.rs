//! Backend traits and types

use crate::error::BackendError;
use crate::results::SearchResponse;
use crate::search::SearchOptions;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Public description of a repository, as listed by `/api/v1/repos`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RepoConfig {
    /// Repository URL
    pub url: String,
    /// Pattern for building links to files, e.g. `{url}/blob/{rev}/{path}{anchor}`
    pub url_pattern: Option<String>,
    /// Version control system
    pub vcs: String,
    /// Poll interval of the indexer in milliseconds
    pub ms_between_poll: u64,
    /// Whether the indexer polls for changes
    pub enable_poll_updates: bool,
    /// Whether `/api/v1/update` may trigger a reindex
    pub enable_push_updates: bool,
}

/// Search backend of one repository.
///
/// Backends are owned by the [`BackendRegistry`](super::BackendRegistry) and
/// shared read-only across concurrent dispatches.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Repository name
    fn name(&self) -> &str;

    /// Repository description
    fn repo(&self) -> &RepoConfig;

    /// Run a compiled pattern against the repository's index
    async fn search(
        &self,
        pattern: &str,
        options: &SearchOptions,
    ) -> Result<SearchResponse, BackendError>;

    /// JSON list of files excluded from the index
    async fn excluded_files(&self) -> Result<String, BackendError> {
        Ok("[]".to_string())
    }

    /// Trigger a reindex. `Ok(false)` means push updates are disabled.
    async fn update(&self) -> Result<bool, BackendError> {
        Ok(false)
    }
}
