//! Parallel dispatch of a compiled pattern across repositories

use super::models::{OptionPolicy, SearchOptions, TitleSearchPolicy};
use crate::backends::BackendRegistry;
use crate::error::BackendError;
use crate::results::{SearchResponse, SearchResults, Stats};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

type RepoOutcome = (String, Result<SearchResponse, BackendError>);

/// Fans a pattern out to every requested repository and merges the answers
pub struct Dispatcher {
    /// Backend registry, read-only during a dispatch
    registry: Arc<BackendRegistry>,
    /// Per-repository option overrides
    policies: Vec<Arc<dyn OptionPolicy>>,
}

impl Dispatcher {
    /// Create a dispatcher with the default title-search policy
    pub fn new(registry: Arc<BackendRegistry>) -> Self {
        Self {
            registry,
            policies: vec![Arc::new(TitleSearchPolicy::default())],
        }
    }

    /// Replace the option policies
    pub fn with_policies(mut self, policies: Vec<Arc<dyn OptionPolicy>>) -> Self {
        self.policies = policies;
        self
    }

    /// Search all `repos` in parallel.
    ///
    /// Names missing from the registry do not take part. The first backend
    /// error is returned as is and everything collected so far is dropped;
    /// tasks still running finish on their own and their results are discarded.
    pub async fn search_all(
        &self,
        pattern: &str,
        options: &SearchOptions,
        repos: &[String],
    ) -> Result<SearchResults, BackendError> {
        let started = Instant::now();

        let backends: Vec<_> = repos
            .iter()
            .filter_map(|repo| {
                let backend = self.registry.get(repo)?;
                Some((repo.clone(), backend.clone()))
            })
            .collect();

        let n = backends.len();
        let mut pending: Vec<String> = backends.iter().map(|(repo, _)| repo.clone()).collect();

        info!("Executing search {:?} on {} repositories", pattern, n);

        // One slot per task: a late sender never blocks, even once we stop reading.
        let (tx, mut rx) = mpsc::channel::<RepoOutcome>(n.max(1));
        let pattern: Arc<str> = Arc::from(pattern);

        for (repo, backend) in backends {
            let mut local_opts = options.clone();
            for policy in &self.policies {
                policy.apply(&repo, &mut local_opts);
            }

            let tx = tx.clone();
            let pattern = Arc::clone(&pattern);
            tokio::spawn(async move {
                let start = Instant::now();
                let result = backend.search(&pattern, &local_opts).await;
                debug!("Repository {} answered in {:?}", repo, start.elapsed());

                if let Err(mpsc::error::SendError((repo, _))) = tx.send((repo, result)).await {
                    debug!("Dropping late result for {}", repo);
                }
            });
        }
        drop(tx);

        let mut results = HashMap::new();
        let mut files_opened = 0;

        for _ in 0..n {
            let Some((repo, result)) = rx.recv().await else {
                let repo = pending.first().cloned().unwrap_or_default();
                warn!("Search task for {} ended without reporting", repo);
                return Err(BackendError::TaskAborted(repo));
            };

            if let Some(ix) = pending.iter().position(|p| *p == repo) {
                pending.swap_remove(ix);
            }

            let response = match result {
                Ok(response) => response,
                Err(e) => {
                    warn!("Search failed for {}: {}", repo, e);
                    return Err(e);
                }
            };

            if !response.has_matches() {
                debug!("Repository {} has no matches", repo);
                continue;
            }

            files_opened += response.files_opened;
            results.insert(repo, response);
        }

        let duration = started.elapsed().as_millis() as u64;

        debug!(
            "Search {:?} matched in {} repositories, {} files opened, {} ms",
            pattern,
            results.len(),
            files_opened,
            duration
        );

        Ok(SearchResults {
            results,
            stats: Stats {
                files_opened,
                duration,
            },
        })
    }
}
