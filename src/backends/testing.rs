//! In-memory backend for tests

use super::traits::{Backend, RepoConfig};
use crate::error::BackendError;
use crate::results::{FileMatch, Match, SearchResponse};
use crate::search::SearchOptions;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

enum Outcome {
    Respond(SearchResponse),
    Fail(String),
    Panic,
}

/// Backend returning a canned outcome after an optional delay
pub struct FakeBackend {
    name: String,
    repo: RepoConfig,
    outcome: Outcome,
    delay: Duration,
    calls: AtomicUsize,
    seen: Mutex<Vec<(String, SearchOptions)>>,
}

impl FakeBackend {
    /// Backend that finds nothing
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            repo: RepoConfig {
                url: format!("https://git.example.com/{}", name),
                vcs: "git".to_string(),
                ..Default::default()
            },
            outcome: Outcome::Respond(SearchResponse::empty()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Respond with one matching file per entry, opening `files_opened` files
    pub fn matching(mut self, files: &[&str], files_opened: usize) -> Self {
        let matches = files
            .iter()
            .map(|f| FileMatch::new(*f, vec![Match::new("hit", 1)]))
            .collect();
        self.outcome =
            Outcome::Respond(SearchResponse::with_matches(matches).files_opened(files_opened));
        self
    }

    /// Respond with no matches while still reporting opened files
    pub fn no_matches(mut self, files_opened: usize) -> Self {
        self.outcome = Outcome::Respond(SearchResponse::empty().files_opened(files_opened));
        self
    }

    /// Fail every search with the given message
    pub fn failing(mut self, message: &str) -> Self {
        self.outcome = Outcome::Fail(message.to_string());
        self
    }

    /// Panic inside the search
    pub fn panicking(mut self) -> Self {
        self.outcome = Outcome::Panic;
        self
    }

    /// Wait before answering
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Accept push updates
    pub fn push_updates(mut self) -> Self {
        self.repo.enable_push_updates = true;
        self
    }

    /// Number of finished searches
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Patterns and options received so far
    pub fn seen(&self) -> Vec<(String, SearchOptions)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Backend for FakeBackend {
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
        self.seen
            .lock()
            .unwrap()
            .push((pattern.to_string(), options.clone()));

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let result = match &self.outcome {
            Outcome::Respond(response) => Ok(response.clone()),
            Outcome::Fail(message) => Err(BackendError::Remote {
                status: 500,
                message: message.clone(),
            }),
            Outcome::Panic => panic!("backend {} crashed", self.name),
        };
        self.calls.fetch_add(1, Ordering::SeqCst);
        result
    }

    async fn excluded_files(&self) -> Result<String, BackendError> {
        Ok(format!(r#"[{{"Filename":"{}.bin","Reason":"binary"}}]"#, self.name))
    }

    async fn update(&self) -> Result<bool, BackendError> {
        Ok(self.repo.enable_push_updates)
    }
}
