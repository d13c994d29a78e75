//! Result type definitions
//!
//! Field names serialize in PascalCase to stay wire-compatible with
//! existing code-search UIs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single matching line with its surrounding context
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Match {
    /// The matching line
    pub line: String,
    /// 1-indexed line number
    pub line_number: u32,
    /// Lines of context before the match
    #[serde(default)]
    pub before: Vec<String>,
    /// Lines of context after the match
    #[serde(default)]
    pub after: Vec<String>,
}

impl Match {
    pub fn new(line: impl Into<String>, line_number: u32) -> Self {
        Self {
            line: line.into(),
            line_number,
            ..Default::default()
        }
    }
}

/// All matches found in one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileMatch {
    pub filename: String,
    #[serde(default)]
    pub matches: Vec<Match>,
}

impl FileMatch {
    pub fn new(filename: impl Into<String>, matches: Vec<Match>) -> Self {
        Self {
            filename: filename.into(),
            matches,
        }
    }
}

/// Response of one repository's backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchResponse {
    /// Matching files; `None` when the backend found nothing
    pub matches: Option<Vec<FileMatch>>,
    /// Number of files with at least one match
    #[serde(default)]
    pub files_with_match: usize,
    /// Number of files the backend had to open. Reported through `Stats` only.
    #[serde(skip)]
    pub files_opened: usize,
    /// Index revision the results came from
    #[serde(default)]
    pub revision: String,
}

impl SearchResponse {
    /// Response with no matches
    pub fn empty() -> Self {
        Self::default()
    }

    /// Response carrying the given file matches
    pub fn with_matches(matches: Vec<FileMatch>) -> Self {
        Self {
            files_with_match: matches.len(),
            matches: Some(matches),
            ..Default::default()
        }
    }

    /// Set the files-opened count
    pub fn files_opened(mut self, count: usize) -> Self {
        self.files_opened = count;
        self
    }

    /// Set the index revision
    pub fn revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = revision.into();
        self
    }

    /// Whether the backend reported any match. `None` and an empty list both count as no match.
    pub fn has_matches(&self) -> bool {
        self.matches.as_ref().is_some_and(|m| !m.is_empty())
    }
}

/// Aggregate statistics of one dispatch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Stats {
    /// Files opened across all repositories that returned matches
    pub files_opened: usize,
    /// Wall-clock duration of the whole dispatch in milliseconds
    pub duration: u64,
}

/// Successful outcome of a dispatch
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    /// Responses keyed by repository name; repositories without matches are absent
    pub results: HashMap<String, SearchResponse>,
    pub stats: Stats,
}

impl SearchResults {
    pub fn repo_count(&self) -> usize {
        self.results.len()
    }

    pub fn get(&self, repo: &str) -> Option<&SearchResponse> {
        self.results.get(repo)
    }
}
