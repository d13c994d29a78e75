//! Search options and per-repository option policies

use serde::{Deserialize, Serialize};

/// Default number of context lines around a match
pub const DEFAULT_LINES_OF_CONTEXT: u32 = 2;

/// Upper bound for requested context lines
pub const MAX_LINES_OF_CONTEXT: u32 = 20;

/// Options passed to every backend search.
///
/// Each dispatch task works on its own clone, so per-repository tweaks
/// never leak into other tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Index of the first file match to return
    pub offset: usize,
    /// Maximum number of file matches (0 = no limit)
    pub limit: usize,
    /// Only search files whose path matches this regex
    pub file_regexp: String,
    /// Skip files whose path matches this regex
    pub exclude_file_regexp: String,
    /// Case-insensitive matching
    pub ignore_case: bool,
    /// Return files in a stable order
    pub order_results: bool,
    /// Context lines before and after each match
    pub lines_of_context: u32,
    /// Also match document titles
    pub search_in_titles: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 0,
            file_regexp: String::new(),
            exclude_file_regexp: String::new(),
            ignore_case: false,
            order_results: false,
            lines_of_context: DEFAULT_LINES_OF_CONTEXT,
            search_in_titles: false,
        }
    }
}

impl SearchOptions {
    /// Set the result range
    pub fn with_range(mut self, offset: usize, limit: usize) -> Self {
        self.offset = offset;
        self.limit = limit;
        self
    }

    /// Set case-insensitive matching
    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    /// Set context lines, clamped to the maximum
    pub fn with_lines_of_context(mut self, lines: u32) -> Self {
        self.lines_of_context = lines.min(MAX_LINES_OF_CONTEXT);
        self
    }
}

/// Hook that adjusts a task's cloned options for one repository
pub trait OptionPolicy: Send + Sync {
    fn apply(&self, repo: &str, options: &mut SearchOptions);
}

/// Enables title search for repositories whose name carries one of the prefixes
#[derive(Debug, Clone)]
pub struct TitleSearchPolicy {
    prefixes: Vec<String>,
}

impl TitleSearchPolicy {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for TitleSearchPolicy {
    fn default() -> Self {
        Self::new(["notion_"])
    }
}

impl OptionPolicy for TitleSearchPolicy {
    fn apply(&self, repo: &str, options: &mut SearchOptions) {
        if self.prefixes.iter().any(|p| repo.starts_with(p.as_str())) {
            options.search_in_titles = true;
        }
    }
}
