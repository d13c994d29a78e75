//! repohound: query front-end for multi-repository code search
//!
//! Compiles free-text queries into order- and plural-tolerant regular
//! expressions and dispatches them in parallel to per-repository search
//! backends, failing fast on the first backend error.

pub mod backends;
pub mod config;
pub mod error;
pub mod network;
pub mod query;
pub mod results;
pub mod search;
pub mod web;

pub use backends::{Backend, BackendRegistry};
pub use config::Settings;
pub use error::BackendError;
pub use query::{compile, QueryCompiler};
pub use results::{SearchResponse, SearchResults, Stats};
pub use search::{Dispatcher, SearchOptions};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
