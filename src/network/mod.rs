//! HTTP networking module
//!
//! Provides the HTTP client used to talk to remote search nodes.

mod client;

pub use client::HttpClient;
