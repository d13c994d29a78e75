//! Result types returned by backends and by a dispatch
//!
//! This module defines the structures that flow from the backends through
//! the dispatcher to the HTTP layer.

mod types;

pub use types::*;
