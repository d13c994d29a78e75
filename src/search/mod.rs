//! Search orchestration module
//!
//! Dispatches a compiled pattern to every requested repository in
//! parallel and aggregates the answers and timing.

mod dispatcher;
mod models;
pub mod params;

pub use dispatcher::Dispatcher;
pub use models::*;
