//! Web server module
//!
//! Provides the HTTP API in front of the query compiler and the dispatcher.

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
