//! Repository backend module
//!
//! Defines the Backend trait, the registry of backends by repository name,
//! and an HTTP backend that forwards to another search node.

mod loader;
mod registry;
mod remote;
mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use loader::BackendLoader;
pub use registry::BackendRegistry;
pub use remote::RemoteBackend;
pub use traits::*;
