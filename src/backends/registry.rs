//! Registry of repository backends

use super::traits::{Backend, RepoConfig};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Backends by repository name
pub struct BackendRegistry {
    backends: HashMap<String, Arc<dyn Backend>>,
}

impl BackendRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            backends: HashMap::new(),
        }
    }

    /// Register a backend under its name, replacing any previous one
    pub fn register(&mut self, backend: Arc<dyn Backend>) {
        let name = backend.name().to_string();
        self.backends.insert(name, backend);
    }

    /// Get a backend by repository name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Backend>> {
        self.backends.get(name)
    }

    /// Check if a repository exists
    pub fn contains(&self, name: &str) -> bool {
        self.backends.contains_key(name)
    }

    /// All repository names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.backends.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Repository descriptions by name
    pub fn repos(&self) -> BTreeMap<&str, &RepoConfig> {
        self.backends
            .iter()
            .map(|(name, backend)| (name.as_str(), backend.repo()))
            .collect()
    }

    /// Get number of registered backends
    pub fn len(&self) -> usize {
        self.backends.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}
