//! Application state shared across handlers

use crate::backends::BackendRegistry;
use crate::config::Settings;
use crate::query::QueryCompiler;
use crate::search::{Dispatcher, TitleSearchPolicy};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Backend registry
    pub registry: Arc<BackendRegistry>,
    /// Query compiler
    pub compiler: Arc<QueryCompiler>,
    /// Search dispatcher
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, registry: BackendRegistry) -> Self {
        let registry = Arc::new(registry);
        let compiler = QueryCompiler::with_max_permuted_tokens(settings.search.max_permuted_tokens);
        let dispatcher = Dispatcher::new(registry.clone()).with_policies(vec![Arc::new(
            TitleSearchPolicy::new(settings.search.title_search_prefixes.iter().cloned()),
        )]);

        Self {
            settings: Arc::new(settings),
            registry,
            compiler: Arc::new(compiler),
            dispatcher: Arc::new(dispatcher),
        }
    }
}
