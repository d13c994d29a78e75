//! Backend loader for initializing backends from configuration

use super::registry::BackendRegistry;
use super::remote::RemoteBackend;
use crate::config::{BackendConfig, Settings};
use crate::network::HttpClient;
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Loader for initializing backends from configuration
pub struct BackendLoader;

impl BackendLoader {
    /// Load all enabled backends from settings
    pub fn load(settings: &Settings, client: &HttpClient) -> Result<BackendRegistry> {
        let mut registry = BackendRegistry::new();

        for config in settings.backends.iter().filter(|b| b.disabled) {
            info!("Skipping disabled backend: {}", config.name);
        }

        for config in settings.enabled_backends() {
            match Self::create_backend(config, client) {
                Ok(backend) => {
                    info!("Loaded backend: {} ({})", config.name, config.url);
                    registry.register(backend);
                }
                Err(e) => {
                    warn!("Failed to load backend {}: {}", config.name, e);
                }
            }
        }

        info!("Loaded {} backends", registry.len());
        Ok(registry)
    }

    fn create_backend(config: &BackendConfig, client: &HttpClient) -> Result<Arc<RemoteBackend>> {
        if config.name.is_empty() {
            return Err(anyhow::anyhow!("backend name is empty"));
        }
        if !config.url.starts_with("http://") && !config.url.starts_with("https://") {
            return Err(anyhow::anyhow!("unsupported backend url: {:?}", config.url));
        }

        Ok(Arc::new(RemoteBackend::new(config, client.clone())))
    }
}
