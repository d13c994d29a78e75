//! Settings structures for repohound configuration

use crate::backends::RepoConfig;
use crate::query::DEFAULT_MAX_PERMUTED_TOKENS;
use crate::search::params::parse_as_bool;
use crate::search::{DEFAULT_LINES_OF_CONTEXT, MAX_LINES_OF_CONTEXT};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure, loaded from settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub search: SearchSettings,
    pub outgoing: OutgoingSettings,
    pub backends: Vec<BackendConfig>,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (HOUND_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Merge overrides from `lookup`, keyed by HOUND_* variable name
    fn merge_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("HOUND_DEBUG") {
            self.general.debug = parse_as_bool(&val);
        }
        if let Some(val) = lookup("HOUND_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("HOUND_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
    }

    /// Get all enabled backends
    pub fn enabled_backends(&self) -> Vec<&BackendConfig> {
        self.backends.iter().filter(|b| !b.disabled).collect()
    }
}

/// General settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 6080,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Query compilation and dispatch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Context lines when the request does not ask for any
    pub default_lines_of_context: u32,
    /// Upper bound for requested context lines
    pub max_lines_of_context: u32,
    /// Queries with up to this many words match in any word order
    pub max_permuted_tokens: usize,
    /// Repositories whose name starts with one of these also search titles
    pub title_search_prefixes: Vec<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_lines_of_context: DEFAULT_LINES_OF_CONTEXT,
            max_lines_of_context: MAX_LINES_OF_CONTEXT,
            max_permuted_tokens: DEFAULT_MAX_PERMUTED_TOKENS,
            title_search_prefixes: vec!["notion_".to_string()],
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Default request timeout in seconds
    pub request_timeout: f64,
    /// Pool max size
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 10.0,
            pool_maxsize: 20,
            verify_ssl: true,
        }
    }
}

/// Individual backend configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Repository name (unique identifier)
    pub name: String,
    /// Base URL of the search node serving the repository
    pub url: String,
    /// Repository name on that node (defaults to `name`)
    pub repo: Option<String>,
    /// Whether the backend is disabled
    pub disabled: bool,
    /// Custom request timeout in seconds
    pub timeout: Option<f64>,
    /// Repository description shown by the API
    pub display: RepoConfig,
}

impl BackendConfig {
    /// Repository name on the serving node
    pub fn remote_repo(&self) -> &str {
        self.repo.as_deref().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 6080);
        assert!(!settings.general.debug);
        assert_eq!(settings.search.default_lines_of_context, 2);
        assert_eq!(settings.search.max_lines_of_context, 20);
        assert_eq!(settings.search.max_permuted_tokens, 4);
        assert!(settings.backends.is_empty());
    }

    #[test]
    fn test_from_yaml() {
        let settings = Settings::from_yaml(
            r#"
server:
  port: 7000
search:
  title_search_prefixes: ["notion_", "wiki_"]
backends:
  - name: core
    url: http://search-1:6080
    display:
      url: https://github.com/acme/core
      vcs: git
      enable-push-updates: true
  - name: docs
    url: http://search-2:6080
    repo: documentation
    disabled: true
"#,
        )
        .unwrap();

        assert_eq!(settings.server.port, 7000);
        assert_eq!(settings.server.bind_address, "127.0.0.1");
        assert_eq!(settings.search.title_search_prefixes.len(), 2);
        assert_eq!(settings.search.max_lines_of_context, 20);

        let core = &settings.backends[0];
        assert_eq!(core.remote_repo(), "core");
        assert!(core.display.enable_push_updates);

        let docs = &settings.backends[1];
        assert_eq!(docs.remote_repo(), "documentation");

        let enabled = settings.enabled_backends();
        assert_eq!(enabled.len(), 1);
        assert_eq!(enabled[0].name, "core");
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_merge_env_overrides() {
        let mut settings = Settings::default();
        settings.merge_vars(vars(&[
            ("HOUND_DEBUG", "1"),
            ("HOUND_PORT", "7070"),
            ("HOUND_BIND_ADDRESS", "0.0.0.0"),
        ]));

        assert!(settings.general.debug);
        assert_eq!(settings.server.port, 7070);
        assert_eq!(settings.server.bind_address, "0.0.0.0");
    }

    #[test]
    fn test_merge_env_debug_flags() {
        for (value, expected) in [("true", true), ("FoSho", true), ("0", false), ("yes", false)] {
            let mut settings = Settings::default();
            settings.general.debug = !expected;
            settings.merge_vars(vars(&[("HOUND_DEBUG", value)]));
            assert_eq!(settings.general.debug, expected, "HOUND_DEBUG={}", value);
        }
    }

    #[test]
    fn test_merge_env_invalid_port_is_ignored() {
        let mut settings = Settings::default();
        settings.merge_vars(vars(&[("HOUND_PORT", "not-a-port")]));
        assert_eq!(settings.server.port, 6080);

        settings.merge_vars(vars(&[("HOUND_PORT", "70000")]));
        assert_eq!(settings.server.port, 6080);
    }

    #[test]
    fn test_merge_env_without_overrides() {
        let mut settings = Settings::default();
        settings.merge_vars(vars(&[]));
        assert!(!settings.general.debug);
        assert_eq!(settings.server.bind_address, "127.0.0.1");
    }
}
