//! Configuration module for repohound
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Load settings from `path`, or defaults when there is none, then apply `HOUND_*` overrides
pub fn load_from(path: Option<&Path>) -> Result<Settings> {
    let mut settings = match path {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    settings.merge_env();
    Ok(settings)
}

/// Locate the settings file: `HOUND_SETTINGS_PATH`, then the default locations
pub fn find_settings_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("HOUND_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("repohound/settings.yml"));
    }

    paths.into_iter().find(|p| p.exists())
}
