//! Editor configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable overriding the generation endpoint
pub const GENERATE_URL_ENV: &str = "VOX_GENERATE_URL";

/// Generation service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// URL of `POST /api/generate`
    pub endpoint: String,
    /// Request timeout applied by the HTTP client
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3001/api/generate".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Save-state storage settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for saved state; platform data dir when unset
    pub data_dir: Option<PathBuf>,
}

/// All editor configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub generation: GenerationConfig,
    pub storage: StorageConfig,
}

impl EditorConfig {
    fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "voxcassette", "vox-cassette")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load config from file, or return default if not found. Environment
    /// overrides apply either way.
    pub fn load() -> Self {
        let mut config = Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default();
        config.apply_env();
        config
    }

    /// Read a config file without environment overrides
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .map(|json| Self::from_json(&json))
            .unwrap_or_default()
    }

    /// Parse a config file, falling back to defaults on error
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|e| {
            tracing::warn!("Ignoring invalid config: {e}");
            Self::default()
        })
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(GENERATE_URL_ENV) {
            if !url.trim().is_empty() {
                self.generation.endpoint = url;
            }
        }
    }

    /// Save config to the platform config file, returning where it went
    pub fn save(&self) -> Option<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path).then_some(path)
    }

    pub fn save_to(&self, path: &Path) -> bool {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let Ok(json) = serde_json::to_string_pretty(self) else {
            return false;
        };
        match std::fs::write(path, json) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to write config {}: {e}", path.display());
                false
            }
        }
    }
}
