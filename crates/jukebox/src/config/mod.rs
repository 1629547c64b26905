//! Configuration system

pub use serde::{Serialize, Deserialize};

use crate::assets::content::DEFAULT_EXTENSIONS;
use crate::audio::backend::AudioBackendConfig;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Assets to preload, identifier → source name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioManifest {
    /// Music tracks
    pub tracks: BTreeMap<String, String>,
    /// Sound effects
    pub effects: BTreeMap<String, String>,
}

/// Audio manager configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Directory content names are resolved against
    pub content_root: PathBuf,
    /// Extensions tried for names given without one
    pub search_extensions: Vec<String>,
    /// Volume for effect instances created by this manager
    pub sound_volume: f32,
    /// Process-wide music volume to apply at startup; left untouched when unset
    pub music_volume: Option<f32>,
    /// Output backend
    pub backend: AudioBackendConfig,
    /// Assets loaded when the manager is built
    pub manifest: AudioManifest,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from("Content"),
            search_extensions: DEFAULT_EXTENSIONS.iter().map(|ext| (*ext).to_string()).collect(),
            sound_volume: 1.0,
            music_volume: None,
            backend: AudioBackendConfig::default(),
            manifest: AudioManifest::default(),
        }
    }
}

impl Config for AudioConfig {}
