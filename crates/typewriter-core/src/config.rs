use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::types::TypewriterOptions;

/// Top-level configuration for a typewriter.
///
/// Usually embedded by the host application, but can also be loaded from a
/// TOML file:
///
/// ```toml
/// phrases = ["Hello", "World"]
///
/// [general]
/// log_level = "debug"
///
/// [options]
/// loop_limit = 2
///
/// [options.typing_speed]
/// num_units = 1
/// time_ms = 100
/// start_delay_ms = 10
/// unit = "word"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypewriterConfig {
    #[serde(default)]
    pub phrases: Vec<String>,
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub options: TypewriterOptions,
}

impl TypewriterConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read, parsed, or fails
    /// [`TypewriterOptions::validate`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TypewriterConfig = toml::from_str(&content)?;
        config.validate()?;
        info!(
            phrases = config.phrases.len(),
            "Configuration loaded from {}",
            path.display()
        );
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or is invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.options.validate()
    }

    /// Install the default tracing subscriber at `general.log_level`.
    ///
    /// `RUST_LOG` still takes precedence. Returns `false` if a subscriber was
    /// already installed.
    pub fn init_tracing(&self) -> bool {
        crate::logging::init_tracing(&self.general.log_level)
    }
}

/// Settings for the surrounding process rather than the animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
