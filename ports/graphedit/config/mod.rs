/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Configuration system for the graph editor.

pub mod keybinds;
pub mod palette;

use crate::input::Keymap;
use keybinds::KeybindConfig;
use log::{info, warn};
use palette::PaletteConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration loading/saving failure
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("key binding {0:?} must be a single character")]
    InvalidKey(String),

    #[error(transparent)]
    InvalidColor(#[from] crate::graph::color::ParseColorError),
}

/// Whole editor configuration (`config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub keybinds: KeybindConfig,
    pub palette: PaletteConfig,
}

impl EditorConfig {
    /// Load the config from the default location, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => {
                info!("loaded config from {}", path.display());
                config
            },
            Err(e) => {
                warn!("Ignoring config {}: {e}", path.display());
                Self::default()
            },
        }
    }

    /// Load and validate a config file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.keymap()?;
        Ok(config)
    }

    /// Save the config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Resolve key bindings: palette keys, then the scheme, then extra bindings
    pub fn keymap(&self) -> Result<Keymap, ConfigError> {
        Ok(Keymap::new(
            self.keybinds.scheme,
            &self.palette.entries()?,
            self.keybinds.extra_bindings()?,
        ))
    }

    /// Default config file path
    pub fn config_path() -> PathBuf {
        config_dir().join("config.toml")
    }
}

/// Get the config directory for graphedit
pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            PathBuf::from(appdata).join("graphedit")
        } else {
            PathBuf::from(".graphedit")
        }
    }

    #[cfg(not(target_os = "windows"))]
    {
        if let Some(config_home) = dirs::config_dir() {
            config_home.join("graphedit")
        } else {
            PathBuf::from(".graphedit")
        }
    }
}

/// Parse a binding key: exactly one character, stored lowercase
pub(crate) fn parse_key(key: &str) -> Result<char, ConfigError> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c.to_ascii_lowercase()),
        _ => Err(ConfigError::InvalidKey(key.to_string())),
    }
}
