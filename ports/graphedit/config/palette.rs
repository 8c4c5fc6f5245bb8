/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Vertex color palette configuration.

use super::{ConfigError, parse_key};
use crate::graph::NodeColor;
use crate::graph::color::DEFAULT_PALETTE;
use serde::{Deserialize, Serialize};

/// One palette swatch and the key that picks it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// `#rrggbb`
    pub color: String,
    pub key: String,
}

/// Palette configuration (`[palette]`); the first entry is the initial color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub colors: Vec<PaletteEntry>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE
                .iter()
                .map(|&(color, key)| PaletteEntry {
                    color: color.to_hex(),
                    key: key.to_ascii_uppercase().to_string(),
                })
                .collect(),
        }
    }
}

impl PaletteConfig {
    /// Validated (color, key) pairs in palette order
    pub fn entries(&self) -> Result<Vec<(NodeColor, char)>, ConfigError> {
        self.colors
            .iter()
            .map(|entry| -> Result<_, ConfigError> {
                Ok((entry.color.parse::<NodeColor>()?, parse_key(&entry.key)?))
            })
            .collect()
    }

    /// Color for new vertices at startup
    pub fn initial_color(&self) -> NodeColor {
        self.entries()
            .ok()
            .and_then(|entries| entries.first().map(|&(color, _)| color))
            .unwrap_or_default()
    }
}
