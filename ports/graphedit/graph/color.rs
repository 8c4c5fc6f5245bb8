/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Vertex color tags.
//!
//! The graph treats a color as an opaque category tag; only the renderer
//! and the palette configuration care about the actual channel values.

use std::fmt;
use std::str::FromStr;

/// Color used for vertices created before any palette entry is chosen
pub const DEFAULT_NODE_COLOR: NodeColor = NodeColor::from_rgb(0xff, 0x63, 0x61);

/// Default palette as (color, key) pairs
pub const DEFAULT_PALETTE: [(NodeColor, char); 4] = [
    (DEFAULT_NODE_COLOR, 'q'),
    (NodeColor::from_rgb(0x84, 0x5e, 0xc2), 'w'),
    (NodeColor::from_rgb(0xff, 0x96, 0x71), 'e'),
    (NodeColor::from_rgb(0xff, 0xc7, 0x5f), 'r'),
];

/// An RGB color tag attached to a vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Failure to parse a `#rrggbb` string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {0:?}, expected #rrggbb")]
pub struct ParseColorError(pub String);

impl NodeColor {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as lowercase `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for NodeColor {
    fn default() -> Self {
        DEFAULT_NODE_COLOR
    }
}

impl fmt::Display for NodeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for NodeColor {
    type Err = ParseColorError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(input.to_string());
        let digits = input.trim().strip_prefix('#').ok_or_else(err)?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(err());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| err())
        };
        Ok(Self::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}
