/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Character key to editor action mapping.

use crate::editor::ToolMode;
use crate::graph::NodeColor;
use crate::graph::color::DEFAULT_PALETTE;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Action bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    Select,
    AddNode,
    AddEdge,
    Remove,
    /// Create a vertex right away at the last known pointer position
    AddVertexAtPointer,
    /// Pick the color for subsequently created vertices (palette keys)
    #[serde(skip)]
    SelectColor(NodeColor),
}

impl KeyAction {
    /// The tool mode this action switches to, if it is a mode action
    pub fn mode(self) -> Option<ToolMode> {
        match self {
            KeyAction::Select => Some(ToolMode::Select),
            KeyAction::AddNode => Some(ToolMode::AddNode),
            KeyAction::AddEdge => Some(ToolMode::AddEdge),
            KeyAction::Remove => Some(ToolMode::Remove),
            KeyAction::AddVertexAtPointer | KeyAction::SelectColor(_) => None,
        }
    }
}

/// Built-in key schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyScheme {
    /// `1` select, `2` add node, `3` add edge, `4` remove
    #[default]
    Digits,
    /// `m` select, `e` add edge, `n` add a vertex at the pointer
    Mnemonic,
}

impl KeyScheme {
    pub fn bindings(self) -> &'static [(char, KeyAction)] {
        match self {
            KeyScheme::Digits => &[
                ('1', KeyAction::Select),
                ('2', KeyAction::AddNode),
                ('3', KeyAction::AddEdge),
                ('4', KeyAction::Remove),
            ],
            KeyScheme::Mnemonic => &[
                ('m', KeyAction::Select),
                ('e', KeyAction::AddEdge),
                ('n', KeyAction::AddVertexAtPointer),
            ],
        }
    }
}

impl fmt::Display for KeyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyScheme::Digits => "digits",
            KeyScheme::Mnemonic => "mnemonic",
        })
    }
}

impl FromStr for KeyScheme {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "digits" | "a" => Ok(KeyScheme::Digits),
            "mnemonic" | "b" => Ok(KeyScheme::Mnemonic),
            other => Err(format!(
                "unknown key scheme {other:?}, expected \"digits\" or \"mnemonic\""
            )),
        }
    }
}

/// Resolved key bindings, matched ASCII case-insensitively
#[derive(Debug, Clone, PartialEq)]
pub struct Keymap {
    bindings: HashMap<char, KeyAction>,
}

impl Keymap {
    /// Build a keymap in layers: palette keys, then the scheme, then `extra`.
    /// Later layers shadow earlier ones on the same key.
    pub fn new(
        scheme: KeyScheme,
        palette: &[(NodeColor, char)],
        extra: impl IntoIterator<Item = (char, KeyAction)>,
    ) -> Self {
        let mut keymap = Self {
            bindings: HashMap::new(),
        };
        for &(color, key) in palette {
            keymap.bind(key, KeyAction::SelectColor(color));
        }
        for &(key, action) in scheme.bindings() {
            keymap.bind(key, action);
        }
        for (key, action) in extra {
            keymap.bind(key, action);
        }
        keymap
    }

    /// Scheme bindings plus the default palette
    pub fn from_scheme(scheme: KeyScheme) -> Self {
        Self::new(scheme, &DEFAULT_PALETTE, [])
    }

    pub fn lookup(&self, key: char) -> Option<KeyAction> {
        self.bindings.get(&key.to_ascii_lowercase()).copied()
    }

    /// First key bound to `action`, for UI hints
    pub fn key_for(&self, action: KeyAction) -> Option<char> {
        self.bindings
            .iter()
            .filter(|&(_, bound)| *bound == action)
            .map(|(&key, _)| key)
            .min()
    }

    fn bind(&mut self, key: char, action: KeyAction) {
        let key = key.to_ascii_lowercase();
        if let Some(previous) = self.bindings.insert(key, action) {
            if previous != action {
                debug!("key {key:?}: {action:?} shadows {previous:?}");
            }
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_scheme(KeyScheme::default())
    }
}
