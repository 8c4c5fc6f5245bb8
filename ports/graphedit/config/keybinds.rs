/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Keybind configuration.

use super::{ConfigError, parse_key};
use crate::input::{KeyAction, KeyScheme};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Keybind configuration (`[keybinds]`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeybindConfig {
    /// Built-in scheme: "digits" (1-4) or "mnemonic" (m/e/n)
    pub scheme: KeyScheme,

    /// Additional single-character bindings, applied over the scheme
    pub extra: BTreeMap<String, KeyAction>,
}

impl KeybindConfig {
    /// Validated extra bindings
    pub fn extra_bindings(&self) -> Result<Vec<(char, KeyAction)>, ConfigError> {
        self.extra
            .iter()
            .map(|(key, &action)| -> Result<_, ConfigError> { Ok((parse_key(key)?, action)) })
            .collect()
    }
}
