/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Interactive directed multigraph editor.
//!
//! `graph` owns the vertex/edge store, `editor` is the tool-mode state
//! machine driven by `input` commands, and `render`/`desktop` draw the
//! result in an egui window.

pub mod config;
pub mod desktop;
pub mod editor;
pub mod graph;
pub mod input;
pub mod render;
