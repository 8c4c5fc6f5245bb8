/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Input handling for the graph editor.
//!
//! Platform events are translated into the editor's `Command` vocabulary
//! here. The editor only ever sees commands through an `InputSource`, which
//! keeps it free of any windowing dependency and lets tests feed scripted
//! command sequences.

pub mod keymap;

use crate::editor::Command;
use crate::graph::Graph;
use crate::render;
use egui::{PointerButton, Pos2, Response, Ui};
use euclid::default::Point2D;
use std::collections::VecDeque;

pub use keymap::{KeyAction, KeyScheme, Keymap};

/// Producer of editor commands
pub trait InputSource {
    /// Next pending command, or `None` once the source is drained
    fn next_command(&mut self) -> Option<Command>;
}

/// FIFO of commands; used both for per-frame egui input and scripted input.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    commands: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl InputSource for CommandQueue {
    fn next_command(&mut self) -> Option<Command> {
        self.commands.pop_front()
    }
}

impl FromIterator<Command> for CommandQueue {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

/// Pointer state carried across frames so that continuous pointer motion
/// is only reported when it actually changes.
#[derive(Debug, Default)]
pub struct PointerTracker {
    last_pointer: Option<Point2D<f32>>,
}

impl PointerTracker {
    fn moved_to(&mut self, point: Point2D<f32>) -> bool {
        if self.last_pointer == Some(point) {
            return false;
        }
        self.last_pointer = Some(point);
        true
    }
}

/// Convert a screen position to canvas coordinates (canvas origin at `origin`)
pub fn to_canvas(origin: Pos2, pos: Pos2) -> Point2D<f32> {
    Point2D::new(pos.x - origin.x, pos.y - origin.y)
}

/// Collect commands for this frame from the canvas response (input detection only).
///
/// `graph` is used for hit-testing; nothing is mutated here.
pub(crate) fn collect_commands(
    ui: &Ui,
    response: &Response,
    graph: &Graph,
    tracker: &mut PointerTracker,
) -> CommandQueue {
    let origin = response.rect.min;
    let mut queue = CommandQueue::new();
    let hit = |pos: Pos2| render::vertex_at(graph, to_canvas(origin, pos));

    if let Some(pos) = response.hover_pos() {
        let point = to_canvas(origin, pos);
        if tracker.moved_to(point) {
            queue.push(Command::PointerMove(point));
        }
    }

    if response.drag_started_by(PointerButton::Primary) {
        let press = ui
            .input(|i| i.pointer.press_origin())
            .or_else(|| response.interact_pointer_pos());
        if let Some(id) = press.and_then(hit) {
            queue.push(Command::DragStart(id));
        }
    }
    if response.dragged_by(PointerButton::Primary) {
        if let Some(pos) = response.interact_pointer_pos() {
            let point = to_canvas(origin, pos);
            tracker.moved_to(point);
            queue.push(Command::DragMove(point));
        }
    }
    if response.drag_stopped_by(PointerButton::Primary) {
        queue.push(Command::DragEnd);
    }

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            queue.push(match hit(pos) {
                Some(id) => Command::ClickVertex(id),
                None => Command::ClickBackground(to_canvas(origin, pos)),
            });
        }
    }
    if response.secondary_clicked() {
        let target = response.interact_pointer_pos().and_then(hit);
        queue.push(Command::RightClick(target));
    }

    // Typing into a text field (e.g. the label editor) must not switch tools
    let text_field_focused = ui.ctx().memory(|m| m.focused().is_some());
    if !text_field_focused {
        ui.input(|i| {
            for event in &i.events {
                if let egui::Event::Text(text) = event {
                    for key in text.chars() {
                        queue.push(Command::KeyPress(key));
                    }
                }
            }
        });
    }

    queue
}
