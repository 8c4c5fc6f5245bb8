/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Desktop window: information/tool side panel plus the editing canvas.

use crate::editor::{Command, GraphEditor, ToolMode};
use crate::graph::{GraphError, NodeColor, VertexId};
use crate::input::{self, CommandQueue, PointerTracker};
use crate::render;
use egui::{Color32, CursorIcon, RichText, Sense, Ui};
use log::{debug, warn};

/// Action requested from the side panel, applied after the panel is drawn
enum PanelAction {
    Command(Command),
    Rename(VertexId, String),
}

pub struct EditorApp {
    editor: GraphEditor,

    /// Palette swatches as (color, key)
    palette: Vec<(NodeColor, char)>,

    tracker: PointerTracker,

    /// Last graph version seen, for change notification
    seen_version: u64,

    /// Label text field contents and the vertex it belongs to
    label_buffer: String,
    label_target: Option<VertexId>,

    last_error: Option<GraphError>,
}

impl EditorApp {
    pub fn new(editor: GraphEditor, palette: Vec<(NodeColor, char)>) -> Self {
        let seen_version = editor.graph().version();
        Self {
            editor,
            palette,
            tracker: PointerTracker::default(),
            seen_version,
            label_buffer: String::new(),
            label_target: None,
            last_error: None,
        }
    }

    fn side_panel(&mut self, ui: &mut Ui) -> Vec<PanelAction> {
        let mut actions = Vec::new();
        let graph = self.editor.graph();

        ui.heading("Information");
        ui.label(RichText::new(format!("V = {}", graph.vertex_count())).monospace());
        ui.label(RichText::new(format!("E = {}", graph.edge_count())).monospace());
        ui.separator();

        ui.label("Tool");
        for mode in ToolMode::ALL {
            let text = match self.editor.keymap().key_for(mode.key_action()) {
                Some(key) => format!("{}  [{key}]", mode.label()),
                None => mode.label().to_string(),
            };
            if ui.selectable_label(self.editor.mode() == mode, text).clicked() {
                actions.push(PanelAction::Command(Command::SetMode(mode)));
            }
        }
        ui.separator();

        ui.label("Color");
        ui.horizontal_wrapped(|ui| {
            for &(color, key) in &self.palette {
                let fill = render::to_color32(color);
                let current = self.editor.current_color() == color;
                let button = egui::Button::new(
                    RichText::new(key.to_ascii_uppercase().to_string()).color(Color32::WHITE),
                )
                .fill(fill)
                .selected(current)
                .min_size(egui::vec2(28.0, 28.0));
                if ui.add(button).clicked() {
                    actions.push(PanelAction::Command(Command::SetColor(color)));
                }
            }
        });
        ui.separator();

        if let Some(id) = self.editor.selection() {
            if self.label_target != Some(id) {
                self.label_target = Some(id);
                self.label_buffer = graph
                    .vertex(id)
                    .map(|vertex| vertex.label.clone())
                    .unwrap_or_default();
            }
            ui.label("Label");
            if ui.text_edit_singleline(&mut self.label_buffer).changed() {
                actions.push(PanelAction::Rename(id, self.label_buffer.clone()));
            }
            ui.separator();
        } else {
            self.label_target = None;
        }

        ui.label("Vertices");
        egui::ScrollArea::vertical().show(ui, |ui| {
            for (index, vertex) in graph.vertices().enumerate() {
                ui.horizontal(|ui| {
                    let selected = self.editor.selection() == Some(vertex.id);
                    let text = format!("{}  {}", index + 1, vertex.label);
                    if ui.selectable_label(selected, text).clicked() {
                        actions.push(PanelAction::Command(Command::ToggleSelection(vertex.id)));
                    }
                    let (rect, _) = ui.allocate_exact_size(egui::vec2(20.0, 12.0), Sense::hover());
                    ui.painter()
                        .rect_filled(rect, 2.0, render::to_color32(vertex.color));
                });
            }
        });

        if let Some(error) = &self.last_error {
            ui.separator();
            ui.colored_label(Color32::from_rgb(200, 60, 60), error.to_string());
        }

        actions
    }

    fn apply_panel_actions(&mut self, actions: Vec<PanelAction>) {
        for action in actions {
            let result = match action {
                PanelAction::Command(command) => self.editor.apply(command),
                PanelAction::Rename(id, label) => self.editor.rename_vertex(id, &label),
            };
            if let Err(error) = result {
                self.report(error);
            }
        }
    }

    fn canvas(&mut self, ui: &mut Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());

        let mut queue: CommandQueue =
            input::collect_commands(ui, &response, self.editor.graph(), &mut self.tracker);
        for error in self.editor.pump(&mut queue) {
            self.report(error);
        }

        if response.hovered() {
            let cursor = match self.editor.mode() {
                ToolMode::Select if self.editor.drag_target().is_some() => CursorIcon::Grabbing,
                ToolMode::Select => CursorIcon::Grab,
                ToolMode::AddNode | ToolMode::AddEdge => CursorIcon::Crosshair,
                ToolMode::Remove => CursorIcon::NotAllowed,
            };
            ui.ctx().set_cursor_icon(cursor);
        }

        render::paint(&painter, response.rect.min, &self.editor.snapshot());
    }

    fn report(&mut self, error: GraphError) {
        warn!("{error}");
        self.last_error = Some(error);
    }

    /// Poll the graph version and react to changes
    fn observe_graph(&mut self, ctx: &egui::Context) {
        let graph = self.editor.graph();
        if graph.version() == self.seen_version {
            return;
        }
        debug!(
            "graph changed (version {} -> {}): V = {}, E = {}",
            self.seen_version,
            graph.version(),
            graph.vertex_count(),
            graph.edge_count()
        );
        self.seen_version = graph.version();
        ctx.request_repaint();
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let actions = egui::SidePanel::left("info_panel")
            .resizable(false)
            .default_width(220.0)
            .show(ctx, |ui| self.side_panel(ui))
            .inner;
        self.apply_panel_actions(actions);

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(render::CANVAS_BACKGROUND))
            .show(ctx, |ui| self.canvas(ui));

        self.observe_graph(ctx);
    }
}
