/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Interactive editing state machine.
//!
//! `GraphEditor` owns the graph plus the transient editing state (tool mode,
//! selection, pending edge source, drag target, preview line) and interprets
//! one `Command` at a time. Each command is fully applied before the next one
//! is accepted, so renderers always observe a consistent snapshot.

use crate::graph::{DEFAULT_LABEL, Graph, GraphError, NodeColor, VertexId};
use crate::input::{InputSource, KeyAction, Keymap};
use euclid::default::Point2D;
use log::{debug, trace};

/// Current interpretation context for canvas input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    #[default]
    Select,
    AddNode,
    AddEdge,
    Remove,
}

impl ToolMode {
    pub const ALL: [ToolMode; 4] = [
        ToolMode::Select,
        ToolMode::AddNode,
        ToolMode::AddEdge,
        ToolMode::Remove,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ToolMode::Select => "Select",
            ToolMode::AddNode => "Add node",
            ToolMode::AddEdge => "Add edge",
            ToolMode::Remove => "Remove",
        }
    }

    /// Key action that switches to this mode
    pub fn key_action(self) -> KeyAction {
        match self {
            ToolMode::Select => KeyAction::Select,
            ToolMode::AddNode => KeyAction::AddNode,
            ToolMode::AddEdge => KeyAction::AddEdge,
            ToolMode::Remove => KeyAction::Remove,
        }
    }
}

/// Discrete input vocabulary consumed by the editor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Primary click on empty canvas at the given canvas position
    ClickBackground(Point2D<f32>),
    /// Primary click on a vertex
    ClickVertex(VertexId),
    /// Secondary click, on a vertex or on the background
    RightClick(Option<VertexId>),
    DragStart(VertexId),
    DragMove(Point2D<f32>),
    DragEnd,
    /// Continuous pointer motion
    PointerMove(Point2D<f32>),
    SetMode(ToolMode),
    KeyPress(char),
    /// Choose the color for subsequently created vertices
    SetColor(NodeColor),
    /// Toggle selection from the vertex list; switches to `Select` first
    ToggleSelection(VertexId),
}

/// Rubber-band line from the pending edge source to the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewLine {
    pub source: VertexId,
    pub endpoint: Point2D<f32>,
}

/// Read-only view handed to the renderer
#[derive(Clone, Copy)]
pub struct EditorSnapshot<'a> {
    pub graph: &'a Graph,
    pub mode: ToolMode,
    pub selection: Option<VertexId>,
    pub pending_edge_source: Option<VertexId>,
    /// Preview line as (source position, pointer position)
    pub preview: Option<(Point2D<f32>, Point2D<f32>)>,
}

/// The editing session: graph plus transient state
pub struct GraphEditor {
    graph: Graph,
    mode: ToolMode,
    selection: Option<VertexId>,

    /// Origin of the edge being drawn; only set in `AddEdge`
    pending_edge_source: Option<VertexId>,

    /// Present exactly when `pending_edge_source` is
    preview: Option<PreviewLine>,

    drag_target: Option<VertexId>,

    /// Last known pointer position in canvas coordinates
    pointer: Point2D<f32>,

    current_color: NodeColor,
    keymap: Keymap,
}

impl GraphEditor {
    /// Create an editor over an empty graph
    pub fn new(keymap: Keymap, color: NodeColor) -> Self {
        Self::with_graph(Graph::new(), keymap, color)
    }

    /// Create an editor over an existing graph (e.g. seed data)
    pub fn with_graph(graph: Graph, keymap: Keymap, color: NodeColor) -> Self {
        Self {
            graph,
            mode: ToolMode::Select,
            selection: None,
            pending_edge_source: None,
            preview: None,
            drag_target: None,
            pointer: Point2D::zero(),
            current_color: color,
            keymap,
        }
    }

    /// Apply a single command.
    ///
    /// On `NotFound` the gesture that referenced the missing vertex is
    /// abandoned before the error is returned; the session stays usable.
    pub fn apply(&mut self, command: Command) -> Result<(), GraphError> {
        trace!("{command:?} in {:?}", self.mode);
        let result = self.dispatch(command);
        if let Err(GraphError::NotFound(id)) = result {
            debug!("abandoning gesture on missing vertex {id}");
            self.forget(id);
        }
        result
    }

    /// Drain `source`, applying every command; returns the errors encountered
    pub fn pump(&mut self, source: &mut dyn InputSource) -> Vec<GraphError> {
        let mut errors = Vec::new();
        while let Some(command) = source.next_command() {
            if let Err(error) = self.apply(command) {
                errors.push(error);
            }
        }
        errors
    }

    fn dispatch(&mut self, command: Command) -> Result<(), GraphError> {
        match command {
            Command::SetMode(mode) => {
                self.set_mode(mode);
                Ok(())
            },
            Command::ClickBackground(position) => {
                self.pointer = position;
                self.click_background(position);
                Ok(())
            },
            Command::ClickVertex(id) => self.click_vertex(id),
            Command::RightClick(target) => self.right_click(target),
            Command::DragStart(id) => self.drag_start(id),
            Command::DragMove(position) => {
                self.pointer = position;
                self.drag_move(position)
            },
            Command::DragEnd => {
                self.drag_target = None;
                Ok(())
            },
            Command::PointerMove(position) => {
                self.pointer = position;
                if let Some(preview) = self.preview.as_mut() {
                    preview.endpoint = position;
                }
                Ok(())
            },
            Command::KeyPress(key) => {
                self.key_press(key);
                Ok(())
            },
            Command::SetColor(color) => {
                self.current_color = color;
                Ok(())
            },
            Command::ToggleSelection(id) => {
                if !self.graph.contains(id) {
                    return Err(GraphError::NotFound(id));
                }
                self.set_mode(ToolMode::Select);
                self.toggle_selection(id)
            },
        }
    }

    fn set_mode(&mut self, mode: ToolMode) {
        if self.mode == ToolMode::AddEdge && mode != ToolMode::AddEdge {
            self.clear_pending_edge();
        }
        if mode != ToolMode::Select {
            // Selection and dragging only live in SELECT
            self.selection = None;
            self.drag_target = None;
        }
        if self.mode != mode {
            debug!("mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }

    fn click_background(&mut self, position: Point2D<f32>) {
        if self.mode == ToolMode::AddNode {
            self.graph
                .add_vertex(position, self.current_color, DEFAULT_LABEL);
            return;
        }
        self.selection = None;
        self.clear_pending_edge();
        self.set_mode(ToolMode::Select);
    }

    fn click_vertex(&mut self, id: VertexId) -> Result<(), GraphError> {
        match self.mode {
            ToolMode::AddNode => Ok(()),
            ToolMode::Select => self.toggle_selection(id),
            ToolMode::AddEdge => match self.pending_edge_source {
                None => self.begin_edge(id),
                // The source stays pending so repeated clicks add parallel edges
                Some(source) => self.graph.add_edge(source, id),
            },
            ToolMode::Remove => {
                self.graph.remove_vertex(id)?;
                self.forget(id);
                Ok(())
            },
        }
    }

    fn right_click(&mut self, target: Option<VertexId>) -> Result<(), GraphError> {
        let Some(id) = target else {
            self.set_mode(ToolMode::Select);
            self.selection = None;
            self.clear_pending_edge();
            return Ok(());
        };
        if self.mode == ToolMode::AddEdge && self.pending_edge_source == Some(id) {
            self.clear_pending_edge();
            self.set_mode(ToolMode::Select);
            return Ok(());
        }
        if !self.graph.contains(id) {
            return Err(GraphError::NotFound(id));
        }
        // Shortcut into edge drawing, or re-anchor an edge already in progress
        self.set_mode(ToolMode::AddEdge);
        self.begin_edge(id)
    }

    fn drag_start(&mut self, id: VertexId) -> Result<(), GraphError> {
        if self.mode != ToolMode::Select {
            return Ok(());
        }
        if !self.graph.contains(id) {
            return Err(GraphError::NotFound(id));
        }
        self.drag_target = Some(id);
        self.selection = Some(id);
        Ok(())
    }

    fn drag_move(&mut self, position: Point2D<f32>) -> Result<(), GraphError> {
        match (self.mode, self.drag_target) {
            (ToolMode::Select, Some(id)) => self.graph.update_vertex_position(id, position),
            _ => Ok(()),
        }
    }

    fn key_press(&mut self, key: char) {
        let Some(action) = self.keymap.lookup(key) else {
            trace!("unbound key {key:?}");
            return;
        };
        match action {
            KeyAction::AddVertexAtPointer => {
                self.graph
                    .add_vertex(self.pointer, self.current_color, DEFAULT_LABEL);
            },
            KeyAction::SelectColor(color) => self.current_color = color,
            mode_action => {
                if let Some(mode) = mode_action.mode() {
                    self.set_mode(mode);
                }
            },
        }
    }

    /// Select `id`, or clear the selection if `id` is already selected
    fn toggle_selection(&mut self, id: VertexId) -> Result<(), GraphError> {
        if self.selection == Some(id) {
            self.selection = None;
            return Ok(());
        }
        if !self.graph.contains(id) {
            return Err(GraphError::NotFound(id));
        }
        self.selection = Some(id);
        Ok(())
    }

    /// Rename a vertex
    pub fn rename_vertex(&mut self, id: VertexId, label: &str) -> Result<(), GraphError> {
        self.graph.set_label(id, label)
    }

    fn begin_edge(&mut self, source: VertexId) -> Result<(), GraphError> {
        if !self.graph.contains(source) {
            return Err(GraphError::NotFound(source));
        }
        self.pending_edge_source = Some(source);
        self.preview = Some(PreviewLine {
            source,
            endpoint: self.pointer,
        });
        Ok(())
    }

    /// Tear down the pending edge and its preview together
    fn clear_pending_edge(&mut self) {
        self.pending_edge_source = None;
        self.preview = None;
    }

    /// Drop every transient reference to `id`
    fn forget(&mut self, id: VertexId) {
        if self.selection == Some(id) {
            self.selection = None;
        }
        if self.pending_edge_source == Some(id) {
            self.clear_pending_edge();
        }
        if self.drag_target == Some(id) {
            self.drag_target = None;
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn selection(&self) -> Option<VertexId> {
        self.selection
    }

    pub fn pending_edge_source(&self) -> Option<VertexId> {
        self.pending_edge_source
    }

    pub fn drag_target(&self) -> Option<VertexId> {
        self.drag_target
    }

    pub fn preview(&self) -> Option<PreviewLine> {
        self.preview
    }

    pub fn pointer(&self) -> Point2D<f32> {
        self.pointer
    }

    pub fn current_color(&self) -> NodeColor {
        self.current_color
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Snapshot for rendering
    pub fn snapshot(&self) -> EditorSnapshot<'_> {
        let preview = self.preview.and_then(|line| {
            let source = self.graph.vertex(line.source)?;
            Some((source.position, line.endpoint))
        });
        EditorSnapshot {
            graph: &self.graph,
            mode: self.mode,
            selection: self.selection,
            pending_edge_source: self.pending_edge_source,
            preview,
        }
    }
}

impl Default for GraphEditor {
    fn default() -> Self {
        Self::new(Keymap::default(), NodeColor::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::assert_counts_consistent;
    use crate::input::{CommandQueue, KeyScheme};

    const RED: NodeColor = NodeColor::from_rgb(255, 0, 0);
    const BLUE: NodeColor = NodeColor::from_rgb(0, 0, 255);

    fn test_editor() -> GraphEditor {
        GraphEditor::new(Keymap::from_scheme(KeyScheme::Digits), RED)
    }

    /// Check the graph counters and the transient-state invariants
    fn assert_consistent(editor: &GraphEditor) {
        assert_counts_consistent(editor.graph());
        assert_eq!(
            editor.preview.is_some(),
            editor.pending_edge_source.is_some(),
            "preview line must exist exactly while an edge source is pending"
        );
        if let Some(preview) = editor.preview {
            assert_eq!(Some(preview.source), editor.pending_edge_source);
        }
        if editor.pending_edge_source.is_some() {
            assert_eq!(editor.mode, ToolMode::AddEdge);
        }
        if editor.drag_target.is_some() {
            assert_eq!(editor.mode, ToolMode::Select);
        }
        for id in [editor.selection, editor.pending_edge_source, editor.drag_target]
            .into_iter()
            .flatten()
        {
            assert!(editor.graph().contains(id));
        }
    }

    fn run(editor: &mut GraphEditor, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            editor.apply(command).unwrap();
            assert_consistent(editor);
        }
    }

    /// Scenario 1: two vertices created by background clicks in ADD_NODE
    fn two_vertices(editor: &mut GraphEditor) -> (VertexId, VertexId) {
        run(editor, [
            Command::SetMode(ToolMode::AddNode),
            Command::SetColor(RED),
            Command::ClickBackground(Point2D::new(10.0, 10.0)),
            Command::SetColor(BLUE),
            Command::ClickBackground(Point2D::new(50.0, 50.0)),
        ]);
        let ids: Vec<VertexId> = editor.graph().vertices().map(|v| v.id).collect();
        let find = |pos: Point2D<f32>| {
            *ids
                .iter()
                .find(|&&id| editor.graph().vertex(id).unwrap().position == pos)
                .unwrap()
        };
        (find(Point2D::new(10.0, 10.0)), find(Point2D::new(50.0, 50.0)))
    }

    #[test]
    fn test_initial_state() {
        let editor = test_editor();
        assert_eq!(editor.mode(), ToolMode::Select);
        assert!(editor.selection().is_none());
        assert!(editor.pending_edge_source().is_none());
        assert!(editor.drag_target().is_none());
        assert!(editor.snapshot().preview.is_none());
    }

    #[test]
    fn test_scenario_add_vertices() {
        let mut editor = test_editor();
        let (id1, id2) = two_vertices(&mut editor);

        assert_eq!(editor.graph().vertex_count(), 2);
        assert_eq!(editor.graph().edge_count(), 0);
        assert_eq!(editor.graph().vertex(id1).unwrap().color, RED);
        assert_eq!(editor.graph().vertex(id2).unwrap().color, BLUE);
        assert_eq!(editor.graph().vertex(id2).unwrap().label, DEFAULT_LABEL);
        // ADD_NODE is sticky
        assert_eq!(editor.mode(), ToolMode::AddNode);
    }

    #[test]
    fn test_scenario_parallel_edges_from_pending_source() {
        let mut editor = test_editor();
        let (id1, id2) = two_vertices(&mut editor);

        run(&mut editor, [
            Command::SetMode(ToolMode::AddEdge),
            Command::ClickVertex(id1),
        ]);
        assert_eq!(editor.pending_edge_source(), Some(id1));
        assert_eq!(editor.graph().edge_count(), 0);

        run(&mut editor, [Command::ClickVertex(id2)]);
        assert_eq!(editor.graph().edge_count(), 1);
        assert!(editor.graph().adjacent(id1, id2));

        run(&mut editor, [Command::ClickVertex(id2)]);
        assert_eq!(editor.graph().edge_count(), 2);
        assert_eq!(editor.graph().adjacency(id1).unwrap(), vec![id2, id2]);
        assert_eq!(editor.pending_edge_source(), Some(id1));
    }

    #[test]
    fn test_scenario_remove_vertex_drops_its_edges() {
        let mut editor = test_editor();
        let (id1, id2) = two_vertices(&mut editor);
        run(&mut editor, [
            Command::SetMode(ToolMode::AddEdge),
            Command::ClickVertex(id1),
            Command::ClickVertex(id2),
            Command::ClickVertex(id2),
        ]);
        let before = editor.graph().vertex(id2).unwrap().clone();

        run(&mut editor, [
            Command::SetMode(ToolMode::Remove),
            Command::ClickVertex(id1),
        ]);

        assert_eq!(editor.graph().vertex_count(), 1);
        assert_eq!(editor.graph().edge_count(), 0);
        assert_eq!(editor.graph().vertex(id2), Some(&before));
        assert!(editor.graph().vertex(id1).is_none());
    }

    #[test]
    fn test_scenario_drag_moves_vertex() {
        let mut editor = test_editor();
        let (id1, id2) = two_vertices(&mut editor);
        run(&mut editor, [
            Command::SetMode(ToolMode::AddEdge),
            Command::ClickVertex(id1),
            Command::ClickVertex(id2),
            Command::SetMode(ToolMode::Select),
        ]);
        let (v, e) = (editor.graph().vertex_count(), editor.graph().edge_count());

        run(&mut editor, [Command::DragStart(id2)]);
        assert_eq!(editor.drag_target(), Some(id2));
        assert_eq!(editor.selection(), Some(id2));

        run(&mut editor, [
            Command::DragMove(Point2D::new(80.0, 80.0)),
            Command::DragEnd,
        ]);
        assert_eq!(
            editor.graph().vertex(id2).unwrap().position,
            Point2D::new(80.0, 80.0)
        );
        assert!(editor.drag_target().is_none());
        assert_eq!(editor.graph().vertex_count(), v);
        assert_eq!(editor.graph().edge_count(), e);
    }

    #[test]
    fn test_scenario_right_click_pending_source_cancels() {
        let mut editor = test_editor();
        let (id1, _) = two_vertices(&mut editor);
        run(&mut editor, [
            Command::SetMode(ToolMode::AddEdge),
            Command::ClickVertex(id1),
            Command::PointerMove(Point2D::new(30.0, 40.0)),
        ]);
        assert_eq!(
            editor.snapshot().preview,
            Some((Point2D::new(10.0, 10.0), Point2D::new(30.0, 40.0)))
        );

        run(&mut editor, [Command::RightClick(Some(id1))]);
        assert!(editor.pending_edge_source().is_none());
        assert_eq!(editor.mode(), ToolMode::Select);
        assert!(editor.snapshot().preview.is_none());
    }

    #[test]
    fn test_drag_applies_every_move() {
        let mut editor = test_editor();
        let (_, id2) = two_vertices(&mut editor);
        run(&mut editor, [
            Command::SetMode(ToolMode::Select),
            Command::DragStart(id2),
            Command::DragMove(Point2D::new(60.0, 60.0)),
        ]);
        assert_eq!(editor.graph().vertex(id2).unwrap().position, Point2D::new(60.0, 60.0));
        run(&mut editor, [Command::DragMove(Point2D::new(-5000.0, 9000.0))]);
        assert_eq!(
            editor.graph().vertex(id2).unwrap().position,
            Point2D::new(-5000.0, 9000.0)
        );
    }

    #[test]
    fn test_drag_outside_select_is_ignored() {
        let mut editor = test_editor();
        let (id1, _) = two_vertices(&mut editor);
        run(&mut editor, [
            Command::DragStart(id1),
            Command::DragMove(Point2D::new(99.0, 99.0)),
            Command::DragEnd,
        ]);
        assert!(editor.drag_target().is_none());
        assert_eq!(editor.graph().vertex(id1).unwrap().position, Point2D::new(10.0, 10.0));
    }

    #[test]
    fn test_drag_of_vanished_vertex_ends_silently() {
        let mut editor = test_editor();
        let (id1, _) = two_vertices(&mut editor);
        run(&mut editor, [
            Command::SetMode(ToolMode::Select),
            Command::DragStart(id1),
        ]);
        editor.graph.remove_vertex(id1).unwrap();

        let result = editor.apply(Command::DragMove(Point2D::new(1.0, 1.0)));
        assert_eq!(result, Err(GraphError::NotFound(id1)));
        assert!(editor.drag_target().is_none());
        assert!(editor.selection().is_none());
        assert_consistent(&editor);
    }

    #[test]
    fn test_drag_released_on_mode_switch() {
        let mut editor = test_editor();
        let (id1, _) = two_vertices(&mut editor);
        run(&mut editor, [
            Command::SetMode(ToolMode::Select),
            Command::DragStart(id1),
            Command::SetMode(ToolMode::AddEdge),
        ]);
        assert!(editor.drag_target().is_none());

        run(&mut editor, [Command::DragMove(Point2D::new(500.0, 500.0))]);
        assert_eq!(editor.graph().vertex(id1).unwrap().position, Point2D::new(10.0, 10.0));
    }

    #[test]
    fn test_drag_released_on_right_click() {
        let mut editor = test_editor();
        let (id1, id2) = two_vertices(&mut editor);
        run(&mut editor, [
            Command::SetMode(ToolMode::Select),
            Command::DragStart(id1),
            Command::RightClick(Some(id2)),
        ]);
        assert!(editor.drag_target().is_none());
        assert_eq!(editor.mode(), ToolMode::AddEdge);

        run(&mut editor, [Command::DragMove(Point2D::new(500.0, 500.0))]);
        assert_eq!(editor.graph().vertex(id1).unwrap().position, Point2D::new(10.0, 10.0));
    }

    #[test]
    fn test_drag_move_after_end_is_ignored() {
        let mut editor = test_editor();
        let (id1, _) = two_vertices(&mut editor);
        run(&mut editor, [
            Command::SetMode(ToolMode::Select),
            Command::DragStart(id1),
            Command::DragMove(Point2D::new(1.0, 1.0)),
            Command::DragEnd,
        ]);
        let version = editor.graph().version();

        run(&mut editor, [Command::DragMove(Point2D::new(500.0, 500.0))]);
        assert_eq!(editor.graph().vertex(id1).unwrap().position, Point2D::new(1.0, 1.0));
        assert_eq!(editor.graph().version(), version);
    }

    #[test]
    fn test_list_toggle_switches_to_select() {
        let mut editor = test_editor();
        let (id1, id2) = two_vertices(&mut editor);
        run(&mut editor, [
            Command::SetMode(ToolMode::AddEdge),
            Command::ClickVertex(id1),
            Command::ToggleSelection(id2),
        ]);
        assert_eq!(editor.mode(), ToolMode::Select);
        assert_eq!(editor.selection(), Some(id2));
        assert!(editor.pending_edge_source().is_none());

        run(&mut editor, [Command::ToggleSelection(id2)]);
        assert!(editor.selection().is_none());

        // A selection never survives outside SELECT
        run(&mut editor, [
            Command::ToggleSelection(id1),
            Command::SetMode(ToolMode::AddNode),
            Command::SetMode(ToolMode::Select),
        ]);
        assert!(editor.selection().is_none());
    }

    #[test]
    fn test_list_toggle_of_missing_vertex() {
        let mut editor = test_editor();
        two_vertices(&mut editor);
        let stale = VertexId::generate();

        assert_eq!(
            editor.apply(Command::ToggleSelection(stale)),
            Err(GraphError::NotFound(stale))
        );
        assert_eq!(editor.mode(), ToolMode::AddNode);
        assert_consistent(&editor);
    }

    #[test]
    fn test_edge_to_vanished_source_abandons_edge() {
        let mut editor = test_editor();
        let (id1, id2) = two_vertices(&mut editor);
        run(&mut editor, [
            Command::SetMode(ToolMode::AddEdge),
            Command::ClickVertex(id1),
        ]);
        editor.graph.remove_vertex(id1).unwrap();

        assert!(editor.apply(Command::ClickVertex(id2)).is_err());
        assert!(editor.pending_edge_source().is_none());
        assert!(editor.preview().is_none());
        assert_eq!(editor.mode(), ToolMode::AddEdge);
        assert_consistent(&editor);

        // Still interactive: the next click starts a fresh edge
        run(&mut editor, [Command::ClickVertex(id2), Command::ClickVertex(id2)]);
        assert!(editor.graph().adjacent(id2, id2));
    }

    #[test]
    fn test_self_loop_via_clicks() {
        let mut editor = test_editor();
        let (id1, _) = two_vertices(&mut editor);
        run(&mut editor, [
            Command::SetMode(ToolMode::AddEdge),
            Command::ClickVertex(id1),
            Command::ClickVertex(id1),
        ]);
        assert!(editor.graph().adjacent(id1, id1));
        assert_eq!(editor.graph().edge_count(), 1);
    }

    #[test]
    fn test_select_click_toggles() {
        let mut editor = test_editor();
        let (id1, id2) = two_vertices(&mut editor);
        run(&mut editor, [Command::SetMode(ToolMode::Select)]);

        run(&mut editor, [Command::ClickVertex(id1)]);
        assert_eq!(editor.selection(), Some(id1));
        run(&mut editor, [Command::ClickVertex(id2)]);
        assert_eq!(editor.selection(), Some(id2));
        run(&mut editor, [Command::ClickVertex(id2)]);
        assert!(editor.selection().is_none());
    }

    #[test]
    fn test_click_vertex_in_add_node_is_ignored() {
        let mut editor = test_editor();
        let (id1, _) = two_vertices(&mut editor);
        let version = editor.graph().version();
        run(&mut editor, [Command::ClickVertex(id1)]);
        assert_eq!(editor.graph().vertex_count(), 2);
        assert_eq!(editor.graph().version(), version);
        assert_eq!(editor.mode(), ToolMode::AddNode);
    }

    #[test]
    fn test_click_background_resets_to_select() {
        let mut editor = test_editor();
        let (id1, id2) = two_vertices(&mut editor);

        run(&mut editor, [
            Command::SetMode(ToolMode::Select),
            Command::ClickVertex(id2),
            Command::ClickBackground(Point2D::new(300.0, 300.0)),
        ]);
        assert!(editor.selection().is_none());
        assert_eq!(editor.graph().vertex_count(), 2);

        run(&mut editor, [
            Command::SetMode(ToolMode::AddEdge),
            Command::ClickVertex(id1),
            Command::ClickBackground(Point2D::new(300.0, 300.0)),
        ]);
        assert_eq!(editor.mode(), ToolMode::Select);
        assert!(editor.pending_edge_source().is_none());
        assert!(editor.snapshot().preview.is_none());
        assert_eq!(editor.graph().vertex_count(), 2);
    }

    #[test]
    fn test_set_mode_clears_selection_except_select() {
        let mut editor = test_editor();
        let (id1, _) = two_vertices(&mut editor);
        run(&mut editor, [
            Command::SetMode(ToolMode::Select),
            Command::ClickVertex(id1),
            Command::SetMode(ToolMode::Select),
        ]);
        assert_eq!(editor.selection(), Some(id1));

        run(&mut editor, [Command::SetMode(ToolMode::Remove)]);
        assert!(editor.selection().is_none());
    }

    #[test]
    fn test_leaving_add_edge_tears_down_preview() {
        let mut editor = test_editor();
        let (id1, _) = two_vertices(&mut editor);
        for mode in [ToolMode::Select, ToolMode::AddNode, ToolMode::Remove] {
            run(&mut editor, [
                Command::SetMode(ToolMode::AddEdge),
                Command::ClickVertex(id1),
                Command::SetMode(mode),
            ]);
            assert!(editor.pending_edge_source().is_none());
            assert!(editor.snapshot().preview.is_none());
        }
    }

    #[test]
    fn test_set_add_edge_again_keeps_pending() {
        let mut editor = test_editor();
        let (id1, _) = two_vertices(&mut editor);
        run(&mut editor, [
            Command::SetMode(ToolMode::AddEdge),
            Command::ClickVertex(id1),
            Command::SetMode(ToolMode::AddEdge),
        ]);
        assert_eq!(editor.pending_edge_source(), Some(id1));
    }

    #[test]
    fn test_pointer_move_is_visual_only() {
        let mut editor = test_editor();
        let (id1, _) = two_vertices(&mut editor);
        run(&mut editor, [
            Command::SetMode(ToolMode::AddEdge),
            Command::ClickVertex(id1),
        ]);
        let version = editor.graph().version();

        run(&mut editor, [Command::PointerMove(Point2D::new(7.0, 8.0))]);
        assert_eq!(editor.graph().version(), version);
        assert_eq!(editor.preview().unwrap().endpoint, Point2D::new(7.0, 8.0));
        assert_eq!(editor.pointer(), Point2D::new(7.0, 8.0));
    }

    #[test]
    fn test_pointer_move_without_pending_has_no_preview() {
        let mut editor = test_editor();
        run(&mut editor, [
            Command::SetMode(ToolMode::AddEdge),
            Command::PointerMove(Point2D::new(7.0, 8.0)),
        ]);
        assert!(editor.preview().is_none());
    }

    #[test]
    fn test_right_click_vertex_starts_edge() {
        let mut editor = test_editor();
        let (id1, id2) = two_vertices(&mut editor);
        run(&mut editor, [
            Command::SetMode(ToolMode::Select),
            Command::ClickVertex(id2),
            Command::RightClick(Some(id1)),
        ]);
        assert_eq!(editor.mode(), ToolMode::AddEdge);
        assert_eq!(editor.pending_edge_source(), Some(id1));
        assert!(editor.selection().is_none());

        run(&mut editor, [Command::ClickVertex(id2)]);
        assert!(editor.graph().adjacent(id1, id2));
    }

    #[test]
    fn test_right_click_other_vertex_reanchors_edge() {
        let mut editor = test_editor();
        let (id1, id2) = two_vertices(&mut editor);
        run(&mut editor, [
            Command::SetMode(ToolMode::AddEdge),
            Command::ClickVertex(id1),
            Command::RightClick(Some(id2)),
        ]);
        assert_eq!(editor.mode(), ToolMode::AddEdge);
        assert_eq!(editor.pending_edge_source(), Some(id2));
        assert_eq!(editor.preview().unwrap().source, id2);
    }

    #[test]
    fn test_right_click_background_cancels() {
        let mut editor = test_editor();
        let (id1, _) = two_vertices(&mut editor);
        run(&mut editor, [
            Command::SetMode(ToolMode::AddEdge),
            Command::ClickVertex(id1),
            Command::RightClick(None),
        ]);
        assert_eq!(editor.mode(), ToolMode::Select);
        assert!(editor.pending_edge_source().is_none());
        assert!(editor.selection().is_none());
        assert!(editor.snapshot().preview.is_none());
    }

    #[test]
    fn test_remove_clears_transient_references() {
        let mut editor = test_editor();
        let (id1, id2) = two_vertices(&mut editor);
        run(&mut editor, [
            Command::SetMode(ToolMode::AddEdge),
            Command::ClickVertex(id2),
            Command::ClickVertex(id1),
            Command::SetMode(ToolMode::Remove),
            Command::ClickVertex(id2),
        ]);
        assert!(editor.graph().vertex(id2).is_none());
        assert_eq!(editor.graph().edge_count(), 0);

        // Removing a stale id reports NotFound and changes nothing
        assert_eq!(
            editor.apply(Command::ClickVertex(id2)),
            Err(GraphError::NotFound(id2))
        );
        assert_eq!(editor.graph().vertex_count(), 1);
    }

    #[test]
    fn test_digit_keys_switch_modes() {
        let mut editor = test_editor();
        run(&mut editor, [Command::KeyPress('2')]);
        assert_eq!(editor.mode(), ToolMode::AddNode);
        run(&mut editor, [Command::KeyPress('3')]);
        assert_eq!(editor.mode(), ToolMode::AddEdge);
        run(&mut editor, [Command::KeyPress('4')]);
        assert_eq!(editor.mode(), ToolMode::Remove);
        run(&mut editor, [Command::KeyPress('1')]);
        assert_eq!(editor.mode(), ToolMode::Select);
        run(&mut editor, [Command::KeyPress('z')]);
        assert_eq!(editor.mode(), ToolMode::Select);
    }

    #[test]
    fn test_mnemonic_n_adds_vertex_at_pointer() {
        let mut editor = GraphEditor::new(Keymap::from_scheme(KeyScheme::Mnemonic), BLUE);
        run(&mut editor, [
            Command::PointerMove(Point2D::new(12.0, 34.0)),
            Command::KeyPress('n'),
        ]);
        assert_eq!(editor.graph().vertex_count(), 1);
        let vertex = editor.graph().vertices().next().unwrap();
        assert_eq!(vertex.position, Point2D::new(12.0, 34.0));
        assert_eq!(vertex.color, BLUE);
        assert_eq!(editor.mode(), ToolMode::Select);

        run(&mut editor, [Command::KeyPress('e')]);
        assert_eq!(editor.mode(), ToolMode::AddEdge);
        run(&mut editor, [Command::KeyPress('m')]);
        assert_eq!(editor.mode(), ToolMode::Select);
    }

    #[test]
    fn test_palette_key_sets_current_color() {
        let mut editor = test_editor();
        let purple = NodeColor::from_rgb(0x84, 0x5e, 0xc2);
        run(&mut editor, [
            Command::KeyPress('W'),
            Command::SetMode(ToolMode::AddNode),
            Command::ClickBackground(Point2D::new(1.0, 2.0)),
        ]);
        assert_eq!(editor.current_color(), purple);
        assert_eq!(editor.graph().vertices().next().unwrap().color, purple);
    }

    #[test]
    fn test_pump_drains_source_and_collects_errors() {
        let mut editor = test_editor();
        let stale = VertexId::generate();
        let mut queue: CommandQueue = [
            Command::SetMode(ToolMode::AddNode),
            Command::ClickBackground(Point2D::new(1.0, 1.0)),
            Command::SetMode(ToolMode::Remove),
            Command::ClickVertex(stale),
            Command::SetMode(ToolMode::AddNode),
            Command::ClickBackground(Point2D::new(2.0, 2.0)),
        ]
        .into_iter()
        .collect();

        let errors = editor.pump(&mut queue);
        assert_eq!(errors, vec![GraphError::NotFound(stale)]);
        assert!(queue.is_empty());
        assert_eq!(editor.graph().vertex_count(), 2);
        assert_consistent(&editor);
    }

    #[test]
    fn test_rename_vertex() {
        let mut editor = test_editor();
        let (id1, _) = two_vertices(&mut editor);
        editor.rename_vertex(id1, "Depot").unwrap();
        assert_eq!(editor.graph().vertex(id1).unwrap().label, "Depot");
    }
}
