/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Graph data structures for the editor.
//!
//! Core structures:
//! - `Graph`: directed multigraph container backed by petgraph::StableGraph
//! - `Vertex`: a node with label, color tag, and canvas position
//! - `VertexId`: session-unique vertex identity (never reused)
//!
//! An edge has no identity of its own: it is one entry in the ordered
//! adjacency list of its source vertex. Parallel edges and self-loops are
//! both allowed.

use euclid::default::Point2D;
use log::debug;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

pub mod color;
pub mod seed;

pub use color::NodeColor;

/// Label given to vertices created from the canvas
pub const DEFAULT_LABEL: &str = "New Node";

/// Internal storage handle. Unlike `VertexId`, petgraph recycles these.
type NodeKey = NodeIndex;

/// Globally unique, immutable vertex identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(Uuid);

impl VertexId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A vertex on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// Identity assigned at creation
    pub id: VertexId,

    /// Display label
    pub label: String,

    /// Category tag used for the fill color
    pub color: NodeColor,

    /// Position in canvas coordinates (unclamped)
    pub position: Point2D<f32>,
}

/// Insertion sequence number stored on each edge.
///
/// petgraph reuses edge slots after removal, so the sequence number is what
/// keeps adjacency lists in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct EdgeSeq(u64);

/// Read-only view of one adjacency-list entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeView {
    pub from: VertexId,
    pub to: VertexId,
}

impl EdgeView {
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Graph operation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The operation referenced a vertex that is not in the graph
    #[error("vertex {0} not found")]
    NotFound(VertexId),
}

/// Directed multigraph backed by petgraph::StableGraph
#[derive(Clone)]
pub struct Graph {
    inner: StableGraph<Vertex, EdgeSeq, Directed>,

    /// Id to storage handle mapping
    id_to_node: HashMap<VertexId, NodeKey>,

    /// Live vertices in creation order (petgraph reuses freed slots)
    creation_order: Vec<NodeKey>,

    /// Next edge sequence number
    next_edge_seq: u64,

    /// Bumped by every mutation that changes the graph
    version: u64,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self {
            inner: StableGraph::new(),
            id_to_node: HashMap::new(),
            creation_order: Vec::new(),
            next_edge_seq: 0,
            version: 0,
        }
    }

    /// Add a vertex with an empty adjacency list and return its fresh id
    pub fn add_vertex(
        &mut self,
        position: Point2D<f32>,
        color: NodeColor,
        label: impl Into<String>,
    ) -> VertexId {
        let id = VertexId::generate();
        let key = self.inner.add_node(Vertex {
            id,
            label: label.into(),
            color,
            position,
        });
        self.id_to_node.insert(id, key);
        self.creation_order.push(key);
        self.bump();
        debug!("added vertex {id} at ({}, {})", position.x, position.y);
        id
    }

    /// Append `dest` to the adjacency list of `source`.
    ///
    /// No deduplication: calling this twice creates two parallel edges.
    /// `source == dest` creates a self-loop.
    pub fn add_edge(&mut self, source: VertexId, dest: VertexId) -> Result<(), GraphError> {
        let from = self.key_of(source)?;
        let to = self.key_of(dest)?;
        let seq = EdgeSeq(self.next_edge_seq);
        self.next_edge_seq += 1;
        self.inner.add_edge(from, to, seq);
        self.bump();
        debug!("added edge {source} -> {dest}");
        Ok(())
    }

    /// Whether `dest` occurs at least once in the adjacency list of `source`.
    ///
    /// An unknown `source` has no adjacency list, so this returns false.
    pub fn adjacent(&self, source: VertexId, dest: VertexId) -> bool {
        let Ok(from) = self.key_of(source) else {
            return false;
        };
        self.inner
            .edges_directed(from, Direction::Outgoing)
            .any(|edge| self.inner[edge.target()].id == dest)
    }

    /// Ordered adjacency list of `source` (one entry per edge)
    pub fn adjacency(&self, source: VertexId) -> Result<Vec<VertexId>, GraphError> {
        let from = self.key_of(source)?;
        Ok(self
            .ordered_targets(from)
            .into_iter()
            .map(|key| self.inner[key].id)
            .collect())
    }

    /// The vertices listed in the adjacency list of `source`, in order.
    ///
    /// The sequence is derived once per call; it is not a live view.
    pub fn neighbors(
        &self,
        source: VertexId,
    ) -> Result<impl Iterator<Item = &Vertex> + '_, GraphError> {
        let from = self.key_of(source)?;
        Ok(self
            .ordered_targets(from)
            .into_iter()
            .map(move |key| &self.inner[key]))
    }

    /// Remove a vertex together with its outgoing and incoming edges
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<Vertex, GraphError> {
        let key = self.key_of(id)?;
        let edges_before = self.inner.edge_count();
        let vertex = self.inner.remove_node(key).ok_or(GraphError::NotFound(id))?;
        self.id_to_node.remove(&id);
        self.creation_order.retain(|&live| live != key);
        self.bump();
        debug!(
            "removed vertex {id} and {} incident edges",
            edges_before - self.inner.edge_count()
        );
        Ok(vertex)
    }

    /// Remove every `source -> target` entry and return how many were removed.
    ///
    /// Zero matches is not an error. `target` does not have to exist.
    pub fn remove_edge(&mut self, source: VertexId, target: VertexId) -> Result<usize, GraphError> {
        let from = self.key_of(source)?;
        let matching: Vec<_> = self
            .inner
            .edges_directed(from, Direction::Outgoing)
            .filter(|edge| self.inner[edge.target()].id == target)
            .map(|edge| edge.id())
            .collect();
        for edge in &matching {
            self.inner.remove_edge(*edge);
        }
        if !matching.is_empty() {
            self.bump();
            debug!("removed {} edges {source} -> {target}", matching.len());
        }
        Ok(matching.len())
    }

    /// Overwrite a vertex position
    pub fn update_vertex_position(
        &mut self,
        id: VertexId,
        position: Point2D<f32>,
    ) -> Result<(), GraphError> {
        let key = self.key_of(id)?;
        self.inner[key].position = position;
        self.bump();
        Ok(())
    }

    /// Replace a vertex label
    pub fn set_label(&mut self, id: VertexId, label: impl Into<String>) -> Result<(), GraphError> {
        let key = self.key_of(id)?;
        let label = label.into();
        if self.inner[key].label != label {
            self.inner[key].label = label;
            self.bump();
        }
        Ok(())
    }

    /// Get a vertex by id
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        let &key = self.id_to_node.get(&id)?;
        self.inner.node_weight(key)
    }

    pub fn contains(&self, id: VertexId) -> bool {
        self.id_to_node.contains_key(&id)
    }

    /// Iterate over all vertices in creation order
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.creation_order.iter().map(move |&key| &self.inner[key])
    }

    /// Iterate over all edges, grouped by source in adjacency-list order
    pub fn edges(&self) -> impl Iterator<Item = EdgeView> + '_ {
        self.creation_order.iter().flat_map(move |&from| {
            let source = self.inner[from].id;
            self.ordered_targets(from)
                .into_iter()
                .map(move |to| EdgeView {
                    from: source,
                    to: self.inner[to].id,
                })
        })
    }

    /// Number of adjacency entries of `id` (self-loops count once)
    pub fn out_degree(&self, id: VertexId) -> usize {
        self.key_of(id)
            .map(|key| self.inner.edges_directed(key, Direction::Outgoing).count())
            .unwrap_or(0)
    }

    /// Number of adjacency entries targeting `id` (self-loops count once)
    pub fn in_degree(&self, id: VertexId) -> usize {
        self.key_of(id)
            .map(|key| self.inner.edges_directed(key, Direction::Incoming).count())
            .unwrap_or(0)
    }

    /// V
    pub fn vertex_count(&self) -> usize {
        self.inner.node_count()
    }

    /// E
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Change counter for observers; strictly increases on every mutation
    pub fn version(&self) -> u64 {
        self.version
    }

    fn key_of(&self, id: VertexId) -> Result<NodeKey, GraphError> {
        self.id_to_node
            .get(&id)
            .copied()
            .ok_or(GraphError::NotFound(id))
    }

    fn ordered_targets(&self, from: NodeKey) -> Vec<NodeKey> {
        let mut targets: Vec<(EdgeSeq, NodeKey)> = self
            .inner
            .edges_directed(from, Direction::Outgoing)
            .map(|edge| (*edge.weight(), edge.target()))
            .collect();
        targets.sort_unstable_by_key(|&(seq, _)| seq);
        targets.into_iter().map(|(_, key)| key).collect()
    }

    fn bump(&mut self) {
        self.version += 1;
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
