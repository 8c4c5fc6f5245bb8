/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Canvas rendering.
//!
//! A pure consumer of `EditorSnapshot`: draws vertices, directed edges,
//! self-loops, and the edge preview line with an `egui::Painter`. Nothing
//! here mutates editor or graph state.

use crate::editor::{EditorSnapshot, ToolMode};
use crate::graph::{Graph, NodeColor, VertexId};
use egui::{Align2, Color32, FontId, Painter, Pos2, Shape, Stroke, Vec2};
use euclid::default::Point2D;
use std::f32::consts::TAU;

pub const NODE_RADIUS: f32 = 20.0;
pub const CANVAS_BACKGROUND: Color32 = Color32::from_rgb(248, 249, 250);

const EDGE_COLOR: Color32 = Color32::from_rgb(45, 55, 72);
const EDGE_WIDTH: f32 = 1.5;
const ARROW_SIZE: f32 = 9.0;
const SELECTION_COLOR: Color32 = Color32::from_rgb(45, 55, 72);
const PREVIEW_COLOR: Color32 = Color32::from_rgb(113, 128, 150);
const REMOVE_COLOR: Color32 = Color32::from_rgb(200, 60, 60);
const LOOP_RADIUS: f32 = 12.0;
const LOOP_SEGMENTS: usize = 24;

/// Topmost vertex whose disc contains `point` (later vertices draw on top)
pub fn vertex_at(graph: &Graph, point: Point2D<f32>) -> Option<VertexId> {
    graph
        .vertices()
        .filter(|vertex| (vertex.position - point).square_length() <= NODE_RADIUS * NODE_RADIUS)
        .last()
        .map(|vertex| vertex.id)
}

/// Paint a snapshot; `origin` is the screen position of canvas (0, 0)
pub fn paint(painter: &Painter, origin: Pos2, snapshot: &EditorSnapshot<'_>) {
    let graph = snapshot.graph;
    let to_screen = |p: Point2D<f32>| origin + Vec2::new(p.x, p.y);
    let edge_stroke = Stroke::new(EDGE_WIDTH, EDGE_COLOR);

    painter.rect_filled(painter.clip_rect(), 0.0, CANVAS_BACKGROUND);

    for edge in graph.edges() {
        let (Some(from), Some(to)) = (graph.vertex(edge.from), graph.vertex(edge.to)) else {
            continue;
        };
        let (a, b) = (to_screen(from.position), to_screen(to.position));
        if edge.is_self_loop() {
            painter.add(Shape::line(self_loop_arc(a), edge_stroke));
        } else if let Some((start, tip)) = trim_to_discs(a, b) {
            painter.line_segment([start, tip], edge_stroke);
            painter.add(Shape::convex_polygon(
                arrow_head(start, tip).to_vec(),
                EDGE_COLOR,
                Stroke::NONE,
            ));
        }
    }

    if let Some((source, pointer)) = snapshot.preview {
        painter.extend(Shape::dashed_line(
            &[to_screen(source), to_screen(pointer)],
            Stroke::new(2.0, PREVIEW_COLOR),
            4.0,
            4.0,
        ));
    }

    for vertex in graph.vertices() {
        let center = to_screen(vertex.position);
        painter.circle_filled(center, NODE_RADIUS, to_color32(vertex.color));

        if snapshot.pending_edge_source == Some(vertex.id) {
            let ring = circle_points(center, NODE_RADIUS + 3.0, 48);
            painter.extend(Shape::dashed_line(
                &ring,
                Stroke::new(2.0, SELECTION_COLOR),
                3.0,
                3.0,
            ));
        } else if snapshot.selection == Some(vertex.id) {
            painter.circle_stroke(center, NODE_RADIUS + 2.0, Stroke::new(3.0, SELECTION_COLOR));
        } else if snapshot.mode == ToolMode::Remove {
            painter.circle_stroke(center, NODE_RADIUS + 1.0, Stroke::new(1.5, REMOVE_COLOR));
        }

        painter.text(
            center + Vec2::new(0.0, NODE_RADIUS + 4.0),
            Align2::CENTER_TOP,
            &vertex.label,
            FontId::proportional(12.0),
            EDGE_COLOR,
        );
    }
}

pub fn to_color32(color: NodeColor) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

/// Shorten the segment `a -> b` so it starts and ends on the vertex discs.
/// Returns `None` when the discs overlap and there is nothing to draw.
fn trim_to_discs(a: Pos2, b: Pos2) -> Option<(Pos2, Pos2)> {
    let delta = b - a;
    let length = delta.length();
    if length <= 2.0 * NODE_RADIUS {
        return None;
    }
    let dir = delta / length;
    Some((a + dir * NODE_RADIUS, b - dir * NODE_RADIUS))
}

/// Triangle pointing at `tip` along `start -> tip`
fn arrow_head(start: Pos2, tip: Pos2) -> [Pos2; 3] {
    let dir = (tip - start).normalized();
    let back = tip - dir * ARROW_SIZE;
    let side = dir.rot90() * (ARROW_SIZE * 0.5);
    [tip, back + side, back - side]
}

/// Open arc drawn up and to the right of a vertex for a self-loop
fn self_loop_arc(center: Pos2) -> Vec<Pos2> {
    let offset = (NODE_RADIUS + LOOP_RADIUS * 0.4) / std::f32::consts::SQRT_2;
    let loop_center = center + Vec2::new(offset, -offset);
    // Leave a gap where the arc would pass through the vertex disc
    let start = TAU * 0.375 + 0.9;
    let sweep = TAU - 1.8;
    (0..=LOOP_SEGMENTS)
        .map(|i| {
            let angle = start + sweep * i as f32 / LOOP_SEGMENTS as f32;
            loop_center + LOOP_RADIUS * Vec2::angled(angle)
        })
        .collect()
}

fn circle_points(center: Pos2, radius: f32, segments: usize) -> Vec<Pos2> {
    (0..=segments)
        .map(|i| center + radius * Vec2::angled(TAU * i as f32 / segments as f32))
        .collect()
}
