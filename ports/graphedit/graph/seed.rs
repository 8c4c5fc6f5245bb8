/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Seed-data helpers for debugging and demos.
//!
//! These sit outside the editor: they are only reachable from command-line
//! flags and never from user input on the canvas.

use super::{DEFAULT_LABEL, Graph, NodeColor, VertexId};
use euclid::default::{Point2D, Size2D};
use rand::Rng;
use rand::seq::SliceRandom;

/// Add `count` vertices at uniformly random positions inside `bounds`,
/// cycling through `palette` for their colors.
pub fn seed_vertices<R: Rng>(
    graph: &mut Graph,
    count: usize,
    bounds: Size2D<f32>,
    palette: &[NodeColor],
    rng: &mut R,
) -> Vec<VertexId> {
    (0..count)
        .map(|i| {
            let position = Point2D::new(
                rng.gen_range(0.0..bounds.width.max(1.0)),
                rng.gen_range(0.0..bounds.height.max(1.0)),
            );
            let color = palette
                .get(i % palette.len().max(1))
                .copied()
                .unwrap_or_default();
            graph.add_vertex(position, color, DEFAULT_LABEL)
        })
        .collect()
}

/// Add `count` edges between uniformly chosen existing vertices.
///
/// Sources and targets are picked independently, so self-loops and parallel
/// edges can occur. Returns the number of edges added (zero on an empty graph).
pub fn seed_random_edges<R: Rng>(graph: &mut Graph, count: usize, rng: &mut R) -> usize {
    let ids: Vec<VertexId> = graph.vertices().map(|vertex| vertex.id).collect();
    let mut added = 0;
    for _ in 0..count {
        let (Some(&from), Some(&to)) = (ids.choose(rng), ids.choose(rng)) else {
            break;
        };
        if graph.add_edge(from, to).is_ok() {
            added += 1;
        }
    }
    added
}
