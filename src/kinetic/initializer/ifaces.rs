// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use log::{log, trace, warn};

use super::Initializer;
use crate::{
    geometry::polygon::Polygon2,
    kinetic::intersection_graph::{IEdge, IVertex},
    numeric::{ksr_rational::KsrRational, scalar::Scalar},
};

const MAX_WALK_STEPS: usize = 10_000;

/// Which neighbour in the counterclockwise edge order a walk takes at each
/// vertex. `Next` turns right and closes bounded cells clockwise, `Prev`
/// turns left and closes them counterclockwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Turn {
    Next,
    Prev,
}

impl Turn {
    fn step(self, pos: usize, len: usize) -> usize {
        match self {
            Turn::Next => (pos + 1) % len,
            Turn::Prev => (pos + len - 1) % len,
        }
    }

    /// Sign of the area of a bounded cell walked with this turn.
    fn bounded_sign(self) -> i8 {
        match self {
            Turn::Next => -1,
            Turn::Prev => 1,
        }
    }
}

/// Closed boundary found by a walk; `edges[i]` joins `vertices[i]` to
/// `vertices[i + 1]`.
struct Walk {
    vertices: Vec<IVertex>,
    edges: Vec<IEdge>,
}

impl Initializer<'_> {
    /// Creates the convex cells of every support plane by walking the
    /// plane's edge arrangement.
    pub(super) fn create_ifaces(&mut self) {
        for sp in 0..self.data.number_of_support_planes() {
            let edges: Vec<IEdge> = self.data.support_plane(sp).unique_iedges().iter().copied().collect();
            for edge in edges {
                self.create_ifaces_around(sp, edge);
            }
        }
        log!(
            self.parameters.summary_level(),
            "created {} ifaces",
            self.data.igraph().number_of_faces()
        );
    }

    fn create_ifaces_around(&mut self, sp: usize, edge: IEdge) {
        let target = self.data.target(edge);
        let connected = self.data.get_and_sort_all_connected_iedges(sp, target);
        let pos = connected
            .iter()
            .position(|(e, _)| *e == edge)
            .unwrap_or_else(|| panic!("{edge:?} missing around its own target on plane {sp}"));

        for turn in [Turn::Next, Turn::Prev] {
            let plane = self.data.support_plane(sp);
            let n1 = plane.iface(edge);
            let n2 = plane.other(edge, n1);
            if n1.is_some() && n2.is_some() {
                return;
            }

            let candidate = connected[turn.step(pos, connected.len())].0;
            let igraph = self.data.igraph();
            if [n1, n2].into_iter().flatten().any(|f| igraph.face(f).is_part(edge, candidate)) {
                continue;
            }

            if let Some(walk) = self.walk_face(sp, edge, turn) {
                self.register_face(sp, walk);
            }
        }
    }

    /// Follows `turn` from `edge` until the walk returns to its source.
    /// Returns `None` for the unbounded cycle around the plane section.
    fn walk_face(&self, sp: usize, edge: IEdge, turn: Turn) -> Option<Walk> {
        let start = self.data.source(edge);
        let mut current_edge = edge;
        let mut current = self.data.target(edge);
        let mut walk = Walk {
            vertices: vec![start, current],
            edges: vec![edge],
        };

        let mut steps = 0;
        loop {
            assert!(
                steps < MAX_WALK_STEPS,
                "face walk on plane {sp} from {edge:?} did not close after {MAX_WALK_STEPS} steps"
            );
            let connected = self.data.get_and_sort_all_connected_iedges(sp, current);
            let pos = connected
                .iter()
                .position(|(e, _)| *e == current_edge)
                .unwrap_or_else(|| panic!("{current_edge:?} missing around {current:?} on plane {sp}"));
            let next_edge = connected[turn.step(pos, connected.len())].0;
            let next = self.data.opposite(next_edge, current);
            walk.edges.push(next_edge);
            if next == start {
                break;
            }
            walk.vertices.push(next);
            current_edge = next_edge;
            current = next;
            steps += 1;
        }

        let polygon: Polygon2<KsrRational> = walk
            .vertices
            .iter()
            .map(|&v| self.data.exact_point_2(sp, v))
            .collect();
        let sign = polygon.signed_area_2().sign();
        if sign == 0 {
            warn!("face walk on plane {sp} from {edge:?} enclosed no area");
            return None;
        }
        if sign != turn.bounded_sign() {
            trace!("discarding outer cycle of plane {sp} found from {edge:?}");
            return None;
        }
        Some(walk)
    }

    fn register_face(&mut self, sp: usize, mut walk: Walk) {
        let mut polygon: Polygon2<KsrRational> = walk
            .vertices
            .iter()
            .map(|&v| self.data.exact_point_2(sp, v))
            .collect();
        if !polygon.is_counterclockwise() {
            polygon.reverse_orientation();
            walk.vertices.reverse();
            walk.edges.reverse();
            walk.edges.rotate_left(1);
        }

        assert!(polygon.is_counterclockwise(), "iface on plane {sp} is not counterclockwise");
        assert!(polygon.is_convex(), "iface on plane {sp} is not convex");
        assert!(polygon.is_simple(), "iface on plane {sp} is not simple");

        let f = self.data.add_iface(sp, walk.vertices, walk.edges);
        trace!("iface {f:?} on plane {sp}");
    }
}
