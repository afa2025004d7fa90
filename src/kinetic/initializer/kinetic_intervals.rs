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

use std::collections::BTreeMap;

use log::{debug, log, warn};

use super::Initializer;
use crate::{
    geometry::{line::Line2, point::Point2, segment::Segment2, vector::Vector2},
    kernel::converter::{ToExact, ToInexact},
    kinetic::{intersection_graph::IEdge, parameters::KSR_TOLERANCE},
    numeric::ksr_f64::KsrF64,
};

/// Where the input polygon of a plane meets one of its lines: the extreme
/// crossing positions along the line and the border speeds there.
struct LineCrossing {
    min: f64,
    max: f64,
    min_speed: f64,
    max_speed: f64,
}

impl Initializer<'_> {
    /// Records, for every interior edge of every input plane, when the
    /// growing input polygon reaches each part of the edge.
    pub(super) fn initial_polygon_iedge_intersections(&mut self) {
        let mut intervals = 0;
        for sp in 0..self.data.number_of_support_planes() {
            if self.data.support_plane(sp).is_bbox() {
                continue;
            }

            let mut line_edges: BTreeMap<usize, Vec<IEdge>> = BTreeMap::new();
            for &e in self.data.support_plane(sp).unique_iedges() {
                if self.data.igraph().iedge_is_on_bbox(e) {
                    continue;
                }
                line_edges.entry(self.data.line(e)).or_default().push(e);
            }

            for edges in line_edges.values() {
                intervals += self.line_kinetic_intervals(sp, edges);
            }
        }
        log!(
            self.parameters.summary_level(),
            "computed {intervals} kinetic intervals"
        );
    }

    fn line_kinetic_intervals(&mut self, sp: usize, edges: &[IEdge]) -> usize {
        let first = edges[0];
        let a = self.data.point_2(sp, self.data.source(first));
        let b = self.data.point_2(sp, self.data.target(first));
        let Some(dir) = (&b - &a).normalized() else {
            debug!("skipping degenerate line of {first:?} on plane {sp}");
            return 0;
        };
        let Some(crossing) = self.polygon_line_crossing(sp, &a, &b, &dir) else {
            return 0;
        };
        if crossing.min >= crossing.max {
            return 0;
        }

        let project = |p: &Point2<KsrF64>| (p - &a).dot(&dir).0;
        let mut count = 0;
        for &e in edges {
            let (lower, upper) = {
                let (s, t) = (self.data.source(e), self.data.target(e));
                if s < t { (s, t) } else { (t, s) }
            };
            let s = project(&self.data.point_2(sp, lower));
            let t = project(&self.data.point_2(sp, upper));
            if (t - s).abs() < KSR_TOLERANCE * KSR_TOLERANCE {
                continue;
            }

            let interval = edge_interval(s, t, &crossing, e, sp);
            if interval.is_empty() {
                continue;
            }
            *self.data.igraph_mut().kinetic_interval_mut(e, sp) = interval;
            count += 1;
        }
        count
    }

    /// Crossings of the input polygon of `sp` with the line through `a`
    /// and `b`, projected on `dir`. Sides are decided exactly.
    fn polygon_line_crossing(
        &self,
        sp: usize,
        a: &Point2<KsrF64>,
        b: &Point2<KsrF64>,
        dir: &Vector2<KsrF64>,
    ) -> Option<LineCrossing> {
        let plane = self.data.support_plane(sp);
        let vertices = plane.original_vertices();
        let n = vertices.len();
        if n < 3 {
            return None;
        }
        let line = Line2::through(&a.to_exact(), &b.to_exact());

        let mut crossing = LineCrossing {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            min_speed: 0.0,
            max_speed: 0.0,
        };
        let mut last_side = line.oriented_side(&vertices[n - 1].to_exact());
        for v in 0..n {
            let side = line.oriented_side(&vertices[v].to_exact());
            if side != last_side {
                let prev = (v + n - 1) % n;
                let segment = Segment2::new(&vertices[prev].to_exact(), &vertices[v].to_exact());
                match line.intersect_segment(&segment) {
                    Some(p) => {
                        let proj = (&p.to_inexact() - a).dot(dir).0;
                        let speed = dir.dot(&plane.original_edge_direction(prev, v)).0;
                        if proj < crossing.min {
                            crossing.min = proj;
                            crossing.min_speed = speed;
                        }
                        if proj > crossing.max {
                            crossing.max = proj;
                            crossing.max_speed = speed;
                        }
                    }
                    None => debug!("polygon edge ({prev}, {v}) of plane {sp} lies on the line"),
                }
            }
            last_side = side;
        }
        Some(crossing)
    }
}

/// Time for a border moving at `speed` to cover `distance`.
fn crossing_time(distance: f64, speed: f64, e: IEdge, sp: usize) -> f64 {
    if speed.abs() < KSR_TOLERANCE {
        warn!("border of plane {sp} moves tangentially to {e:?}, it never reaches the edge end");
        return f64::INFINITY;
    }
    (distance / speed).abs()
}

/// Barycentric positions along `e` (from its lower-id vertex at `s` to the
/// other at `t`) paired with the time the polygon border reaches them.
/// Empty when the edge does not overlap the polygon's span on the line.
fn edge_interval(s: f64, t: f64, crossing: &LineCrossing, e: IEdge, sp: usize) -> Vec<(f64, f64)> {
    let mut interval = Vec::with_capacity(4);
    if s < t {
        if s < crossing.max && crossing.min < t {
            if crossing.min > s {
                let bary = (crossing.min - s) / (t - s);
                interval.push((0.0, crossing_time(s - crossing.min, crossing.min_speed, e, sp)));
                interval.push((bary, 0.0));
            } else {
                interval.push((0.0, 0.0));
            }
            if t > crossing.max {
                let bary = (crossing.max - s) / (t - s);
                interval.push((bary, 0.0));
                interval.push((1.0, crossing_time(t - crossing.max, crossing.max_speed, e, sp)));
            } else {
                interval.push((1.0, 0.0));
            }
        }
    } else if t < crossing.max && crossing.min < s {
        if s > crossing.max {
            let bary = (s - crossing.max) / (s - t);
            interval.push((0.0, crossing_time(s - crossing.max, crossing.max_speed, e, sp)));
            interval.push((bary, 0.0));
        } else {
            interval.push((0.0, 0.0));
        }
        if t < crossing.min {
            let bary = (s - crossing.min) / (s - t);
            interval.push((bary, 0.0));
            interval.push((1.0, crossing_time(t - crossing.min, crossing.min_speed, e, sp)));
        } else {
            interval.push((1.0, 0.0));
        }
    }
    interval
}
