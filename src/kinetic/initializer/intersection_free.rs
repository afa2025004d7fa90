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

use std::collections::{BTreeMap, BTreeSet};

use log::{log, trace};

use super::Initializer;
use crate::{
    geometry::{
        intersection::{SegmentIntersection, segment_segment_intersection},
        segment::Segment2,
    },
    kinetic::intersection_graph::IVertex,
    numeric::{ksr_rational::KsrRational, scalar::Scalar},
};

/// Segment of the line shared by two input planes, between its two extreme
/// vertices.
struct PlanePairSegment {
    planes: BTreeSet<usize>,
    source: IVertex,
    target: IVertex,
}

impl Initializer<'_> {
    /// Adds the lines where input planes cross each other, split at every
    /// crossing with another such line.
    pub(super) fn make_polygons_intersection_free(&mut self) {
        let segments = self.plane_pair_segments();

        let mut todo: Vec<(BTreeSet<usize>, Vec<IVertex>)> = Vec::with_capacity(segments.len());
        for (i, a) in segments.iter().enumerate() {
            let mut crossed = vec![a.source];
            let mut done: BTreeSet<BTreeSet<usize>> = BTreeSet::new();

            for (j, b) in segments.iter().enumerate() {
                if i == j {
                    continue;
                }
                let Some(&common) = a.planes.intersection(&b.planes).max() else {
                    continue;
                };
                let union: BTreeSet<usize> = a.planes.union(&b.planes).copied().collect();
                if !done.insert(union.clone()) {
                    continue;
                }

                let seg_a = Segment2::new(
                    &self.data.exact_point_2(common, a.source),
                    &self.data.exact_point_2(common, a.target),
                );
                let seg_b = Segment2::new(
                    &self.data.exact_point_2(common, b.source),
                    &self.data.exact_point_2(common, b.target),
                );
                if let SegmentIntersection::Point(p) = segment_segment_intersection(&seg_a, &seg_b) {
                    let point = self.data.support_plane(common).plane().to_3d_exact(&p);
                    let v = self.data.add_ivertex(point, &union);
                    trace!("planes {union:?} meet at {v:?}");
                    crossed.push(v);
                }
            }

            crossed.push(a.target);
            todo.push((a.planes.clone(), crossed));
        }

        let lines = todo.len();
        for (planes, crossed) in todo {
            self.data.add_iedge(&planes, &crossed);
        }
        log!(
            self.parameters.summary_level(),
            "added {lines} plane-plane lines: {} ivertices, {} iedges",
            self.data.igraph().number_of_vertices(),
            self.data.igraph().number_of_edges()
        );
    }

    /// For every pair of input planes meeting at two or more vertices, the
    /// two vertices furthest apart along their common line.
    fn plane_pair_segments(&self) -> Vec<PlanePairSegment> {
        let mut lines: BTreeMap<BTreeSet<usize>, Vec<IVertex>> = BTreeMap::new();
        for v in self.data.ivertices() {
            let planes: Vec<usize> = self.data.intersected_planes(v, false).into_iter().collect();
            for i in 0..planes.len() {
                for j in i + 1..planes.len() {
                    lines
                        .entry(BTreeSet::from([planes[i], planes[j]]))
                        .or_default()
                        .push(v);
                }
            }
        }

        lines
            .into_iter()
            .filter_map(|(planes, vertices)| {
                let (source, target) = self.extreme_vertices(&vertices)?;
                Some(PlanePairSegment {
                    planes,
                    source,
                    target,
                })
            })
            .collect()
    }

    /// First and last of collinear `vertices` along their line, `None` if
    /// they all coincide.
    fn extreme_vertices(&self, vertices: &[IVertex]) -> Option<(IVertex, IVertex)> {
        let origin = self.data.exact_point_3(*vertices.first()?);
        let dir = vertices
            .iter()
            .map(|&v| origin.vector_to(self.data.exact_point_3(v)))
            .find(|d| !d.is_zero())?;

        let keyed: Vec<(KsrRational, IVertex)> = vertices
            .iter()
            .map(|&v| (origin.vector_to(self.data.exact_point_3(v)).dot(&dir), v))
            .collect();
        let min = keyed.iter().min_by(|a, b| KsrRational::cmp_ref(&a.0, &b.0))?;
        let max = keyed.iter().max_by(|a, b| KsrRational::cmp_ref(&a.0, &b.0))?;
        Some((min.1, max.1))
    }
}
