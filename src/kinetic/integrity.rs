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

use std::collections::BTreeSet;

use log::error;

use crate::kinetic::{data_structure::DataStructure, intersection_graph::IFace};

impl DataStructure {
    /// Checks that planes, edges and vertices agree on incidence and, when
    /// `check_faces` is set, that every face is registered on its boundary.
    pub fn check_integrity(&self, check_faces: bool) -> bool {
        for sp in 0..self.number_of_support_planes() {
            let plane = self.support_plane(sp);
            for &e in plane.unique_iedges() {
                if !self.iedge_planes(e).contains(&sp) {
                    error!("iedge {e:?} is listed by plane {sp} but does not lie on it");
                    return false;
                }
                for v in [self.source(e), self.target(e)] {
                    if !self.igraph().ivertex_planes(v).contains(&sp) {
                        error!("ivertex {v:?} of iedge {e:?} is missing plane {sp}");
                        return false;
                    }
                }
            }
        }

        for e in self.iedges() {
            for &sp in self.iedge_planes(e) {
                if sp >= self.number_of_support_planes() {
                    error!("iedge {e:?} refers to unknown plane {sp}");
                    return false;
                }
                if !self.support_plane(sp).unique_iedges().contains(&e) {
                    error!("iedge {e:?} lies on plane {sp} but is not registered there");
                    return false;
                }
            }
        }

        for v in self.ivertices() {
            let planes = self.igraph().ivertex_planes(v);
            if planes.len() < 2 && !self.igraph().incident_edges(v).is_empty() {
                error!("ivertex {v:?} lies on fewer than two planes: {planes:?}");
                return false;
            }
        }

        if check_faces && !self.check_faces() {
            return false;
        }
        true
    }

    fn check_faces(&self) -> bool {
        for f in self.ifaces() {
            let face = self.igraph().face(f);
            let sp = face.support_plane;
            let n = face.edges.len();
            if n < 3 || face.vertices.len() != n {
                error!("iface {f:?} has {n} edges and {} vertices", face.vertices.len());
                return false;
            }
            for i in 0..n {
                let e = face.edges[i];
                let (a, b) = (face.vertices[i], face.vertices[(i + 1) % n]);
                let ends = BTreeSet::from([self.source(e), self.target(e)]);
                if ends != BTreeSet::from([a, b]) {
                    error!("iface {f:?}: edge {e:?} does not join {a:?} and {b:?}");
                    return false;
                }
                let adjacent: Vec<IFace> = self.support_plane(sp).iedge_faces(e).collect();
                if !adjacent.contains(&f) {
                    error!("iface {f:?} is not registered on its edge {e:?}");
                    return false;
                }
                if adjacent.len() > 2 {
                    error!("iedge {e:?} bounds more than two faces on plane {sp}");
                    return false;
                }
            }
            if !face.polygon.is_counterclockwise() || !face.polygon.is_convex() || !face.polygon.is_simple() {
                error!("iface {f:?} is not a simple convex counterclockwise polygon");
                return false;
            }
        }
        true
    }

    /// Checks that every input plane is bounded by at least three iedges
    /// and carved into ifaces, and, with `check_pfaces`, that its polygon
    /// covers at least one of them.
    pub fn check_input_planes(&self, check_pfaces: bool) -> bool {
        for sp in 0..self.number_of_support_planes() {
            let plane = self.support_plane(sp);
            if plane.is_bbox() {
                continue;
            }
            if plane.unique_iedges().len() < 3 {
                error!("input plane {sp} has {} iedges", plane.unique_iedges().len());
                return false;
            }
            if plane.ifaces().is_empty() {
                error!("input plane {sp} has no iface");
                return false;
            }
            if check_pfaces && self.pfaces(sp).is_empty() {
                error!("input plane {sp} has no pface");
                return false;
            }
        }
        true
    }

    /// Checks the six bbox planes and their eight corners.
    pub fn check_bbox(&self) -> bool {
        for sp in 0..self.number_of_support_planes() {
            let is_bbox = self.support_plane(sp).is_bbox();
            if is_bbox != (sp < 6) {
                error!("plane {sp} has bbox flag {is_bbox}");
                return false;
            }
            if is_bbox {
                if self.support_plane(sp).unique_iedges().len() < 4 {
                    error!("bbox plane {sp} has fewer than four iedges");
                    return false;
                }
                if self.pfaces(sp).is_empty() {
                    error!("bbox plane {sp} has no pface");
                    return false;
                }
            }
        }

        let corners = self
            .ivertices()
            .filter(|&v| self.intersected_planes(v, true).iter().filter(|&&p| p < 6).count() == 3)
            .count();
        if corners != 8 {
            error!("found {corners} bbox corners instead of 8");
            return false;
        }
        true
    }

    /// Checks that the graph is well formed: no loops or duplicate edges,
    /// consistent adjacency, known lines.
    pub fn check_intersection_graph(&self) -> bool {
        let graph = self.igraph();
        let mut seen = BTreeSet::new();
        for e in graph.iedges() {
            let (s, t) = (graph.source(e), graph.target(e));
            if s == t {
                error!("iedge {e:?} is a loop at {s:?}");
                return false;
            }
            if !seen.insert((s.min(t), s.max(t))) {
                error!("iedge {e:?} duplicates another edge between {s:?} and {t:?}");
                return false;
            }
            if !graph.incident_edges(s).contains(&e) || !graph.incident_edges(t).contains(&e) {
                error!("iedge {e:?} is missing from the adjacency of its endpoints");
                return false;
            }
            if graph.line(e) >= graph.nb_lines() {
                error!("iedge {e:?} refers to unknown line {}", graph.line(e));
                return false;
            }
            if graph.iedge_planes(e).is_empty() {
                error!("iedge {e:?} lies on no plane");
                return false;
            }
        }
        for v in graph.ivertices() {
            for &e in graph.incident_edges(v) {
                if graph.source(e) != v && graph.target(e) != v {
                    error!("ivertex {v:?} lists foreign iedge {e:?}");
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        geometry::point::Point3,
        kinetic::{Initializer, Parameters, bounding_box::bounding_box_to_polygons},
        numeric::ksr_f64::KsrF64,
    };

    use super::*;

    fn square_at(z: f64) -> Vec<Point3<KsrF64>> {
        [[0.25, 0.25, z], [0.75, 0.25, z], [0.75, 0.75, z], [0.25, 0.75, z]]
            .into_iter()
            .map(Point3::from_vals)
            .collect()
    }

    #[test]
    fn plane_without_ifaces_is_reported() {
        let corners = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 1.0, 1.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
        ]
        .map(Point3::from_vals);
        let mut data = DataStructure::new();
        for face in bounding_box_to_polygons(&corners) {
            data.add_bbox_polygon(&face);
        }
        data.add_support_plane(&square_at(0.5), false);

        assert!(data.support_plane(6).unique_iedges().len() >= 3);
        assert!(data.check_integrity(false));
        assert!(!data.check_input_planes(false));
    }

    #[test]
    fn plane_without_pfaces_is_reported() {
        let mut data = DataStructure::new();
        let parameters = Parameters::default();
        let input = vec![square_at(0.5)];
        Initializer::new(&mut data, &parameters)
            .initialize(&input, |p: &Vec<Point3<KsrF64>>| p.clone())
            .unwrap();
        assert!(data.check_input_planes(true));

        data.support_plane_mut(6).mesh_mut().clear();
        assert!(data.check_input_planes(false));
        assert!(!data.check_input_planes(true));
    }
}
