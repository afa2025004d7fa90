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

use log::{log, trace};

use super::Initializer;
use crate::{
    geometry::polygon::Polygon2,
    kernel::converter::ToExact,
    kinetic::intersection_graph::IFace,
    numeric::ksr_rational::KsrRational,
};

impl Initializer<'_> {
    /// Replaces the single input face of every input plane by the ifaces it
    /// overlaps.
    pub(super) fn map_polygon_to_ifaces(&mut self) {
        let mut mapped = 0;
        for sp in 6..self.data.number_of_support_planes() {
            let polygon = self.input_polygon_exact(sp);

            let ifaces: BTreeSet<IFace> = self.data.support_plane(sp).ifaces().clone();
            self.data.support_plane_mut(sp).mesh_mut().clear();
            for f in ifaces {
                let face = &self.data.igraph().face(f).polygon;
                assert!(face.is_counterclockwise(), "{f:?} is not counterclockwise");
                assert!(face.is_convex(), "{f:?} is not convex");
                assert!(face.is_simple(), "{f:?} is not simple");

                if polygon.has_interior_overlap(face) {
                    let pface = self.data.add_iface_to_mesh(sp, f);
                    trace!("plane {sp}: {f:?} mapped to {pface:?}");
                    mapped += 1;
                }
            }
        }
        log!(
            self.parameters.summary_level(),
            "mapped input polygons onto {mapped} ifaces"
        );
    }

    /// The single mesh face of input plane `sp`, in the plane's exact
    /// projection and counterclockwise.
    fn input_polygon_exact(&self, sp: usize) -> Polygon2<KsrRational> {
        let plane = self.data.support_plane(sp);
        let mesh = plane.mesh();
        assert_eq!(mesh.faces.len(), 1, "input plane {sp} must hold exactly one face");

        let mut polygon: Polygon2<KsrRational> = mesh.faces[0]
            .vertices
            .iter()
            .map(|&i| plane.plane().to_2d_exact(&plane.to_3d(&mesh.vertices[i].point).to_exact()))
            .collect();
        if !polygon.is_counterclockwise() {
            polygon.reverse_orientation();
        }
        assert!(polygon.is_counterclockwise(), "input polygon of plane {sp} is degenerate");
        assert!(polygon.is_convex(), "input polygon of plane {sp} is not convex");
        assert!(polygon.is_simple(), "input polygon of plane {sp} is not simple");
        polygon
    }

    pub(super) fn set_k_intersections(&mut self, k: u32) {
        for sp in 0..self.data.number_of_support_planes() {
            for pface in self.data.pfaces(sp) {
                self.data.set_k(pface, k);
            }
        }
    }
}
