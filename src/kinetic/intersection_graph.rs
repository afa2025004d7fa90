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

use crate::{
    geometry::{point::Point3, polygon::Polygon2, segment::Segment3},
    kernel::converter::ToInexact,
    numeric::{ksr_f64::KsrF64, ksr_rational::KsrRational},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IVertex(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IEdge(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IFace(pub usize);

/// Ordered `(barycentric position, time)` pairs along an edge. Positions
/// are measured from the endpoint with the smaller vertex id.
pub type KineticInterval = Vec<(f64, f64)>;

#[derive(Clone, Debug)]
pub struct VertexProperty {
    pub point: Point3<KsrRational>,
    pub planes: BTreeSet<usize>,
    pub edges: Vec<IEdge>,
}

#[derive(Clone, Debug)]
pub struct EdgeProperty {
    pub source: IVertex,
    pub target: IVertex,
    pub line: usize,
    pub planes: BTreeSet<usize>,
    pub intervals: BTreeMap<usize, KineticInterval>,
}

/// Convex cell of one support plane. `vertices[i]` and `edges[i]` start
/// the same boundary step; `polygon` holds the exact 2D coordinates in the
/// plane's exact projection.
#[derive(Clone, Debug)]
pub struct FaceProperty {
    pub support_plane: usize,
    pub vertices: Vec<IVertex>,
    pub edges: Vec<IEdge>,
    pub polygon: Polygon2<KsrRational>,
}

impl FaceProperty {
    /// True when `a` and `b` follow each other on the boundary cycle.
    pub fn is_part(&self, a: IEdge, b: IEdge) -> bool {
        let n = self.edges.len();
        let Some(ia) = self.edges.iter().position(|&e| e == a) else {
            return false;
        };
        let Some(ib) = self.edges.iter().position(|&e| e == b) else {
            return false;
        };
        (ia + 1) % n == ib || (ib + 1) % n == ia
    }
}

/// Arena-backed graph of plane intersections. Elements are never removed.
#[derive(Clone, Debug, Default)]
pub struct IntersectionGraph {
    vertices: Vec<VertexProperty>,
    edges: Vec<EdgeProperty>,
    faces: Vec<FaceProperty>,
    plane_keys: BTreeMap<BTreeSet<usize>, IVertex>,
    nb_lines: usize,
    nb_bbox_lines: Option<usize>,
    frozen: bool,
}

impl IntersectionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn assert_mutable(&self) {
        assert!(!self.frozen, "intersection graph is frozen");
    }

    pub fn add_vertex(&mut self, point: Point3<KsrRational>, planes: BTreeSet<usize>) -> IVertex {
        self.assert_mutable();
        self.vertices.push(VertexProperty {
            point,
            planes,
            edges: Vec::new(),
        });
        IVertex(self.vertices.len() - 1)
    }

    /// Vertex previously registered under exactly `key`.
    pub fn vertex_by_key(&self, key: &BTreeSet<usize>) -> Option<IVertex> {
        self.plane_keys.get(key).copied()
    }

    pub fn register_key(&mut self, key: BTreeSet<usize>, v: IVertex) {
        self.assert_mutable();
        self.plane_keys.entry(key).or_insert(v);
    }

    pub fn add_line(&mut self) -> usize {
        self.assert_mutable();
        self.nb_lines += 1;
        self.nb_lines - 1
    }

    pub fn nb_lines(&self) -> usize {
        self.nb_lines
    }

    pub fn add_edge(
        &mut self,
        source: IVertex,
        target: IVertex,
        planes: BTreeSet<usize>,
        line: usize,
    ) -> IEdge {
        self.assert_mutable();
        assert_ne!(source, target, "degenerate iedge");
        assert!(line < self.nb_lines, "unknown line {line}");
        let e = IEdge(self.edges.len());
        for v in [source, target] {
            let vp = &mut self.vertices[v.0];
            vp.planes.extend(planes.iter().copied());
            vp.edges.push(e);
        }
        self.edges.push(EdgeProperty {
            source,
            target,
            line,
            planes,
            intervals: BTreeMap::new(),
        });
        e
    }

    pub fn edge(&self, a: IVertex, b: IVertex) -> Option<IEdge> {
        self.vertices[a.0].edges.iter().copied().find(|&e| {
            let ep = &self.edges[e.0];
            (ep.source == a && ep.target == b) || (ep.source == b && ep.target == a)
        })
    }

    /// Splits `e = (s, t)` at `v`. `e` becomes `(s, v)`; the returned edge
    /// is `(v, t)` and shares line and planes with `e`.
    pub fn split_edge(&mut self, e: IEdge, v: IVertex) -> IEdge {
        self.assert_mutable();
        let (t, line, planes) = {
            let ep = &self.edges[e.0];
            assert!(ep.intervals.is_empty(), "splitting an iedge with kinetic data");
            assert!(ep.source != v && ep.target != v, "split at an endpoint");
            (ep.target, ep.line, ep.planes.clone())
        };

        let e2 = IEdge(self.edges.len());
        self.edges.push(EdgeProperty {
            source: v,
            target: t,
            line,
            planes: planes.clone(),
            intervals: BTreeMap::new(),
        });
        self.edges[e.0].target = v;

        for slot in self.vertices[t.0].edges.iter_mut() {
            if *slot == e {
                *slot = e2;
            }
        }
        let vp = &mut self.vertices[v.0];
        vp.planes.extend(planes);
        vp.edges.push(e);
        vp.edges.push(e2);
        e2
    }

    pub fn add_plane_to_edge(&mut self, e: IEdge, plane: usize) {
        self.assert_mutable();
        let (s, t) = (self.edges[e.0].source, self.edges[e.0].target);
        self.edges[e.0].planes.insert(plane);
        self.vertices[s.0].planes.insert(plane);
        self.vertices[t.0].planes.insert(plane);
    }

    pub fn add_plane_to_vertex(&mut self, v: IVertex, plane: usize) {
        self.assert_mutable();
        self.vertices[v.0].planes.insert(plane);
    }

    pub fn merge_vertex_planes(&mut self, v: IVertex, planes: &BTreeSet<usize>) {
        self.assert_mutable();
        self.vertices[v.0].planes.extend(planes.iter().copied());
    }

    pub fn add_face(&mut self, face: FaceProperty) -> IFace {
        self.assert_mutable();
        self.faces.push(face);
        IFace(self.faces.len() - 1)
    }

    /// Freezes the number of lines that belong to the bounding box.
    pub fn finished_bbox(&mut self) {
        self.nb_bbox_lines = Some(self.nb_lines);
    }

    pub fn nb_bbox_lines(&self) -> usize {
        self.nb_bbox_lines.unwrap_or(self.nb_lines)
    }

    pub fn iedge_is_on_bbox(&self, e: IEdge) -> bool {
        self.edges[e.0].line < self.nb_bbox_lines()
    }

    pub fn kinetic_interval(&self, e: IEdge, plane: usize) -> Option<&KineticInterval> {
        self.edges[e.0].intervals.get(&plane)
    }

    pub fn kinetic_interval_mut(&mut self, e: IEdge, plane: usize) -> &mut KineticInterval {
        self.assert_mutable();
        self.edges[e.0].intervals.entry(plane).or_default()
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn vertex(&self, v: IVertex) -> &VertexProperty {
        &self.vertices[v.0]
    }

    pub fn edge_property(&self, e: IEdge) -> &EdgeProperty {
        &self.edges[e.0]
    }

    pub fn face(&self, f: IFace) -> &FaceProperty {
        &self.faces[f.0]
    }

    pub fn ivertices(&self) -> impl Iterator<Item = IVertex> + use<> {
        (0..self.vertices.len()).map(IVertex)
    }

    pub fn iedges(&self) -> impl Iterator<Item = IEdge> + use<> {
        (0..self.edges.len()).map(IEdge)
    }

    pub fn ifaces(&self) -> impl Iterator<Item = IFace> + use<> {
        (0..self.faces.len()).map(IFace)
    }

    pub fn number_of_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn number_of_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn source(&self, e: IEdge) -> IVertex {
        self.edges[e.0].source
    }

    pub fn target(&self, e: IEdge) -> IVertex {
        self.edges[e.0].target
    }

    /// The endpoint of `e` that is not `v`.
    pub fn opposite(&self, e: IEdge, v: IVertex) -> IVertex {
        let ep = &self.edges[e.0];
        if ep.source == v {
            ep.target
        } else {
            assert_eq!(ep.target, v, "vertex is not incident to the edge");
            ep.source
        }
    }

    pub fn line(&self, e: IEdge) -> usize {
        self.edges[e.0].line
    }

    pub fn iedge_planes(&self, e: IEdge) -> &BTreeSet<usize> {
        &self.edges[e.0].planes
    }

    pub fn ivertex_planes(&self, v: IVertex) -> &BTreeSet<usize> {
        &self.vertices[v.0].planes
    }

    pub fn incident_edges(&self, v: IVertex) -> &[IEdge] {
        &self.vertices[v.0].edges
    }

    pub fn exact_point_3(&self, v: IVertex) -> &Point3<KsrRational> {
        &self.vertices[v.0].point
    }

    pub fn point_3(&self, v: IVertex) -> Point3<KsrF64> {
        self.vertices[v.0].point.to_inexact()
    }

    pub fn segment_3(&self, e: IEdge) -> Segment3<KsrF64> {
        let ep = &self.edges[e.0];
        Segment3::new(&self.point_3(ep.source), &self.point_3(ep.target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planes(ids: &[usize]) -> BTreeSet<usize> {
        ids.iter().copied().collect()
    }

    fn point(x: i32) -> Point3<KsrRational> {
        Point3::from_vals([x, 0, 0])
    }

    #[test]
    fn split_keeps_original_id_for_source_half() {
        let mut g = IntersectionGraph::new();
        let a = g.add_vertex(point(0), BTreeSet::new());
        let b = g.add_vertex(point(2), BTreeSet::new());
        let line = g.add_line();
        let e = g.add_edge(a, b, planes(&[0, 1]), line);

        let m = g.add_vertex(point(1), planes(&[6]));
        let e2 = g.split_edge(e, m);

        assert_eq!((g.source(e), g.target(e)), (a, m));
        assert_eq!((g.source(e2), g.target(e2)), (m, b));
        assert_eq!(g.line(e2), line);
        assert_eq!(g.ivertex_planes(m), &planes(&[0, 1, 6]));
        assert_eq!(g.edge(m, b), Some(e2));
        assert_eq!(g.edge(a, b), None);
        assert_eq!(g.incident_edges(b), &[e2]);
    }

    #[test]
    fn bbox_lines_are_counted_at_freeze_point() {
        let mut g = IntersectionGraph::new();
        let a = g.add_vertex(point(0), BTreeSet::new());
        let b = g.add_vertex(point(1), BTreeSet::new());
        let l0 = g.add_line();
        let e0 = g.add_edge(a, b, planes(&[0, 1]), l0);
        g.finished_bbox();
        let c = g.add_vertex(point(2), BTreeSet::new());
        let l1 = g.add_line();
        let e1 = g.add_edge(b, c, planes(&[6, 7]), l1);

        assert!(g.iedge_is_on_bbox(e0));
        assert!(!g.iedge_is_on_bbox(e1));
        assert_eq!(g.opposite(e1, b), c);
    }

    #[test]
    #[should_panic(expected = "frozen")]
    fn frozen_graph_rejects_mutation() {
        let mut g = IntersectionGraph::new();
        g.freeze();
        g.add_line();
    }

    #[test]
    fn face_adjacency_is_cyclic() {
        let face = FaceProperty {
            support_plane: 0,
            vertices: vec![IVertex(0), IVertex(1), IVertex(2)],
            edges: vec![IEdge(4), IEdge(5), IEdge(6)],
            polygon: Polygon2::new(Vec::new()),
        };
        assert!(face.is_part(IEdge(6), IEdge(4)));
        assert!(face.is_part(IEdge(5), IEdge(4)));
        assert!(!face.is_part(IEdge(5), IEdge(7)));
    }
}
