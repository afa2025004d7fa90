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

use std::{
    cmp::Ordering,
    collections::BTreeSet,
};

use log::trace;

use crate::{
    geometry::{
        intersection::{SegmentIntersection, segment_segment_intersection},
        plane::Plane3,
        point::{Point, Point2, Point3},
        polygon::Polygon2,
        segment::{Segment2, Segment3},
        vector::Vector2,
    },
    kernel::{
        converter::{ToExact, ToInexact},
        predicates::{are_near, is_point_on_segment},
    },
    kinetic::{
        intersection_graph::{FaceProperty, IEdge, IFace, IVertex, IntersectionGraph, KineticInterval},
        parameters::KSR_TOLERANCE,
        support_plane::{PFace, PVertex, PVertexData, PFaceData, SupportPlane},
    },
    numeric::{ksr_f64::KsrF64, ksr_rational::KsrRational, scalar::Scalar},
    operations::Zero,
};

/// Edges incident to a vertex within one support plane, paired with their
/// exact outgoing direction, in counterclockwise order.
pub type ConnectedIEdges = Vec<(IEdge, Vector2<KsrRational>)>;

/// Support planes and the intersection graph they share.
#[derive(Clone, Debug, Default)]
pub struct DataStructure {
    support_planes: Vec<SupportPlane>,
    igraph: IntersectionGraph,
    iedge_support_planes: Vec<Vec<usize>>,
}

impl DataStructure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn number_of_support_planes(&self) -> usize {
        self.support_planes.len()
    }

    pub fn support_plane(&self, sp: usize) -> &SupportPlane {
        &self.support_planes[sp]
    }

    pub(crate) fn support_plane_mut(&mut self, sp: usize) -> &mut SupportPlane {
        &mut self.support_planes[sp]
    }

    pub fn support_planes(&self) -> &[SupportPlane] {
        &self.support_planes
    }

    pub fn igraph(&self) -> &IntersectionGraph {
        &self.igraph
    }

    pub(crate) fn igraph_mut(&mut self) -> &mut IntersectionGraph {
        &mut self.igraph
    }

    /// Adds one bounding box face together with its corners and edges.
    pub fn add_bbox_polygon(&mut self, polygon: &[Point3<KsrF64>]) {
        let (sp, _) = self.add_support_plane(polygon, true);

        let mut corners = Vec::with_capacity(polygon.len());
        for p in polygon {
            let exact = p.to_exact();
            let existing = self
                .igraph
                .ivertices()
                .find(|&v| self.igraph.exact_point_3(v) == &exact);
            let v = match existing {
                Some(v) => v,
                None => self.igraph.add_vertex(exact, BTreeSet::new()),
            };
            self.igraph.add_plane_to_vertex(v, sp);
            corners.push(v);
        }

        for i in 0..corners.len() {
            let (a, b) = (corners[i], corners[(i + 1) % corners.len()]);
            self.connect(a, b, &BTreeSet::from([sp]), None);
        }

        let points: Vec<Point2<KsrF64>> = polygon
            .iter()
            .map(|p| self.support_planes[sp].to_2d(p))
            .collect();
        self.support_planes[sp].mesh_mut().add_face(&points, None);
    }

    /// Registers the plane of `polygon`. An input polygon whose plane
    /// matches an existing input plane reuses it; a new input plane is
    /// immediately intersected with the bounding box.
    pub fn add_support_plane(&mut self, polygon: &[Point3<KsrF64>], is_bbox: bool) -> (usize, bool) {
        let plane = Plane3::from_polygon(polygon)
            .unwrap_or_else(|| panic!("degenerate polygon cannot define a support plane"));

        if !is_bbox {
            let found = self
                .support_planes
                .iter()
                .position(|sp| !sp.is_bbox() && sp.plane().is_same_plane(&plane, KSR_TOLERANCE));
            if let Some(sp) = found {
                return (sp, false);
            }
        }

        self.support_planes.push(SupportPlane::new(plane, is_bbox));
        let sp = self.support_planes.len() - 1;
        if !is_bbox {
            self.intersect_with_bbox(sp);
        }
        (sp, true)
    }

    fn intersect_with_bbox(&mut self, sp: usize) {
        let plane = self.support_planes[sp].plane().clone();

        let mut on_plane: BTreeSet<IVertex> = BTreeSet::new();
        let bbox_edges: Vec<IEdge> = self
            .igraph
            .iedges()
            .filter(|&e| self.is_bbox_iedge(e))
            .collect();
        for e in bbox_edges {
            let (s, t) = (self.igraph.source(e), self.igraph.target(e));
            let ss = plane.exact_side(self.igraph.exact_point_3(s));
            let st = plane.exact_side(self.igraph.exact_point_3(t));
            if ss == 0 {
                on_plane.insert(s);
            }
            if st == 0 {
                on_plane.insert(t);
            }
            if ss * st < 0 {
                let p = plane.exact_segment_intersection(
                    self.igraph.exact_point_3(s),
                    self.igraph.exact_point_3(t),
                );
                let v = self.igraph.add_vertex(p, BTreeSet::new());
                self.split_iedge(e, v);
                on_plane.insert(v);
            }
        }
        for &v in &on_plane {
            self.igraph.add_plane_to_vertex(v, sp);
        }

        for face in 0..self.support_planes.len() {
            if !self.support_planes[face].is_bbox() {
                continue;
            }
            let ends: Vec<IVertex> = on_plane
                .iter()
                .copied()
                .filter(|&v| self.igraph.ivertex_planes(v).contains(&face))
                .collect();
            if ends.len() < 2 {
                continue;
            }
            self.add_trace(face, sp, ends);
        }
    }

    /// Inserts the trace of plane `sp` on the bbox face `face` through the
    /// boundary vertices `ends`, splitting earlier traces it crosses.
    fn add_trace(&mut self, face: usize, sp: usize, ends: Vec<IVertex>) {
        let fplane = self.support_planes[face].plane().clone();
        let p2 = |ds: &Self, v: IVertex| fplane.to_2d_exact(ds.igraph.exact_point_3(v));

        let pts: Vec<Point2<KsrRational>> = ends.iter().map(|&v| p2(self, v)).collect();
        let mut chain = sort_collinear(&ends, &pts);
        let (a, b) = (chain[0], chain[chain.len() - 1]);
        let trace = Segment2::new(&p2(self, a), &p2(self, b));

        let others: Vec<IEdge> = self.support_planes[face]
            .unique_iedges()
            .iter()
            .copied()
            .filter(|&e| !self.is_bbox_iedge(e))
            .collect();
        for e in others {
            let (x, y) = (self.igraph.source(e), self.igraph.target(e));
            let seg = Segment2::new(&p2(self, x), &p2(self, y));
            match segment_segment_intersection(&trace, &seg) {
                SegmentIntersection::None => {}
                SegmentIntersection::Point(r) => {
                    if r == seg.a {
                        chain.push(x);
                    } else if r == seg.b {
                        chain.push(y);
                    } else {
                        let v = if r == trace.a {
                            a
                        } else if r == trace.b {
                            b
                        } else {
                            let planes: BTreeSet<usize> =
                                self.igraph.iedge_planes(e).iter().copied().collect();
                            self.igraph.add_vertex(fplane.to_3d_exact(&r), planes)
                        };
                        self.split_iedge(e, v);
                        chain.push(v);
                    }
                }
                SegmentIntersection::Overlapping(_) => {
                    for (v, q) in [(x, &seg.a), (y, &seg.b)] {
                        if is_point_on_segment(q, &trace) {
                            chain.push(v);
                        }
                    }
                }
            }
        }

        chain.sort();
        chain.dedup();
        let pts: Vec<Point2<KsrRational>> = chain.iter().map(|&v| p2(self, v)).collect();
        let chain = sort_collinear(&chain, &pts);
        let line = self.igraph.add_line();
        let planes = BTreeSet::from([face, sp]);
        for w in chain.windows(2) {
            self.connect(w[0], w[1], &planes, Some(line));
        }
        trace!("plane {sp} traced on bbox face {face} with {} vertices", chain.len());
    }

    fn split_iedge(&mut self, e: IEdge, v: IVertex) -> IEdge {
        let e2 = self.igraph.split_edge(e, v);
        let planes: Vec<usize> = self.igraph.iedge_planes(e).iter().copied().collect();
        for p in planes {
            if p < self.support_planes.len() {
                self.support_planes[p].insert_iedge(e2);
            }
        }
        e2
    }

    /// Adds `planes` to the edge `(a, b)`, creating it on `line` (or a new
    /// line) when it does not exist yet.
    fn connect(&mut self, a: IVertex, b: IVertex, planes: &BTreeSet<usize>, line: Option<usize>) -> IEdge {
        let e = match self.igraph.edge(a, b) {
            Some(e) => {
                for &p in planes {
                    self.igraph.add_plane_to_edge(e, p);
                }
                e
            }
            None => {
                let line = line.unwrap_or_else(|| self.igraph.add_line());
                self.igraph.add_edge(a, b, planes.clone(), line)
            }
        };
        let all: Vec<usize> = self.igraph.iedge_planes(e).iter().copied().collect();
        for p in all {
            if p < self.support_planes.len() {
                self.support_planes[p].insert_iedge(e);
            }
        }
        e
    }

    /// Stores the merged input polygon of a support plane.
    pub fn add_input_polygon(&mut self, sp: usize, input_indices: &[usize], polygon: &[Point2<KsrF64>]) {
        let mut poly = Polygon2::new(polygon.to_vec());
        if poly.signed_area_2().is_negative() {
            poly.reverse_orientation();
        }
        self.support_planes[sp].set_input_polygon(input_indices, poly.vertices());
    }

    /// Finds or creates the vertex at `point` lying on `planes`. Lookup is
    /// by plane set first, then by proximity; plane sets merge on reuse.
    pub fn add_ivertex(&mut self, point: Point3<KsrRational>, planes: &BTreeSet<usize>) -> IVertex {
        if let Some(v) = self.igraph.vertex_by_key(planes) {
            self.igraph.merge_vertex_planes(v, planes);
            return v;
        }
        let approx = point.to_inexact();
        let tol = KsrF64(KSR_TOLERANCE);
        let near = self
            .igraph
            .ivertices()
            .find(|&v| are_near(&self.igraph.point_3(v), &approx, &tol));
        let v = match near {
            Some(v) => {
                self.igraph.merge_vertex_planes(v, planes);
                v
            }
            None => self.igraph.add_vertex(point, planes.clone()),
        };
        self.igraph.register_key(planes.clone(), v);
        v
    }

    /// Chains collinear vertices into edges of one new line on `planes`.
    pub fn add_iedge(&mut self, planes: &BTreeSet<usize>, vertices: &[IVertex]) {
        let mut unique = vertices.to_vec();
        unique.sort();
        unique.dedup();
        if unique.len() < 2 {
            return;
        }
        let pts: Vec<Point3<KsrRational>> = unique
            .iter()
            .map(|&v| self.igraph.exact_point_3(v).clone())
            .collect();
        let chain = sort_collinear(&unique, &pts);
        let line = self.igraph.add_line();
        for w in chain.windows(2) {
            self.connect(w[0], w[1], planes, Some(line));
        }
    }

    /// Creates a face of `sp` from a closed counterclockwise boundary and
    /// registers it on all its edges.
    pub fn add_iface(&mut self, sp: usize, vertices: Vec<IVertex>, edges: Vec<IEdge>) -> IFace {
        let polygon: Polygon2<KsrRational> = vertices.iter().map(|&v| self.exact_point_2(sp, v)).collect();
        let f = self.igraph.add_face(FaceProperty {
            support_plane: sp,
            vertices,
            edges: edges.clone(),
            polygon,
        });
        let plane = &mut self.support_planes[sp];
        plane.insert_iface(f);
        for e in edges {
            plane.add_neighbor(e, f);
        }
        f
    }

    /// Adds face `f` to the mesh of `sp`, sharing mesh vertices with faces
    /// already added over the same graph vertices.
    pub fn add_iface_to_mesh(&mut self, sp: usize, f: IFace) -> PFace {
        let ivertices = self.igraph.face(f).vertices.clone();
        let points: Vec<Point2<KsrF64>> = ivertices.iter().map(|&v| self.point_2(sp, v)).collect();

        let mesh = self.support_planes[sp].mesh_mut();
        let mut indices = Vec::with_capacity(ivertices.len());
        for (iv, p) in ivertices.into_iter().zip(points) {
            let slot = mesh.vertices.iter().position(|pv| pv.ivertex == Some(iv));
            let slot = match slot {
                Some(slot) => slot,
                None => {
                    mesh.vertices.push(PVertexData {
                        point: p,
                        ivertex: Some(iv),
                    });
                    mesh.vertices.len() - 1
                }
            };
            indices.push(slot);
        }
        mesh.faces.push(PFaceData {
            vertices: indices,
            k: 0,
            iface: Some(f),
        });
        PFace {
            support_plane: sp,
            index: mesh.faces.len() - 1,
        }
    }

    pub fn ivertices(&self) -> impl Iterator<Item = IVertex> + use<> {
        self.igraph.ivertices()
    }

    pub fn iedges(&self) -> impl Iterator<Item = IEdge> + use<> {
        self.igraph.iedges()
    }

    pub fn ifaces(&self) -> impl Iterator<Item = IFace> + use<> {
        self.igraph.ifaces()
    }

    pub fn point_3(&self, v: IVertex) -> Point3<KsrF64> {
        self.igraph.point_3(v)
    }

    pub fn exact_point_3(&self, v: IVertex) -> &Point3<KsrRational> {
        self.igraph.exact_point_3(v)
    }

    /// Vertex in the metric frame of `sp`.
    pub fn point_2(&self, sp: usize, v: IVertex) -> Point2<KsrF64> {
        self.support_planes[sp].to_2d(&self.point_3(v))
    }

    /// Vertex in the exact projection of `sp`.
    pub fn exact_point_2(&self, sp: usize, v: IVertex) -> Point2<KsrRational> {
        self.support_planes[sp]
            .plane()
            .to_2d_exact(self.igraph.exact_point_3(v))
    }

    pub fn segment_3(&self, e: IEdge) -> Segment3<KsrF64> {
        self.igraph.segment_3(e)
    }

    pub fn source(&self, e: IEdge) -> IVertex {
        self.igraph.source(e)
    }

    pub fn target(&self, e: IEdge) -> IVertex {
        self.igraph.target(e)
    }

    pub fn opposite(&self, e: IEdge, v: IVertex) -> IVertex {
        self.igraph.opposite(e, v)
    }

    pub fn line(&self, e: IEdge) -> usize {
        self.igraph.line(e)
    }

    pub fn to_2d(&self, sp: usize, p: &Point3<KsrF64>) -> Point2<KsrF64> {
        self.support_planes[sp].to_2d(p)
    }

    pub fn to_3d(&self, sp: usize, p: &Point2<KsrF64>) -> Point3<KsrF64> {
        self.support_planes[sp].to_3d(p)
    }

    /// Support planes through `v`, optionally without the bbox faces.
    pub fn intersected_planes(&self, v: IVertex, keep_bbox: bool) -> BTreeSet<usize> {
        self.igraph
            .ivertex_planes(v)
            .iter()
            .copied()
            .filter(|&p| keep_bbox || !self.support_planes[p].is_bbox())
            .collect()
    }

    pub fn iedge_planes(&self, e: IEdge) -> &BTreeSet<usize> {
        self.igraph.iedge_planes(e)
    }

    /// True when `e` lies on an edge of the bounding box, i.e. on two bbox
    /// faces. Input planes containing that box edge do not change this.
    pub fn is_bbox_iedge(&self, e: IEdge) -> bool {
        self.igraph
            .iedge_planes(e)
            .iter()
            .filter(|&&p| p < self.support_planes.len() && self.support_planes[p].is_bbox())
            .count()
            >= 2
    }

    pub fn kinetic_interval(&self, e: IEdge, sp: usize) -> Option<&KineticInterval> {
        self.igraph.kinetic_interval(e, sp)
    }

    pub fn pfaces(&self, sp: usize) -> Vec<PFace> {
        (0..self.support_planes[sp].mesh().faces.len())
            .map(|index| PFace {
                support_plane: sp,
                index,
            })
            .collect()
    }

    pub fn pvertices(&self, sp: usize) -> Vec<PVertex> {
        (0..self.support_planes[sp].mesh().vertices.len())
            .map(|index| PVertex {
                support_plane: sp,
                index,
            })
            .collect()
    }

    pub fn pvertices_of_pface(&self, pface: PFace) -> Vec<PVertex> {
        self.support_planes[pface.support_plane].mesh().faces[pface.index]
            .vertices
            .iter()
            .map(|&index| PVertex {
                support_plane: pface.support_plane,
                index,
            })
            .collect()
    }

    pub fn pvertex_point_2(&self, pv: PVertex) -> &Point2<KsrF64> {
        &self.support_planes[pv.support_plane].mesh().vertices[pv.index].point
    }

    pub fn pvertex_point_3(&self, pv: PVertex) -> Point3<KsrF64> {
        self.to_3d(pv.support_plane, self.pvertex_point_2(pv))
    }

    pub fn pface_iface(&self, pface: PFace) -> Option<IFace> {
        self.support_planes[pface.support_plane].mesh().faces[pface.index].iface
    }

    pub fn k(&self, pface: PFace) -> u32 {
        self.support_planes[pface.support_plane].mesh().faces[pface.index].k
    }

    pub fn set_k(&mut self, pface: PFace, k: u32) {
        self.support_planes[pface.support_plane].mesh_mut().faces[pface.index].k = k;
    }

    /// Edges of `sp` incident to `v`, sorted counterclockwise by the exact
    /// angle of their direction leaving `v`.
    pub fn get_and_sort_all_connected_iedges(&self, sp: usize, v: IVertex) -> ConnectedIEdges {
        let origin = self.exact_point_2(sp, v);
        let mut connected: ConnectedIEdges = self
            .igraph
            .incident_edges(v)
            .iter()
            .copied()
            .filter(|&e| self.igraph.iedge_planes(e).contains(&sp))
            .map(|e| {
                let other = self.exact_point_2(sp, self.igraph.opposite(e, v));
                (e, origin.vector_to(&other))
            })
            .collect();
        connected.sort_by(|a, b| compare_angle(&a.1, &b.1));
        connected
    }

    /// Caches the support planes of every edge and validates every kinetic
    /// interval.
    pub fn precompute_iedge_data(&mut self) {
        self.iedge_support_planes = self
            .igraph
            .iedges()
            .map(|e| self.igraph.iedge_planes(e).iter().copied().collect())
            .collect();

        for e in self.igraph.iedges() {
            for (sp, interval) in &self.igraph.edge_property(e).intervals {
                validate_kinetic_interval(e, *sp, interval);
            }
        }
    }

    /// Support planes of `e` as cached by `precompute_iedge_data`.
    pub fn iedge_support_planes(&self, e: IEdge) -> &[usize] {
        &self.iedge_support_planes[e.0]
    }
}

/// Orders vertices lying on a common line along that line.
fn sort_collinear<const N: usize>(vertices: &[IVertex], pts: &[Point<KsrRational, N>]) -> Vec<IVertex> {
    let origin = &pts[0];
    let Some(dir) = pts.iter().map(|p| origin.vector_to(p)).find(|d| !d.is_zero()) else {
        return vertices.to_vec();
    };
    let keys: Vec<KsrRational> = pts.iter().map(|p| origin.vector_to(p).dot(&dir)).collect();
    let mut order: Vec<usize> = (0..vertices.len()).collect();
    order.sort_by(|&i, &j| KsrRational::cmp_ref(&keys[i], &keys[j]));
    order.into_iter().map(|i| vertices[i]).collect()
}

fn validate_kinetic_interval(e: IEdge, sp: usize, interval: &KineticInterval) {
    assert!(
        interval.len() >= 2,
        "kinetic interval of {e:?} on plane {sp} has fewer than two entries"
    );
    assert!(
        interval[0].0 == 0.0 && interval[interval.len() - 1].0 == 1.0,
        "kinetic interval of {e:?} on plane {sp} does not span [0, 1]: {interval:?}"
    );
    for w in interval.windows(2) {
        assert!(
            w[0].0 <= w[1].0,
            "kinetic interval of {e:?} on plane {sp} is not monotone: {interval:?}"
        );
    }
    assert!(
        interval.iter().all(|&(_, t)| t >= 0.0),
        "kinetic interval of {e:?} on plane {sp} has a negative time: {interval:?}"
    );
}

/// Counterclockwise order of directions starting from the positive x-axis.
fn compare_angle(a: &Vector2<KsrRational>, b: &Vector2<KsrRational>) -> Ordering {
    let half = |d: &Vector2<KsrRational>| {
        if d.y().is_positive() || (d.y().is_zero() && d.x().is_positive()) {
            0
        } else {
            1
        }
    };
    match half(a).cmp(&half(b)) {
        Ordering::Equal => match a.perp_dot(b).sign() {
            1 => Ordering::Less,
            -1 => Ordering::Greater,
            _ => Ordering::Equal,
        },
        ord => ord,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angular_order_is_counterclockwise_from_east() {
        let dirs: Vec<Vector2<KsrRational>> = [[0, -1], [1, 0], [-1, 0], [1, 1], [0, 1]]
            .into_iter()
            .map(|c: [i32; 2]| Vector2::from_vals(c))
            .collect();
        let mut sorted = dirs.clone();
        sorted.sort_by(compare_angle);
        let expected: Vec<Vector2<KsrRational>> = [[1, 0], [1, 1], [0, 1], [-1, 0], [0, -1]]
            .into_iter()
            .map(|c: [i32; 2]| Vector2::from_vals(c))
            .collect();
        assert_eq!(sorted, expected);
    }

    #[test]
    #[should_panic(expected = "not monotone")]
    fn backward_interval_is_rejected() {
        validate_kinetic_interval(IEdge(0), 6, &vec![(0.0, 0.0), (0.7, 0.0), (0.4, 0.0), (1.0, 0.0)]);
    }
}
