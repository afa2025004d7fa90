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

use log::debug;

use crate::{
    geometry::{
        plane::Plane3,
        point::{Point2, Point3},
        util::centroid,
        vector::Vector2,
    },
    kinetic::intersection_graph::{IEdge, IFace, IVertex},
    numeric::ksr_f64::KsrF64,
};

/// Vertex of a support plane mesh, addressed by plane and slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PVertex {
    pub support_plane: usize,
    pub index: usize,
}

/// Face of a support plane mesh, addressed by plane and slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PFace {
    pub support_plane: usize,
    pub index: usize,
}

#[derive(Clone, Debug)]
pub struct PVertexData {
    pub point: Point2<KsrF64>,
    pub ivertex: Option<IVertex>,
}

#[derive(Clone, Debug)]
pub struct PFaceData {
    pub vertices: Vec<usize>,
    pub k: u32,
    pub iface: Option<IFace>,
}

/// Polygon mesh embedded in the 2D frame of a support plane.
#[derive(Clone, Debug, Default)]
pub struct PolygonMesh {
    pub vertices: Vec<PVertexData>,
    pub faces: Vec<PFaceData>,
}

impl PolygonMesh {
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.faces.clear();
    }

    pub fn add_face(&mut self, points: &[Point2<KsrF64>], iface: Option<IFace>) -> usize {
        let start = self.vertices.len();
        self.vertices.extend(points.iter().map(|p| PVertexData {
            point: p.clone(),
            ivertex: None,
        }));
        self.faces.push(PFaceData {
            vertices: (start..self.vertices.len()).collect(),
            k: 0,
            iface,
        });
        self.faces.len() - 1
    }
}

#[derive(Clone, Debug)]
pub struct SupportPlane {
    plane: Plane3,
    is_bbox: bool,
    unique_iedges: BTreeSet<IEdge>,
    ifaces: BTreeSet<IFace>,
    iedge_ifaces: BTreeMap<IEdge, [Option<IFace>; 2]>,
    mesh: PolygonMesh,
    input_indices: Vec<usize>,
    original_vertices: Vec<Point2<KsrF64>>,
    original_vectors: Vec<Vector2<KsrF64>>,
}

impl SupportPlane {
    pub fn new(plane: Plane3, is_bbox: bool) -> Self {
        SupportPlane {
            plane,
            is_bbox,
            unique_iedges: BTreeSet::new(),
            ifaces: BTreeSet::new(),
            iedge_ifaces: BTreeMap::new(),
            mesh: PolygonMesh::default(),
            input_indices: Vec::new(),
            original_vertices: Vec::new(),
            original_vectors: Vec::new(),
        }
    }

    pub fn plane(&self) -> &Plane3 {
        &self.plane
    }

    pub fn is_bbox(&self) -> bool {
        self.is_bbox
    }

    pub fn to_2d(&self, p: &Point3<KsrF64>) -> Point2<KsrF64> {
        self.plane.to_2d(p)
    }

    pub fn to_3d(&self, p: &Point2<KsrF64>) -> Point3<KsrF64> {
        self.plane.to_3d(p)
    }

    pub fn unique_iedges(&self) -> &BTreeSet<IEdge> {
        &self.unique_iedges
    }

    pub fn insert_iedge(&mut self, e: IEdge) {
        self.unique_iedges.insert(e);
    }

    pub fn ifaces(&self) -> &BTreeSet<IFace> {
        &self.ifaces
    }

    pub fn insert_iface(&mut self, f: IFace) {
        self.ifaces.insert(f);
    }

    /// First face registered on `e`, if any.
    pub fn iface(&self, e: IEdge) -> Option<IFace> {
        self.iedge_ifaces.get(&e).and_then(|slots| slots[0])
    }

    /// The face on `e` other than `f`.
    pub fn other(&self, e: IEdge, f: Option<IFace>) -> Option<IFace> {
        let slots = self.iedge_ifaces.get(&e)?;
        match f {
            None => None,
            Some(f) if slots[0] == Some(f) => slots[1],
            Some(f) if slots[1] == Some(f) => slots[0],
            Some(_) => None,
        }
    }

    pub fn iedge_faces(&self, e: IEdge) -> impl Iterator<Item = IFace> + '_ {
        self.iedge_ifaces
            .get(&e)
            .into_iter()
            .flat_map(|slots| slots.iter().flatten().copied())
    }

    /// Registers `f` as adjacent to `e`. An edge bounds at most two faces
    /// per plane.
    pub fn add_neighbor(&mut self, e: IEdge, f: IFace) {
        let slots = self.iedge_ifaces.entry(e).or_insert([None, None]);
        if slots.contains(&Some(f)) {
            return;
        }
        if slots[0].is_none() {
            slots[0] = Some(f);
        } else if slots[1].is_none() {
            slots[1] = Some(f);
        } else {
            panic!("iedge {e:?} already bounds two faces, cannot add {f:?}");
        }
    }

    pub fn mesh(&self) -> &PolygonMesh {
        &self.mesh
    }

    pub fn mesh_mut(&mut self) -> &mut PolygonMesh {
        &mut self.mesh
    }

    pub fn input_indices(&self) -> &[usize] {
        &self.input_indices
    }

    pub fn original_vertices(&self) -> &[Point2<KsrF64>] {
        &self.original_vertices
    }

    pub fn original_vectors(&self) -> &[Vector2<KsrF64>] {
        &self.original_vectors
    }

    /// Stores the merged input polygon and seeds the mesh with it.
    pub fn set_input_polygon(&mut self, input_indices: &[usize], polygon: &[Point2<KsrF64>]) {
        self.input_indices = input_indices.to_vec();
        self.original_vertices = polygon.to_vec();
        self.original_vectors = radial_directions(polygon);
        self.mesh.clear();
        self.mesh.add_face(polygon, None);
    }

    /// Motion of the original edge `(v1, v2)`: its unit normal scaled by the
    /// normal component of the first vertex's velocity.
    pub fn original_edge_direction(&self, v1: usize, v2: usize) -> Vector2<KsrF64> {
        let edge = self.original_vertices[v2].vector_to(&self.original_vertices[v1]);
        let orth = match edge.perpendicular().normalized() {
            Some(orth) => orth,
            None => return Vector2::zero(),
        };
        let s1 = orth.dot(&self.original_vectors[v1]);
        let s2 = orth.dot(&self.original_vectors[v2]);
        if (s1.0 - s2.0).abs() > 1e-4 {
            debug!("edge ({v1}, {v2}) speed is inconsistent: {} vs {}", s1.0, s2.0);
        }
        orth.scale(&s1)
    }
}

/// Vertex velocities pointing away from the centroid, normalized so their
/// mean length is one.
fn radial_directions(polygon: &[Point2<KsrF64>]) -> Vec<Vector2<KsrF64>> {
    let Some(c) = centroid(polygon) else {
        return Vec::new();
    };
    let dirs: Vec<Vector2<KsrF64>> = polygon.iter().map(|p| c.vector_to(p)).collect();
    let mean = dirs.iter().map(|d| d.length().0).sum::<f64>() / dirs.len() as f64;
    if mean <= f64::MIN_POSITIVE {
        return dirs;
    }
    let inv = KsrF64(1.0 / mean);
    dirs.iter().map(|d| d.scale(&inv)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square_plane() -> SupportPlane {
        let pts = vec![
            Point3::from_vals([0.0, 0.0, 0.5]),
            Point3::from_vals([1.0, 0.0, 0.5]),
            Point3::from_vals([1.0, 1.0, 0.5]),
            Point3::from_vals([0.0, 1.0, 0.5]),
        ];
        SupportPlane::new(Plane3::from_polygon(&pts).unwrap(), false)
    }

    #[test]
    fn radial_vectors_have_unit_mean_length() {
        let mut sp = unit_square_plane();
        let square = vec![
            Point2::from_vals([-1.0, -1.0]),
            Point2::from_vals([1.0, -1.0]),
            Point2::from_vals([1.0, 1.0]),
            Point2::from_vals([-1.0, 1.0]),
        ];
        sp.set_input_polygon(&[3], &square);
        for v in sp.original_vectors() {
            assert!((v.length().0 - 1.0).abs() < 1e-12);
        }
        assert_eq!(sp.input_indices(), &[3]);
        assert_eq!(sp.mesh().faces.len(), 1);
    }

    #[test]
    fn edge_direction_is_orthogonal_to_edge() {
        let mut sp = unit_square_plane();
        let square = vec![
            Point2::from_vals([-1.0, -1.0]),
            Point2::from_vals([1.0, -1.0]),
            Point2::from_vals([1.0, 1.0]),
            Point2::from_vals([-1.0, 1.0]),
        ];
        sp.set_input_polygon(&[0], &square);
        let d = sp.original_edge_direction(0, 1);
        assert!(d.coords[0].0.abs() < 1e-12);
        assert!((d.coords[1].0.abs() - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "two faces")]
    fn third_face_on_edge_panics() {
        let mut sp = unit_square_plane();
        sp.add_neighbor(IEdge(0), IFace(0));
        sp.add_neighbor(IEdge(0), IFace(1));
        assert_eq!(sp.other(IEdge(0), Some(IFace(0))), Some(IFace(1)));
        sp.add_neighbor(IEdge(0), IFace(2));
    }
}
