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

use approx::assert_relative_eq;
use rand::{Rng, SeedableRng, rngs::StdRng};

use ksr::{
    Parameters,
    geometry::{Plane3, Point3, Vector3},
    kinetic::bounding_box::{bounding_box_to_polygons, create_bounding_box, edge_lengths, is_flat},
    kinetic::KSR_TOLERANCE,
    numeric::KsrF64,
};

fn random_polygon(rng: &mut StdRng) -> Vec<Point3<KsrF64>> {
    let c = [rng.random_range(-5.0..5.0), rng.random_range(-5.0..5.0), rng.random_range(-5.0..5.0)];
    let u = Vector3::<KsrF64>::from_vals([rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)]);
    let v = Vector3::<KsrF64>::from_vals([rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)]);
    let origin = Point3::<KsrF64>::from_vals(c);
    vec![
        origin.clone(),
        origin.add_vector(&u),
        origin.add_vector(&(&u + &v)),
        origin.add_vector(&v),
    ]
}

fn normals(polygons: &[Vec<Point3<KsrF64>>]) -> Vec<Vector3<KsrF64>> {
    polygons
        .iter()
        .filter_map(|p| Plane3::from_polygon(p).map(|plane| plane.normal().clone()))
        .collect()
}

fn inside(bbox: &[Point3<KsrF64>; 8], p: &Point3<KsrF64>) -> bool {
    let origin = &bbox[0];
    [&bbox[1], &bbox[3], &bbox[5]].iter().all(|corner| {
        let axis = origin.vector_to(corner);
        let t = origin.vector_to(p).dot(&axis).0 / axis.squared_length().0;
        (-1e-9..=1.0 + 1e-9).contains(&t)
    })
}

#[test]
fn test_random_inputs_are_bounded() {
    let mut rng = StdRng::seed_from_u64(7);
    for reorient in [false, true] {
        let parameters = Parameters::default().with_reorient(reorient);
        for _ in 0..20 {
            let polygons: Vec<_> = (0..3).map(|_| random_polygon(&mut rng)).collect();
            let (bbox, time_step) = create_bounding_box(&polygons, &normals(&polygons), &parameters);
            assert!(!is_flat(&bbox));
            assert!(edge_lengths(&bbox).iter().all(|&l| l >= KSR_TOLERANCE));
            assert!(time_step > 0.0);
            assert!(polygons.iter().flatten().all(|p| inside(&bbox, p)));
        }
    }
}

#[test]
fn test_time_step_uses_the_unenlarged_diagonal() {
    let polygons = vec![vec![
        Point3::from_vals([0.0, 0.0, 0.0]),
        Point3::from_vals([3.0, 0.0, 0.0]),
        Point3::from_vals([3.0, 4.0, 12.0]),
    ]];
    let parameters = Parameters::default().with_enlarge_bbox_ratio(2.0);
    let (bbox, time_step) = create_bounding_box(&polygons, &normals(&polygons), &parameters);
    assert_relative_eq!(time_step, 13.0 / 50.0, epsilon = 1e-12);
    assert_relative_eq!(bbox[0].vector_to(&bbox[7]).length().0, 26.0, epsilon = 1e-9);
}

#[test]
fn test_flat_input_gets_a_thick_box() {
    let polygons = vec![vec![
        Point3::from_vals([0.0, 0.0, 1.0]),
        Point3::from_vals([1.0, 0.0, 1.0]),
        Point3::from_vals([1.0, 1.0, 1.0]),
        Point3::from_vals([0.0, 1.0, 1.0]),
    ]];
    let parameters = Parameters::default().with_enlarge_bbox_ratio(1.0);
    let (bbox, _) = create_bounding_box(&polygons, &normals(&polygons), &parameters);
    let [_, _, dz] = edge_lengths(&bbox);
    assert_relative_eq!(dz, 80.0 * KSR_TOLERANCE, epsilon = 1e-7);
}

#[test]
fn test_box_faces_are_closed_quads() {
    let polygons = vec![vec![
        Point3::from_vals([0.0, 0.0, 0.0]),
        Point3::from_vals([1.0, 0.0, 0.5]),
        Point3::from_vals([0.0, 1.0, 1.0]),
    ]];
    let (bbox, _) = create_bounding_box(&polygons, &normals(&polygons), &Parameters::default());
    let faces = bounding_box_to_polygons(&bbox);
    assert_eq!(faces.len(), 6);
    for face in &faces {
        assert_eq!(face.len(), 4);
        let plane = Plane3::from_polygon(face).unwrap();
        for p in face {
            assert!(plane.signed_distance(p).0.abs() < 1e-9);
        }
    }
}
