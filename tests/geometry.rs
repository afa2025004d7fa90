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

use rand::{Rng, SeedableRng, rngs::StdRng};

use ksr::{
    geometry::{
        Plane3, Point2, Point3, Polygon2, Segment2,
        convex_hull::convex_hull_2,
        intersection::{SegmentIntersection, segment_segment_intersection},
    },
    kernel::{Orientation, ToExact, orientation_2},
    numeric::{KsrF64, KsrRational, Scalar},
};

fn exact2(c: [i32; 2]) -> Point2<KsrRational> {
    Point2::from_vals(c)
}

#[test]
fn test_exact_lift_is_on_plane() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        let pts: Vec<Point3<KsrF64>> = (0..3)
            .map(|_| {
                Point3::from_vals([
                    rng.random_range(-10.0..10.0),
                    rng.random_range(-10.0..10.0),
                    rng.random_range(-10.0..10.0),
                ])
            })
            .collect();
        let Some(plane) = Plane3::from_polygon(&pts) else {
            continue;
        };
        let q = Point2::<KsrRational>::from_vals([rng.random_range(-5.0..5.0), rng.random_range(-5.0..5.0)]);
        let lifted = plane.to_3d_exact(&q);
        assert_eq!(plane.exact_side(&lifted), 0);
        assert_eq!(plane.to_2d_exact(&lifted), q);
    }
}

#[test]
fn test_frame_is_orthonormal() {
    let pts: Vec<Point3<KsrF64>> = vec![
        Point3::from_vals([0.0, 0.0, 1.0]),
        Point3::from_vals([1.0, 0.0, 2.0]),
        Point3::from_vals([0.0, 1.0, 3.0]),
    ];
    let plane = Plane3::from_polygon(&pts).unwrap();
    let (b1, b2, n) = (plane.base1(), plane.base2(), plane.normal());
    assert!(b1.dot(b2).0.abs() < 1e-12);
    assert!(b1.dot(n).0.abs() < 1e-12);
    assert!((b1.length().0 - 1.0).abs() < 1e-12);
    assert!((b2.length().0 - 1.0).abs() < 1e-12);
    for p in &pts {
        let back = plane.to_3d(&plane.to_2d(p));
        assert!(back.squared_distance(p).0 < 1e-20);
    }
}

#[test]
fn test_exact_projection_keeps_winding() {
    let ccw: Vec<Point3<KsrF64>> = vec![
        Point3::from_vals([0.0, 0.0, 0.0]),
        Point3::from_vals([1.0, 0.0, 0.0]),
        Point3::from_vals([1.0, 1.0, 0.0]),
        Point3::from_vals([0.0, 1.0, 0.0]),
    ];
    for polygon in [ccw.clone(), ccw.iter().rev().cloned().collect()] {
        let plane = Plane3::from_polygon(&polygon).unwrap();
        let projected: Polygon2<KsrRational> = polygon.iter().map(|p| plane.to_2d_exact(&p.to_exact())).collect();
        assert!(projected.is_counterclockwise());
    }
}

#[test]
fn test_hull_is_ccw_and_convex() {
    let mut rng = StdRng::seed_from_u64(3);
    let points: Vec<Point2<KsrRational>> = (0..40)
        .map(|_| Point2::from_vals([rng.random_range(-100i32..100), rng.random_range(-100i32..100)]))
        .collect();
    let hull = Polygon2::new(convex_hull_2(&points));
    assert!(hull.is_counterclockwise());
    assert!(hull.is_convex());
    assert!(hull.is_simple());
    for p in &points {
        for e in hull.edges() {
            assert_ne!(orientation_2(&e.a, &e.b, p), Orientation::Clockwise);
        }
    }
}

#[test]
fn test_shared_edge_is_not_an_overlap() {
    let a: Polygon2<KsrRational> = [[0, 0], [2, 0], [2, 2], [0, 2]].map(exact2).into_iter().collect();
    let b: Polygon2<KsrRational> = [[2, 0], [4, 0], [4, 2], [2, 2]].map(exact2).into_iter().collect();
    let c: Polygon2<KsrRational> = [[1, 1], [3, 1], [3, 3], [1, 3]].map(exact2).into_iter().collect();
    assert!(!a.has_interior_overlap(&b));
    assert!(a.has_interior_overlap(&c));
    assert!(b.has_interior_overlap(&c));
}

#[test]
fn test_crossing_at_a_rational_point() {
    let s1 = Segment2::new(&exact2([0, 0]), &exact2([3, 1]));
    let s2 = Segment2::new(&exact2([0, 1]), &exact2([3, 0]));
    match segment_segment_intersection(&s1, &s2) {
        SegmentIntersection::Point(p) => {
            assert_eq!(p, Point2::new([KsrRational::from_num_den(3, 2), KsrRational::from_num_den(1, 2)]));
        }
        other => panic!("expected a point, got {other:?}"),
    }
}
