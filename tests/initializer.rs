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

mod common;

use std::collections::BTreeSet;

use common::{Polygon, horizontal, initialize, to_points, vertical_x, vertical_y};
use ksr::{
    DataStructure, Initializer, KsrError, Parameters,
    geometry::Point3,
    kinetic::IVertex,
    numeric::{KsrF64, KsrRational},
};

fn non_bbox_vertices(data: &DataStructure) -> Vec<IVertex> {
    data.ivertices()
        .filter(|&v| data.intersected_planes(v, false).len() >= 2)
        .collect()
}

fn assert_faces_are_valid(data: &DataStructure) {
    for f in data.ifaces() {
        let face = data.igraph().face(f);
        assert!(face.polygon.is_counterclockwise());
        assert!(face.polygon.is_convex());
        assert!(face.polygon.is_simple());
        for &e in &face.edges {
            let plane = data.support_plane(face.support_plane);
            assert!(plane.iedge_faces(e).count() <= 2);
        }
    }
}

#[test]
fn test_single_square_inside_box() {
    let polygons = vec![horizontal(0.25, 0.75, 0.25, 0.75, 0.5)];
    let (data, time_step) = initialize(&polygons, &Parameters::default()).unwrap();

    assert_eq!(data.number_of_support_planes(), 7);
    assert!((0..6).all(|sp| data.support_plane(sp).is_bbox()));
    assert!(!data.support_plane(6).is_bbox());
    assert!(time_step > 0.0);

    let bbox_lines: BTreeSet<usize> = data
        .iedges()
        .filter(|&e| data.is_bbox_iedge(e))
        .map(|e| data.line(e))
        .collect();
    assert_eq!(bbox_lines.len(), 12);

    let corners = data
        .ivertices()
        .filter(|&v| data.intersected_planes(v, true).len() == 3 && data.intersected_planes(v, false).is_empty())
        .count();
    assert_eq!(corners, 8);
    assert!(non_bbox_vertices(&data).is_empty());

    // The square is parallel to the flat axis: it cuts the four vertical
    // box edges and nothing else.
    assert_eq!(data.igraph().number_of_vertices(), 12);
    assert_eq!(data.support_plane(6).ifaces().len(), 1);
    let pfaces = data.pfaces(6);
    assert_eq!(pfaces.len(), 1);
    let iface = data.support_plane(6).ifaces().iter().next().copied();
    assert_eq!(data.pface_iface(pfaces[0]), iface);
    assert_faces_are_valid(&data);
}

#[test]
fn test_coplanar_squares_share_a_plane() {
    let polygons = vec![
        horizontal(0.25, 0.625, 0.25, 0.625, 0.5),
        horizontal(0.375, 0.75, 0.375, 0.75, 0.5),
    ];
    let parameters = Parameters::default();
    let mut data = DataStructure::new();
    let mut initializer = Initializer::new(&mut data, &parameters);
    initializer.initialize(&polygons, to_points).unwrap();

    let merged = initializer.data().support_plane(6).original_vertices().to_vec();
    assert!(initializer.is_polygon_inside_bbox(6, &merged));
    drop(initializer);

    assert_eq!(data.number_of_support_planes(), 7);
    assert_eq!(data.support_plane(6).input_indices(), &[0, 1]);
    // Convex hull of both squares: two corners of each are inside the other.
    assert_eq!(merged.len(), 6);
    for p in &merged {
        let p3 = data.to_3d(6, p);
        assert!((p3[2].0 - 0.5).abs() < 1e-9);
    }
}

#[test]
fn test_merging_a_polygon_with_itself_is_idempotent() {
    let square = horizontal(0.25, 0.75, 0.25, 0.75, 0.5);
    let (data, _) = initialize(&[square.clone(), square.clone()], &Parameters::default()).unwrap();

    let merged: Vec<Point3<KsrF64>> = data
        .support_plane(6)
        .original_vertices()
        .iter()
        .map(|p| data.to_3d(6, p))
        .collect();
    assert_eq!(merged.len(), 4);
    for corner in to_points(&square) {
        assert!(merged.iter().any(|m| m.squared_distance(&corner).0 < 1e-18));
    }
}

#[test]
fn test_crossing_planes_add_one_line() {
    let polygons = vec![
        horizontal(0.25, 0.75, 0.25, 0.75, 0.5),
        vertical_x(0.5, 0.25, 0.75, 0.25, 0.75),
    ];
    let (data, _) = initialize(&polygons, &Parameters::default()).unwrap();

    assert_eq!(data.number_of_support_planes(), 8);
    let shared: Vec<_> = data
        .iedges()
        .filter(|&e| data.iedge_planes(e).is_superset(&BTreeSet::from([6, 7])))
        .collect();
    assert_eq!(shared.len(), 1);

    let e = shared[0];
    for v in [data.source(e), data.target(e)] {
        assert_eq!(data.intersected_planes(v, false), BTreeSet::from([6, 7]));
        let p = data.exact_point_3(v);
        assert_eq!(p[0], KsrRational::from(0.5));
        assert_eq!(p[2], KsrRational::from(0.5));
    }
    assert_eq!(non_bbox_vertices(&data).len(), 2);

    // Each input plane is cut in two by the other and its polygon covers both halves.
    for sp in [6, 7] {
        assert_eq!(data.support_plane(sp).ifaces().len(), 2);
        assert_eq!(data.pfaces(sp).len(), 2);
        let interval = data.kinetic_interval(e, sp).expect("shared edge has a kinetic interval");
        assert_eq!(interval.len(), 4);
        assert_eq!(interval[0].0, 0.0);
        assert_eq!(interval[3].0, 1.0);
        assert!(interval[0].1 > 0.0 && interval[3].1 > 0.0);
        assert_eq!(interval[1].1, 0.0);
        assert_eq!(interval[2].1, 0.0);
    }
    assert_faces_are_valid(&data);
}

#[test]
fn test_plane_through_box_edges_keeps_later_polygons() {
    // The diagonal plane x = y contains two vertical box edges.
    let diagonal: Polygon = vec![[0.25, 0.25, 0.25], [0.75, 0.75, 0.25], [0.75, 0.75, 0.75], [0.25, 0.25, 0.75]];
    let polygons = vec![diagonal, horizontal(0.25, 0.75, 0.25, 0.75, 0.5)];
    let (data, _) = initialize(&polygons, &Parameters::default()).unwrap();

    assert_eq!(data.number_of_support_planes(), 8);
    let bbox_lines: BTreeSet<usize> = data
        .iedges()
        .filter(|&e| data.is_bbox_iedge(e))
        .map(|e| data.line(e))
        .collect();
    assert_eq!(bbox_lines.len(), 12);

    let shared: Vec<_> = data
        .iedges()
        .filter(|&e| data.iedge_planes(e).is_superset(&BTreeSet::from([6, 7])))
        .collect();
    assert_eq!(shared.len(), 1);

    for sp in [6, 7] {
        assert_eq!(data.support_plane(sp).ifaces().len(), 2);
        assert_eq!(data.pfaces(sp).len(), 2);
    }
    for sp in 1..=4 {
        assert_eq!(data.support_plane(sp).ifaces().len(), 2);
    }
    assert!(data.check_input_planes(true));
    assert_faces_are_valid(&data);
}

#[test]
fn test_three_orthogonal_planes_meet_at_one_vertex() {
    let polygons = vec![
        vertical_x(0.5, 0.25, 0.75, 0.25, 0.75),
        vertical_y(0.5, 0.25, 0.75, 0.25, 0.75),
        horizontal(0.25, 0.75, 0.25, 0.75, 0.5),
    ];
    let (data, _) = initialize(&polygons, &Parameters::default()).unwrap();

    let center: Vec<IVertex> = data
        .ivertices()
        .filter(|&v| data.intersected_planes(v, false).len() == 3)
        .collect();
    assert_eq!(center.len(), 1);
    assert_eq!(
        data.exact_point_3(center[0]),
        &Point3::<KsrRational>::from_vals([0.5, 0.5, 0.5])
    );

    for sp in 6..9 {
        assert_eq!(data.support_plane(sp).ifaces().len(), 4);
        assert_eq!(data.pfaces(sp).len(), 4);
    }
    assert_faces_are_valid(&data);
}

#[test]
fn test_three_planes_through_one_line_share_one_edge() {
    let polygons = vec![
        horizontal(0.25, 0.75, 0.25, 0.75, 0.5),
        vertical_x(0.5, 0.25, 0.75, 0.25, 0.75),
        // x - 2z + 0.5 = 0, through the line x = z = 0.5.
        vec![
            [0.25, 0.25, 0.375],
            [0.75, 0.25, 0.625],
            [0.75, 0.75, 0.625],
            [0.25, 0.75, 0.375],
        ],
    ];
    let (data, _) = initialize(&polygons, &Parameters::default()).unwrap();

    let shared: Vec<_> = data
        .iedges()
        .filter(|&e| data.iedge_planes(e).is_superset(&BTreeSet::from([6, 7, 8])))
        .collect();
    assert_eq!(shared.len(), 1);
    for sp in 6..9 {
        assert_eq!(data.support_plane(sp).ifaces().len(), 2);
        assert_eq!(data.support_plane(sp).iedge_faces(shared[0]).count(), 2);
    }
    assert_faces_are_valid(&data);
}

#[test]
fn test_every_pface_gets_k() {
    let polygons = vec![
        horizontal(0.25, 0.75, 0.25, 0.75, 0.5),
        vertical_y(0.5, 0.25, 0.75, 0.25, 0.75),
    ];
    let (data, _) = initialize(&polygons, &Parameters::default().with_k(3)).unwrap();
    for sp in 0..data.number_of_support_planes() {
        let pfaces = data.pfaces(sp);
        assert!(!pfaces.is_empty());
        for pface in pfaces {
            assert_eq!(data.k(pface), 3);
        }
    }
}

#[test]
fn test_kinetic_intervals_are_monotone() {
    let polygons = vec![
        horizontal(0.25, 0.75, 0.25, 0.75, 0.5),
        vertical_x(0.375, 0.125, 0.875, 0.125, 0.625),
        vertical_y(0.625, 0.25, 0.5, 0.25, 0.75),
    ];
    let (data, _) = initialize(&polygons, &Parameters::default()).unwrap();

    let mut seen = 0;
    for e in data.iedges() {
        for sp in 6..data.number_of_support_planes() {
            let Some(interval) = data.kinetic_interval(e, sp) else {
                continue;
            };
            seen += 1;
            assert_eq!(interval.first().map(|i| i.0), Some(0.0));
            assert_eq!(interval.last().map(|i| i.0), Some(1.0));
            assert!(interval.windows(2).all(|w| w[0].0 <= w[1].0));
            assert!(interval.iter().all(|&(_, t)| t >= 0.0));
        }
    }
    assert!(seen > 0);
    assert_faces_are_valid(&data);
}

#[test]
fn test_cached_support_planes_match_the_graph() {
    let polygons = vec![
        horizontal(0.25, 0.75, 0.25, 0.75, 0.5),
        vertical_x(0.5, 0.25, 0.75, 0.25, 0.75),
    ];
    let (data, _) = initialize(&polygons, &Parameters::default()).unwrap();
    for e in data.iedges() {
        let cached: BTreeSet<usize> = data.iedge_support_planes(e).iter().copied().collect();
        assert_eq!(&cached, data.iedge_planes(e));
    }
    assert!(data.igraph().is_frozen());
    assert!(data.check_integrity(true));
    assert!(data.check_input_planes(true));
    assert!(data.check_bbox());
    assert!(data.check_intersection_graph());
}

#[test]
fn test_empty_input_is_rejected() {
    let polygons: Vec<Polygon> = Vec::new();
    assert!(matches!(
        initialize(&polygons, &Parameters::default()),
        Err(KsrError::EmptyInput)
    ));
}

#[test]
fn test_short_polygon_is_rejected() {
    let polygons = vec![
        horizontal(0.25, 0.75, 0.25, 0.75, 0.5),
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
    ];
    assert!(matches!(
        initialize(&polygons, &Parameters::default()),
        Err(KsrError::TooFewPoints { index: 1, count: 2 })
    ));
}

#[test]
fn test_collinear_polygon_is_rejected() {
    let polygons = vec![vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [2.0, 2.0, 2.0]]];
    assert!(matches!(
        initialize(&polygons, &Parameters::default()),
        Err(KsrError::DegeneratePolygon { index: 0 })
    ));
}

#[test]
fn test_non_finite_polygon_is_rejected() {
    let polygons = vec![vec![[0.0, 0.0, 0.0], [1.0, f64::NAN, 0.0], [0.0, 1.0, 0.0]]];
    assert!(matches!(
        initialize(&polygons, &Parameters::default()),
        Err(KsrError::NonFiniteCoordinate { index: 0 })
    ));
}

#[test]
#[should_panic(expected = "rectangle is not implemented")]
fn test_rectangle_merge_is_unsupported() {
    let square = horizontal(0.25, 0.75, 0.25, 0.75, 0.5);
    let parameters = Parameters::default().with_merge_type(ksr::kinetic::PlanarShapeType::Rectangle);
    let _ = initialize(&[square.clone(), square], &parameters);
}
