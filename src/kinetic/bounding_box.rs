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

use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    geometry::{
        aabb::Aabb,
        convex_hull::convex_hull_2,
        point::{Point2, Point3},
        util::centroid,
        vector::Vector3,
    },
    kinetic::parameters::{KSR_TOLERANCE, Parameters},
    numeric::ksr_f64::KsrF64,
};

/// Eight corners in the standard order:
/// `0:(min,min,min) 1:(max,min,min) 2:(max,max,min) 3:(min,max,min)
///  4:(min,max,max) 5:(min,min,max) 6:(max,min,max) 7:(max,max,max)`.
pub type BoundingBox = [Point3<KsrF64>; 8];

/// Face polygons of a box, in corner indices.
pub const BBOX_FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [0, 1, 6, 5],
    [1, 2, 7, 6],
    [2, 3, 4, 7],
    [3, 0, 5, 4],
    [5, 6, 7, 4],
];

const CORNER_SIGNS: [[bool; 3]; 8] = [
    [false, false, false],
    [true, false, false],
    [true, true, false],
    [false, true, false],
    [false, true, true],
    [false, false, true],
    [true, false, true],
    [true, true, true],
];

fn distance(a: &Point3<KsrF64>, b: &Point3<KsrF64>) -> f64 {
    a.vector_to(b).length().0
}

/// Lengths of the three box edges leaving corner 0.
pub fn edge_lengths(bbox: &BoundingBox) -> [f64; 3] {
    [
        distance(&bbox[0], &bbox[1]),
        distance(&bbox[0], &bbox[3]),
        distance(&bbox[0], &bbox[5]),
    ]
}

pub fn is_flat(bbox: &BoundingBox) -> bool {
    edge_lengths(bbox).iter().any(|&l| l < KSR_TOLERANCE)
}

/// Builds the enclosing box and the time step derived from its diagonal.
pub fn create_bounding_box(
    polygons: &[Vec<Point3<KsrF64>>],
    normals: &[Vector3<KsrF64>],
    parameters: &Parameters,
) -> (BoundingBox, f64) {
    let points: Vec<Point3<KsrF64>> = polygons.iter().flatten().cloned().collect();
    let level = parameters.summary_level();

    let mut bbox = if parameters.reorient {
        match optimal_box(
            &points,
            normals,
            parameters.obb_random_directions,
            parameters.obb_seed,
        ) {
            Some(obb) if !is_flat(&obb) => {
                log::log!(level, "using optimal bounding box");
                obb
            }
            _ => {
                log::log!(level, "optimal bounding box is flat, reverting to axis-aligned");
                axis_aligned_box(&points, parameters)
            }
        }
    } else {
        axis_aligned_box(&points, parameters)
    };

    let time_step = distance(&bbox[0], &bbox[7]) / 50.0;
    enlarge_bounding_box(parameters.enlarge_bbox_ratio, &mut bbox);
    log::log!(level, "precomputed time_step: {time_step}");
    for (i, p) in bbox.iter().enumerate() {
        debug!("bbox corner {i}: {p}");
    }
    (bbox, time_step)
}

/// Axis-aligned box of all points, thickened along a single flat axis.
///
/// Panics when more than one axis is flat.
pub fn axis_aligned_box(points: &[Point3<KsrF64>], parameters: &Parameters) -> BoundingBox {
    let aabb = Aabb::from_points(points.iter()).unwrap_or_else(|| {
        panic!("cannot bound an empty point set");
    });
    let lo = [aabb.min[0].0, aabb.min[1].0, aabb.min[2].0];
    let hi = [aabb.max[0].0, aabb.max[1].0, aabb.max[2].0];
    let mut bbox = corners_from_extents(lo, hi);

    let lengths = edge_lengths(&bbox);
    let flat: Vec<usize> = (0..3).filter(|&i| lengths[i] < KSR_TOLERANCE).collect();
    match flat.as_slice() {
        [] => {
            log::log!(parameters.summary_level(), "using axis-aligned bounding box");
        }
        [axis] => {
            let d = 40.0 * KSR_TOLERANCE;
            for (corner, signs) in bbox.iter_mut().zip(CORNER_SIGNS.iter()) {
                for i in 0..3 {
                    let offset = if signs[i] { d } else { -d };
                    corner.coords[i] = KsrF64(corner.coords[i].0 + offset);
                }
            }
            let name = ["x", "y", "z"][*axis];
            log::log!(
                parameters.summary_level(),
                "setting {name}-based flat axis-aligned bounding box"
            );
        }
        _ => panic!("degenerate input polygons: bounding box is flat along {flat:?}"),
    }
    bbox
}

fn corners_from_extents(lo: [f64; 3], hi: [f64; 3]) -> BoundingBox {
    CORNER_SIGNS.map(|signs| {
        Point3::from_vals([
            if signs[0] { hi[0] } else { lo[0] },
            if signs[1] { hi[1] } else { lo[1] },
            if signs[2] { hi[2] } else { lo[2] },
        ])
    })
}

/// Minimum-volume box over candidate frames. The third axis of a frame is
/// an input normal, a coordinate axis or a seeded random direction; the two
/// in-plane axes come from the minimum-area rectangle of the projected hull.
pub fn optimal_box(
    points: &[Point3<KsrF64>],
    normals: &[Vector3<KsrF64>],
    random_directions: usize,
    seed: u64,
) -> Option<BoundingBox> {
    if points.is_empty() {
        return None;
    }
    let mut candidates: Vec<Vector3<KsrF64>> = normals.to_vec();
    candidates.push(Vector3::from_vals([1.0, 0.0, 0.0]));
    candidates.push(Vector3::from_vals([0.0, 1.0, 0.0]));
    candidates.push(Vector3::from_vals([0.0, 0.0, 1.0]));

    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..random_directions {
        let z: f64 = rng.random_range(-1.0..1.0);
        let phi: f64 = rng.random_range(0.0..std::f64::consts::TAU);
        let r = (1.0 - z * z).sqrt();
        candidates.push(Vector3::from_vals([r * phi.cos(), r * phi.sin(), z]));
    }

    let mut best: Option<(f64, BoundingBox)> = None;
    for w in candidates.iter().filter_map(|c| c.normalized()) {
        let Some((volume, bbox)) = box_around_axis(points, &w) else {
            continue;
        };
        if best.as_ref().is_none_or(|(v, _)| volume < *v) {
            best = Some((volume, bbox));
        }
    }
    best.map(|(_, bbox)| bbox)
}

fn box_around_axis(points: &[Point3<KsrF64>], w: &Vector3<KsrF64>) -> Option<(f64, BoundingBox)> {
    let helper = if w.coords[0].0.abs() < 0.9 {
        Vector3::from_vals([1.0, 0.0, 0.0])
    } else {
        Vector3::from_vals([0.0, 1.0, 0.0])
    };
    let u0 = helper.cross(w).normalized()?;
    let v0 = w.cross(&u0);

    let projected: Vec<Point2<KsrF64>> = points
        .iter()
        .map(|p| {
            let v = p.to_vector();
            Point2::new([v.dot(&u0), v.dot(&v0)])
        })
        .collect();
    let hull = convex_hull_2(&projected);

    let mut directions: Vec<(f64, f64)> = Vec::new();
    for i in 0..hull.len() {
        let a = &hull[i];
        let b = &hull[(i + 1) % hull.len()];
        let (dx, dy) = (b[0].0 - a[0].0, b[1].0 - a[1].0);
        let len = (dx * dx + dy * dy).sqrt();
        if len > 0.0 {
            directions.push((dx / len, dy / len));
        }
    }
    if directions.is_empty() {
        directions.push((1.0, 0.0));
    }

    let extent = |values: &mut dyn Iterator<Item = f64>| {
        values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
            (lo.min(x), hi.max(x))
        })
    };

    let mut best: Option<(f64, (f64, f64), [(f64, f64); 2])> = None;
    for (ex, ey) in directions {
        let e1 = extent(&mut hull.iter().map(|p| p[0].0 * ex + p[1].0 * ey));
        let e2 = extent(&mut hull.iter().map(|p| -p[0].0 * ey + p[1].0 * ex));
        let area = (e1.1 - e1.0) * (e2.1 - e2.0);
        if best.as_ref().is_none_or(|(a, _, _)| area < *a) {
            best = Some((area, (ex, ey), [e1, e2]));
        }
    }
    let (area, (ex, ey), [e1, e2]) = best?;

    let a1 = &u0.scale(&KsrF64(ex)) + &v0.scale(&KsrF64(ey));
    let a2 = w.cross(&a1);
    let e3 = extent(&mut points.iter().map(|p| p.to_vector().dot(w).0));
    let volume = area * (e3.1 - e3.0);

    let axes = [a1, a2, w.clone()];
    let ranges = [e1, e2, e3];
    let bbox = CORNER_SIGNS.map(|signs| {
        let mut p = Point3::<KsrF64>::origin();
        for i in 0..3 {
            let t = if signs[i] { ranges[i].1 } else { ranges[i].0 };
            p = p.add_vector(&axes[i].scale(&KsrF64(t)));
        }
        p
    });
    Some((volume, bbox))
}

/// Scales the box about its centroid. A ratio of exactly one is bumped so
/// the box never touches the input.
pub fn enlarge_bounding_box(enlarge_bbox_ratio: f64, bbox: &mut BoundingBox) {
    let mut ratio = enlarge_bbox_ratio;
    if ratio == 1.0 {
        ratio += 2.0 * KSR_TOLERANCE;
    }
    let Some(c) = centroid(bbox.as_slice()) else {
        return;
    };
    let ratio = KsrF64(ratio);
    for p in bbox.iter_mut() {
        *p = c.add_vector(&c.vector_to(p).scale(&ratio));
    }
}

/// The six face polygons of the box.
pub fn bounding_box_to_polygons(bbox: &BoundingBox) -> Vec<Vec<Point3<KsrF64>>> {
    BBOX_FACES
        .iter()
        .map(|face| face.iter().map(|&i| bbox[i].clone()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_at_z(z: f64) -> Vec<Point3<KsrF64>> {
        vec![
            Point3::from_vals([0.0, 0.0, z]),
            Point3::from_vals([1.0, 0.0, z]),
            Point3::from_vals([1.0, 1.0, z]),
            Point3::from_vals([0.0, 1.0, z]),
        ]
    }

    #[test]
    fn corner_order() {
        let pts = vec![
            Point3::from_vals([0.0, 0.0, 0.0]),
            Point3::from_vals([1.0, 2.0, 3.0]),
        ];
        let bbox = axis_aligned_box(&pts, &Parameters::default());
        assert_eq!(bbox[0], Point3::from_vals([0.0, 0.0, 0.0]));
        assert_eq!(bbox[2], Point3::from_vals([1.0, 2.0, 0.0]));
        assert_eq!(bbox[4], Point3::from_vals([0.0, 2.0, 3.0]));
        assert_eq!(bbox[6], Point3::from_vals([1.0, 0.0, 3.0]));
        assert_eq!(edge_lengths(&bbox), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn flat_box_is_thickened() {
        let bbox = axis_aligned_box(&square_at_z(0.5), &Parameters::default());
        let lengths = edge_lengths(&bbox);
        assert!(lengths.iter().all(|&l| l >= KSR_TOLERANCE));
        assert!((lengths[2] - 80.0 * KSR_TOLERANCE).abs() < 1e-12);
        assert!((bbox[0][0].0 + 40.0 * KSR_TOLERANCE).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "degenerate input")]
    fn doubly_flat_box_panics() {
        let pts = vec![
            Point3::from_vals([0.0, 0.0, 0.0]),
            Point3::from_vals([1.0, 0.0, 0.0]),
        ];
        axis_aligned_box(&pts, &Parameters::default());
    }

    #[test]
    fn enlargement_keeps_centroid() {
        let pts = vec![
            Point3::from_vals([0.0, 0.0, 0.0]),
            Point3::from_vals([2.0, 2.0, 2.0]),
        ];
        let mut bbox = axis_aligned_box(&pts, &Parameters::default());
        enlarge_bounding_box(1.5, &mut bbox);
        assert_eq!(bbox[0], Point3::from_vals([-0.5, -0.5, -0.5]));
        assert_eq!(bbox[7], Point3::from_vals([2.5, 2.5, 2.5]));
    }

    #[test]
    fn optimal_box_fits_rotated_slab() {
        // A 4 x 1 x 0.5 slab rotated by 45 degrees about z.
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let mut pts = Vec::new();
        for &(x, y) in &[(0.0, 0.0), (4.0, 0.0), (4.0, 1.0), (0.0, 1.0)] {
            for &z in &[0.0, 0.5] {
                pts.push(Point3::from_vals([s * (x - y), s * (x + y), z]));
            }
        }
        let obb = optimal_box(&pts, &[], 8, 7).unwrap();
        let mut lengths = edge_lengths(&obb);
        lengths.sort_by(f64::total_cmp);
        assert!((lengths[0] - 0.5).abs() < 1e-9);
        assert!((lengths[1] - 1.0).abs() < 1e-9);
        assert!((lengths[2] - 4.0).abs() < 1e-9);
    }

    #[test]
    fn flat_input_falls_back_from_optimal_box() {
        let params = Parameters::default().with_reorient(true);
        let (bbox, _) = create_bounding_box(&[square_at_z(0.25)], &[], &params);
        assert!(!is_flat(&bbox));
    }
}
