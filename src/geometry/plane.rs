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

use crate::{
    geometry::{
        point::{Point2, Point3},
        util::{centroid, dominant_axis},
        vector::Vector3,
    },
    kernel::converter::{ToExact, ToInexact},
    numeric::{ksr_f64::KsrF64, ksr_rational::KsrRational, scalar::Scalar},
    operations::Zero,
};

/// An oriented plane in 3D.
///
/// Two 2D parameterizations are carried:
/// - an orthonormal frame (`origin`, `base1`, `base2`) in double precision,
///   used for metric quantities;
/// - an exact projection dropping the dominant axis of the exact normal,
///   used for every combinatorial predicate. The exact projection is a
///   bijection between the exact plane and R², so lifting a 2D point back
///   lands exactly on the plane and incidences survive the round trip.
///
/// Both parameterizations preserve the orientation induced by the normal.
#[derive(Clone, Debug)]
pub struct Plane3 {
    normal: Vector3<KsrF64>,
    origin: Point3<KsrF64>,
    base1: Vector3<KsrF64>,
    base2: Vector3<KsrF64>,
    exact_normal: Vector3<KsrRational>,
    exact_d: KsrRational,
    drop_axis: usize,
    swap_uv: bool,
}

impl Plane3 {
    /// Plane through the centroid of `points` with Newell's normal.
    /// Returns `None` for fewer than three points or a vanishing normal.
    pub fn from_polygon(points: &[Point3<KsrF64>]) -> Option<Self> {
        if points.len() < 3 {
            return None;
        }
        let exact: Vec<Point3<KsrRational>> = points.to_exact();
        let n = newell_normal(&exact);
        if n.is_zero() {
            return None;
        }
        let c = centroid(&exact)?;
        Self::from_exact(&c, n)
    }

    /// Plane through `origin` with the given normal direction.
    pub fn from_point_normal(origin: &Point3<KsrF64>, normal: &Vector3<KsrF64>) -> Option<Self> {
        if normal.is_zero() {
            return None;
        }
        Self::from_exact(&origin.to_exact(), normal.to_exact())
    }

    fn from_exact(origin: &Point3<KsrRational>, exact_normal: Vector3<KsrRational>) -> Option<Self> {
        let normal = exact_normal.to_inexact().normalized()?;
        let exact_d = -exact_normal.dot(&origin.to_vector());
        let drop_axis = dominant_axis(&exact_normal.coords);
        let swap_uv = exact_normal[drop_axis].is_negative();

        let helper = match dominant_axis(&normal.coords) {
            0 => Vector3::from_vals([0.0, 1.0, 0.0]),
            _ => Vector3::from_vals([1.0, 0.0, 0.0]),
        };
        let base1 = helper.cross(&normal).normalized()?;
        let base2 = normal.cross(&base1).normalized()?;

        Some(Plane3 {
            normal,
            origin: origin.to_inexact(),
            base1,
            base2,
            exact_normal,
            exact_d,
            drop_axis,
            swap_uv,
        })
    }

    pub fn normal(&self) -> &Vector3<KsrF64> {
        &self.normal
    }

    pub fn origin(&self) -> &Point3<KsrF64> {
        &self.origin
    }

    pub fn base1(&self) -> &Vector3<KsrF64> {
        &self.base1
    }

    pub fn base2(&self) -> &Vector3<KsrF64> {
        &self.base2
    }

    pub fn exact_normal(&self) -> &Vector3<KsrRational> {
        &self.exact_normal
    }

    /// Signed distance of `p` along the unit normal.
    pub fn signed_distance(&self, p: &Point3<KsrF64>) -> KsrF64 {
        self.origin.vector_to(p).dot(&self.normal)
    }

    /// Value of the exact plane equation at `p`; its sign is the exact side.
    pub fn exact_value(&self, p: &Point3<KsrRational>) -> KsrRational {
        self.exact_normal.dot(&p.to_vector()) + &self.exact_d
    }

    pub fn exact_side(&self, p: &Point3<KsrRational>) -> i8 {
        self.exact_value(p).sign()
    }

    /// Exact intersection of the segment `[a, b]` with the plane.
    /// The endpoints must lie on strictly opposite sides.
    pub fn exact_segment_intersection(
        &self,
        a: &Point3<KsrRational>,
        b: &Point3<KsrRational>,
    ) -> Point3<KsrRational> {
        let fa = self.exact_value(a);
        let fb = self.exact_value(b);
        debug_assert!(fa.sign() * fb.sign() < 0);
        let t = fa.clone() / &(fa - fb);
        a.add_vector(&a.vector_to(b).scale(&t))
    }

    pub fn to_2d(&self, p: &Point3<KsrF64>) -> Point2<KsrF64> {
        let v = self.origin.vector_to(p);
        Point2::new([v.dot(&self.base1), v.dot(&self.base2)])
    }

    pub fn to_3d(&self, p: &Point2<KsrF64>) -> Point3<KsrF64> {
        self.origin
            .add_vector(&self.base1.scale(&p[0]))
            .add_vector(&self.base2.scale(&p[1]))
    }

    /// Vector in the frame of the plane.
    pub fn vector_to_2d(&self, v: &Vector3<KsrF64>) -> crate::geometry::vector::Vector2<KsrF64> {
        crate::geometry::vector::Vector2::new([v.dot(&self.base1), v.dot(&self.base2)])
    }

    fn uv(&self) -> (usize, usize) {
        let u = (self.drop_axis + 1) % 3;
        let v = (self.drop_axis + 2) % 3;
        if self.swap_uv { (v, u) } else { (u, v) }
    }

    pub fn to_2d_exact(&self, p: &Point3<KsrRational>) -> Point2<KsrRational> {
        let (u, v) = self.uv();
        Point2::new([p[u].clone(), p[v].clone()])
    }

    pub fn to_3d_exact(&self, p: &Point2<KsrRational>) -> Point3<KsrRational> {
        let (u, v) = self.uv();
        let n = &self.exact_normal;
        let w = -(self.exact_d.clone() + &(n[u].clone() * &p[0]) + &(n[v].clone() * &p[1]))
            / &n[self.drop_axis];
        let mut out = Point3::<KsrRational>::origin();
        out[u] = p[0].clone();
        out[v] = p[1].clone();
        out[self.drop_axis] = w;
        out
    }

    /// Approximate equality of supporting planes, ignoring orientation.
    pub fn is_same_plane(&self, other: &Plane3, tol: f64) -> bool {
        let cos = self.normal.dot(&other.normal).0.abs();
        if cos < 1.0 - tol {
            return false;
        }
        self.signed_distance(&other.origin).0.abs() <= tol
            && other.signed_distance(&self.origin).0.abs() <= tol
    }
}

/// Newell's normal; its length is twice the polygon area.
pub fn newell_normal<T: Scalar>(points: &[Point3<T>]) -> Vector3<T> {
    let mut n = Vector3::<T>::zero();
    for i in 0..points.len() {
        let p = &points[i];
        let q = &points[(i + 1) % points.len()];
        n.coords[0] += &((p[1].clone() - &q[1]) * &(p[2].clone() + &q[2]));
        n.coords[1] += &((p[2].clone() - &q[2]) * &(p[0].clone() + &q[0]));
        n.coords[2] += &((p[0].clone() - &q[0]) * &(p[1].clone() + &q[1]));
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(z: f64) -> Vec<Point3<KsrF64>> {
        vec![
            Point3::from_vals([0.0, 0.0, z]),
            Point3::from_vals([1.0, 0.0, z]),
            Point3::from_vals([1.0, 1.0, z]),
            Point3::from_vals([0.0, 1.0, z]),
        ]
    }

    #[test]
    fn newell_normal_of_ccw_square_points_up() {
        let plane = Plane3::from_polygon(&square(2.0)).unwrap();
        assert_eq!(plane.normal(), &Vector3::from_vals([0.0, 0.0, 1.0]));
        assert_eq!(plane.signed_distance(&Point3::from_vals([5.0, 5.0, 3.0])), KsrF64(1.0));
    }

    #[test]
    fn frame_round_trip() {
        let plane = Plane3::from_polygon(&square(2.0)).unwrap();
        let p = Point3::from_vals([0.25, 0.75, 2.0]);
        let q = plane.to_3d(&plane.to_2d(&p));
        for i in 0..3 {
            assert!((p[i].0 - q[i].0).abs() < 1e-12);
        }
    }

    #[test]
    fn exact_lift_lies_on_plane() {
        let pts = vec![
            Point3::from_vals([0.0, 0.0, 0.3]),
            Point3::from_vals([1.0, 0.1, 0.5]),
            Point3::from_vals([0.2, 1.0, 0.9]),
        ];
        let plane = Plane3::from_polygon(&pts).unwrap();
        let q = Point2::<KsrRational>::from_vals([0.37, -1.25]);
        let lifted = plane.to_3d_exact(&q);
        assert_eq!(plane.exact_side(&lifted), 0);
        assert_eq!(plane.to_2d_exact(&lifted), q);
    }

    #[test]
    fn opposite_orientations_are_the_same_plane() {
        let mut pts = square(1.0);
        let a = Plane3::from_polygon(&pts).unwrap();
        pts.reverse();
        let b = Plane3::from_polygon(&pts).unwrap();
        assert!(a.is_same_plane(&b, 1e-5));
        assert!(!a.is_same_plane(&Plane3::from_polygon(&square(1.1)).unwrap(), 1e-5));
    }

    #[test]
    fn degenerate_polygon_has_no_plane() {
        let pts = vec![
            Point3::from_vals([0.0, 0.0, 0.0]),
            Point3::from_vals([1.0, 1.0, 1.0]),
            Point3::from_vals([2.0, 2.0, 2.0]),
        ];
        assert!(Plane3::from_polygon(&pts).is_none());
    }
}
