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
        point::Point2,
        segment::Segment2,
        vector::Vector2,
    },
    kernel::orientation::OrientedSide,
    numeric::scalar::Scalar,
};

/// Oriented 2D line through `point` along `direction`. The positive side
/// is on the left.
#[derive(Clone, Debug, PartialEq)]
pub struct Line2<T: Scalar> {
    pub point: Point2<T>,
    pub direction: Vector2<T>,
}

impl<T: Scalar> Line2<T> {
    pub fn new(point: Point2<T>, direction: Vector2<T>) -> Self {
        Line2 { point, direction }
    }

    pub fn through(p: &Point2<T>, q: &Point2<T>) -> Self {
        Line2 {
            point: p.clone(),
            direction: p.vector_to(q),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.direction.is_zero()
    }

    /// Scaled signed distance; positive on the left.
    pub fn value(&self, p: &Point2<T>) -> T {
        self.direction.perp_dot(&self.point.vector_to(p))
    }

    pub fn oriented_side(&self, p: &Point2<T>) -> OrientedSide {
        OrientedSide::from_sign(self.value(p).sign())
    }

    /// Parameter of the orthogonal projection of `p`, scaled by `|direction|²`.
    pub fn projection_parameter(&self, p: &Point2<T>) -> T {
        self.point.vector_to(p).dot(&self.direction)
    }

    pub fn point_at(&self, t: &T) -> Point2<T> {
        self.point.add_vector(&self.direction.scale(t))
    }

    /// Crossing point with a segment, `None` if the segment stays on one
    /// side or lies on the line.
    pub fn intersect_segment(&self, seg: &Segment2<T>) -> Option<Point2<T>> {
        let va = self.value(&seg.a);
        let vb = self.value(&seg.b);
        let (sa, sb) = (va.sign(), vb.sign());
        if sa == 0 && sb == 0 {
            return None;
        }
        if sa * sb > 0 {
            return None;
        }
        if sa == 0 {
            return Some(seg.a.clone());
        }
        if sb == 0 {
            return Some(seg.b.clone());
        }
        let t = va.clone() / &(va - vb);
        Some(seg.a.add_vector(&seg.to_vector().scale(&t)))
    }

    /// Crossing point with another line, `None` when parallel.
    pub fn intersect_line(&self, other: &Line2<T>) -> Option<Point2<T>> {
        let denom = self.direction.perp_dot(&other.direction);
        if denom.is_zero() {
            return None;
        }
        let t = self.point.vector_to(&other.point).perp_dot(&other.direction) / &denom;
        Some(self.point_at(&t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::KsrRational;

    #[test]
    fn crossing_lines() {
        let a = Line2::through(
            &Point2::<KsrRational>::from_vals([0i32, 0]),
            &Point2::from_vals([2i32, 2]),
        );
        let b = Line2::through(&Point2::from_vals([0i32, 2]), &Point2::from_vals([2i32, 0]));
        assert_eq!(a.intersect_line(&b), Some(Point2::from_vals([1i32, 1])));
        assert_eq!(a.oriented_side(&Point2::from_vals([0i32, 1])), OrientedSide::Positive);
    }

    #[test]
    fn segment_on_one_side_is_missed() {
        let l = Line2::through(
            &Point2::<KsrRational>::from_vals([0i32, 0]),
            &Point2::from_vals([1i32, 0]),
        );
        let s = Segment2::new(&Point2::from_vals([0i32, 1]), &Point2::from_vals([3i32, 2]));
        assert!(l.intersect_segment(&s).is_none());
        let s = Segment2::new(&Point2::from_vals([0i32, 1]), &Point2::from_vals([2i32, -3]));
        assert_eq!(
            l.intersect_segment(&s),
            Some(Point2::from_vals([KsrRational::from_num_den(1, 2), KsrRational::from(0)]))
        );
    }
}
