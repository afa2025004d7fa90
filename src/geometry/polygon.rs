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
        intersection::{SegmentIntersection, segment_segment_intersection},
        line::Line2,
        point::Point2,
        segment::Segment2,
    },
    kernel::orientation::{Orientation, orient2d},
    numeric::scalar::Scalar,
};

/// Closed planar polygon given by its vertex cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon2<T: Scalar> {
    vertices: Vec<Point2<T>>,
}

impl<T: Scalar> Polygon2<T> {
    pub fn new(vertices: Vec<Point2<T>>) -> Self {
        Polygon2 { vertices }
    }

    pub fn vertices(&self) -> &[Point2<T>] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn edge(&self, i: usize) -> Segment2<T> {
        let n = self.vertices.len();
        Segment2::new(&self.vertices[i], &self.vertices[(i + 1) % n])
    }

    pub fn edges(&self) -> impl Iterator<Item = Segment2<T>> + '_ {
        (0..self.vertices.len()).map(move |i| self.edge(i))
    }

    /// Twice the signed area, positive for counterclockwise polygons.
    pub fn signed_area_2(&self) -> T {
        let n = self.vertices.len();
        let mut sum = T::zero();
        for i in 0..n {
            let p = &self.vertices[i];
            let q = &self.vertices[(i + 1) % n];
            sum += &(p[0].clone() * &q[1] - p[1].clone() * &q[0]);
        }
        sum
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::from_sign(self.signed_area_2().sign())
    }

    pub fn is_counterclockwise(&self) -> bool {
        self.orientation() == Orientation::CounterClockwise
    }

    pub fn reverse_orientation(&mut self) {
        self.vertices.reverse();
    }

    /// Convexity with a single winding. Collinear consecutive vertices are
    /// accepted, reflex ones are not.
    pub fn is_convex(&self) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        let total = self.signed_area_2().sign();
        if total == 0 {
            return false;
        }
        for i in 0..n {
            let turn = orient2d(
                &self.vertices[i],
                &self.vertices[(i + 1) % n],
                &self.vertices[(i + 2) % n],
            )
            .sign();
            if turn * total < 0 {
                return false;
            }
        }

        // A star-shaped cycle turns consistently but winds more than once:
        // its x-direction changes sign more than twice.
        let mut changes = 0;
        let mut last = 0i8;
        for i in 0..n {
            let dx = (self.vertices[(i + 1) % n][0].clone() - &self.vertices[i][0]).sign();
            if dx != 0 {
                if last != 0 && dx != last {
                    changes += 1;
                }
                last = dx;
            }
        }
        let mut first = 0i8;
        for i in 0..n {
            let dx = (self.vertices[(i + 1) % n][0].clone() - &self.vertices[i][0]).sign();
            if dx != 0 {
                first = dx;
                break;
            }
        }
        if first != 0 && first != last {
            changes += 1;
        }
        changes <= 2
    }

    /// No two non-adjacent edges meet, adjacent edges share only their
    /// common vertex.
    pub fn is_simple(&self) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if self.vertices[i].lex_cmp(&self.vertices[j]).is_eq() {
                    return false;
                }
            }
        }
        for i in 0..n {
            let ei = self.edge(i);
            for j in (i + 1)..n {
                let ej = self.edge(j);
                let adjacent = j == i + 1 || (i == 0 && j == n - 1);
                match segment_segment_intersection(&ei, &ej) {
                    SegmentIntersection::None => {}
                    SegmentIntersection::Point(_) if adjacent => {}
                    _ => return false,
                }
            }
        }
        true
    }

    /// Clips this convex polygon by the convex polygon `clip`. Both must be
    /// counterclockwise. The result may be degenerate.
    pub fn clip_convex(&self, clip: &Polygon2<T>) -> Polygon2<T> {
        let mut output = self.vertices.clone();
        for edge in clip.edges() {
            if output.is_empty() {
                break;
            }
            let line = Line2::through(&edge.a, &edge.b);
            let input = std::mem::take(&mut output);
            let m = input.len();
            for k in 0..m {
                let cur = &input[k];
                let next = &input[(k + 1) % m];
                let sc = line.value(cur).sign();
                let sn = line.value(next).sign();
                if sc >= 0 {
                    output.push(cur.clone());
                }
                if sc * sn < 0 {
                    if let Some(p) = line.intersect_segment(&Segment2::new(cur, next)) {
                        output.push(p);
                    }
                }
            }
        }
        Polygon2::new(output)
    }

    /// True when the interiors of two convex polygons intersect.
    pub fn has_interior_overlap(&self, other: &Polygon2<T>) -> bool {
        let ccw = |p: &Polygon2<T>| {
            let mut p = p.clone();
            if p.signed_area_2().is_negative() {
                p.reverse_orientation();
            }
            p
        };
        let a = ccw(self);
        let b = ccw(other);
        if a.len() < 3 || b.len() < 3 {
            return false;
        }
        a.clip_convex(&b).signed_area_2().is_positive()
    }
}

impl<T: Scalar> FromIterator<Point2<T>> for Polygon2<T> {
    fn from_iter<I: IntoIterator<Item = Point2<T>>>(iter: I) -> Self {
        Polygon2::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::KsrRational;

    fn poly(pts: &[[i32; 2]]) -> Polygon2<KsrRational> {
        pts.iter().map(|&c| Point2::from_vals(c)).collect()
    }

    #[test]
    fn orientation_and_area() {
        let mut sq = poly(&[[0, 0], [2, 0], [2, 2], [0, 2]]);
        assert_eq!(sq.signed_area_2(), KsrRational::from(8));
        assert!(sq.is_counterclockwise());
        sq.reverse_orientation();
        assert_eq!(sq.orientation(), Orientation::Clockwise);
    }

    #[test]
    fn convexity() {
        assert!(poly(&[[0, 0], [2, 0], [2, 2], [0, 2]]).is_convex());
        assert!(poly(&[[0, 0], [1, 0], [2, 0], [2, 2], [0, 2]]).is_convex());
        assert!(!poly(&[[0, 0], [2, 0], [1, 1], [2, 2], [0, 2]]).is_convex());
        // pentagram
        assert!(!poly(&[[0, 3], [2, -3], [-3, 1], [3, 1], [-2, -3]]).is_convex());
    }

    #[test]
    fn simplicity() {
        assert!(poly(&[[0, 0], [2, 0], [2, 2], [0, 2]]).is_simple());
        assert!(!poly(&[[0, 0], [2, 2], [2, 0], [0, 2]]).is_simple());
    }

    #[test]
    fn interior_overlap() {
        let a = poly(&[[0, 0], [2, 0], [2, 2], [0, 2]]);
        let b = poly(&[[1, 1], [3, 1], [3, 3], [1, 3]]);
        let touching = poly(&[[2, 0], [4, 0], [4, 2], [2, 2]]);
        let far = poly(&[[5, 5], [6, 5], [6, 6]]);
        assert!(a.has_interior_overlap(&b));
        assert!(!a.has_interior_overlap(&touching));
        assert!(!a.has_interior_overlap(&far));
    }
}
