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
    geometry::{point::Point2, segment::Segment2, util::dominant_axis},
    kernel::orientation::orient2d,
    numeric::scalar::Scalar,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SegmentIntersection<T: Scalar> {
    None,
    Point(Point2<T>),
    Overlapping(Segment2<T>),
}

/// Closed segment-segment intersection. Exact when `T` is exact.
pub fn segment_segment_intersection<T: Scalar>(
    s1: &Segment2<T>,
    s2: &Segment2<T>,
) -> SegmentIntersection<T> {
    let (a, b) = (&s1.a, &s1.b);
    let (c, d) = (&s2.a, &s2.b);

    let o1 = orient2d(a, b, c).sign();
    let o2 = orient2d(a, b, d).sign();
    let o3 = orient2d(c, d, a).sign();
    let o4 = orient2d(c, d, b).sign();

    if o1 == 0 && o2 == 0 {
        return collinear_overlap(s1, s2);
    }
    if o1 * o2 > 0 || o3 * o4 > 0 {
        return SegmentIntersection::None;
    }

    if o1 == 0 {
        return SegmentIntersection::Point(c.clone());
    }
    if o2 == 0 {
        return SegmentIntersection::Point(d.clone());
    }
    if o3 == 0 {
        return SegmentIntersection::Point(a.clone());
    }
    if o4 == 0 {
        return SegmentIntersection::Point(b.clone());
    }

    let fa = orient2d(c, d, a);
    let fb = orient2d(c, d, b);
    let t = fa.clone() / &(fa - fb);
    SegmentIntersection::Point(a.add_vector(&a.vector_to(b).scale(&t)))
}

fn collinear_overlap<T: Scalar>(s1: &Segment2<T>, s2: &Segment2<T>) -> SegmentIntersection<T> {
    let dir = if s1.is_degenerate() {
        s2.to_vector()
    } else {
        s1.to_vector()
    };
    let axis = dominant_axis(&dir.coords);

    let order = |p: &Point2<T>, q: &Point2<T>| {
        if p[axis] <= q[axis] {
            (p.clone(), q.clone())
        } else {
            (q.clone(), p.clone())
        }
    };
    let (lo1, hi1) = order(&s1.a, &s1.b);
    let (lo2, hi2) = order(&s2.a, &s2.b);

    let lo = if lo1[axis] >= lo2[axis] { lo1 } else { lo2 };
    let hi = if hi1[axis] <= hi2[axis] { hi1 } else { hi2 };

    match T::cmp_ref(&lo[axis], &hi[axis]) {
        std::cmp::Ordering::Greater => SegmentIntersection::None,
        std::cmp::Ordering::Equal => SegmentIntersection::Point(lo),
        std::cmp::Ordering::Less => SegmentIntersection::Overlapping(Segment2::new(&lo, &hi)),
    }
}
