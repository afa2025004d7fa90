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
        point::{Point, Point2},
        segment::Segment2,
    },
    kernel::orientation::orient2d,
    numeric::scalar::Scalar,
};

/// True when `|p1 p2| <= tol`.
pub fn are_near<T: Scalar, const N: usize>(p1: &Point<T, N>, p2: &Point<T, N>, tol: &T) -> bool {
    p1.squared_distance(p2) <= tol.clone() * tol
}

pub fn are_collinear<T: Scalar>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>) -> bool {
    orient2d(a, b, c).is_zero()
}

/// Closed segment membership.
pub fn is_point_on_segment<T: Scalar>(p: &Point2<T>, seg: &Segment2<T>) -> bool {
    if !are_collinear(&seg.a, &seg.b, p) {
        return false;
    }
    let pa = p.vector_to(&seg.a);
    let pb = p.vector_to(&seg.b);
    pa.dot(&pb).is_negative_or_zero()
}

/// Open segment membership: on the segment and distinct from both endpoints.
pub fn is_point_strictly_inside_segment<T: Scalar>(p: &Point2<T>, seg: &Segment2<T>) -> bool {
    if !are_collinear(&seg.a, &seg.b, p) {
        return false;
    }
    let pa = p.vector_to(&seg.a);
    let pb = p.vector_to(&seg.b);
    pa.dot(&pb).is_negative()
}
