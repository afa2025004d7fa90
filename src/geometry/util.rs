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

use std::array::from_fn;

use crate::{geometry::point::Point, numeric::scalar::Scalar};

/// Tolerance of the inexact field type's sign queries.
pub const EPS: f64 = 1e-10;

/// Average of a non-empty point set.
pub fn centroid<T: Scalar, const N: usize>(points: &[Point<T, N>]) -> Option<Point<T, N>> {
    if points.is_empty() {
        return None;
    }
    let n = T::from(points.len() as i32);
    let mut sum: [T; N] = from_fn(|_| T::zero());
    for p in points {
        for (s, c) in sum.iter_mut().zip(p.coords.iter()) {
            *s += c;
        }
    }
    Some(Point::new(sum.map(|s| s / &n)))
}

/// Index of the largest absolute component.
pub fn dominant_axis<T: Scalar, const N: usize>(coords: &[T; N]) -> usize {
    let mut best = 0;
    for i in 1..N {
        if coords[i].abs() > coords[best].abs() {
            best = i;
        }
    }
    best
}
