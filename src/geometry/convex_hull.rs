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

use crate::{geometry::point::Point2, kernel::orientation::orient2d, numeric::scalar::Scalar};

/// Indices of the convex hull vertices of `points`, counterclockwise,
/// starting from the lexicographically smallest point. Collinear boundary
/// points and duplicates are dropped.
pub fn convex_hull_2_indices<T: Scalar>(points: &[Point2<T>]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..points.len()).collect();
    idx.sort_by(|&a, &b| points[a].lex_cmp(&points[b]));
    idx.dedup_by(|a, b| points[*a].lex_cmp(&points[*b]).is_eq());
    if idx.len() < 3 {
        return idx;
    }

    let turns_left = |chain: &[usize], p: usize| {
        let n = chain.len();
        orient2d(&points[chain[n - 2]], &points[chain[n - 1]], &points[p]).is_positive()
    };

    let mut lower: Vec<usize> = Vec::with_capacity(idx.len());
    for &i in &idx {
        while lower.len() >= 2 && !turns_left(&lower, i) {
            lower.pop();
        }
        lower.push(i);
    }
    let mut upper: Vec<usize> = Vec::with_capacity(idx.len());
    for &i in idx.iter().rev() {
        while upper.len() >= 2 && !turns_left(&upper, i) {
            upper.pop();
        }
        upper.push(i);
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

pub fn convex_hull_2<T: Scalar>(points: &[Point2<T>]) -> Vec<Point2<T>> {
    convex_hull_2_indices(points)
        .into_iter()
        .map(|i| points[i].clone())
        .collect()
}
