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

/// An axis-aligned bounding box in N dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct Aabb<T: Scalar, const N: usize> {
    pub min: Point<T, N>,
    pub max: Point<T, N>,
}

impl<T: Scalar, const N: usize> Aabb<T, N> {
    pub fn new(min: Point<T, N>, max: Point<T, N>) -> Self {
        Aabb { min, max }
    }

    pub fn min(&self) -> &Point<T, N> {
        &self.min
    }

    pub fn max(&self) -> &Point<T, N> {
        &self.max
    }

    /// Smallest box containing every point, `None` for an empty iterator.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point<T, N>>,
        T: 'a,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut aabb = Aabb::new(first.clone(), first.clone());
        for p in iter {
            aabb.add_point(p);
        }
        Some(aabb)
    }

    pub fn add_point(&mut self, p: &Point<T, N>) {
        for i in 0..N {
            if p[i] < self.min[i] {
                self.min[i] = p[i].clone();
            }
            if p[i] > self.max[i] {
                self.max[i] = p[i].clone();
            }
        }
    }

    pub fn union(&self, other: &Aabb<T, N>) -> Aabb<T, N> {
        let mut out = self.clone();
        out.add_point(&other.min);
        out.add_point(&other.max);
        out
    }

    /// Closed containment test.
    pub fn contains(&self, p: &Point<T, N>) -> bool {
        (0..N).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }

    pub fn extent(&self, i: usize) -> T {
        self.max[i].clone() - &self.min[i]
    }

    pub fn center(&self) -> Point<T, N> {
        let half = T::from_num_den(1, 2);
        Point::new(from_fn(|i| (self.min[i].clone() + &self.max[i]) * &half))
    }
}

pub type Aabb2<T> = Aabb<T, 2>;
pub type Aabb3<T> = Aabb<T, 3>;

impl<T: Scalar> Aabb2<T> {
    /// Corners in counterclockwise order starting at `min`.
    pub fn corners(&self) -> [Point<T, 2>; 4] {
        [
            self.min.clone(),
            Point::new([self.max[0].clone(), self.min[1].clone()]),
            self.max.clone(),
            Point::new([self.min[0].clone(), self.max[1].clone()]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::KsrF64;

    #[test]
    fn box_of_points() {
        let pts = [
            Point::<KsrF64, 3>::from_vals([0.0, 2.0, -1.0]),
            Point::<KsrF64, 3>::from_vals([1.0, -3.0, 4.0]),
        ];
        let aabb = Aabb::from_points(pts.iter()).unwrap();
        assert_eq!(aabb.min, Point::from_vals([0.0, -3.0, -1.0]));
        assert_eq!(aabb.max, Point::from_vals([1.0, 2.0, 4.0]));
        assert_eq!(aabb.extent(2), KsrF64(5.0));
        assert!(aabb.contains(&Point::from_vals([0.5, 0.0, 0.0])));
        assert!(!aabb.contains(&Point::from_vals([1.5, 0.0, 0.0])));
    }
}
