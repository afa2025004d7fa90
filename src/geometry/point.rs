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

use std::{
    array::from_fn,
    fmt,
    ops::{Index, IndexMut, Sub},
};

use crate::{geometry::vector::Vector, numeric::scalar::Scalar};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point<T: Scalar, const N: usize> {
    pub coords: [T; N],
}

impl<T: Scalar, const N: usize> Point<T, N> {
    pub fn new(coords: [T; N]) -> Self {
        Point { coords }
    }

    pub fn from_vals<V>(vals: [V; N]) -> Self
    where
        V: Into<T>,
    {
        Point {
            coords: vals.map(|v| v.into()),
        }
    }

    pub fn origin() -> Self {
        Point {
            coords: from_fn(|_| T::zero()),
        }
    }

    pub fn coords(&self) -> &[T; N] {
        &self.coords
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.coords.iter()
    }

    /// Position vector of the point.
    pub fn to_vector(&self) -> Vector<T, N> {
        Vector::new(self.coords.clone())
    }

    /// Vector from `self` to `other`.
    pub fn vector_to(&self, other: &Self) -> Vector<T, N> {
        Vector::new(from_fn(|i| other.coords[i].clone() - &self.coords[i]))
    }

    pub fn add_vector(&self, v: &Vector<T, N>) -> Self {
        Point {
            coords: from_fn(|i| self.coords[i].clone() + &v.coords[i]),
        }
    }

    pub fn squared_distance(&self, other: &Self) -> T {
        self.vector_to(other).squared_length()
    }

    pub fn midpoint(&self, other: &Self) -> Self {
        let two: T = T::from(2i32);
        Point {
            coords: from_fn(|i| (self.coords[i].clone() + &other.coords[i]) / &two),
        }
    }

    /// Lexicographic comparison, used to sort point sets deterministically.
    pub fn lex_cmp(&self, other: &Self) -> std::cmp::Ordering {
        for i in 0..N {
            match T::cmp_ref(&self.coords[i], &other.coords[i]) {
                std::cmp::Ordering::Equal => continue,
                ord => return ord,
            }
        }
        std::cmp::Ordering::Equal
    }

    pub fn to_f64_array(&self) -> [f64; N] {
        from_fn(|i| self.coords[i].to_f64_lossy())
    }
}

impl<T: Scalar> Point<T, 2> {
    pub fn x(&self) -> &T {
        &self.coords[0]
    }

    pub fn y(&self) -> &T {
        &self.coords[1]
    }
}

impl<T: Scalar> Point<T, 3> {
    pub fn x(&self) -> &T {
        &self.coords[0]
    }

    pub fn y(&self) -> &T {
        &self.coords[1]
    }

    pub fn z(&self) -> &T {
        &self.coords[2]
    }
}

impl<T: Scalar, const N: usize> Index<usize> for Point<T, N> {
    type Output = T;
    fn index(&self, i: usize) -> &Self::Output {
        &self.coords[i]
    }
}

impl<T: Scalar, const N: usize> IndexMut<usize> for Point<T, N> {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.coords[i]
    }
}

/// `p - q` is the vector from `q` to `p`.
impl<'a, 'b, T: Scalar, const N: usize> Sub<&'b Point<T, N>> for &'a Point<T, N> {
    type Output = Vector<T, N>;
    fn sub(self, rhs: &'b Point<T, N>) -> Vector<T, N> {
        rhs.vector_to(self)
    }
}

impl<T: Scalar, const N: usize> From<[T; N]> for Point<T, N> {
    fn from(coords: [T; N]) -> Self {
        Point { coords }
    }
}

impl<T: Scalar, const N: usize> fmt::Display for Point<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", c.to_f64_lossy())?;
        }
        Ok(())
    }
}

pub type Point2<T> = Point<T, 2>;
pub type Point3<T> = Point<T, 3>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{KsrF64, KsrRational};

    #[test]
    fn vector_between_points() {
        let a = Point3::<KsrF64>::from_vals([1.0, 2.0, 3.0]);
        let b = Point3::<KsrF64>::from_vals([2.0, 4.0, 6.0]);
        let v = &b - &a;
        assert_eq!(v.coords, [KsrF64(1.0), KsrF64(2.0), KsrF64(3.0)]);
        assert_eq!(a.add_vector(&v), b);
    }

    #[test]
    fn exact_midpoint() {
        let a = Point2::<KsrRational>::from_vals([0i32, 1]);
        let b = Point2::<KsrRational>::from_vals([1i32, 2]);
        let m = a.midpoint(&b);
        assert_eq!(m.x(), &KsrRational::from_num_den(1, 2));
        assert_eq!(m.y(), &KsrRational::from_num_den(3, 2));
    }
}
