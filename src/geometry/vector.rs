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
    ops::{Add, Index, Neg, Sub},
};

use crate::{
    numeric::{ksr_f64::KsrF64, scalar::Scalar},
    operations::Sqrt,
};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Vector<T: Scalar, const N: usize> {
    pub coords: [T; N],
}

impl<T: Scalar, const N: usize> Vector<T, N> {
    pub fn new(coords: [T; N]) -> Self {
        Vector { coords }
    }

    pub fn from_vals<V>(vals: [V; N]) -> Self
    where
        V: Into<T>,
    {
        Vector {
            coords: vals.map(|v| v.into()),
        }
    }

    pub fn zero() -> Self {
        Vector {
            coords: from_fn(|_| T::zero()),
        }
    }

    pub fn dot(&self, other: &Self) -> T {
        let mut sum = T::zero();
        for i in 0..N {
            sum += &(self.coords[i].clone() * &other.coords[i]);
        }
        sum
    }

    pub fn squared_length(&self) -> T {
        self.dot(self)
    }

    pub fn scale(&self, s: &T) -> Self {
        Vector {
            coords: from_fn(|i| self.coords[i].clone() * s),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.coords.iter().all(|c| c.is_zero())
    }
}

impl<T: Scalar> Vector<T, 2> {
    pub fn x(&self) -> &T {
        &self.coords[0]
    }

    pub fn y(&self) -> &T {
        &self.coords[1]
    }

    /// z-component of the 3D cross product of two planar vectors.
    pub fn perp_dot(&self, other: &Self) -> T {
        self.coords[0].clone() * &other.coords[1] - self.coords[1].clone() * &other.coords[0]
    }

    /// Rotation by +90 degrees.
    pub fn perpendicular(&self) -> Self {
        Vector {
            coords: [-self.coords[1].clone(), self.coords[0].clone()],
        }
    }
}

impl<T: Scalar> Vector<T, 3> {
    pub fn cross(&self, other: &Self) -> Self {
        let [ax, ay, az] = &self.coords;
        let [bx, by, bz] = &other.coords;
        Vector {
            coords: [
                ay.clone() * bz - az.clone() * by,
                az.clone() * bx - ax.clone() * bz,
                ax.clone() * by - ay.clone() * bx,
            ],
        }
    }
}

impl<const N: usize> Vector<KsrF64, N> {
    pub fn length(&self) -> KsrF64 {
        self.squared_length().sqrt()
    }

    /// Unit vector, or `None` when the length vanishes.
    pub fn normalized(&self) -> Option<Self> {
        let len = self.length();
        if len.0 <= f64::MIN_POSITIVE {
            return None;
        }
        Some(Vector {
            coords: from_fn(|i| self.coords[i] / len),
        })
    }
}

impl<T: Scalar, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;
    fn index(&self, i: usize) -> &T {
        &self.coords[i]
    }
}

impl<'a, 'b, T: Scalar, const N: usize> Add<&'b Vector<T, N>> for &'a Vector<T, N> {
    type Output = Vector<T, N>;
    fn add(self, rhs: &'b Vector<T, N>) -> Vector<T, N> {
        Vector {
            coords: from_fn(|i| self.coords[i].clone() + &rhs.coords[i]),
        }
    }
}

impl<'a, 'b, T: Scalar, const N: usize> Sub<&'b Vector<T, N>> for &'a Vector<T, N> {
    type Output = Vector<T, N>;
    fn sub(self, rhs: &'b Vector<T, N>) -> Vector<T, N> {
        Vector {
            coords: from_fn(|i| self.coords[i].clone() - &rhs.coords[i]),
        }
    }
}

impl<'a, T: Scalar, const N: usize> Neg for &'a Vector<T, N> {
    type Output = Vector<T, N>;
    fn neg(self) -> Vector<T, N> {
        Vector {
            coords: from_fn(|i| -self.coords[i].clone()),
        }
    }
}

pub type Vector2<T> = Vector<T, 2>;
pub type Vector3<T> = Vector<T, 3>;
