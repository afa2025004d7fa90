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

use num_traits::ToPrimitive;

use crate::{
    geometry::util::EPS,
    numeric::scalar::Scalar,
    operations::{Abs, One, Sqrt, Zero},
};

use std::{
    cmp::Ordering,
    fmt,
    hash::Hash,
    ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign},
};

/// Inexact field type: a plain double whose sign queries are tolerant to
/// round-off (`|x| < EPS` counts as zero).
#[derive(Clone, Copy, Debug, Default)]
pub struct KsrF64(pub f64);

impl Scalar for KsrF64 {
    fn from_num_den(num: i32, den: i32) -> Self {
        KsrF64(num as f64 / den as f64)
    }

    fn tolerance() -> Self {
        KsrF64(EPS)
    }

    #[inline(always)]
    fn cmp_ref(a: &Self, b: &Self) -> Ordering {
        // total_cmp handles -0.0 and NaN deterministically
        a.0.total_cmp(&b.0)
    }

    fn to_f64_lossy(&self) -> f64 {
        self.0
    }
}

macro_rules! impl_f64_binop {
    ($tr:ident, $method:ident, $op:tt) => {
        impl $tr for KsrF64 {
            type Output = KsrF64;
            #[inline]
            fn $method(self, rhs: KsrF64) -> KsrF64 {
                KsrF64(self.0 $op rhs.0)
            }
        }

        impl<'a> $tr<&'a KsrF64> for KsrF64 {
            type Output = KsrF64;
            #[inline]
            fn $method(self, rhs: &'a KsrF64) -> KsrF64 {
                KsrF64(self.0 $op rhs.0)
            }
        }

        impl<'a, 'b> $tr<&'b KsrF64> for &'a KsrF64 {
            type Output = KsrF64;
            #[inline]
            fn $method(self, rhs: &'b KsrF64) -> KsrF64 {
                KsrF64(self.0 $op rhs.0)
            }
        }
    };
}

impl_f64_binop!(Add, add, +);
impl_f64_binop!(Sub, sub, -);
impl_f64_binop!(Mul, mul, *);
impl_f64_binop!(Div, div, /);

impl<'c> AddAssign<&'c KsrF64> for KsrF64 {
    fn add_assign(&mut self, rhs: &'c KsrF64) {
        self.0 += rhs.0;
    }
}

impl<'d> SubAssign<&'d KsrF64> for KsrF64 {
    fn sub_assign(&mut self, rhs: &'d KsrF64) {
        self.0 -= rhs.0;
    }
}

impl Neg for KsrF64 {
    type Output = KsrF64;

    fn neg(self) -> KsrF64 {
        KsrF64(-self.0)
    }
}

impl<'a> Neg for &'a KsrF64 {
    type Output = KsrF64;

    fn neg(self) -> KsrF64 {
        KsrF64(-self.0)
    }
}

impl From<i32> for KsrF64 {
    fn from(value: i32) -> Self {
        KsrF64(value as f64)
    }
}

impl From<f64> for KsrF64 {
    fn from(value: f64) -> Self {
        KsrF64(value)
    }
}

impl From<KsrF64> for f64 {
    fn from(value: KsrF64) -> Self {
        value.0
    }
}

impl ToPrimitive for KsrF64 {
    fn to_i64(&self) -> Option<i64> {
        Some(self.0 as i64)
    }
    fn to_u64(&self) -> Option<u64> {
        Some(self.0 as u64)
    }
    fn to_f32(&self) -> Option<f32> {
        Some(self.0 as f32)
    }
    fn to_f64(&self) -> Option<f64> {
        Some(self.0)
    }
}

impl PartialEq for KsrF64 {
    fn eq(&self, other: &KsrF64) -> bool {
        self.0.to_bits() == other.0.to_bits() // Comparing with tolerance breaks the hashing contract
    }
}

impl Eq for KsrF64 {}

impl PartialOrd for KsrF64 {
    fn partial_cmp(&self, other: &KsrF64) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl Hash for KsrF64 {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl Zero for KsrF64 {
    fn zero() -> Self {
        KsrF64(0.0)
    }

    fn is_zero(&self) -> bool {
        self.0.abs() < EPS
    }

    fn is_positive(&self) -> bool {
        self.0 > EPS
    }

    fn is_negative(&self) -> bool {
        self.0 < -EPS
    }
}

impl One for KsrF64 {
    fn one() -> Self {
        KsrF64(1.0)
    }
}

impl Abs for KsrF64 {
    fn abs(&self) -> Self {
        KsrF64(self.0.abs())
    }
}

impl Sqrt for KsrF64 {
    fn sqrt(&self) -> Self {
        KsrF64(self.0.sqrt())
    }
}

impl fmt::Display for KsrF64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
