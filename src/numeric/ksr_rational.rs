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
use rug::Rational;

use crate::{
    numeric::{ksr_f64::KsrF64, scalar::Scalar},
    operations::{Abs, One, Zero},
};

use std::{
    cmp::Ordering,
    hash::Hash,
    ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign},
};

/// Exact field type backed by GMP rationals. Every sign is exact.
#[derive(Clone, Debug, Default)]
pub struct KsrRational(pub Rational);

impl Scalar for KsrRational {
    fn from_num_den(num: i32, den: i32) -> Self {
        KsrRational(Rational::from((num, den)))
    }

    fn tolerance() -> Self {
        KsrRational(Rational::new())
    }

    fn sign(&self) -> i8 {
        match self.0.cmp0() {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    fn cmp_ref(a: &Self, b: &Self) -> Ordering {
        a.0.cmp(&b.0)
    }

    fn to_f64_lossy(&self) -> f64 {
        self.0.to_f64()
    }
}

impl<'a, 'b> Add<&'b KsrRational> for &'a KsrRational {
    type Output = KsrRational;

    fn add(self, rhs: &'b KsrRational) -> KsrRational {
        // in-place API on rug::Rational: result = self + rhs
        let mut result = self.0.clone();
        result += &rhs.0;
        KsrRational(result)
    }
}

impl<'a> Add<&'a KsrRational> for KsrRational {
    type Output = KsrRational;

    fn add(mut self, rhs: &'a KsrRational) -> KsrRational {
        self.0 += &rhs.0;
        self
    }
}

impl Add for KsrRational {
    type Output = KsrRational;

    fn add(self, rhs: KsrRational) -> KsrRational {
        self + &rhs
    }
}

impl<'a, 'b> Sub<&'b KsrRational> for &'a KsrRational {
    type Output = KsrRational;

    fn sub(self, rhs: &'b KsrRational) -> KsrRational {
        let mut result = self.0.clone();
        result -= &rhs.0;
        KsrRational(result)
    }
}

impl<'a> Sub<&'a KsrRational> for KsrRational {
    type Output = KsrRational;

    fn sub(mut self, rhs: &'a KsrRational) -> KsrRational {
        self.0 -= &rhs.0;
        self
    }
}

impl Sub for KsrRational {
    type Output = KsrRational;

    fn sub(self, rhs: KsrRational) -> KsrRational {
        self - &rhs
    }
}

impl<'a, 'b> Mul<&'b KsrRational> for &'a KsrRational {
    type Output = KsrRational;

    fn mul(self, rhs: &'b KsrRational) -> KsrRational {
        let mut result = self.0.clone();
        result *= &rhs.0;
        KsrRational(result)
    }
}

impl<'a> Mul<&'a KsrRational> for KsrRational {
    type Output = KsrRational;

    fn mul(mut self, rhs: &'a KsrRational) -> KsrRational {
        self.0 *= &rhs.0;
        self
    }
}

impl Mul for KsrRational {
    type Output = KsrRational;

    fn mul(self, rhs: KsrRational) -> KsrRational {
        self * &rhs
    }
}

impl<'a, 'b> Div<&'b KsrRational> for &'a KsrRational {
    type Output = KsrRational;

    fn div(self, rhs: &'b KsrRational) -> KsrRational {
        assert!(!rhs.is_zero(), "KsrRational: division by zero");
        let mut result = self.0.clone();
        result /= &rhs.0;
        KsrRational(result)
    }
}

impl<'a> Div<&'a KsrRational> for KsrRational {
    type Output = KsrRational;

    fn div(mut self, rhs: &'a KsrRational) -> KsrRational {
        assert!(!rhs.is_zero(), "KsrRational: division by zero");
        self.0 /= &rhs.0;
        self
    }
}

impl Div for KsrRational {
    type Output = KsrRational;

    fn div(self, rhs: KsrRational) -> KsrRational {
        self / &rhs
    }
}

impl<'c> AddAssign<&'c KsrRational> for KsrRational {
    fn add_assign(&mut self, rhs: &'c KsrRational) {
        self.0 += &rhs.0;
    }
}

impl<'d> SubAssign<&'d KsrRational> for KsrRational {
    fn sub_assign(&mut self, rhs: &'d KsrRational) {
        self.0 -= &rhs.0;
    }
}

impl Neg for KsrRational {
    type Output = KsrRational;

    fn neg(self) -> KsrRational {
        KsrRational(-self.0)
    }
}

impl<'a> Neg for &'a KsrRational {
    type Output = KsrRational;

    fn neg(self) -> KsrRational {
        KsrRational(-self.0.clone())
    }
}

impl From<i32> for KsrRational {
    fn from(value: i32) -> Self {
        KsrRational(Rational::from(value))
    }
}

/// Exact: every finite double is a dyadic rational.
impl From<f64> for KsrRational {
    fn from(value: f64) -> Self {
        match Rational::from_f64(value) {
            Some(r) => KsrRational(r),
            None => panic!("non-finite value {value} has no exact representation"),
        }
    }
}

impl From<&KsrF64> for KsrRational {
    fn from(value: &KsrF64) -> Self {
        KsrRational::from(value.0)
    }
}

impl From<Rational> for KsrRational {
    fn from(value: Rational) -> Self {
        KsrRational(value)
    }
}

impl From<&KsrRational> for KsrF64 {
    fn from(value: &KsrRational) -> Self {
        KsrF64(value.0.to_f64())
    }
}

impl ToPrimitive for KsrRational {
    fn to_i64(&self) -> Option<i64> {
        self.0.to_f64().to_i64()
    }
    fn to_u64(&self) -> Option<u64> {
        self.0.to_f64().to_u64()
    }
    fn to_f64(&self) -> Option<f64> {
        Some(self.0.to_f64())
    }
}

impl PartialEq for KsrRational {
    fn eq(&self, other: &KsrRational) -> bool {
        self.0 == other.0
    }
}

impl Eq for KsrRational {}

impl PartialOrd for KsrRational {
    fn partial_cmp(&self, other: &KsrRational) -> Option<Ordering> {
        Some(self.0.cmp(&other.0))
    }
}

impl Ord for KsrRational {
    fn cmp(&self, other: &KsrRational) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Hash for KsrRational {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl Zero for KsrRational {
    fn zero() -> Self {
        KsrRational(Rational::new())
    }

    fn is_zero(&self) -> bool {
        self.0.cmp0() == Ordering::Equal
    }

    fn is_positive(&self) -> bool {
        self.0.cmp0() == Ordering::Greater
    }

    fn is_negative(&self) -> bool {
        self.0.cmp0() == Ordering::Less
    }
}

impl One for KsrRational {
    fn one() -> Self {
        KsrRational(Rational::from(1))
    }
}

impl Abs for KsrRational {
    fn abs(&self) -> Self {
        KsrRational(self.0.clone().abs())
    }
}
