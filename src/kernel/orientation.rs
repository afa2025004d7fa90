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
    geometry::point::{Point2, Point3},
    numeric::scalar::Scalar,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Clockwise,
    Collinear,
    CounterClockwise,
}

impl Orientation {
    pub fn from_sign(sign: i8) -> Self {
        match sign {
            s if s > 0 => Orientation::CounterClockwise,
            s if s < 0 => Orientation::Clockwise,
            _ => Orientation::Collinear,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Orientation::Clockwise => Orientation::CounterClockwise,
            Orientation::CounterClockwise => Orientation::Clockwise,
            Orientation::Collinear => Orientation::Collinear,
        }
    }
}

/// Side of an oriented line or plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrientedSide {
    Negative,
    Boundary,
    Positive,
}

impl OrientedSide {
    pub fn from_sign(sign: i8) -> Self {
        match sign {
            s if s > 0 => OrientedSide::Positive,
            s if s < 0 => OrientedSide::Negative,
            _ => OrientedSide::Boundary,
        }
    }
}

/// Returns:
/// - >0 if counter-clockwise
/// - <0 if clockwise
/// - =0 if collinear
pub fn orient2d<T: Scalar>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>) -> T {
    (b[0].clone() - &a[0]) * &(c[1].clone() - &a[1])
        - (b[1].clone() - &a[1]) * &(c[0].clone() - &a[0])
}

pub fn orientation_2<T: Scalar>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>) -> Orientation {
    Orientation::from_sign(orient2d(a, b, c).sign())
}

pub fn orient3d<T: Scalar>(a: &Point3<T>, b: &Point3<T>, c: &Point3<T>, d: &Point3<T>) -> T {
    let ab = a.vector_to(b);
    let ac = a.vector_to(c);
    let ad = a.vector_to(d);
    ab.cross(&ac).dot(&ad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{KsrF64, KsrRational};

    #[test]
    fn ccw_test() {
        let a = Point2::<KsrF64>::from_vals([0.0, 0.0]);
        let b = Point2::<KsrF64>::from_vals([1.0, 0.0]);
        let c = Point2::<KsrF64>::from_vals([0.0, 1.0]);

        assert_eq!(orientation_2(&a, &b, &c), Orientation::CounterClockwise);
        assert_eq!(orientation_2(&a, &c, &b), Orientation::Clockwise);
    }

    #[test]
    fn exact_collinear_test() {
        let a = Point2::<KsrRational>::from_vals([0.1, 0.1]);
        let b = Point2::<KsrRational>::from_vals([0.2, 0.2]);
        let c = Point2::<KsrRational>::from_vals([0.3, 0.3]);

        // 0.1, 0.2 and 0.3 are not exactly representable; the exact kernel
        // still sees the binary values, which lie on the diagonal.
        assert_eq!(orientation_2(&a, &b, &c), Orientation::Collinear);
    }

    #[test]
    fn orientation_3d_positive_volume() {
        let a = Point3::<KsrF64>::from_vals([0.0, 0.0, 0.0]);
        let b = Point3::<KsrF64>::from_vals([1.0, 0.0, 0.0]);
        let c = Point3::<KsrF64>::from_vals([0.0, 1.0, 0.0]);
        let d = Point3::<KsrF64>::from_vals([0.0, 0.0, 1.0]);

        assert!(orient3d(&a, &b, &c, &d).0 > 0.0);
    }

    #[test]
    fn orientation_3d_coplanar() {
        let a = Point3::<KsrRational>::from_vals([0.0, 0.0, 0.0]);
        let b = Point3::<KsrRational>::from_vals([1.0, 0.0, 0.0]);
        let c = Point3::<KsrRational>::from_vals([0.0, 1.0, 0.0]);
        let d = Point3::<KsrRational>::from_vals([1.0, 1.0, 0.0]);

        assert_eq!(orient3d(&a, &b, &c, &d).sign(), 0);
    }
}
