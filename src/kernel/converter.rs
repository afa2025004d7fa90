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
    geometry::{point::Point, segment::Segment, vector::Vector},
    numeric::{ksr_f64::KsrF64, ksr_rational::KsrRational},
};

/// Lossless conversion from the inexact to the exact kernel.
pub trait ToExact {
    type Exact;
    fn to_exact(&self) -> Self::Exact;
}

/// Rounding conversion from the exact to the inexact kernel.
pub trait ToInexact {
    type Inexact;
    fn to_inexact(&self) -> Self::Inexact;
}

impl ToExact for KsrF64 {
    type Exact = KsrRational;
    fn to_exact(&self) -> KsrRational {
        KsrRational::from(self)
    }
}

impl ToInexact for KsrRational {
    type Inexact = KsrF64;
    fn to_inexact(&self) -> KsrF64 {
        KsrF64::from(self)
    }
}

impl<const N: usize> ToExact for Point<KsrF64, N> {
    type Exact = Point<KsrRational, N>;
    fn to_exact(&self) -> Self::Exact {
        Point::new(self.coords.each_ref().map(|c| c.to_exact()))
    }
}

impl<const N: usize> ToInexact for Point<KsrRational, N> {
    type Inexact = Point<KsrF64, N>;
    fn to_inexact(&self) -> Self::Inexact {
        Point::new(self.coords.each_ref().map(|c| c.to_inexact()))
    }
}

impl<const N: usize> ToExact for Vector<KsrF64, N> {
    type Exact = Vector<KsrRational, N>;
    fn to_exact(&self) -> Self::Exact {
        Vector::new(self.coords.each_ref().map(|c| c.to_exact()))
    }
}

impl<const N: usize> ToInexact for Vector<KsrRational, N> {
    type Inexact = Vector<KsrF64, N>;
    fn to_inexact(&self) -> Self::Inexact {
        Vector::new(self.coords.each_ref().map(|c| c.to_inexact()))
    }
}

impl<const N: usize> ToExact for Segment<KsrF64, N> {
    type Exact = Segment<KsrRational, N>;
    fn to_exact(&self) -> Self::Exact {
        Segment::new(&self.a.to_exact(), &self.b.to_exact())
    }
}

impl<T: ToExact> ToExact for [T] {
    type Exact = Vec<T::Exact>;
    fn to_exact(&self) -> Self::Exact {
        self.iter().map(|x| x.to_exact()).collect()
    }
}

impl<T: ToInexact> ToInexact for [T] {
    type Inexact = Vec<T::Inexact>;
    fn to_inexact(&self) -> Self::Inexact {
        self.iter().map(|x| x.to_inexact()).collect()
    }
}
