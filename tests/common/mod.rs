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

#![allow(dead_code)]

use ksr::{
    DataStructure, Initializer, KsrError, Parameters,
    geometry::Point3,
    numeric::KsrF64,
};

pub type Polygon = Vec<[f64; 3]>;

pub fn to_points(polygon: &Polygon) -> Vec<Point3<KsrF64>> {
    polygon.iter().map(|c| Point3::from_vals(*c)).collect()
}

/// Horizontal axis-aligned rectangle at height `z`.
pub fn horizontal(x0: f64, x1: f64, y0: f64, y1: f64, z: f64) -> Polygon {
    vec![[x0, y0, z], [x1, y0, z], [x1, y1, z], [x0, y1, z]]
}

/// Rectangle in the plane `x = x`.
pub fn vertical_x(x: f64, y0: f64, y1: f64, z0: f64, z1: f64) -> Polygon {
    vec![[x, y0, z0], [x, y1, z0], [x, y1, z1], [x, y0, z1]]
}

/// Rectangle in the plane `y = y`.
pub fn vertical_y(y: f64, x0: f64, x1: f64, z0: f64, z1: f64) -> Polygon {
    vec![[x0, y, z0], [x1, y, z0], [x1, y, z1], [x0, y, z1]]
}

pub fn initialize(polygons: &[Polygon], parameters: &Parameters) -> Result<(DataStructure, f64), KsrError> {
    let mut data = DataStructure::new();
    let time_step = Initializer::new(&mut data, parameters).initialize(polygons, to_points)?;
    Ok((data, time_step))
}
