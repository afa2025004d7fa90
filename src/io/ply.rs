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
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::{geometry::point::Point3, numeric::ksr_f64::KsrF64};

/// Write an ASCII PLY of polygonal faces, optionally with one RGB colour
/// per face.
pub fn write_ply<P: AsRef<Path>>(
    vertices: &[Point3<KsrF64>],
    faces: &[Vec<usize>],
    colors: Option<&[[u8; 3]]>,
    path: P,
) -> io::Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    writeln!(out, "ply")?;
    writeln!(out, "format ascii 1.0")?;
    writeln!(out, "element vertex {}", vertices.len())?;
    writeln!(out, "property double x")?;
    writeln!(out, "property double y")?;
    writeln!(out, "property double z")?;
    writeln!(out, "element face {}", faces.len())?;
    writeln!(out, "property list uchar int vertex_indices")?;
    if colors.is_some() {
        writeln!(out, "property uchar red")?;
        writeln!(out, "property uchar green")?;
        writeln!(out, "property uchar blue")?;
    }
    writeln!(out, "end_header")?;

    for v in vertices {
        writeln!(out, "{} {} {}", v[0].0, v[1].0, v[2].0)?;
    }

    for (i, face) in faces.iter().enumerate() {
        write!(out, "{}", face.len())?;
        for idx in face {
            write!(out, " {idx}")?;
        }
        if let Some([r, g, b]) = colors.and_then(|c| c.get(i)) {
            write!(out, " {r} {g} {b}")?;
        }
        writeln!(out)?;
    }

    out.flush()
}
