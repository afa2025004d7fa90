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
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::{geometry::point::Point3, numeric::ksr_f64::KsrF64};

/// Write a polygon soup to OFF. Shared corners are not merged.
/// Format:
///   OFF
///   <numVertices> <numFaces> 0
///   x y z
///   ...
///   n i0 i1 ... (zero-based indices)
pub fn write_polygons_off<P: AsRef<Path>>(polygons: &[Vec<Point3<KsrF64>>], path: P) -> io::Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    let vert_count: usize = polygons.iter().map(Vec::len).sum();
    writeln!(out, "OFF")?;
    writeln!(out, "{} {} {}", vert_count, polygons.len(), 0)?;

    for p in polygons.iter().flatten() {
        writeln!(out, "{} {} {}", p[0].0, p[1].0, p[2].0)?;
    }

    let mut first = 0;
    for polygon in polygons {
        write!(out, "{}", polygon.len())?;
        for i in first..first + polygon.len() {
            write!(out, " {i}")?;
        }
        writeln!(out)?;
        first += polygon.len();
    }

    out.flush()
}

/// Read a polygon soup from OFF.
/// Supports:
///   OFF
///   <V> <F> <E>
///   V lines of "x y z"
///   F lines of "n i0 i1 ... [colour]" (trailing colour values are ignored)
pub fn read_polygons_off<P: AsRef<Path>>(path: P) -> io::Result<Vec<Vec<Point3<KsrF64>>>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut lines = Vec::new();
    for line in reader.lines() {
        let l = line?;
        let trimmed = l.split('#').next().unwrap_or("").trim().to_string();
        if !trimmed.is_empty() {
            lines.push(trimmed);
        }
    }
    let mut it = lines.into_iter();

    let header = it.next().ok_or_else(|| invalid("OFF: empty file"))?;
    let mut header_tokens = header.split_whitespace();
    if header_tokens.next() != Some("OFF") {
        return Err(invalid(format!("OFF: expected 'OFF', got '{header}'")));
    }
    // Counts may follow the header on the same line.
    let rest: Vec<String> = header_tokens.map(str::to_string).collect();
    let counts_line = if rest.is_empty() {
        it.next().ok_or_else(|| invalid("OFF: missing counts"))?
    } else {
        rest.join(" ")
    };
    let counts: Vec<usize> = counts_line
        .split_whitespace()
        .map(|t| t.parse().map_err(|_| invalid("OFF: bad count")))
        .collect::<io::Result<_>>()?;
    let (vcount, fcount) = match counts.as_slice() {
        [v, f, ..] => (*v, *f),
        _ => return Err(invalid("OFF: missing vertex or face count")),
    };

    let mut vertices = Vec::with_capacity(vcount);
    for _ in 0..vcount {
        let line = it.next().ok_or_else(|| invalid("OFF: incomplete vertex list"))?;
        let coords: Vec<f64> = line
            .split_whitespace()
            .take(3)
            .map(|t| t.parse().map_err(|_| invalid("OFF: bad vertex coordinate")))
            .collect::<io::Result<_>>()?;
        if coords.len() != 3 {
            return Err(invalid("OFF: vertex needs three coordinates"));
        }
        vertices.push(Point3::from_vals([coords[0], coords[1], coords[2]]));
    }

    let mut polygons = Vec::with_capacity(fcount);
    for _ in 0..fcount {
        let line = it.next().ok_or_else(|| invalid("OFF: incomplete face list"))?;
        let mut tokens = line.split_whitespace();
        let n: usize = tokens
            .next()
            .ok_or_else(|| invalid("OFF: empty face"))?
            .parse()
            .map_err(|_| invalid("OFF: bad face size"))?;
        let mut polygon = Vec::with_capacity(n);
        for _ in 0..n {
            let i: usize = tokens
                .next()
                .ok_or_else(|| invalid("OFF: incomplete face"))?
                .parse()
                .map_err(|_| invalid("OFF: bad face index"))?;
            let p = vertices
                .get(i)
                .ok_or_else(|| invalid(format!("OFF: face index {i} out of range")))?;
            polygon.push(p.clone());
        }
        polygons.push(polygon);
    }

    Ok(polygons)
}

fn invalid(msg: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.into())
}
