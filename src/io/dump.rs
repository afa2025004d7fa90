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
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    error::KsrError,
    geometry::{point::Point3, segment::Segment3},
    io::{ply::write_ply, polylines::write_polylines},
    kinetic::data_structure::DataStructure,
    numeric::ksr_f64::KsrF64,
};

const COLOR_SEED: u64 = 0x6b73_725f;

/// All intersection graph edges as one polylines file.
pub fn dump_intersection_edges<P: AsRef<Path>>(data: &DataStructure, path: P) -> Result<(), KsrError> {
    let segments: Vec<Segment3<KsrF64>> = data.iedges().map(|e| data.segment_3(e)).collect();
    write_polylines(&segments, path)?;
    Ok(())
}

/// One polylines file per intersection line, named `<prefix>-<line>.polylines.txt`.
pub fn dump_segmented_edges<P: AsRef<Path>>(data: &DataStructure, dir: P, prefix: &str) -> Result<(), KsrError> {
    let mut lines: BTreeMap<usize, Vec<Segment3<KsrF64>>> = BTreeMap::new();
    for e in data.iedges() {
        lines.entry(data.line(e)).or_default().push(data.segment_3(e));
    }
    for (line, segments) in &lines {
        let path = dir.as_ref().join(format!("{prefix}-{line}.polylines.txt"));
        write_polylines(segments, path)?;
    }
    Ok(())
}

/// Every pface of every support plane, coloured per plane.
pub fn dump_polygons<P: AsRef<Path>>(data: &DataStructure, path: P) -> Result<(), KsrError> {
    let mut rng = StdRng::seed_from_u64(COLOR_SEED);
    let mut vertices: Vec<Point3<KsrF64>> = Vec::new();
    let mut faces = Vec::new();
    let mut colors = Vec::new();

    for sp in 0..data.number_of_support_planes() {
        let color: [u8; 3] = [rng.random(), rng.random(), rng.random()];
        for pface in data.pfaces(sp) {
            let face: Vec<usize> = data
                .pvertices_of_pface(pface)
                .into_iter()
                .map(|pv| {
                    vertices.push(data.pvertex_point_3(pv));
                    vertices.len() - 1
                })
                .collect();
            faces.push(face);
            colors.push(color);
        }
    }

    write_ply(&vertices, &faces, Some(&colors), path)?;
    Ok(())
}

/// Every iface, coloured per support plane.
pub fn dump_ifaces<P: AsRef<Path>>(data: &DataStructure, path: P) -> Result<(), KsrError> {
    let mut rng = StdRng::seed_from_u64(COLOR_SEED);
    let plane_colors: Vec<[u8; 3]> = (0..data.number_of_support_planes())
        .map(|_| [rng.random(), rng.random(), rng.random()])
        .collect();

    let mut vertices: Vec<Point3<KsrF64>> = Vec::new();
    let mut faces = Vec::new();
    let mut colors = Vec::new();
    for f in data.ifaces() {
        let face = data.igraph().face(f);
        let indices: Vec<usize> = face
            .vertices
            .iter()
            .map(|&v| {
                vertices.push(data.point_3(v));
                vertices.len() - 1
            })
            .collect();
        faces.push(indices);
        colors.push(plane_colors[face.support_plane]);
    }

    write_ply(&vertices, &faces, Some(&colors), path)?;
    Ok(())
}

/// Writes the graph edges, per-line edges, pfaces and ifaces into `dir`,
/// file names prefixed with `tag`.
pub fn dump<P: AsRef<Path>>(data: &DataStructure, dir: P, tag: &str) -> Result<(), KsrError> {
    let dir: PathBuf = dir.as_ref().to_path_buf();
    fs::create_dir_all(&dir)?;
    dump_intersection_edges(data, dir.join(format!("{tag}-iedges.polylines.txt")))?;
    dump_segmented_edges(data, &dir, &format!("{tag}-line"))?;
    dump_polygons(data, dir.join(format!("{tag}-pfaces.ply")))?;
    dump_ifaces(data, dir.join(format!("{tag}-ifaces.ply")))?;
    debug!("dumped {tag} into {}", dir.display());
    Ok(())
}
