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

mod common;

use std::{fs, path::PathBuf};

use common::{horizontal, initialize, vertical_x};
use ksr::{
    Parameters,
    io::{read_polygons_off, write_polygons_off},
};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ksr-{name}-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_off_polygon_soup_round_trip() {
    let dir = scratch_dir("off");
    let path = dir.join("soup.off");
    let polygons: Vec<_> = [horizontal(0.0, 1.0, 0.0, 1.0, 0.5), vertical_x(0.5, 0.0, 1.0, 0.0, 1.0)]
        .iter()
        .map(common::to_points)
        .collect();

    write_polygons_off(&polygons, &path).unwrap();
    let read = read_polygons_off(&path).unwrap();
    assert_eq!(read, polygons);
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_off_reader_rejects_bad_header() {
    let dir = scratch_dir("bad-off");
    let path = dir.join("bad.off");
    fs::write(&path, "PLY\n0 0 0\n").unwrap();
    assert!(read_polygons_off(&path).is_err());
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_off_reader_accepts_polygons_of_any_size() {
    let dir = scratch_dir("ngon-off");
    let path = dir.join("ngon.off");
    fs::write(
        &path,
        "OFF\n# pentagon\n5 1 0\n0 0 0\n2 0 0\n3 1 0\n1 2 0\n-1 1 0\n5 0 1 2 3 4\n",
    )
    .unwrap();
    let read = read_polygons_off(&path).unwrap();
    assert_eq!(read.len(), 1);
    assert_eq!(read[0].len(), 5);
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_debug_dumps_are_written() {
    let dir = scratch_dir("dump");
    let parameters = Parameters::default().with_debug(true, &dir);
    let polygons = vec![
        horizontal(0.25, 0.75, 0.25, 0.75, 0.5),
        vertical_x(0.5, 0.25, 0.75, 0.25, 0.75),
    ];
    initialize(&polygons, &parameters).unwrap();

    for tag in ["init", "intersected"] {
        assert!(dir.join(format!("{tag}-iedges.polylines.txt")).is_file());
        assert!(dir.join(format!("{tag}-pfaces.ply")).is_file());
        assert!(dir.join(format!("{tag}-ifaces.ply")).is_file());
        assert!(dir.join(format!("{tag}-line-0.polylines.txt")).is_file());
    }
    let ply = fs::read_to_string(dir.join("intersected-ifaces.ply")).unwrap();
    assert!(ply.starts_with("ply\nformat ascii 1.0\n"));
    fs::remove_dir_all(dir).unwrap();
}
