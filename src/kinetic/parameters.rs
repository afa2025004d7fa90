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

use std::path::PathBuf;

/// Absolute tolerance used for bounding box flatness, plane matching and
/// kinetic speeds.
pub const KSR_TOLERANCE: f64 = 1e-5;

/// How coplanar input polygons sharing a support plane are merged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlanarShapeType {
    #[default]
    ConvexHull,
    Rectangle,
}

/// Configuration of the initializer.
#[derive(Clone, Debug)]
pub struct Parameters {
    /// Number of allowed plane-crossing events copied onto every face.
    pub k: u32,
    pub enlarge_bbox_ratio: f64,
    pub reorient: bool,
    pub verbose: bool,
    pub debug: bool,
    pub debug_dir: PathBuf,
    pub merge_type: PlanarShapeType,
    pub obb_random_directions: usize,
    pub obb_seed: u64,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            k: 1,
            enlarge_bbox_ratio: 1.1,
            reorient: false,
            verbose: false,
            debug: false,
            debug_dir: PathBuf::from("."),
            merge_type: PlanarShapeType::ConvexHull,
            obb_random_directions: 64,
            obb_seed: 0x6b73_725f,
        }
    }
}

impl Parameters {
    pub fn with_k(mut self, k: u32) -> Self {
        self.k = k;
        self
    }

    pub fn with_enlarge_bbox_ratio(mut self, ratio: f64) -> Self {
        assert!(ratio > 0.0, "enlarge ratio must be positive");
        self.enlarge_bbox_ratio = ratio;
        self
    }

    pub fn with_reorient(mut self, reorient: bool) -> Self {
        self.reorient = reorient;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_debug(mut self, debug: bool, dir: impl Into<PathBuf>) -> Self {
        self.debug = debug;
        self.debug_dir = dir.into();
        self
    }

    pub fn with_merge_type(mut self, merge_type: PlanarShapeType) -> Self {
        self.merge_type = merge_type;
        self
    }

    pub fn with_obb_sampling(mut self, random_directions: usize, seed: u64) -> Self {
        self.obb_random_directions = random_directions;
        self.obb_seed = seed;
        self
    }

    /// Stage summaries go to `info` when verbose, `debug` otherwise.
    pub(crate) fn summary_level(&self) -> log::Level {
        if self.verbose {
            log::Level::Info
        } else {
            log::Level::Debug
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_level_follows_verbose() {
        assert_eq!(Parameters::default().summary_level(), log::Level::Debug);
        assert_eq!(Parameters::default().with_verbose(true).summary_level(), log::Level::Info);
    }
}
