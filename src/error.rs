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

use thiserror::Error;

/// Recoverable failures of the initializer. Violated geometric invariants
/// are not represented here: they panic.
#[derive(Debug, Error)]
pub enum KsrError {
    #[error("no input polygons were provided")]
    EmptyInput,

    #[error("input polygon {index} has {count} points, at least 3 are required")]
    TooFewPoints { index: usize, count: usize },

    #[error("input polygon {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    #[error("input polygon {index} is degenerate (zero area or collinear)")]
    DegeneratePolygon { index: usize },

    #[error("failed to write debug output: {0}")]
    Io(#[from] std::io::Error),
}
