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

use std::collections::BTreeMap;

use log::log;

use super::Initializer;
use crate::{
    geometry::{
        aabb::Aabb2,
        convex_hull::convex_hull_2_indices,
        intersection::{SegmentIntersection, segment_segment_intersection},
        point::{Point2, Point3},
        segment::Segment2,
    },
    kernel::converter::ToExact,
    kinetic::parameters::PlanarShapeType,
    numeric::{ksr_f64::KsrF64, ksr_rational::KsrRational},
};

/// Merged 2D polygon of a support plane and the input indices it covers.
type MergedPolygon = (Vec<Point2<KsrF64>>, Vec<usize>);

impl Initializer<'_> {
    pub(super) fn add_polygons(&mut self, polygons: &[Vec<Point3<KsrF64>>], bbox_faces: &[Vec<Point3<KsrF64>>]) {
        self.add_bbox_faces(bbox_faces);
        self.add_input_polygons(polygons);
    }

    fn add_bbox_faces(&mut self, bbox_faces: &[Vec<Point3<KsrF64>>]) {
        for face in bbox_faces {
            self.data.add_bbox_polygon(face);
        }

        let igraph = self.data.igraph();
        assert_eq!(self.data.number_of_support_planes(), 6, "bbox must define 6 support planes");
        assert_eq!(igraph.number_of_vertices(), 8, "bbox must have 8 corners");
        assert_eq!(igraph.number_of_edges(), 12, "bbox must have 12 edges");

        log!(
            self.parameters.summary_level(),
            "inserted bbox faces: {} support planes, {} ivertices, {} iedges",
            self.data.number_of_support_planes(),
            igraph.number_of_vertices(),
            igraph.number_of_edges()
        );
    }

    fn add_input_polygons(&mut self, polygons: &[Vec<Point3<KsrF64>>]) {
        let merged = self.preprocess_polygons(polygons);
        for (&sp, (polygon, indices)) in &merged {
            self.data.add_input_polygon(sp, indices, polygon);
        }
        log!(
            self.parameters.summary_level(),
            "inserted {} input polygons into {} support planes",
            polygons.len(),
            merged.len()
        );
    }

    /// Groups input polygons by support plane, merging polygons that land
    /// on an already known plane.
    fn preprocess_polygons(&mut self, polygons: &[Vec<Point3<KsrF64>>]) -> BTreeMap<usize, MergedPolygon> {
        let mut merged: BTreeMap<usize, MergedPolygon> = BTreeMap::new();
        for (index, polygon) in polygons.iter().enumerate() {
            let (sp, is_added) = self.data.add_support_plane(polygon, false);
            let polygon_2 = self.convert_polygon(sp, polygon);
            if is_added {
                merged.insert(sp, (polygon_2, vec![index]));
                continue;
            }
            let entry = merged
                .entry(sp)
                .or_insert_with(|| (Vec::new(), Vec::new()));
            entry.1.push(index);
            let combined = self.merge_polygons(sp, &polygon_2, &entry.0);
            entry.0 = combined;
        }
        merged
    }

    fn convert_polygon(&self, sp: usize, polygon: &[Point3<KsrF64>]) -> Vec<Point2<KsrF64>> {
        polygon.iter().map(|p| self.data.to_2d(sp, p)).collect()
    }

    fn merge_polygons(&self, sp: usize, polygon_a: &[Point2<KsrF64>], polygon_b: &[Point2<KsrF64>]) -> Vec<Point2<KsrF64>> {
        let points: Vec<Point2<KsrF64>> = polygon_a.iter().chain(polygon_b).cloned().collect();
        self.create_merged_polygon(sp, &points)
    }

    /// Convex hull of `points`, decided exactly, returned with the
    /// original inexact coordinates.
    fn create_merged_polygon(&self, sp: usize, points: &[Point2<KsrF64>]) -> Vec<Point2<KsrF64>> {
        match self.parameters.merge_type {
            PlanarShapeType::ConvexHull => {}
            PlanarShapeType::Rectangle => {
                panic!("merging coplanar polygons into a rectangle is not implemented")
            }
        }

        let exact: Vec<Point2<KsrRational>> = points.to_exact();
        let merged: Vec<Point2<KsrF64>> = convex_hull_2_indices(&exact)
            .into_iter()
            .map(|i| points[i].clone())
            .collect();
        assert!(merged.len() >= 3, "merged polygon on plane {sp} is degenerate");
        assert!(
            self.is_polygon_inside_bbox(sp, &merged),
            "merged polygon on plane {sp} leaves the bounding box"
        );
        merged
    }

    /// Checks that no edge of `polygon` crosses the 2D box around the
    /// section of plane `sp` with the bounding box.
    pub fn is_polygon_inside_bbox(&self, sp: usize, polygon: &[Point2<KsrF64>]) -> bool {
        let Some(bbox) = self.create_bbox(sp) else {
            return true;
        };
        let corners = bbox.corners().map(|c| c.to_exact());
        let exact: Vec<Point2<KsrRational>> = polygon.to_exact();

        for i in 0..corners.len() {
            let side = Segment2::new(&corners[i], &corners[(i + 1) % corners.len()]);
            for j in 0..exact.len() {
                let edge = Segment2::new(&exact[j], &exact[(j + 1) % exact.len()]);
                if !matches!(segment_segment_intersection(&side, &edge), SegmentIntersection::None) {
                    return false;
                }
            }
        }
        true
    }

    fn create_bbox(&self, sp: usize) -> Option<Aabb2<KsrF64>> {
        let points: Vec<Point2<KsrF64>> = self
            .data
            .support_plane(sp)
            .unique_iedges()
            .iter()
            .flat_map(|&e| [self.data.source(e), self.data.target(e)])
            .map(|v| self.data.point_2(sp, v))
            .collect();
        Aabb2::from_points(points.iter())
    }
}
