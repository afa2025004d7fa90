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

mod ifaces;
mod intersection_free;
mod kinetic_intervals;
mod mapping;
mod polygons;

use std::time::{Duration, Instant};

use log::debug;

use crate::{
    error::KsrError,
    geometry::{plane::Plane3, point::Point3, vector::Vector3},
    io::dump,
    kinetic::{
        bounding_box::{bounding_box_to_polygons, create_bounding_box},
        data_structure::DataStructure,
        parameters::Parameters,
    },
    numeric::ksr_f64::KsrF64,
};

/// Accessor yielding the 3D polygon of an input item.
pub trait PolygonMap<T> {
    fn polygon(&self, item: &T) -> Vec<Point3<KsrF64>>;
}

impl<T, F> PolygonMap<T> for F
where
    F: Fn(&T) -> Vec<Point3<KsrF64>>,
{
    fn polygon(&self, item: &T) -> Vec<Point3<KsrF64>> {
        self(item)
    }
}

/// Builds the bounding box, support planes, intersection graph and faces
/// for a set of input polygons.
pub struct Initializer<'a> {
    data: &'a mut DataStructure,
    parameters: &'a Parameters,
}

impl<'a> Initializer<'a> {
    pub fn new(data: &'a mut DataStructure, parameters: &'a Parameters) -> Self {
        Initializer { data, parameters }
    }

    pub fn data(&self) -> &DataStructure {
        self.data
    }

    /// Runs every stage and returns the time step derived from the box
    /// diagonal.
    pub fn initialize<T, M>(&mut self, input: &[T], polygon_map: M) -> Result<f64, KsrError>
    where
        M: PolygonMap<T>,
    {
        let polygons = collect_polygons(input, &polygon_map)?;
        let normals: Vec<Vector3<KsrF64>> = polygons
            .iter()
            .filter_map(|p| Plane3::from_polygon(p).map(|plane| plane.normal().clone()))
            .collect();

        let mut timings: Vec<(&str, Duration)> = Vec::new();
        let mut stage = Instant::now();
        let mut lap = |name: &'static str, stage: &mut Instant| {
            timings.push((name, stage.elapsed()));
            *stage = Instant::now();
        };

        let (bbox, time_step) = create_bounding_box(&polygons, &normals, self.parameters);
        lap("bbox", &mut stage);

        let bbox_faces = bounding_box_to_polygons(&bbox);
        lap("bbox poly", &mut stage);

        self.add_polygons(&polygons, &bbox_faces);
        lap("add poly", &mut stage);

        self.data.igraph_mut().finished_bbox();
        log::log!(self.parameters.summary_level(), "intersecting input polygons");
        if self.parameters.debug {
            dump(self.data, &self.parameters.debug_dir, "init")?;
        }

        assert!(self.data.check_integrity(false), "integrity check failed after adding polygons");
        self.make_polygons_intersection_free();
        lap("intersection free", &mut stage);

        self.create_ifaces();
        lap("ifaces", &mut stage);
        assert!(self.data.check_input_planes(false), "an input plane was not carved into ifaces");

        self.initial_polygon_iedge_intersections();
        lap("initial intersections", &mut stage);

        self.map_polygon_to_ifaces();
        lap("map ifaces", &mut stage);

        self.data.igraph_mut().freeze();
        assert!(self.data.check_integrity(false), "integrity check failed after mapping faces");
        assert!(self.data.check_input_planes(true), "an input polygon covers no iface");
        self.set_k_intersections(self.parameters.k);
        lap("set k", &mut stage);

        if self.parameters.debug {
            dump(self.data, &self.parameters.debug_dir, "intersected")?;
        }

        assert!(self.data.check_bbox(), "bounding box check failed");
        self.data.precompute_iedge_data();
        lap("precompute iedge data", &mut stage);

        assert!(self.data.check_integrity(true), "final integrity check failed");
        assert!(self.data.check_intersection_graph(), "intersection graph check failed");

        for (name, elapsed) in &timings {
            debug!("{:.6}s for {name}", elapsed.as_secs_f64());
        }
        log::log!(
            self.parameters.summary_level(),
            "initialized {} support planes, {} ivertices, {} iedges, {} ifaces",
            self.data.number_of_support_planes(),
            self.data.igraph().number_of_vertices(),
            self.data.igraph().number_of_edges(),
            self.data.igraph().number_of_faces()
        );
        Ok(time_step)
    }
}

/// Reads and validates every input polygon.
fn collect_polygons<T, M>(input: &[T], polygon_map: &M) -> Result<Vec<Vec<Point3<KsrF64>>>, KsrError>
where
    M: PolygonMap<T>,
{
    if input.is_empty() {
        return Err(KsrError::EmptyInput);
    }
    let mut polygons = Vec::with_capacity(input.len());
    for (index, item) in input.iter().enumerate() {
        let polygon = polygon_map.polygon(item);
        if polygon.len() < 3 {
            return Err(KsrError::TooFewPoints {
                index,
                count: polygon.len(),
            });
        }
        if polygon.iter().flat_map(|p| p.iter()).any(|c| !c.0.is_finite()) {
            return Err(KsrError::NonFiniteCoordinate { index });
        }
        if Plane3::from_polygon(&polygon).is_none() {
            return Err(KsrError::DegeneratePolygon { index });
        }
        polygons.push(polygon);
    }
    Ok(polygons)
}
