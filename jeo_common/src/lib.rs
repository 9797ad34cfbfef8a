/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use serde::{Serialize,Deserialize};
use num::Num;

pub mod macros;
pub mod errors;
pub mod fs;
pub mod geo_constants;
pub mod geo;
pub mod bbox;
pub mod config;

pub use errors::{JeoCommonError,Result};
pub use geo::GeoPoint;
pub use bbox::{BboxMethod,BboxStrategy,FlatDegrees,Haversine,compute_bbox,compute_bbox_flat,compute_bbox_geodesic};
pub use config::CoordinateConfig;

// syntactic sugar - this is just more readable in many cases
#[inline(always)] pub fn sin2(x:f64) -> f64 { let sin_x = x.sin(); sin_x*sin_x }
#[inline(always)] pub fn cos(x:f64) -> f64 { x.cos() }
#[inline(always)] pub fn atan2(y:f64,x:f64) -> f64 { y.atan2(x) }
#[inline(always)] pub fn sqrt(x:f64) -> f64 { x.sqrt() }
#[inline(always)] pub fn rad(x:f64)->f64 { x.to_radians() }

// a global fn that can be used with serde(skip_serializing_if="jeo_common::is_none")
#[inline] pub fn is_none<T> (opt: &Option<T>)->bool { opt.is_none() }


/// a generic bounding box without semantics for the coordinate type
/// for geographic boxes the fields are degrees, i.e. `[min_lon, min_lat, max_lon, max_lat]`
#[derive(Debug,Copy,Clone,Serialize,Deserialize,PartialEq)]
pub struct BoundingBox <T: Num> {
    pub west: T,
    pub south: T,
    pub east: T,
    pub north: T
}

impl <T: Num + Copy> BoundingBox<T> {
    pub fn new(west: T, south: T, east: T, north: T)->Self {
        BoundingBox{ west, south, east, north}
    }

    pub fn from_wsen<N> (wsen: &[N;4]) -> BoundingBox<T> where N: Num + Copy + Into<T> {
        BoundingBox::<T>{
            west: wsen[0].into(),
            south: wsen[1].into(),
            east: wsen[2].into(),
            north: wsen[3].into()
        }
    }

    /// the ordered `[west,south,east,north]` sequence external image queries expect
    pub fn to_minmax_array (&self) -> [T;4] {
        [self.west,self.south,self.east,self.north]
    }
}

impl BoundingBox<f64> {
    pub fn center (&self) -> (f64,f64) {
        ( (self.west + self.east) / 2.0, (self.south + self.north) / 2.0 )
    }

    /// longitude span in degrees. Note this is the denominator of pixel-per-unit resolutions
    pub fn width (&self) -> f64 { self.east - self.west }

    pub fn height (&self) -> f64 { self.north - self.south }

    pub fn contains (&self, lon: f64, lat: f64) -> bool {
        lon >= self.west && lon <= self.east && lat >= self.south && lat <= self.north
    }

    pub fn is_finite (&self) -> bool {
        self.west.is_finite() && self.south.is_finite() && self.east.is_finite() && self.north.is_finite()
    }

    /// true if the box has no extent along at least one axis
    pub fn is_degenerate (&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }
}

impl std::fmt::Display for BoundingBox<f64> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.6}, {:.6}, {:.6}, {:.6}]", self.west, self.south, self.east, self.north)
    }
}
