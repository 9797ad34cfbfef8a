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

//! derivation of rectangular geographic query regions from two points
//!
//! Both strategies use the arithmetic (per-axis) midpoint of the two input points as the box center and only
//! differ in how they turn the point separation into a half-width:
//!
//! - [FlatDegrees] treats the latitude and longitude differences as independent radii (`span * 0.6 * 1.2`).
//!   Coincident points yield a zero-area box
//! - [Haversine] converts the great circle distance into degrees (`distance_km / 2 / 111`) and applies the
//!   same radius to both axes, with a floor of [MIN_RADIUS_DEGREES]
//!
//! Boxes are consumed by image queries that compute a pixels-per-unit resolution as
//! `target_pixel_width / (east - west)`. A zero-width box (which [FlatDegrees] produces for coincident points)
//! therefore has no valid resolution - callers have to check [BoundingBox::is_degenerate] before deriving one.
//! The calculator itself does not validate inputs, non-finite or out-of-range coordinates propagate into the
//! result (see [GeoPoint::validate]).

use serde::{Serialize,Deserialize};
use strum::{Display,EnumString};
use clap::ValueEnum;

use crate::BoundingBox;
use crate::geo::{GeoPoint, haversine_distance_km};
use crate::geo_constants::KM_PER_DEGREE;

/// nominal conversion of a point-to-point span into a radius
pub const FLAT_RADIUS_FACTOR: f64 = 0.6;

/// padding applied on top of the nominal flat radius
pub const FLAT_PADDING_FACTOR: f64 = 1.2;

/// minimum half-width of haversine derived boxes in degrees
pub const MIN_RADIUS_DEGREES: f64 = 0.01;

/// the distance measurement used to turn two points into a bounding box
pub trait BboxStrategy: Send + Sync {
    fn compute (&self, p1: &GeoPoint, p2: &GeoPoint) -> BoundingBox<f64>;
}

/// per-axis degree differences as distance proxies
#[derive(Debug,Clone,Copy,Default)]
pub struct FlatDegrees;

impl BboxStrategy for FlatDegrees {
    fn compute (&self, p1: &GeoPoint, p2: &GeoPoint) -> BoundingBox<f64> {
        let center = p1.midpoint(p2);

        let lat_span = (p1.latitude_degrees() - p2.latitude_degrees()).abs();
        let lon_span = (p1.longitude_degrees() - p2.longitude_degrees()).abs();

        let radius_lat = lat_span * FLAT_RADIUS_FACTOR * FLAT_PADDING_FACTOR;
        let radius_lon = lon_span * FLAT_RADIUS_FACTOR * FLAT_PADDING_FACTOR;

        around( &center, radius_lon, radius_lat)
    }
}

/// great circle distance converted back into degrees
#[derive(Debug,Clone,Copy,Default)]
pub struct Haversine;

impl Haversine {
    /// the half-width in degrees before applying the [MIN_RADIUS_DEGREES] floor
    pub fn raw_radius_degrees (p1: &GeoPoint, p2: &GeoPoint) -> f64 {
        (haversine_distance_km( p1, p2) / 2.0) / KM_PER_DEGREE
    }
}

impl BboxStrategy for Haversine {
    fn compute (&self, p1: &GeoPoint, p2: &GeoPoint) -> BoundingBox<f64> {
        let center = p1.midpoint(p2);
        // NaN inputs stay NaN (f64::max would otherwise silently pick the floor)
        let raw = Haversine::raw_radius_degrees( p1, p2);
        let radius = if raw.is_nan() { raw } else { raw.max( MIN_RADIUS_DEGREES) };

        // same radius for both axes - longitude degrees are not corrected for cos(lat)
        around( &center, radius, radius)
    }
}

fn around (center: &GeoPoint, radius_lon: f64, radius_lat: f64) -> BoundingBox<f64> {
    let lat = center.latitude_degrees();
    let lon = center.longitude_degrees();

    BoundingBox::new( lon - radius_lon, lat - radius_lat, lon + radius_lon, lat + radius_lat)
}

/// serializable strategy selector that can be used in configs and command line arguments
#[derive(Debug,Clone,Copy,PartialEq,Eq,Default,Serialize,Deserialize,Display,EnumString,ValueEnum)]
#[serde(rename_all="lowercase")]
#[strum(serialize_all="lowercase")]
pub enum BboxMethod {
    Flat,
    #[default]
    Geodesic,
}

impl BboxMethod {
    pub fn strategy (&self) -> &'static dyn BboxStrategy {
        match self {
            BboxMethod::Flat => &FlatDegrees,
            BboxMethod::Geodesic => &Haversine,
        }
    }
}

pub fn compute_bbox (p1: &GeoPoint, p2: &GeoPoint, method: BboxMethod) -> BoundingBox<f64> {
    method.strategy().compute( p1, p2)
}

pub fn compute_bbox_flat (p1: &GeoPoint, p2: &GeoPoint) -> BoundingBox<f64> {
    FlatDegrees.compute( p1, p2)
}

pub fn compute_bbox_geodesic (p1: &GeoPoint, p2: &GeoPoint) -> BoundingBox<f64> {
    Haversine.compute( p1, p2)
}
