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

/// geographic point support
/// We use the Rust new type pattern around [geo_types::Point] (x = longitude, y = latitude) so that we
/// can interoperate with geo algorithms without giving up on explicit latitude/longitude accessors.

use std::fmt;
use serde::ser::{Serialize as SerializeTrait, Serializer, SerializeStruct};
use serde::de::{self, Deserialize as DeserializeTrait, Deserializer, Visitor, SeqAccess, MapAccess};
use geo_types::Point;

use crate::{impl_deserialize_struct, sin2, cos, rad, sqrt, atan2};
use crate::geo_constants::MEAN_EARTH_RADIUS_KM;
use crate::errors::{Result, invalid_coordinate};

/* #region GeoPoint ***********************************************************************************************/

/// a wrapper for geo_types::Point that uses geodetic degrees stored as f64
/// Note that values are not validated on construction (see [GeoPoint::validate])
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct GeoPoint(Point);

impl GeoPoint {
    pub fn from_lat_lon_degrees (lat: f64, lon: f64) -> Self {
        GeoPoint( Point::new( lon, lat))
    }

    pub fn from_lon_lat_degrees (lon: f64, lat: f64) -> Self {
        GeoPoint( Point::new( lon, lat))
    }

    #[inline] pub fn latitude_degrees (&self) -> f64 { self.0.y() }
    #[inline] pub fn longitude_degrees (&self) -> f64 { self.0.x() }

    pub fn point (&self) -> &Point { &self.0 }

    /// check that both coordinates are finite and within [-90,90] (lat) and [-180,180] (lon)
    pub fn validate (&self) -> Result<()> {
        let lat = self.latitude_degrees();
        let lon = self.longitude_degrees();

        if !lat.is_finite() || !lon.is_finite() {
            return Err( invalid_coordinate( format!("non-finite coordinate {self}")))
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err( invalid_coordinate( format!("latitude out of range [-90,90]: {lat}")))
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err( invalid_coordinate( format!("longitude out of range [-180,180]: {lon}")))
        }
        Ok(())
    }

    /// arithmetic per-axis midpoint (not the geodesic midpoint)
    pub fn midpoint (&self, other: &GeoPoint) -> GeoPoint {
        GeoPoint::from_lat_lon_degrees(
            (self.latitude_degrees() + other.latitude_degrees()) / 2.0,
            (self.longitude_degrees() + other.longitude_degrees()) / 2.0
        )
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(lat: {:.8}, lon: {:.8})", self.latitude_degrees(), self.longitude_degrees())
    }
}

impl SerializeTrait for GeoPoint {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> where S: Serializer {
        let mut state = serializer.serialize_struct("GeoPoint", 2)?;
        state.serialize_field("lat", &self.latitude_degrees())?;
        state.serialize_field("lon", &self.longitude_degrees())?;
        state.end()
    }
}

impl_deserialize_struct!{ GeoPoint::from_lat_lon_degrees( lat | latitude | y, lon | longitude | x) }

/* #endregion GeoPoint */

/// great circle distance in kilometers on a sphere with radius [MEAN_EARTH_RADIUS_KM]
pub fn haversine_distance_km (p1: &GeoPoint, p2: &GeoPoint) -> f64 {
    let lat1 = rad( p1.latitude_degrees());
    let lat2 = rad( p2.latitude_degrees());
    let dlat = lat2 - lat1;
    let dlon = rad( p2.longitude_degrees()) - rad( p1.longitude_degrees());

    let a = sin2(dlat/2.0) + cos(lat1) * cos(lat2) * sin2(dlon/2.0);
    let c = 2.0 * atan2( sqrt(a), sqrt(1.0 - a));

    MEAN_EARTH_RADIUS_KM * c
}
