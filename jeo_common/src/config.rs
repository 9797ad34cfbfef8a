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

//! explicit configuration of the two input points
//! Coordinates are resolved once at application start (environment first, then a config file) and then passed
//! into library functions - nothing in the geometry code reads ambient process state.

use std::path::Path;
use serde::{Serialize,Deserialize};
use tracing::debug;

use crate::errors::{Result, JeoCommonError, config_error, invalid_coordinate};
use crate::fs::{extension, filepath_contents_as_string};
use crate::geo::GeoPoint;
use crate::bbox::BboxMethod;
use crate::BoundingBox;

pub const POINT1_LAT: &str = "POINT1_LAT";
pub const POINT1_LON: &str = "POINT1_LON";
pub const POINT2_LAT: &str = "POINT2_LAT";
pub const POINT2_LON: &str = "POINT2_LON";

/// the default coordinate file location relative to the working dir
pub const DEFAULT_COORDINATES_FILE: &str = "config/coordinates.json";

/// load a serde deserializable config from a file. Files with a `json` extension are parsed as JSON,
/// everything else as RON
pub fn load_config_path<C,P> (path: P) -> Result<C> where C: for <'a> Deserialize<'a>, P: AsRef<Path> {
    let path = path.as_ref();
    let data = filepath_contents_as_string( &path)?;

    match extension( &path) {
        Some("json") => Ok( serde_json::from_str( &data)? ),
        _ => Ok( ron::de::from_str( &data)? )
    }
}

#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
pub struct CoordinateConfig {
    pub point1: GeoPoint,
    pub point2: GeoPoint,

    #[serde(default)]
    pub method: BboxMethod,
}

impl CoordinateConfig {
    pub fn new (point1: GeoPoint, point2: GeoPoint, method: BboxMethod) -> Self {
        CoordinateConfig { point1, point2, method }
    }

    /// read coordinates through the provided variable lookup (normally `|k| std::env::var(k).ok()`).
    /// Returns `Ok(None)` unless all four variables are set
    pub fn from_env_lookup<F> (lookup: F) -> Result<Option<Self>> where F: Fn(&str)->Option<String> {
        let vals: Vec<Option<String>> = [POINT1_LAT, POINT1_LON, POINT2_LAT, POINT2_LON].iter().map(|k| lookup(*k)).collect();
        if vals.iter().any(|v| v.as_ref().map_or( true, |s| s.trim().is_empty())) {
            return Ok(None)
        }

        let mut degs = [0.0f64; 4];
        for (i, (name, v)) in [POINT1_LAT, POINT1_LON, POINT2_LAT, POINT2_LON].iter().zip( vals.iter()).enumerate() {
            let s = v.as_deref().unwrap_or_default().trim();
            degs[i] = s.parse::<f64>().map_err(|_| invalid_coordinate( format!("{name}='{s}' is not a number")))?;
        }

        Ok( Some( CoordinateConfig::new(
            GeoPoint::from_lat_lon_degrees( degs[0], degs[1]),
            GeoPoint::from_lat_lon_degrees( degs[2], degs[3]),
            BboxMethod::default()
        )))
    }

    pub fn from_file (path: impl AsRef<Path>) -> Result<Self> {
        load_config_path( path)
    }

    /// resolve coordinates from the environment lookup first, then from `path` if that exists
    pub fn resolve<F> (lookup: F, path: impl AsRef<Path>) -> Result<Self> where F: Fn(&str)->Option<String> {
        if let Some(config) = Self::from_env_lookup( lookup)? {
            debug!("coordinates from environment: {} {}", config.point1, config.point2);
            return Ok(config)
        }

        let path = path.as_ref();
        if path.is_file() {
            let config = Self::from_file( path)?;
            debug!("coordinates from {path:?}: {} {}", config.point1, config.point2);
            return Ok(config)
        }

        Err( JeoCommonError::MissingCoordinates(
            format!("set {POINT1_LAT}, {POINT1_LON}, {POINT2_LAT}, {POINT2_LON} or provide {path:?}")))
    }

    pub fn with_method (mut self, method: BboxMethod) -> Self {
        self.method = method;
        self
    }

    /// check both points. All-zero coordinates are the "not configured" marker of legacy config files
    pub fn validate (&self) -> Result<()> {
        self.point1.validate()?;
        self.point2.validate()?;

        let all_zero = [self.point1, self.point2].iter().all(|p| p.latitude_degrees() == 0.0 && p.longitude_degrees() == 0.0);
        if all_zero {
            return Err( config_error("both points are at (0,0) - coordinates are not configured"))
        }
        Ok(())
    }

    pub fn bbox (&self) -> BoundingBox<f64> {
        crate::bbox::compute_bbox( &self.point1, &self.point2, self.method)
    }
}
