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

//! where rasters come from
//!
//! Remote retrieval through the vendor image API is outside of this crate. Consumers implement [`RasterSource`]
//! for it, we provide a deterministic synthetic [`SampleSource`] and a local [`TiffSource`]

use std::path::PathBuf;
use async_trait::async_trait;
use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Serialize,Deserialize};
use tracing::{info,warn};
use jeo_common::BoundingBox;
use crate::{raster::Raster, errors::{Result, invalid_bbox}};

pub const DEFAULT_COLLECTION: &str = "JAXA.EORC_ALOS.PRISM_AW3D30.v3.2_global";
pub const DEFAULT_BAND: &str = "DSM";
pub const DEFAULT_IMAGE_WIDTH: u32 = 300;

/// image resolution for a requested target width in pixels. This is the one place where a zero-width
/// bounding box would turn into a division by zero
pub fn pixels_per_unit (bbox: &BoundingBox<f64>, target_width: u32) -> Result<f64> {
    let width = bbox.width();
    if !width.is_finite() || width <= 0.0 {
        return Err( invalid_bbox( format!("longitude span of {bbox} is {width}")))
    }
    Ok( target_width as f64 / width )
}

/// what to retrieve from an image collection
#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
pub struct ImageQuery {
    pub collection: String,
    pub band: String,
    /// `[start,end]` as ISO date-time strings
    pub date_range: [String;2],
    pub bbox: BoundingBox<f64>,
    pub target_width: u32,
}

impl ImageQuery {
    pub fn new (collection: impl ToString, band: impl ToString, date_range: [String;2], bbox: BoundingBox<f64>, target_width: u32) -> Self {
        ImageQuery { collection: collection.to_string(), band: band.to_string(), date_range, bbox, target_width }
    }

    pub fn ppu (&self) -> Result<f64> {
        pixels_per_unit( &self.bbox, self.target_width)
    }
}

#[async_trait]
pub trait RasterSource: Send + Sync {
    fn name (&self) -> String;

    async fn fetch (&self, query: &ImageQuery) -> Result<Raster>;
}

/// synthetic temperature grid: uniform 20..35°C noise with a heat island bump of up to +5°C towards the center
#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
#[serde(default)]
pub struct SampleSource {
    pub grid_size: usize,
    pub seed: u64,
}

impl Default for SampleSource {
    fn default() -> Self {
        SampleSource { grid_size: 100, seed: 42 }
    }
}

impl SampleSource {
    pub fn generate (&self, bbox: Option<BoundingBox<f64>>) -> Raster {
        let n = self.grid_size;
        let mut rng = StdRng::seed_from_u64( self.seed);
        let mut data = Array2::<f64>::zeros( (n, n));
        data.mapv_inplace(|_| rng.random_range( 20.0..35.0));

        let c = (n / 2) as f64;
        for ((i,j), v) in data.indexed_iter_mut() {
            let d = ((i as f64 - c).powi(2) + (j as f64 - c).powi(2)).sqrt();
            if d < c {
                *v += (1.0 - d / c) * 5.0;
            }
        }

        Raster { data, bbox }
    }
}

#[async_trait]
impl RasterSource for SampleSource {
    fn name (&self) -> String { format!("sample(grid={},seed={})", self.grid_size, self.seed) }

    async fn fetch (&self, query: &ImageQuery) -> Result<Raster> {
        Ok( self.generate( Some(query.bbox)) )
    }
}

/// first band of a local TIFF file, e.g. a previously downloaded collection image
#[derive(Debug,Clone)]
pub struct TiffSource {
    pub path: PathBuf,
}

impl TiffSource {
    pub fn new (path: impl Into<PathBuf>) -> Self {
        TiffSource { path: path.into() }
    }
}

#[async_trait]
impl RasterSource for TiffSource {
    fn name (&self) -> String { format!("tiff({:?})", self.path) }

    async fn fetch (&self, query: &ImageQuery) -> Result<Raster> {
        let path = self.path.clone();
        let raster = tokio::task::spawn_blocking( move || Raster::open_tiff( path)).await
            .map_err(|e| crate::errors::op_failed( format!("TIFF reader task failed: {e}")))??;
        Ok( raster.with_bbox( query.bbox) )
    }
}

/// fetch from `source`, falling back to `fallback` sample data if that fails
pub async fn fetch_or_sample (source: &dyn RasterSource, fallback: &SampleSource, query: &ImageQuery) -> (Raster,bool) {
    match source.fetch( query).await {
        Ok(raster) => {
            info!("fetched {:?} from {}", raster.shape(), source.name());
            (raster, false)
        }
        Err(e) => {
            warn!("failed to fetch from {}: {e}, using sample data", source.name());
            (fallback.generate( Some(query.bbox)), true)
        }
    }
}
