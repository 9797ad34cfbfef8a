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

use ndarray::Array2;
use serde::{Serialize,Deserialize};
use strum::{Display, EnumString};
use crate::{raster::Raster, errors::{Result, JeoAnalysisError, insufficient_data}};

/// summary statistics over all finite raster cells. `std` is the population standard deviation,
/// quantiles are linearly interpolated between closest ranks
#[derive(Debug,Clone,Copy,Serialize,Deserialize,PartialEq)]
pub struct SpatialStats {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub q25: f64,
    pub q75: f64,
}

impl SpatialStats {
    pub fn from_values (values: impl IntoIterator<Item=f64>) -> Result<Self> {
        let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return Err( insufficient_data("no finite values"))
        }
        sorted.sort_by( f64::total_cmp);

        let n = sorted.len() as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let variance = sorted.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;

        Ok( SpatialStats {
            mean,
            std: variance.sqrt(),
            min: sorted[0],
            max: sorted[sorted.len()-1],
            median: percentile( &sorted, 50.0),
            q25: percentile( &sorted, 25.0),
            q75: percentile( &sorted, 75.0),
        })
    }

    pub fn from_raster (raster: &Raster) -> Result<Self> {
        Self::from_values( raster.data.iter().copied())
    }
}

/// percentile `p` (0..100) of an ascending sorted, non-empty slice
pub fn percentile (sorted: &[f64], p: f64) -> f64 {
    let rank = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/* #region temporal statistics *************************************************************************************/

/// per cell reduction over a time series of rasters
#[derive(Debug,Clone,Copy,Default,PartialEq,Eq,Serialize,Deserialize,Display,EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TemporalMethod {
    #[default] Mean,
    Max,
    Min,
    Std,
    Median,
}

impl TemporalMethod {
    /// reduce a non-empty set of finite values. The slice gets reordered
    fn reduce (&self, values: &mut [f64]) -> f64 {
        let n = values.len() as f64;
        match self {
            TemporalMethod::Mean => values.iter().sum::<f64>() / n,
            TemporalMethod::Max => values.iter().copied().fold( f64::NEG_INFINITY, f64::max),
            TemporalMethod::Min => values.iter().copied().fold( f64::INFINITY, f64::min),
            TemporalMethod::Std => {
                let mean = values.iter().sum::<f64>() / n;
                (values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n).sqrt()
            }
            TemporalMethod::Median => {
                values.sort_by( f64::total_cmp);
                percentile( values, 50.0)
            }
        }
    }
}

/// reduce equally shaped rasters cell by cell. Non-finite values are skipped, cells without any finite value are NaN.
/// The result has the bounding box of the first raster
pub fn temporal_stats (rasters: &[Raster], method: TemporalMethod) -> Result<Raster> {
    let first = rasters.first().ok_or_else(|| insufficient_data("no rasters to reduce"))?;
    let shape = first.shape();
    if let Some(r) = rasters.iter().find(|r| r.shape() != shape) {
        return Err( JeoAnalysisError::InvalidDimensions( format!("raster {:?} does not match {:?}", r.shape(), shape)))
    }

    let mut values: Vec<f64> = Vec::with_capacity( rasters.len());
    let data = Array2::from_shape_fn( shape, |(i,j)| {
        values.clear();
        values.extend( rasters.iter().map(|r| r.data[[i,j]]).filter(|v| v.is_finite()));
        if values.is_empty() { f64::NAN } else { method.reduce( &mut values) }
    });

    Ok( Raster::new( data, first.bbox) )
}

/* #endregion temporal statistics */
