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

//! raster analysis for Earth observation data: statistics, heatmaps, heightmaps and terrain exports

mod errors;
pub use errors::{Result, JeoAnalysisError, op_failed, invalid_bbox, insufficient_data};

pub mod raster;
pub use raster::Raster;

pub mod source;
pub use source::{pixels_per_unit, ImageQuery, RasterSource, SampleSource, TiffSource, fetch_or_sample};

pub mod stats;
pub use stats::{SpatialStats, TemporalMethod, temporal_stats};

pub mod render;
pub mod heightmap;
pub mod texture;

pub mod pipeline;
pub use pipeline::{AnalysisConfig, AnalysisReport, run_analysis};
