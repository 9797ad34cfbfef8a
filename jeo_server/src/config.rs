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

use std::path::PathBuf;
use serde::{Serialize,Deserialize};
use jeo_common::BoundingBox;
use jeo_analysis::{SampleSource, source::{DEFAULT_BAND, DEFAULT_COLLECTION, DEFAULT_IMAGE_WIDTH}};

pub const CATALOG_URL: &str = "https://data.earth.jaxa.jp/app/mcp/catalog.md";

#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub name: String,
    pub catalog_url: String,
    /// root for tool outputs without explicit output path
    pub temp_dir: PathBuf,
    pub plan_dir: PathBuf,

    pub default_collection: String,
    pub default_band: String,
    pub default_date_range: [String;2],
    pub default_bbox: BoundingBox<f64>,
    /// target width of rendered images in pixels
    pub image_width: u32,

    /// local raster used instead of remote retrieval. Sample data is used if not set or not readable
    pub raster_file: Option<PathBuf>,
    pub sample: SampleSource,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            name: "JAXA_Earth_API_Assistant".into(),
            catalog_url: CATALOG_URL.into(),
            temp_dir: PathBuf::from("temp"),
            plan_dir: PathBuf::from("_docs/plans"),
            default_collection: DEFAULT_COLLECTION.into(),
            default_band: DEFAULT_BAND.into(),
            default_date_range: ["2021-01-01T00:00:00".into(), "2021-01-01T00:00:00".into()],
            default_bbox: BoundingBox::new( 135.0, 37.5, 140.0, 42.5),
            image_width: DEFAULT_IMAGE_WIDTH,
            raster_file: None,
            sample: SampleSource::default(),
        }
    }
}
