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

//! the six step temperature analysis: bounding box, retrieval, statistics, 2D rendering, surface shading and heightmap

use std::path::{Path,PathBuf};
use serde::{Serialize,Deserialize};
use tracing::{info,warn};
use jeo_common::{BoundingBox, CoordinateConfig, fs::{ensure_dir, path_to_lossy_string, store_json_in_dir}};
use crate::{
    errors::Result,
    heightmap::{write_temperature_heightmap, HeightmapMetadata},
    render::{contour_image, heatmap_image, hillshade_image},
    source::{fetch_or_sample, ImageQuery, RasterSource, SampleSource},
    stats::SpatialStats,
};

pub const SUMMER_2024: [&str;2] = ["2024-06-01T00:00:00", "2024-08-31T23:59:59"];
pub const LST_COLLECTION: &str = "JAXA.EORC_ALOS.LST_*";

#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
#[serde(default)]
pub struct ShadingConfig {
    pub azimuth: f64,
    pub altitude: f64,
    pub z_factor: f64,
}

impl Default for ShadingConfig {
    fn default() -> Self {
        ShadingConfig { azimuth: 315.0, altitude: 45.0, z_factor: 1.0 }
    }
}

#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    pub output_dir: PathBuf,
    pub collection: String,
    pub band: String,
    pub date_range: [String;2],
    /// target image width in pixels, the resolution is derived from it
    pub image_width: u32,
    /// pixels per raster cell in rendered images
    pub render_scale: u32,
    pub shading: ShadingConfig,
    /// used when retrieval fails
    pub sample: SampleSource,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            output_dir: PathBuf::from("output/temperature_analysis"),
            collection: LST_COLLECTION.into(),
            band: "LST".into(),
            date_range: SUMMER_2024.map(|s| s.to_string()),
            image_width: 500,
            render_scale: 4,
            shading: ShadingConfig::default(),
            sample: SampleSource::default(),
        }
    }
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct AnalysisReport {
    pub bbox: BoundingBox<f64>,
    pub source: String,
    pub used_sample_data: bool,
    pub converted_from_kelvin: bool,
    /// (rows,columns)
    pub shape: (usize,usize),
    pub statistics: SpatialStats,
    pub heightmap: HeightmapMetadata,
    pub files: Vec<String>,
}

pub async fn run_analysis (cfg: &AnalysisConfig, coords: &CoordinateConfig, source: &dyn RasterSource, out_dir: &Path) -> Result<AnalysisReport> {
    ensure_dir( out_dir)?;
    let mut files: Vec<String> = Vec::new();

    info!("[1/6] computing bounding box ({})", coords.method);
    let bbox = coords.bbox();
    info!("bounding box: {bbox}");

    info!("[2/6] retrieving {} {} for {:?}", cfg.collection, cfg.band, cfg.date_range);
    let query = ImageQuery::new( &cfg.collection, &cfg.band, cfg.date_range.clone(), bbox, cfg.image_width);
    let (mut raster, used_sample_data) = match query.ppu() {
        Ok(ppu) => {
            info!("resolution: {ppu:.1} pixels per degree");
            fetch_or_sample( source, &cfg.sample, &query).await
        }
        Err(e) => {
            warn!("{e}, using sample data");
            (cfg.sample.generate( Some(bbox)), true)
        }
    };
    let converted_from_kelvin = raster.to_celsius_if_kelvin();
    info!("data size: {:?}", raster.shape());

    info!("[3/6] computing statistics");
    let statistics = SpatialStats::from_raster( &raster)?;
    let path = store_json_in_dir( out_dir, "temperature_statistics.json", &statistics)?;
    files.push( path_to_lossy_string( &path));

    info!("[4/6] rendering 2D heatmap and contours");
    for (name, img) in [
        ("temperature_2d_heatmap.png", heatmap_image( &raster, cfg.render_scale)?),
        ("temperature_contour.png", contour_image( &raster, cfg.render_scale)?),
    ] {
        let path = out_dir.join(name);
        img.save( &path)?;
        files.push( path_to_lossy_string( &path));
    }

    info!("[5/6] rendering surface shading");
    let sh = &cfg.shading;
    let path = out_dir.join("temperature_hillshade.png");
    hillshade_image( &raster, cfg.render_scale, sh.azimuth, sh.altitude, sh.z_factor)?.save( &path)?;
    files.push( path_to_lossy_string( &path));

    info!("[6/6] generating heightmap");
    let (path, heightmap) = write_temperature_heightmap( &raster, out_dir)?;
    files.push( path_to_lossy_string( &path));
    files.push( path_to_lossy_string( out_dir.join("temperature_heightmap_metadata.json")));

    let report = AnalysisReport {
        bbox,
        source: if used_sample_data { cfg.sample.name() } else { source.name() },
        used_sample_data,
        converted_from_kelvin,
        shape: raster.shape(),
        statistics,
        heightmap,
        files,
    };
    store_json_in_dir( out_dir, "analysis_report.json", &report)?;
    info!("analysis written to {out_dir:?}");

    Ok(report)
}
