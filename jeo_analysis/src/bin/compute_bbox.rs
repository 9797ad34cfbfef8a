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
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use jeo_common::{BboxMethod, CoordinateConfig, GeoPoint, config::DEFAULT_COORDINATES_FILE, geo::haversine_distance_km};
use jeo_analysis::pixels_per_unit;

#[derive(Parser, Debug)]
#[command(version, about, long_about = "bounding box of the circle that has the two given points as diameter")]
pub struct Args {
    /// points as `lat1 lon1 lat2 lon2` (taken from environment or coordinate file if omitted)
    #[arg(num_args=4, allow_hyphen_values=true)]
    pub points: Vec<f64>,

    #[arg(short,long, value_enum, default_value_t = BboxMethod::Geodesic)]
    pub method: BboxMethod,

    #[arg(long, default_value = DEFAULT_COORDINATES_FILE)]
    pub coordinates: PathBuf,

    /// also report the resolution for this target image width
    #[arg(short,long)]
    pub width: Option<u32>,

    /// print the bounding box as JSON array
    #[arg(long)]
    pub json: bool,
}

fn main()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let coords = if let [lat1, lon1, lat2, lon2] = args.points[..] {
        CoordinateConfig::new( GeoPoint::from_lat_lon_degrees( lat1, lon1), GeoPoint::from_lat_lon_degrees( lat2, lon2), args.method)
    } else {
        CoordinateConfig::resolve( |k| std::env::var(k).ok(), &args.coordinates)?.with_method( args.method)
    };
    coords.validate()?;

    let bbox = coords.bbox();
    if args.json {
        println!("{}", serde_json::to_string( &bbox.to_minmax_array())?);
    } else {
        println!("points:   {} {}", coords.point1, coords.point2);
        println!("distance: {:.3} km", haversine_distance_km( &coords.point1, &coords.point2));
        println!("method:   {}", coords.method);
        println!("bbox:     {bbox}");
        println!("  lon: {:.6} - {:.6}", bbox.west, bbox.east);
        println!("  lat: {:.6} - {:.6}", bbox.south, bbox.north);
    }

    if let Some(width) = args.width {
        println!("ppu:      {:.3}", pixels_per_unit( &bbox, width)?);
    }

    Ok(())
}
