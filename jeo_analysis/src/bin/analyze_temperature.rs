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
use jeo_common::{BboxMethod, CoordinateConfig, config::{DEFAULT_COORDINATES_FILE, load_config_path}};
use jeo_analysis::{AnalysisConfig, RasterSource, TiffSource, run_analysis};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "temperature distribution analysis for the region spanned by two points")]
pub struct Args {
    /// RON analysis config (defaults are used if not set)
    #[arg(short,long)]
    pub config: Option<PathBuf>,

    /// coordinate file used if the POINT{1,2}_{LAT,LON} environment variables are not set
    #[arg(long, default_value = DEFAULT_COORDINATES_FILE)]
    pub coordinates: PathBuf,

    /// bounding box method (overrides the coordinate config)
    #[arg(short,long, value_enum)]
    pub method: Option<BboxMethod>,

    /// local TIFF to analyze instead of synthetic sample data
    #[arg(short,long)]
    pub tiff: Option<PathBuf>,

    #[arg(short,long)]
    pub output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut coords = CoordinateConfig::resolve( |k| std::env::var(k).ok(), &args.coordinates)?;
    if let Some(method) = args.method { coords = coords.with_method( method); }
    coords.validate()?;

    let cfg: AnalysisConfig = match &args.config {
        Some(path) => load_config_path( path)?,
        None => AnalysisConfig::default()
    };
    let out_dir = args.output_dir.clone().unwrap_or_else(|| cfg.output_dir.clone());

    let source: Box<dyn RasterSource> = match &args.tiff {
        Some(path) => Box::new( TiffSource::new( path)),
        None => Box::new( cfg.sample.clone())
    };

    let report = run_analysis( &cfg, &coords, source.as_ref(), &out_dir).await?;

    println!("bounding box: {}", report.bbox);
    println!("data: {:?} from {}", report.shape, report.source);
    let s = &report.statistics;
    for (k,v) in [("mean",s.mean),("std",s.std),("min",s.min),("max",s.max),("median",s.median),("q25",s.q25),("q75",s.q75)] {
        println!("  {k:>6}: {v:.2}°C");
    }
    for f in &report.files { println!("  -> {f}"); }

    Ok(())
}
