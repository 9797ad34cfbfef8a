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
use jeo_common::config::load_config_path;
use jeo_server::{ServerConfig, ToolContext, ask, dispatch};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "run the tool that matches a natural language request, e.g. '富士山周辺の標高データの統計'")]
pub struct Args {
    #[arg(short,long)]
    pub config: Option<PathBuf>,

    /// only show which tool would be called with which arguments
    #[arg(short,long)]
    pub dry_run: bool,

    #[arg(num_args=1.., required=true)]
    pub request: Vec<String>,
}

#[tokio::main]
async fn main()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let text = args.request.join(" ");

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty( &dispatch( &text))?);
        return Ok(())
    }

    let config: ServerConfig = match &args.config {
        Some(path) => load_config_path( path)?,
        None => ServerConfig::default()
    };
    let ctx = ToolContext::new( config);

    let result = ask( &ctx, &text).await;
    println!("{}", serde_json::to_string_pretty( &result)?);

    Ok(())
}
