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
use jeo_server::{ServerConfig, ToolContext, rpc::serve_stdio};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "JSON-RPC tool server on stdin/stdout")]
pub struct Args {
    /// RON server config (defaults are used if not set)
    #[arg(short,long)]
    pub config: Option<PathBuf>,
}

#[tokio::main]
async fn main()->Result<()> {
    // stdout carries protocol frames
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let args = Args::parse();
    let config: ServerConfig = match &args.config {
        Some(path) => load_config_path( path)?,
        None => ServerConfig::default()
    };

    let ctx = ToolContext::new( config);
    serve_stdio( &ctx).await?;

    Ok(())
}
