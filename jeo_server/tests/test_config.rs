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
#![allow(unused)]

use std::path::PathBuf;
use jeo_common::config::load_config_path;
use jeo_server::ServerConfig;

#[test]
fn test_default_config_file() {
    let path = PathBuf::from( env!("CARGO_MANIFEST_DIR")).join("configs/jeo_server.ron");
    let config: ServerConfig = load_config_path( &path).unwrap();
    println!("{config:#?}");
    assert_eq!( config, ServerConfig::default());
}

#[test]
fn test_partial_config() {
    let config: ServerConfig = ron::from_str( r#"(image_width: 640, raster_file: Some("lst.tif"))"#).unwrap();
    assert_eq!( config.image_width, 640);
    assert_eq!( config.raster_file, Some( PathBuf::from("lst.tif")));
    assert_eq!( config.default_band, "DSM");

    let config: ServerConfig = serde_json::from_str( r#"{ "temp_dir": "/tmp/jeo", "sample": { "seed": 3 } }"#).unwrap();
    assert_eq!( config.temp_dir, PathBuf::from("/tmp/jeo"));
    assert_eq!( config.sample.seed, 3);
    assert_eq!( config.sample.grid_size, 100);
}
