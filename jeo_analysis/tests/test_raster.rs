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

use ndarray::array;
use jeo_common::BoundingBox;
use jeo_analysis::{Raster, JeoAnalysisError};

#[test]
fn test_kelvin_conversion() {
    let mut raster = Raster::new( array![[293.15, 303.15], [f64::NAN, 298.15]], None);
    assert!( raster.to_celsius_if_kelvin());
    assert!( (raster.data[[0,0]] - 20.0).abs() < 1e-9);
    assert!( (raster.data[[0,1]] - 30.0).abs() < 1e-9);
    assert!( raster.data[[1,0]].is_nan());

    // already Celsius
    let mut raster = Raster::new( array![[20.0, 35.0]], None);
    assert!( !raster.to_celsius_if_kelvin());
    assert_eq!( raster.data, array![[20.0, 35.0]]);
}

#[test]
fn test_value_range() {
    let raster = Raster::new( array![[f64::NAN, 2.0], [-1.0, 5.0]], None);
    assert_eq!( raster.value_range(), Some((-1.0, 5.0)));

    let raster = Raster::new( array![[f64::NAN]], None);
    assert_eq!( raster.value_range(), None);
}

#[test]
fn test_normalized() {
    let raster = Raster::new( array![[0.0, 5.0, 10.0]], None);
    assert_eq!( raster.normalized(), array![[0.0, 0.5, 1.0]]);

    let flat = Raster::new( array![[3.0, 3.0], [3.0, 3.0]], None);
    assert!( flat.normalized().iter().all(|v| *v == 0.0));
}

#[test]
fn test_tiff_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lst.tif");

    let raster = Raster::from_shape_vec( 2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.5]).unwrap();
    raster.save_tiff( &path).unwrap();

    let loaded = Raster::open_tiff( &path).unwrap();
    assert_eq!( loaded.shape(), (2,3));
    assert_eq!( loaded.data, raster.data);
    assert!( loaded.bbox.is_none());
}

#[test]
fn test_tiff_path_check() {
    let dir = tempfile::tempdir().unwrap();
    let raster = Raster::new( array![[1.0]], None);
    match raster.save_tiff( dir.path().join("lst.png")) {
        Err(JeoAnalysisError::IllegalArgument(msg)) => println!("expected error: {msg}"),
        other => panic!("unexpected result: {other:?}")
    }
}
