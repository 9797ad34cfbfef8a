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
use jeo_analysis::{Raster, SpatialStats, JeoAnalysisError, TemporalMethod, temporal_stats, stats::percentile};

#[test]
fn test_basic_stats() {
    let stats = SpatialStats::from_values( [4.0, 1.0, 3.0, 2.0]).unwrap();
    println!("{stats:?}");

    assert_eq!( stats.mean, 2.5);
    assert_eq!( stats.min, 1.0);
    assert_eq!( stats.max, 4.0);
    assert_eq!( stats.median, 2.5);
    assert!( (stats.q25 - 1.75).abs() < 1e-12);
    assert!( (stats.q75 - 3.25).abs() < 1e-12);
    assert!( (stats.std - 1.25f64.sqrt()).abs() < 1e-12);
}

#[test]
fn test_percentile_interpolation() {
    let sorted = [10.0, 20.0, 30.0, 40.0, 50.0];
    assert_eq!( percentile( &sorted, 0.0), 10.0);
    assert_eq!( percentile( &sorted, 50.0), 30.0);
    assert_eq!( percentile( &sorted, 100.0), 50.0);
    assert!( (percentile( &sorted, 10.0) - 14.0).abs() < 1e-12);

    assert_eq!( percentile( &[7.0], 25.0), 7.0);
}

#[test]
fn test_non_finite_ignored() {
    let raster = Raster::new( array![[1.0, f64::NAN], [3.0, f64::INFINITY]], None);
    let stats = SpatialStats::from_raster( &raster).unwrap();
    assert_eq!( stats.mean, 2.0);
    assert_eq!( stats.max, 3.0);
}

#[test]
fn test_insufficient_data() {
    match SpatialStats::from_values( Vec::<f64>::new()) {
        Err(JeoAnalysisError::InsufficientData(msg)) => println!("expected error: {msg}"),
        other => panic!("unexpected result: {other:?}")
    }
    assert!( SpatialStats::from_values( [f64::NAN, f64::NAN]).is_err());
}

#[test]
fn test_json_fields() {
    let stats = SpatialStats::from_values( [1.0, 2.0]).unwrap();
    let v = serde_json::to_value( &stats).unwrap();
    for k in ["mean","std","min","max","median","q25","q75"] {
        assert!( v.get(k).is_some(), "missing {k}");
    }
}

#[test]
fn test_temporal_reduction() {
    let t0 = Raster::new( array![[1.0, 2.0], [f64::NAN, 4.0]], None);
    let t1 = Raster::new( array![[3.0, 2.0], [f64::NAN, 8.0]], None);
    let t2 = Raster::new( array![[5.0, 2.0], [7.0, f64::NAN]], None);
    let series = [t0, t1, t2];

    let mean = temporal_stats( &series, TemporalMethod::Mean).unwrap();
    println!("mean: {:?}", mean.data);
    assert_eq!( mean.data[[0,0]], 3.0);
    assert_eq!( mean.data[[1,0]], 7.0); // only one finite value
    assert_eq!( mean.data[[1,1]], 6.0);

    assert_eq!( temporal_stats( &series, TemporalMethod::Max).unwrap().data[[0,0]], 5.0);
    assert_eq!( temporal_stats( &series, TemporalMethod::Min).unwrap().data[[1,1]], 4.0);
    assert_eq!( temporal_stats( &series, TemporalMethod::Median).unwrap().data[[0,0]], 3.0);
    assert_eq!( temporal_stats( &series, TemporalMethod::Median).unwrap().data[[1,1]], 6.0);

    let std = temporal_stats( &series, TemporalMethod::Std).unwrap();
    assert!( (std.data[[0,0]] - (8.0f64 / 3.0).sqrt()).abs() < 1e-12);
    assert_eq!( std.data[[0,1]], 0.0);

    let empty = Raster::new( array![[f64::NAN]], None);
    assert!( temporal_stats( &[empty], TemporalMethod::Mean).unwrap().data[[0,0]].is_nan());
}

#[test]
fn test_temporal_errors() {
    assert!( matches!( temporal_stats( &[], TemporalMethod::Mean), Err(JeoAnalysisError::InsufficientData(_))));

    let a = Raster::new( array![[1.0, 2.0]], None);
    let b = Raster::new( array![[1.0], [2.0]], None);
    assert!( matches!( temporal_stats( &[a, b], TemporalMethod::Max), Err(JeoAnalysisError::InvalidDimensions(_))));

    assert_eq!( "median".parse::<TemporalMethod>().unwrap(), TemporalMethod::Median);
    assert_eq!( TemporalMethod::default().to_string(), "mean");
    assert!( "average".parse::<TemporalMethod>().is_err());
}
