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

use jeo_common::{BoundingBox, GeoPoint};
use jeo_common::bbox::*;
use jeo_common::geo::haversine_distance_km;

// run with "cargo test test_xx -- --nocapture"

fn ueda_pair () -> (GeoPoint,GeoPoint) {
    ( GeoPoint::from_lat_lon_degrees( 36.38916397, 138.23623657), GeoPoint::from_lat_lon_degrees( 36.392, 138.258) )
}

fn sample_pairs () -> Vec<(GeoPoint,GeoPoint)> {
    vec![
        ueda_pair(),
        ( GeoPoint::from_lat_lon_degrees( 35.36, 138.73), GeoPoint::from_lat_lon_degrees( 35.36, 138.73) ),
        ( GeoPoint::from_lat_lon_degrees( -33.86, 151.21), GeoPoint::from_lat_lon_degrees( -37.81, 144.96) ),
        ( GeoPoint::from_lat_lon_degrees( 0.0, 0.0), GeoPoint::from_lat_lon_degrees( 0.0, 0.0) ),
        ( GeoPoint::from_lat_lon_degrees( 64.1, -21.9), GeoPoint::from_lat_lon_degrees( 64.1, -22.9) ),
    ]
}

fn assert_close (a: f64, b: f64, eps: f64) {
    assert!( (a - b).abs() <= eps, "{a} != {b} (eps {eps})");
}

#[test]
fn test_flat_literal_formula() {
    let (p1,p2) = ueda_pair();
    let bbox = compute_bbox_flat( &p1, &p2);
    println!("flat bbox: {bbox}");

    let c_lat = (36.38916397 + 36.392) / 2.0;
    let c_lon = (138.23623657 + 138.258) / 2.0;
    let r_lat = (36.38916397f64 - 36.392).abs() * 0.6 * 1.2;
    let r_lon = (138.23623657f64 - 138.258).abs() * 0.6 * 1.2;

    assert_close( bbox.west, c_lon - r_lon, 1e-12);
    assert_close( bbox.south, c_lat - r_lat, 1e-12);
    assert_close( bbox.east, c_lon + r_lon, 1e-12);
    assert_close( bbox.north, c_lat + r_lat, 1e-12);
}

#[test]
fn test_flat_contains_inputs() {
    let (p1,p2) = ueda_pair();
    let bbox = compute_bbox_flat( &p1, &p2);

    for p in [p1,p2] {
        assert!( bbox.contains( p.longitude_degrees(), p.latitude_degrees()), "{p} not in {bbox}");
    }
    assert!( bbox.west <= bbox.east && bbox.south <= bbox.north);
}

#[test]
fn test_geodesic_formula() {
    let (p1,p2) = ueda_pair();
    let bbox = compute_bbox_geodesic( &p1, &p2);
    println!("geodesic bbox: {bbox}");

    let radius = (haversine_distance_km( &p1, &p2) / 2.0 / 111.0).max(0.01);
    let (c_lon, c_lat) = bbox.center();
    assert_close( c_lon, (138.23623657 + 138.258) / 2.0, 1e-12);
    assert_close( c_lat, (36.38916397 + 36.392) / 2.0, 1e-12);
    assert_close( bbox.width(), 2.0 * radius, 1e-12);
    assert_close( bbox.height(), 2.0 * radius, 1e-12);

    // the 0.01 degree floor is less than half the longitude gap, so the western point is not covered
    assert!( !bbox.contains( 138.23623657, 36.38916397));
    assert!( bbox.contains( c_lon, c_lat));

    let flat = compute_bbox_flat( &p1, &p2);
    for p in [p1,p2] {
        assert!( flat.contains( p.longitude_degrees(), p.latitude_degrees()), "{p} not in {flat}");
    }
}

#[test]
fn test_symmetry() {
    for (p1,p2) in sample_pairs() {
        for method in [BboxMethod::Flat, BboxMethod::Geodesic] {
            let a = compute_bbox( &p1, &p2, method);
            let b = compute_bbox( &p2, &p1, method);
            for (x,y) in a.to_minmax_array().iter().zip( b.to_minmax_array().iter()) {
                assert_close( *x, *y, 1e-12);
            }
        }
    }
}

#[test]
fn test_geodesic_floor() {
    for (p1,p2) in sample_pairs() {
        let bbox = compute_bbox_geodesic( &p1, &p2);
        assert!( bbox.height() >= 0.02 - 1e-12, "lat span {} below floor for {p1} {p2}", bbox.height());
        assert!( bbox.width() >= 0.02 - 1e-12, "lon span {} below floor for {p1} {p2}", bbox.width());
        assert!( !bbox.is_degenerate());
    }

    // coincident points use exactly the floor
    let p = GeoPoint::from_lat_lon_degrees( 35.36, 138.73);
    let bbox = compute_bbox_geodesic( &p, &p);
    assert_close( bbox.width(), 0.02, 1e-12);
    assert_close( bbox.height(), 0.02, 1e-12);
}

#[test]
fn test_flat_degenerate() {
    let p = GeoPoint::from_lat_lon_degrees( 36.38916397, 138.23623657);
    let bbox = compute_bbox_flat( &p, &p);
    println!("degenerate flat bbox: {bbox:?}");

    assert_eq!( bbox.west, bbox.east);
    assert_eq!( bbox.south, bbox.north);
    assert!( bbox.is_degenerate());
}

#[test]
fn test_flat_axis_independence() {
    // points separated only in longitude yield a box without latitude extent
    let p1 = GeoPoint::from_lat_lon_degrees( 36.0, 138.0);
    let p2 = GeoPoint::from_lat_lon_degrees( 36.0, 139.0);
    let bbox = compute_bbox_flat( &p1, &p2);

    assert_eq!( bbox.height(), 0.0);
    assert_close( bbox.width(), 2.0 * 0.72, 1e-12);
}

#[test]
fn test_determinism() {
    for (p1,p2) in sample_pairs() {
        for method in [BboxMethod::Flat, BboxMethod::Geodesic] {
            let a = compute_bbox( &p1, &p2, method);
            let b = compute_bbox( &p1, &p2, method);
            let bits_a: Vec<u64> = a.to_minmax_array().iter().map(|v| v.to_bits()).collect();
            let bits_b: Vec<u64> = b.to_minmax_array().iter().map(|v| v.to_bits()).collect();
            assert_eq!( bits_a, bits_b);
        }
    }
}

#[test]
fn test_nan_propagates() {
    let p1 = GeoPoint::from_lat_lon_degrees( f64::NAN, 138.0);
    let p2 = GeoPoint::from_lat_lon_degrees( 36.0, 139.0);

    let bbox = compute_bbox_geodesic( &p1, &p2);
    assert!( !bbox.is_finite());

    let bbox = compute_bbox_flat( &p1, &p2);
    assert!( !bbox.is_finite());
}

#[test]
fn test_method_selector() {
    let (p1,p2) = ueda_pair();
    assert_eq!( compute_bbox( &p1, &p2, BboxMethod::Flat), compute_bbox_flat( &p1, &p2));
    assert_eq!( compute_bbox( &p1, &p2, BboxMethod::Geodesic), compute_bbox_geodesic( &p1, &p2));
    assert_eq!( BboxMethod::default(), BboxMethod::Geodesic);

    assert_eq!( "flat".parse::<BboxMethod>().unwrap(), BboxMethod::Flat);
    assert_eq!( BboxMethod::Geodesic.to_string(), "geodesic");
    assert_eq!( serde_json::to_string( &BboxMethod::Flat).unwrap(), "\"flat\"");
}

#[test]
fn test_concurrent_use() {
    let (p1,p2) = ueda_pair();
    let expected = compute_bbox_geodesic( &p1, &p2);

    let handles: Vec<_> = (0..4).map(|_| {
        std::thread::spawn( move || compute_bbox( &p1, &p2, BboxMethod::Geodesic))
    }).collect();

    for h in handles {
        assert_eq!( h.join().unwrap(), expected);
    }
}
