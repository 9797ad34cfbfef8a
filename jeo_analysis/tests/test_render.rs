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

use image::Rgb;
use ndarray::array;
use jeo_analysis::{Raster, SpatialStats, render::*};

#[test]
fn test_hot_colormap() {
    assert_eq!( hot_color( 0.0), Rgb([11,0,0]));
    assert_eq!( hot_color( 1.0), Rgb([255,255,255]));
    assert_eq!( hot_color( f64::NAN), hot_color( 0.0));

    // red saturates before green, green before blue
    let Rgb([r,g,b]) = hot_color( 0.5);
    println!("hot(0.5) = {r},{g},{b}");
    assert_eq!( r, 255);
    assert!( g > 0 && g < 255);
    assert_eq!( b, 0);
}

#[test]
fn test_heatmap_origin_lower() {
    // row 0 is cold, row 1 is hot
    let raster = Raster::new( array![[0.0, 0.0], [1.0, 1.0]], None);
    let img = heatmap_image( &raster, 3).unwrap();
    assert_eq!( img.dimensions(), (6,6));

    assert_eq!( *img.get_pixel( 0, 0), hot_color( 1.0)); // top
    assert_eq!( *img.get_pixel( 5, 5), hot_color( 0.0)); // bottom
}

#[test]
fn test_contour_bands() {
    let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
    let raster = Raster::from_shape_vec( 1, 100, values).unwrap();
    let img = contour_image( &raster, 1).unwrap();

    let mut colors: Vec<Rgb<u8>> = img.pixels().copied().collect();
    colors.dedup();
    println!("{} distinct bands", colors.len());
    assert!( colors.len() <= CONTOUR_LEVELS);
    assert!( colors.len() > CONTOUR_LEVELS / 2);
}

#[test]
fn test_invalid_render() {
    let raster = Raster::new( array![[1.0]], None);
    assert!( heatmap_image( &raster, 0).is_err());

    let empty = Raster::from_shape_vec( 0, 0, vec![]).unwrap();
    assert!( contour_image( &empty, 2).is_err());
}

#[test]
fn test_hillshade() {
    let flat = array![[5.0, 5.0, 5.0], [5.0, 5.0, 5.0]];
    let shade = hillshade( &flat, 315.0, 45.0, 1.0);
    let expected = 45f64.to_radians().sin();
    assert!( shade.iter().all(|v| (v - expected).abs() < 1e-12));

    let slope = array![[0.0, 1.0, 2.0, 3.0], [0.0, 1.0, 2.0, 3.0]];
    let shade = hillshade( &slope, 315.0, 45.0, 1.0);
    assert!( shade.iter().all(|v| *v >= 0.0 && *v <= 1.0));

    let img = hillshade_image( &Raster::new( slope, None), 2, 315.0, 45.0, 1.0).unwrap();
    assert_eq!( img.dimensions(), (8,4));
}

#[test]
fn test_stats_chart() {
    let stats = SpatialStats { mean: 25.0, std: 2.0, min: 20.0, max: 30.0, median: 24.0, q25: 22.0, q75: 27.0 };
    let img = stats_image( &stats, 200, 110).unwrap();
    assert_eq!( (img.width(), img.height()), (200, 110));

    // margin is 11 px, value range maps onto rows 98 (min) .. 11 (max)
    assert_eq!( *img.get_pixel( 0, 0), CHART_BACKGROUND);
    assert_eq!( *img.get_pixel( 100, 11), CHART_WHISKER);
    assert_eq!( *img.get_pixel( 100, 98), CHART_WHISKER);
    assert_eq!( *img.get_pixel( 60, 98 - 35), CHART_MEDIAN); // median 24 is 40% of the range
    assert_eq!( *img.get_pixel( 60, 98 - 44), CHART_MEAN);
    assert_eq!( *img.get_pixel( 60, 98 - 26), hot_color( 0.6)); // inside the q25..q75 box
    assert_eq!( *img.get_pixel( 150, 98 - 44), CHART_MEAN); // std bar

    // constant data is drawn at mid height
    let flat = SpatialStats { mean: 5.0, std: 0.0, min: 5.0, max: 5.0, median: 5.0, q25: 5.0, q75: 5.0 };
    assert!( stats_image( &flat, 32, 32).is_ok());

    assert!( stats_image( &stats, 8, 100).is_err());
}
