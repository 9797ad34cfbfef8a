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

//! raster to image rendering (heatmaps, banded contours and hillshading)
//!
//! All renderings use `origin=lower` semantics: raster row 0 ends up at the bottom of the image

use std::path::Path;
use image::{Rgb, RgbImage};
use ndarray::Array2;
use crate::{raster::Raster, stats::SpatialStats, errors::{Result, JeoAnalysisError}};

pub const CONTOUR_LEVELS: usize = 20;

/* #region colormap ************************************************************************************************/

// control points of the classic "hot" colormap (black - red - yellow - white)
const HOT_R: [(f64,f64);2] = [(0.0, 0.0416), (0.365079, 1.0)];
const HOT_G: [(f64,f64);2] = [(0.365079, 0.0), (0.746032, 1.0)];
const HOT_B: [(f64,f64);2] = [(0.746032, 0.0), (1.0, 1.0)];

fn ramp (t: f64, [(t0,v0),(t1,v1)]: [(f64,f64);2]) -> f64 {
    if t <= t0 { v0 }
    else if t >= t1 { v1 }
    else { v0 + (v1 - v0) * (t - t0) / (t1 - t0) }
}

/// map a normalized value `t` in [0,1] to a "hot" color
pub fn hot_color (t: f64) -> Rgb<u8> {
    let t = if t.is_finite() { t.clamp( 0.0, 1.0) } else { 0.0 };
    let c = |ctrl| (ramp( t, ctrl) * 255.0).round() as u8;
    Rgb([ c(HOT_R), c(HOT_G), c(HOT_B) ])
}

/* #endregion colormap */

fn check_renderable (raster: &Raster, scale: u32) -> Result<()> {
    if raster.is_empty() || scale == 0 {
        Err( JeoAnalysisError::InvalidDimensions( format!("cannot render {:?} raster with scale {scale}", raster.shape())))
    } else {
        Ok(())
    }
}

/// draw normalized values with `scale` x `scale` pixels per cell and row 0 at the bottom
fn render_cells<F> (norm: &Array2<f64>, scale: u32, color: F) -> RgbImage where F: Fn(usize,usize,f64)->Rgb<u8> {
    let (h, w) = norm.dim();
    RgbImage::from_fn( w as u32 * scale, h as u32 * scale, |x, y| {
        let j = (x / scale) as usize;
        let i = h - 1 - (y / scale) as usize;
        color( i, j, norm[[i,j]])
    })
}

pub fn heatmap_image (raster: &Raster, scale: u32) -> Result<RgbImage> {
    check_renderable( raster, scale)?;
    Ok( render_cells( &raster.normalized(), scale, |_,_,t| hot_color(t)) )
}

/// filled contour bands, i.e. the value range quantized into [`CONTOUR_LEVELS`] levels
pub fn contour_image (raster: &Raster, scale: u32) -> Result<RgbImage> {
    check_renderable( raster, scale)?;
    let levels = CONTOUR_LEVELS as f64;
    Ok( render_cells( &raster.normalized(), scale, |_,_,t| {
        let band = (t * levels).floor().min( levels - 1.0);
        hot_color( (band + 0.5) / levels)
    }))
}

/// lambertian hillshade of the raster surface (sun from `azimuth_deg` clockwise from north, `altitude_deg` above horizon),
/// colored with the heatmap colors. `z_factor` scales values relative to the cell size
pub fn hillshade_image (raster: &Raster, scale: u32, azimuth_deg: f64, altitude_deg: f64, z_factor: f64) -> Result<RgbImage> {
    check_renderable( raster, scale)?;
    let shade = hillshade( &raster.data, azimuth_deg, altitude_deg, z_factor);

    Ok( render_cells( &raster.normalized(), scale, |i,j,t| {
        let Rgb([r,g,b]) = hot_color(t);
        let s = 0.25 + 0.75 * shade[[i,j]];
        Rgb([ (r as f64 * s) as u8, (g as f64 * s) as u8, (b as f64 * s) as u8 ])
    }))
}

/// illumination in [0,1] per cell, using central differences (one-sided at the edges)
pub fn hillshade (data: &Array2<f64>, azimuth_deg: f64, altitude_deg: f64, z_factor: f64) -> Array2<f64> {
    let (h, w) = data.dim();
    let zenith = (90.0 - altitude_deg).to_radians();
    // convert from compass to math angle
    let azimuth = (360.0 - azimuth_deg + 90.0).to_radians();

    let at = |i: usize, j: usize| { let v = data[[i,j]]; if v.is_finite() { v } else { 0.0 } };

    Array2::from_shape_fn( (h, w), |(i,j)| {
        let (j0, j1) = (j.saturating_sub(1), (j+1).min(w-1));
        let (i0, i1) = (i.saturating_sub(1), (i+1).min(h-1));
        let dx = if j1 > j0 { (at(i,j1) - at(i,j0)) / (j1 - j0) as f64 } else { 0.0 };
        let dy = if i1 > i0 { (at(i1,j) - at(i0,j)) / (i1 - i0) as f64 } else { 0.0 };

        let slope = (z_factor * (dx*dx + dy*dy).sqrt()).atan();
        let aspect = dy.atan2( -dx);
        let v = zenith.cos() * slope.cos() + zenith.sin() * slope.sin() * (azimuth - aspect).cos();
        v.clamp( 0.0, 1.0)
    })
}

/* #region statistics chart ****************************************************************************************/

pub const CHART_BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
pub const CHART_WHISKER: Rgb<u8> = Rgb([0, 0, 0]);
pub const CHART_MEDIAN: Rgb<u8> = Rgb([0, 0, 160]);
pub const CHART_MEAN: Rgb<u8> = Rgb([0, 140, 0]);

/// box plot of spatial statistics: min/max whiskers, q25..q75 box with median line, mean line and a
/// mean ± std bar to the right of the box. Values grow upwards
pub fn stats_image (stats: &SpatialStats, width: u32, height: u32) -> Result<RgbImage> {
    if width < 16 || height < 16 {
        return Err( JeoAnalysisError::InvalidDimensions( format!("statistics chart too small: {width}x{height}")))
    }

    let margin = height / 10;
    let extent = (height - 1 - 2 * margin) as f64;
    let span = stats.max - stats.min;
    let to_y = |v: f64| -> u32 {
        let t = if span > 0.0 { (v - stats.min) / span } else { 0.5 };
        let t = if t.is_finite() { t.clamp( 0.0, 1.0) } else { 0.5 };
        height - 1 - margin - (t * extent).round() as u32
    };

    let (y_min, y_max) = (to_y( stats.min), to_y( stats.max));
    let (y_q25, y_q75) = (to_y( stats.q25), to_y( stats.q75));
    let (y_median, y_mean) = (to_y( stats.median), to_y( stats.mean));
    let (y_std_lo, y_std_hi) = (to_y( stats.mean - stats.std), to_y( stats.mean + stats.std));

    let cx = width / 2;
    let in_box = |x: u32| x >= width / 4 && x <= width * 5 / 8;
    let in_cap = |x: u32| x >= width * 3 / 8 && x <= width / 2 + width / 8;
    let std_x = width * 3 / 4;

    Ok( RgbImage::from_fn( width, height, |x, y| {
        if in_box(x) && y == y_median { CHART_MEDIAN }
        else if in_box(x) && y == y_mean { CHART_MEAN }
        else if in_box(x) && y >= y_q75 && y <= y_q25 { hot_color( 0.6) }
        else if x == cx && y >= y_max && y <= y_min { CHART_WHISKER }
        else if in_cap(x) && (y == y_min || y == y_max) { CHART_WHISKER }
        else if x == std_x && y >= y_std_hi && y <= y_std_lo { CHART_MEAN }
        else { CHART_BACKGROUND }
    }))
}

/* #endregion statistics chart */

pub fn save_rgb (img: &RgbImage, path: impl AsRef<Path>) -> Result<()> {
    Ok( img.save( path.as_ref())? )
}
