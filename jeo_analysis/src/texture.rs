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

use std::path::Path;
use image::{Rgb, RgbImage};
use ndarray::Array2;
use serde::{Serialize,Deserialize};
use jeo_common::fs::{ensure_dir, path_to_lossy_string};
use crate::{raster::Raster, errors::{Result, JeoAnalysisError}};

#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
pub struct TextureMaps {
    pub output_dir: String,
    pub diffuse: String,
    pub normal: String,
}

fn rgb_from_grid<F> (h: usize, w: usize, f: F) -> RgbImage where F: Fn(usize,usize)->Rgb<u8> {
    RgbImage::from_fn( w as u32, h as u32, |x, y| f( y as usize, x as usize))
}

/// gray RGB image of the normalized raster values
pub fn diffuse_map (raster: &Raster) -> RgbImage {
    let norm = raster.normalized();
    let (h, w) = norm.dim();
    rgb_from_grid( h, w, |i,j| {
        let g = (norm[[i,j]] * 255.0) as u8;
        Rgb([g,g,g])
    })
}

// reflect (half sample symmetric) border handling
#[inline]
fn reflect (k: isize, n: usize) -> usize {
    if k < 0 { 0 } else if k as usize >= n { n - 1 } else { k as usize }
}

/// Sobel gradients along columns (x) and rows (y)
pub fn sobel (data: &Array2<f64>) -> (Array2<f64>,Array2<f64>) {
    let (h, w) = data.dim();
    let at = |i: isize, j: isize| -> f64 { data[[reflect(i,h), reflect(j,w)]] };
    const SMOOTH: [f64;3] = [1.0, 2.0, 1.0];

    let sx = Array2::from_shape_fn( (h,w), |(i,j)| {
        let (i, j) = (i as isize, j as isize);
        (-1..=1).map(|d| SMOOTH[(d+1) as usize] * (at(i+d, j+1) - at(i+d, j-1))).sum::<f64>()
    });
    let sy = Array2::from_shape_fn( (h,w), |(i,j)| {
        let (i, j) = (i as isize, j as isize);
        (-1..=1).map(|d| SMOOTH[(d+1) as usize] * (at(i+1, j+d) - at(i-1, j+d))).sum::<f64>()
    });
    (sx, sy)
}

/// tangent space normal map with `n = normalize(-sx, -sy, 1)` encoded as `(n+1)*127.5`
pub fn normal_map (raster: &Raster) -> RgbImage {
    let data = raster.data.mapv(|v| if v.is_finite() { v } else { 0.0 });
    let (sx, sy) = sobel( &data);
    let (h, w) = data.dim();

    let encode = |c: f64| ((c + 1.0) * 127.5) as u8;
    rgb_from_grid( h, w, |i,j| {
        let (nx, ny, nz) = (-sx[[i,j]], -sy[[i,j]], 1.0);
        let len = (nx*nx + ny*ny + nz*nz).sqrt();
        Rgb([ encode(nx/len), encode(ny/len), encode(nz/len) ])
    })
}

/// diffuse.png and normal.png in `output_dir`
pub fn export_texture_maps (raster: &Raster, output_dir: impl AsRef<Path>) -> Result<TextureMaps> {
    if raster.is_empty() {
        return Err( JeoAnalysisError::InvalidDimensions("empty raster".into()))
    }
    let dir = output_dir.as_ref();
    ensure_dir( dir)?;

    let diffuse = dir.join("diffuse.png");
    let normal = dir.join("normal.png");
    diffuse_map( raster).save( &diffuse)?;
    normal_map( raster).save( &normal)?;

    Ok( TextureMaps {
        output_dir: path_to_lossy_string( dir),
        diffuse: path_to_lossy_string( &diffuse),
        normal: path_to_lossy_string( &normal),
    })
}
