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

//! 16 bit heightmaps and the terrain exports for 3D tools and game engines (Blender, Unity, VRChat)

use std::{fs::File, io::{BufWriter, Write}, path::{Path,PathBuf}};
use image::{ImageBuffer, Luma, imageops::{self, FilterType}};
use ndarray::Array2;
use serde::{Serialize,Deserialize};
use tracing::info;
use jeo_common::{BoundingBox, fs::{ensure_dir, path_to_lossy_string, store_json_in_dir}};
use crate::{raster::Raster, errors::{Result, JeoAnalysisError, insufficient_data}};

pub type GrayImage16 = ImageBuffer<Luma<u16>, Vec<u16>>;

pub const MAX_U16: f64 = 65535.0;

#[derive(Debug,Clone,Copy,Serialize,Deserialize,PartialEq)]
pub struct ValueRange<T> {
    pub min: T,
    pub max: T,
}

#[derive(Debug,Clone,Copy,Serialize,Deserialize,PartialEq)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

/// sidecar of the temperature heightmap
#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
pub struct HeightmapMetadata {
    pub temperature_range: ValueRange<f64>,
    pub normalized_range: ValueRange<u16>,
    pub size: Size,
}

/// normalized u16 heights plus the value range they were derived from
#[derive(Debug,Clone)]
pub struct Heightmap {
    pub heights: Array2<u16>,
    pub range: ValueRange<f64>,
}

impl Heightmap {
    /// map the finite value range linearly onto 0..=65535 (truncating). Flat rasters and non-finite cells map to 0
    pub fn from_raster (raster: &Raster) -> Result<Self> {
        let (min, max) = raster.value_range().ok_or_else(|| insufficient_data("raster has no finite values"))?;
        let span = max - min;
        let heights = raster.data.mapv(|v| {
            if v.is_finite() && span > 0.0 { ((v - min) / span * MAX_U16) as u16 } else { 0 }
        });
        Ok( Heightmap { heights, range: ValueRange{min,max} } )
    }

    pub fn width (&self) -> usize { self.heights.ncols() }
    pub fn height (&self) -> usize { self.heights.nrows() }

    pub fn to_image (&self) -> Result<GrayImage16> {
        let (h, w) = self.heights.dim();
        let pixels: Vec<u16> = self.heights.iter().copied().collect();
        ImageBuffer::from_raw( w as u32, h as u32, pixels)
            .ok_or_else(|| JeoAnalysisError::InvalidDimensions( format!("cannot create {w}x{h} image")))
    }

    pub fn save_png (&self, path: impl AsRef<Path>) -> Result<()> {
        Ok( self.to_image()?.save( path.as_ref())? )
    }

    /// headerless little endian u16 samples in row-major order
    pub fn save_raw (&self, path: impl AsRef<Path>) -> Result<()> {
        let mut w = BufWriter::new( File::create( path.as_ref())?);
        for v in self.heights.iter() {
            w.write_all( &v.to_le_bytes())?;
        }
        w.flush()?;
        Ok(())
    }
}

/// `temperature_heightmap.png` and `temperature_heightmap_metadata.json` in `dir`
pub fn write_temperature_heightmap (raster: &Raster, dir: impl AsRef<Path>) -> Result<(PathBuf,HeightmapMetadata)> {
    let dir = dir.as_ref();
    ensure_dir( dir)?;

    let hm = Heightmap::from_raster( raster)?;
    let path = dir.join("temperature_heightmap.png");
    hm.save_png( &path)?;

    let metadata = HeightmapMetadata {
        temperature_range: hm.range,
        normalized_range: ValueRange{ min: 0, max: u16::MAX },
        size: Size{ width: hm.width(), height: hm.height() },
    };
    store_json_in_dir( dir, "temperature_heightmap_metadata.json", &metadata)?;
    info!("saved heightmap {path:?}");

    Ok( (path, metadata) )
}

/* #region exports *************************************************************************************************/

#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
pub struct HeightmapInfo {
    pub output_path: String,
    /// (rows,columns)
    pub shape: (usize,usize),
    pub height_range: ValueRange<f64>,
    pub bounds: Option<BoundingBox<f64>>,
}

/// single 16 bit grayscale heightmap PNG
pub fn generate_heightmap (raster: &Raster, output_path: impl AsRef<Path>) -> Result<HeightmapInfo> {
    let path = output_path.as_ref();
    if let Some(dir) = path.parent() { if !dir.as_os_str().is_empty() { ensure_dir( dir)?; } }

    let hm = Heightmap::from_raster( raster)?;
    hm.save_png( path)?;

    Ok( HeightmapInfo {
        output_path: path_to_lossy_string( path),
        shape: raster.shape(),
        height_range: hm.range,
        bounds: raster.bbox,
    })
}

#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
pub struct BlenderExport {
    pub output_dir: String,
    pub heightmap: String,
    pub texture: String,
    pub note: String,
}

/// heightmap.png (for a Displace modifier) plus a texture.png of the same data
pub fn export_to_blender (raster: &Raster, output_dir: impl AsRef<Path>) -> Result<BlenderExport> {
    let dir = output_dir.as_ref();
    ensure_dir( dir)?;

    let img = Heightmap::from_raster( raster)?.to_image()?;
    let heightmap = dir.join("heightmap.png");
    let texture = dir.join("texture.png");
    img.save( &heightmap)?;
    img.save( &texture)?;
    info!("exported Blender heightmap to {dir:?}");

    Ok( BlenderExport {
        output_dir: path_to_lossy_string( dir),
        heightmap: path_to_lossy_string( &heightmap),
        texture: path_to_lossy_string( &texture),
        note: "load heightmap.png as image texture of a Displace modifier".into(),
    })
}

#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
pub struct UnityMetadata {
    pub width: usize,
    pub height: usize,
    /// bits per sample of terrain.raw
    pub depth: u32,
    pub height_range: ValueRange<f64>,
    pub bounds: Option<BoundingBox<f64>>,
}

#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
pub struct UnityExport {
    pub output_dir: String,
    pub terrain_raw: String,
    pub texture: String,
    pub metadata_file: String,
    pub metadata: UnityMetadata,
}

/// terrain.raw (16 bit little endian), terrain_texture.png and terrain_metadata.json for the Unity terrain importer
pub fn export_to_unity (raster: &Raster, output_dir: impl AsRef<Path>) -> Result<UnityExport> {
    let dir = output_dir.as_ref();
    ensure_dir( dir)?;

    let hm = Heightmap::from_raster( raster)?;
    let terrain_raw = dir.join("terrain.raw");
    let texture = dir.join("terrain_texture.png");
    hm.save_raw( &terrain_raw)?;
    hm.save_png( &texture)?;

    let metadata = UnityMetadata {
        width: hm.width(),
        height: hm.height(),
        depth: 16,
        height_range: hm.range,
        bounds: raster.bbox,
    };
    let metadata_file = store_json_in_dir( dir, "terrain_metadata.json", &metadata)?;
    info!("exported Unity terrain {}x{} to {dir:?}", metadata.width, metadata.height);

    Ok( UnityExport {
        output_dir: path_to_lossy_string( dir),
        terrain_raw: path_to_lossy_string( &terrain_raw),
        texture: path_to_lossy_string( &texture),
        metadata_file: path_to_lossy_string( &metadata_file),
        metadata,
    })
}

#[derive(Debug,Clone,Copy,Serialize,Deserialize,PartialEq)]
pub struct VrchatLimits {
    pub max_polygons: usize,
    pub texture_size: u32,
}

impl Default for VrchatLimits {
    fn default() -> Self {
        VrchatLimits { max_polygons: 100_000, texture_size: 2048 }
    }
}

#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
pub struct VrchatMetadata {
    pub width: usize,
    pub height: usize,
    pub texture_size: u32,
    pub estimated_polygons: usize,
    pub height_range: ValueRange<f64>,
    pub bounds: Option<BoundingBox<f64>>,
    pub optimization: VrchatLimits,
}

#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
pub struct VrchatExport {
    pub output_dir: String,
    pub heightmap: String,
    pub texture: String,
    pub metadata_file: String,
    pub metadata: VrchatMetadata,
}

/// two triangles per grid cell
pub fn estimated_polygons (height: usize, width: usize) -> usize {
    height * width * 2
}

/// grid size that keeps the polygon estimate within `max_polygons`
pub fn polygon_budget_shape (height: usize, width: usize, max_polygons: usize) -> (usize,usize) {
    let current = estimated_polygons( height, width);
    if current > max_polygons {
        let scale = (max_polygons as f64 / current as f64).sqrt();
        ( ((height as f64 * scale) as usize).max(1), ((width as f64 * scale) as usize).max(1) )
    } else {
        (height, width)
    }
}

/// bilinear resampling that maps corner cells onto corner cells
pub fn resample_bilinear (data: &Array2<f64>, new_height: usize, new_width: usize) -> Array2<f64> {
    let (h, w) = data.dim();
    let src_coord = |k: usize, n_out: usize, n_in: usize| -> f64 {
        if n_out > 1 { k as f64 * (n_in - 1) as f64 / (n_out - 1) as f64 } else { 0.0 }
    };

    Array2::from_shape_fn( (new_height, new_width), |(i,j)| {
        let y = src_coord( i, new_height, h);
        let x = src_coord( j, new_width, w);
        let (y0, x0) = (y.floor() as usize, x.floor() as usize);
        let (y1, x1) = ((y0 + 1).min(h - 1), (x0 + 1).min(w - 1));
        let (fy, fx) = (y - y0 as f64, x - x0 as f64);

        let top = data[[y0,x0]] * (1.0 - fx) + data[[y0,x1]] * fx;
        let bottom = data[[y1,x0]] * (1.0 - fx) + data[[y1,x1]] * fx;
        top * (1.0 - fy) + bottom * fy
    })
}

/// downsample to the polygon budget and write a square Lanczos resized heightmap/texture pair with metadata
pub fn create_vrchat_terrain (raster: &Raster, limits: VrchatLimits, output_dir: impl AsRef<Path>) -> Result<VrchatExport> {
    let dir = output_dir.as_ref();
    ensure_dir( dir)?;
    if raster.is_empty() || limits.texture_size == 0 {
        return Err( JeoAnalysisError::InvalidDimensions( format!("raster {:?} with texture size {}", raster.shape(), limits.texture_size)))
    }

    let (h, w) = raster.shape();
    let (new_h, new_w) = polygon_budget_shape( h, w, limits.max_polygons);
    let reduced = if (new_h, new_w) != (h, w) {
        info!("reducing terrain grid from {h}x{w} to {new_h}x{new_w}");
        Raster::new( resample_bilinear( &raster.data, new_h, new_w), raster.bbox)
    } else {
        raster.clone()
    };

    let hm = Heightmap::from_raster( &reduced)?;
    let texture_img = imageops::resize( &hm.to_image()?, limits.texture_size, limits.texture_size, FilterType::Lanczos3);

    let heightmap = dir.join("vrchat_heightmap.png");
    let texture = dir.join("vrchat_texture.png");
    texture_img.save( &heightmap)?;
    texture_img.save( &texture)?;

    let metadata = VrchatMetadata {
        width: hm.width(),
        height: hm.height(),
        texture_size: limits.texture_size,
        estimated_polygons: estimated_polygons( hm.height(), hm.width()),
        height_range: hm.range,
        bounds: raster.bbox,
        optimization: limits,
    };
    let metadata_file = store_json_in_dir( dir, "vrchat_metadata.json", &metadata)?;

    Ok( VrchatExport {
        output_dir: path_to_lossy_string( dir),
        heightmap: path_to_lossy_string( &heightmap),
        texture: path_to_lossy_string( &texture),
        metadata_file: path_to_lossy_string( &metadata_file),
        metadata,
    })
}

/* #endregion exports */
