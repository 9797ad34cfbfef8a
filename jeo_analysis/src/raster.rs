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

//! the gridded value model all analysis functions operate on

use std::{fs::File, io::BufReader, path::Path};
use ndarray::Array2;
use tiff::{decoder::{Decoder,DecodingResult}, encoder::{TiffEncoder, colortype::Gray64Float}};
use jeo_common::{BoundingBox, fs::extension};
use crate::errors::{Result, JeoAnalysisError};

/// values above this are assumed to be Kelvin
pub const KELVIN_THRESHOLD: f64 = 200.0;
pub const KELVIN_OFFSET: f64 = 273.15;

/// a 2D grid of values in row-major order (rows as delivered by the source) with an optional geographic extent
#[derive(Debug,Clone,PartialEq)]
pub struct Raster {
    pub data: Array2<f64>,
    pub bbox: Option<BoundingBox<f64>>,
}

impl Raster {
    pub fn new (data: Array2<f64>, bbox: Option<BoundingBox<f64>>) -> Self {
        Raster { data, bbox }
    }

    pub fn from_shape_vec (height: usize, width: usize, values: Vec<f64>) -> Result<Self> {
        Ok( Raster::new( Array2::from_shape_vec( (height, width), values)?, None) )
    }

    pub fn with_bbox (mut self, bbox: BoundingBox<f64>) -> Self {
        self.bbox = Some(bbox);
        self
    }

    /// (rows,columns)
    pub fn shape (&self) -> (usize,usize) { self.data.dim() }
    pub fn width (&self) -> usize { self.data.ncols() }
    pub fn height (&self) -> usize { self.data.nrows() }
    pub fn is_empty (&self) -> bool { self.data.is_empty() }

    pub fn finite_values (&self) -> impl Iterator<Item=f64> + '_ {
        self.data.iter().copied().filter(|v| v.is_finite())
    }

    /// min and max over all finite cells, None if there are none
    pub fn value_range (&self) -> Option<(f64,f64)> {
        self.finite_values().fold( None, |acc, v| match acc {
            None => Some((v,v)),
            Some((lo,hi)) => Some((lo.min(v), hi.max(v)))
        })
    }

    /// land surface temperatures are usually delivered in Kelvin. Convert to Celsius if the max exceeds
    /// [`KELVIN_THRESHOLD`]. Returns true if the raster was converted
    pub fn to_celsius_if_kelvin (&mut self) -> bool {
        match self.value_range() {
            Some((_,max)) if max > KELVIN_THRESHOLD => {
                self.data.mapv_inplace(|v| v - KELVIN_OFFSET);
                true
            }
            _ => false
        }
    }

    /// value range mapped to [0,1], non-finite cells and flat rasters map to 0
    pub fn normalized (&self) -> Array2<f64> {
        let (lo, hi) = self.value_range().unwrap_or( (0.0,0.0));
        let span = hi - lo;
        self.data.mapv(|v| if v.is_finite() && span > 0.0 { (v - lo) / span } else { 0.0 })
    }

    /// open the first band of a TIFF file as f64 raster
    pub fn open_tiff (path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        check_tiff_path( &path)?;

        let file = File::open(path)?;
        let mut decoder = Decoder::new( BufReader::new(file))?;
        let (w, h) = decoder.dimensions()?;
        let (width, height) = (w as usize, h as usize);

        let values = decoded_values( decoder.read_image()?)?;
        let n = width * height;
        if values.len() < n {
            return Err( JeoAnalysisError::InvalidDimensions( format!("{path:?} has {} samples for {width}x{height}", values.len())))
        }

        // multi-sample images are interleaved, we only keep the first sample of each pixel
        let spp = values.len() / n;
        let first_band: Vec<f64> = values.into_iter().step_by(spp).take(n).collect();
        Raster::from_shape_vec( height, width, first_band)
    }

    pub fn save_tiff (&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        check_tiff_path( &path)?;

        let mut file = File::create( path)?;
        let mut enc = TiffEncoder::new( &mut file)?;
        let values: Vec<f64> = self.data.iter().copied().collect();
        Ok( enc.write_image::<Gray64Float>( self.width() as u32, self.height() as u32, &values)? )
    }
}

fn check_tiff_path (path: &impl AsRef<Path>) -> Result<()> {
    match extension( path) {
        Some(ext) if ext.ends_with("tif") || ext.ends_with("tiff") => Ok(()),
        _ => Err( JeoAnalysisError::IllegalArgument( format!("not a TIFF file: {:?}", path.as_ref())))
    }
}

fn decoded_values (result: DecodingResult) -> Result<Vec<f64>> {
    match result {
        DecodingResult::F64(data) => Ok( data ),
        DecodingResult::F32(data) => Ok( data.into_iter().map(|x| x as f64).collect() ),
        DecodingResult::U8(data) => Ok( data.into_iter().map(|x| x as f64).collect() ),
        DecodingResult::U16(data) => Ok( data.into_iter().map(|x| x as f64).collect() ),
        DecodingResult::U32(data) => Ok( data.into_iter().map(|x| x as f64).collect() ),
        DecodingResult::I8(data) => Ok( data.into_iter().map(|x| x as f64).collect() ),
        DecodingResult::I16(data) => Ok( data.into_iter().map(|x| x as f64).collect() ),
        DecodingResult::I32(data) => Ok( data.into_iter().map(|x| x as f64).collect() ),
        _ => Err( JeoAnalysisError::InvalidImageFormat("TIFF does not contain data that can be converted to f64".into()) )
    }
}
