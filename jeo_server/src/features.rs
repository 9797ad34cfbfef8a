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

//! GeoJSON feature file access for region selection

use std::path::Path;
use geo::{BoundingRect, Rect};
use geojson::{Feature, GeoJson, Geometry};
use serde::{Serialize,Deserialize};
use jeo_common::{BoundingBox, fs::{filepath_contents_as_string, path_to_lossy_string}};
use crate::errors::{Result, JeoServerError};

#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
pub struct FeatureFileInfo {
    pub file_path: String,
    pub feature_count: usize,
    pub bbox: Option<BoundingBox<f64>>,
}

#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
pub struct FeatureSelection {
    pub keywords: Vec<String>,
    pub selected_count: usize,
    /// `name` (or `id`) property of each selected feature
    pub names: Vec<String>,
    pub bbox: Option<BoundingBox<f64>>,
}

/// all features of a GeoJSON file. A single feature or bare geometry counts as one feature
pub fn load_features (path: impl AsRef<Path>) -> Result<Vec<Feature>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err( JeoServerError::NotFoundError( format!("file {path:?}")))
    }

    let geojson: GeoJson = filepath_contents_as_string( &path)?.parse()?;
    Ok( match geojson {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(f) => vec![f],
        GeoJson::Geometry(g) => vec![ Feature::from(g) ],
    })
}

/// does any property value of `feature` contain any of the keywords (case insensitive)
pub fn matches_keywords<S: AsRef<str>> (feature: &Feature, keywords: &[S]) -> bool {
    if keywords.is_empty() { return true }

    feature.properties.as_ref().is_some_and( |props| {
        props.values().any(|v| {
            let text = match v {
                serde_json::Value::String(s) => s.to_lowercase(),
                other => other.to_string().to_lowercase()
            };
            keywords.iter().any(|k| text.contains( &k.as_ref().to_lowercase()))
        })
    })
}

pub fn select_features<S: AsRef<str>> (features: &[Feature], keywords: &[S]) -> Vec<Feature> {
    features.iter().filter(|f| matches_keywords( f, keywords)).cloned().collect()
}

fn geometry_rect (geometry: &Geometry) -> Option<Rect<f64>> {
    geo::Geometry::<f64>::try_from( geometry.value.clone()).ok()?.bounding_rect()
}

/// bounding box over all feature geometries, None if there are no coordinates
pub fn features_bbox (features: &[Feature]) -> Option<BoundingBox<f64>> {
    features.iter()
        .filter_map(|f| f.geometry.as_ref().and_then( geometry_rect))
        .filter(|r| r.min().x.is_finite() && r.min().y.is_finite() && r.max().x.is_finite() && r.max().y.is_finite())
        .fold( None, |acc: Option<BoundingBox<f64>>, r| {
            let (min, max) = (r.min(), r.max());
            Some( match acc {
                None => BoundingBox::new( min.x, min.y, max.x, max.y),
                Some(b) => BoundingBox::new( b.west.min(min.x), b.south.min(min.y), b.east.max(max.x), b.north.max(max.y))
            })
        })
}

fn feature_name (feature: &Feature) -> Option<String> {
    let prop = |k: &str| feature.property(k).and_then(|v| v.as_str()).map(|s| s.to_string());
    prop("name").or_else(|| prop("NAME")).or_else(|| prop("id"))
}

pub fn read_geojson (path: impl AsRef<Path>) -> Result<FeatureFileInfo> {
    let path = path.as_ref();
    let features = load_features( path)?;
    Ok( FeatureFileInfo {
        file_path: path_to_lossy_string( path),
        feature_count: features.len(),
        bbox: features_bbox( &features),
    })
}

pub fn select_feature_file<S: AsRef<str>> (path: impl AsRef<Path>, keywords: &[S]) -> Result<FeatureSelection> {
    let features = load_features( path)?;
    let selected = select_features( &features, keywords);
    Ok( FeatureSelection {
        keywords: keywords.iter().map(|k| k.as_ref().to_string()).collect(),
        selected_count: selected.len(),
        names: selected.iter().filter_map( feature_name).collect(),
        bbox: features_bbox( &selected),
    })
}
