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

//! the dataset catalog of the Earth observation API
//!
//! The catalog is a markdown text of `key: value` lines, each dataset terminated by a `---` line. Keys are
//! `id, title, description, bands, keywords, startDate, endDate, bbox, epsg`

use reqwest::{Client, StatusCode};
use serde::{Serialize,Deserialize};
use tracing::debug;
use crate::errors::{Result, JeoServerError, op_failed};

#[derive(Debug,Clone,Default,Serialize,Deserialize,PartialEq)]
pub struct CollectionInfo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub bands: Vec<String>,
    pub keywords: Vec<String>,
    pub start_date: Option<String>,
    /// "present" for datasets that are still updated
    pub end_date: Option<String>,
    /// `[min_lon,min_lat,max_lon,max_lat]` for EPSG:4326, projected `[min_x,min_y,max_x,max_y]` otherwise
    pub bbox: Option<[f64;4]>,
    pub epsg: Option<u32>,
}

#[derive(Debug,Clone,Default,Serialize,Deserialize)]
pub struct Catalog {
    pub text: String,
    pub collections: Vec<CollectionInfo>,
}

fn split_list (v: &str) -> Vec<String> {
    v.split(',').map(|s| s.trim()).filter(|s| !s.is_empty()).map(|s| s.to_string()).collect()
}

fn parse_bbox (v: &str) -> Option<[f64;4]> {
    let vals: Vec<f64> = v.trim().trim_start_matches('[').trim_end_matches(']')
        .split(',')
        .map(|s| s.trim().parse::<f64>())
        .collect::<std::result::Result<_,_>>().ok()?;
    vals.try_into().ok()
}

pub fn parse_catalog (text: &str) -> Vec<CollectionInfo> {
    let mut collections = Vec::new();
    let mut current = CollectionInfo::default();

    let mut flush = |c: &mut CollectionInfo| {
        let c = std::mem::take(c);
        if !c.id.is_empty() { collections.push(c) }
    };

    for line in text.lines() {
        let line = line.trim();
        if line.starts_with("---") {
            flush( &mut current);
            continue;
        }

        let line = line.strip_prefix("- ").unwrap_or( line);
        if let Some((key, value)) = line.split_once(':') {
            let value = value.trim();
            match key.trim() {
                "id" => current.id = value.to_string(),
                "title" => current.title = value.to_string(),
                "description" => current.description = value.to_string(),
                "bands" => current.bands = split_list( value),
                "keywords" => current.keywords = split_list( value),
                "startDate" => current.start_date = Some(value.to_string()),
                "endDate" => current.end_date = Some(value.to_string()),
                "bbox" => current.bbox = parse_bbox( value),
                "epsg" => current.epsg = value.parse().ok(),
                _ => {}
            }
        }
    }
    flush( &mut current);

    collections
}

impl Catalog {
    pub fn parse (text: String) -> Self {
        let collections = parse_catalog( &text);
        Catalog { text, collections }
    }

    pub async fn fetch (client: &Client, url: &str) -> Result<Self> {
        let text = get_catalog_text( client, url).await?;
        let catalog = Catalog::parse( text);
        debug!("catalog {url} has {} collections", catalog.collections.len());
        Ok(catalog)
    }

    /// collection ids containing all keywords, and their bands. No keywords matches all collections
    pub fn filter_name<S: AsRef<str>> (&self, keywords: &[S]) -> (Vec<String>, Vec<Vec<String>>) {
        self.collections.iter()
            .filter(|c| keywords.iter().all(|k| c.id.contains( k.as_ref())))
            .map(|c| (c.id.clone(), c.bands.clone()))
            .unzip()
    }

    pub fn get (&self, id: &str) -> Option<&CollectionInfo> {
        self.collections.iter().find(|c| c.id == id)
    }
}

pub async fn get_catalog_text (client: &Client, url: &str) -> Result<String> {
    let response = client.get( url).send().await?;
    match response.status() {
        StatusCode::OK => Ok( response.text().await? ),
        StatusCode::NOT_FOUND => Err( JeoServerError::NotFoundError( url.to_string())),
        other => Err( op_failed( format!("response status {other:?}")))
    }
}
