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

//! keyword based mapping of natural language requests to tool invocations
//!
//! Rules are checked in order, the first match wins. Japanese terms are matched as is, English terms case insensitive

use serde::{Serialize,Deserialize};
use serde_json::{json, Value};
use strum::{Display, EnumString};
use tracing::info;
use crate::tools::ToolContext;

pub const DEFAULT_BBOX: [f64;4] = [135.0, 35.0, 140.0, 40.0];
pub const FUJI_BBOX: [f64;4] = [138.5, 35.2, 139.0, 35.5];
pub const DEFAULT_COLLECTION: &str = "JAXA.EORC_ALOS.PRISM_AW3D30.v3.2_global";
pub const DEFAULT_BAND: &str = "DSM";
pub const DEFAULT_DLIM: [&str;2] = ["2021-01-01T00:00:00", "2021-01-01T00:00:00"];

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize,Display,EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Intent {
    Search,
    List,
    Image,
    Stats,
    Heightmap,
    Plan,
}

// (japanese terms, lowercase english terms) per intent, in match order
const INTENT_RULES: [(Intent, &[&str], &[&str]);6] = [
    (Intent::Search, &["検索", "コレクション"], &["search"]),
    (Intent::List, &["一覧"], &["list"]),
    (Intent::Image, &["画像", "表示"], &["image"]),
    (Intent::Stats, &["統計"], &["stat"]),
    (Intent::Heightmap, &["高度マップ", "地形"], &["heightmap"]),
    (Intent::Plan, &["計画"], &["plan"]),
];

const KEYWORD_TERMS: [(&str,&str);6] = [
    ("温度", "LST"),
    ("標高", "DSM"),
    ("高度", "DSM"),
    ("地表面温度", "LST"),
    ("植生", "NDVI"),
    ("海面水温", "SST"),
];

const ENGLISH_KEYWORD_TERMS: [(&[&str],&str);2] = [
    (&["temperature"], "LST"),
    (&["elevation", "height"], "DSM"),
];

pub fn classify (text: &str) -> Intent {
    let lower = text.to_lowercase();
    INTENT_RULES.iter()
        .find(|(_, ja, en)| ja.iter().any(|t| text.contains(t)) || en.iter().any(|t| lower.contains(t)))
        .map(|(intent,_,_)| *intent)
        .unwrap_or( Intent::Search)
}

/// dataset keywords mentioned in `text` (without duplicates), `[LST, DSM]` if there are none
pub fn extract_keywords (text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut keywords: Vec<String> = Vec::new();
    let mut add = |k: &str| if !keywords.iter().any(|x| x == k) { keywords.push( k.to_string()) };

    for (term, kw) in KEYWORD_TERMS {
        if text.contains(term) { add(kw) }
    }
    for (terms, kw) in ENGLISH_KEYWORD_TERMS {
        if terms.iter().any(|t| lower.contains(t)) { add(kw) }
    }

    if keywords.is_empty() {
        vec!["LST".to_string(), "DSM".to_string()]
    } else {
        keywords
    }
}

pub fn extract_bbox (text: &str) -> [f64;4] {
    if text.contains("富士山") || text.to_lowercase().contains("fuji") { FUJI_BBOX } else { DEFAULT_BBOX }
}

#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
pub struct ToolRequest {
    pub intent: Intent,
    pub tool: String,
    pub arguments: Value,
}

/// the tool and arguments a natural language request maps to
pub fn dispatch (text: &str) -> ToolRequest {
    let intent = classify( text);
    let bbox = extract_bbox( text);

    let (tool, arguments) = match intent {
        Intent::Search => ("search_collections", json!({ "keywords": extract_keywords( text) })),
        Intent::List => ("list_available_collections", json!({})),
        Intent::Image => ("show_images", json!({ "collection": DEFAULT_COLLECTION, "band": DEFAULT_BAND, "dlim": DEFAULT_DLIM, "bbox": bbox })),
        Intent::Stats => ("calc_spatial_stats", json!({ "collection": DEFAULT_COLLECTION, "band": DEFAULT_BAND, "bounds": bbox })),
        Intent::Heightmap => ("generate_heightmap", json!({ "collection": DEFAULT_COLLECTION, "bounds": bbox })),
        Intent::Plan => ("create_plan", json!({ "task_description": text, "objectives": [], "steps": [] })),
    };

    ToolRequest { intent, tool: tool.to_string(), arguments }
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct AskResult {
    pub input: String,
    pub tool: String,
    pub params: Value,
    pub result: Value,
}

/// dispatch `text` and run the selected tool
pub async fn ask (ctx: &ToolContext, text: &str) -> AskResult {
    let req = dispatch( text);
    info!("'{text}' -> {} ({})", req.tool, req.intent);
    let result = ctx.call_tool_json( &req.tool, req.arguments.clone()).await;

    AskResult { input: text.to_string(), tool: req.tool, params: req.arguments, result }
}
