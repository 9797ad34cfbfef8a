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

use std::path::{Path,PathBuf};
use serde_json::{json, Value};
use jeo_analysis::SampleSource;
use jeo_server::{JeoServerError, ServerConfig, ToolContext, TOOL_SPECS, tools::tool_names};

fn test_context (dir: &Path) -> ToolContext {
    let config = ServerConfig {
        temp_dir: dir.join("temp"),
        plan_dir: dir.join("plans"),
        sample: SampleSource { grid_size: 24, seed: 42 },
        ..ServerConfig::default()
    };
    ToolContext::new( config)
}

fn ueda_args (method: &str) -> Value {
    json!({
        "point1": { "lat": 36.38916397, "lon": 138.23623657 },
        "point2": { "latitude": 36.392, "longitude": 138.258 },
        "method": method
    })
}

#[test]
fn test_tool_specs() {
    let names = tool_names();
    println!("{names:?}");
    assert_eq!( names.len(), 19);
    for name in ["search_collections", "compute_bbox", "get_earth_images", "calc_spatial_stats", "show_spatial_stats", "calc_temporal_stats",
                 "generate_heightmap", "create_vrchat_terrain", "get_plan_status"] {
        assert!( names.contains( &name), "missing tool {name}");
    }

    let spec = serde_json::to_value( &TOOL_SPECS[0]).unwrap();
    assert!( spec.get("inputSchema").is_some());
    assert_eq!( spec["inputSchema"]["type"], "object");
}

#[tokio::test]
async fn test_compute_bbox() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = test_context( dir.path());

    let flat = ctx.call_tool( "compute_bbox", ueda_args("flat")).await.unwrap();
    println!("{flat}");
    assert_eq!( flat["method"], "flat");
    let bbox: [f64;4] = serde_json::from_value( flat["bbox"].clone()).unwrap();
    // padded coordinate spans around the midpoint
    assert!( (bbox[0] - 138.231449).abs() < 1e-5);
    assert!( (bbox[2] - 138.262788).abs() < 1e-5);
    let d = flat["distance_km"].as_f64().unwrap();
    assert!( d > 1.9 && d < 2.1);
    assert!( flat["ppu"].as_f64().unwrap() > 0.0);

    let geo = ctx.call_tool( "compute_bbox", ueda_args("geodesic")).await.unwrap();
    let bbox: [f64;4] = serde_json::from_value( geo["bbox"].clone()).unwrap();
    // points are about 2km apart, so the radius is clamped to its 0.01 degree floor
    assert!( ((bbox[2] - bbox[0]) - 0.02).abs() < 1e-9);
    assert!( ((bbox[3] - bbox[1]) - 0.02).abs() < 1e-9);

    // method defaults to geodesic
    let mut args = ueda_args("geodesic");
    args.as_object_mut().unwrap().remove("method");
    assert_eq!( ctx.call_tool( "compute_bbox", args).await.unwrap(), geo);
}

#[tokio::test]
async fn test_invalid_arguments() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = test_context( dir.path());

    let res = ctx.call_tool( "compute_bbox", json!({ "point1": { "lat": 36.0, "lon": 138.0 } })).await;
    assert!( matches!( res, Err(JeoServerError::InvalidArguments(_))));

    let res = ctx.call_tool( "compute_bbox", json!({ "point1": { "lat": 95.0, "lon": 138.0 }, "point2": { "lat": 36.0, "lon": 138.0 } })).await;
    assert!( matches!( res, Err(JeoServerError::CommonError(_))));

    let res = ctx.call_tool( "no_such_tool", json!({})).await;
    assert!( matches!( res, Err(JeoServerError::UnknownTool(_))));

    let v = ctx.call_tool_json( "no_such_tool", Value::Null).await;
    println!("{v}");
    assert!( v["error"].as_str().unwrap().contains("no_such_tool"));
}

#[tokio::test]
async fn test_spatial_stats() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = test_context( dir.path());

    let stats = ctx.call_tool( "calc_spatial_stats", json!({ "bounds": [138.0, 36.0, 138.5, 36.5] })).await.unwrap();
    println!("{stats:#}");
    assert_eq!( stats["collection"], "JAXA.EORC_ALOS.PRISM_AW3D30.v3.2_global");
    assert_eq!( stats["bbox"], json!([138.0, 36.0, 138.5, 36.5]));
    assert_eq!( stats["sample_data"], false);
    let (min, max, mean) = (stats["min"].as_f64().unwrap(), stats["max"].as_f64().unwrap(), stats["mean"].as_f64().unwrap());
    assert!( min >= 20.0 && max < 40.0 && min <= mean && mean <= max);

    // a degenerate box has no pixel resolution
    let v = ctx.call_tool_json( "calc_spatial_stats", json!({ "bounds": [138.0, 36.0, 138.0, 36.5] })).await;
    assert!( v.get("error").is_some());
}

#[tokio::test]
async fn test_earth_images() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = test_context( dir.path());
    let collection = "JAXA.EORC_ALOS.PRISM_AW3D30.v3.2_global";

    let res = ctx.call_tool( "get_earth_images", json!({ "collection": collection, "bounds": [138.0, 36.0, 138.5, 36.5], "resolution": 40 })).await.unwrap();
    println!("{res:#}");
    assert_eq!( res["success"], true);
    assert_eq!( res["date_range"], json!(["2021-01-01T00:00:00", "2021-12-31T23:59:59"]));
    assert_eq!( res["raster_info"]["shape"], json!([24, 24]));
    assert_eq!( res["raster_info"]["latlim"], json!([36.0, 36.5]));
    assert_eq!( res["raster_info"]["lonlim"], json!([138.0, 138.5]));

    // the GeoJSON extent takes precedence over bounds
    let path = dir.path().join("region.geojson");
    std::fs::write( &path, r#"{"type":"Feature","properties":{"name":"Ueda"},
        "geometry":{"type":"Polygon","coordinates":[[[138.1,36.3],[138.4,36.3],[138.4,36.5],[138.1,36.3]]]}}"#).unwrap();
    let res = ctx.call_tool( "get_earth_images", json!({
        "collection": collection, "bounds": [130.0, 30.0, 131.0, 31.0], "geojson_path": path, "date_range": ["2022-01-01", "2022-02-01"]
    })).await.unwrap();
    println!("{res:#}");
    assert_eq!( res["raster_info"]["latlim"], json!([36.3, 36.5]));
    assert_eq!( res["raster_info"]["lonlim"], json!([138.1, 138.4]));
    assert_eq!( res["date_range"], json!(["2022-01-01", "2022-02-01"]));

    // a missing GeoJSON file falls back to bounds
    let res = ctx.call_tool( "get_earth_images", json!({
        "collection": collection, "bbox": [130.0, 30.0, 131.0, 31.0], "geojson_path": dir.path().join("missing.geojson")
    })).await.unwrap();
    assert_eq!( res["raster_info"]["lonlim"], json!([130.0, 131.0]));

    let v = ctx.call_tool_json( "get_earth_images", json!({ "bounds": [138.0, 36.0, 138.5, 36.5] })).await;
    assert!( v.get("error").is_some());
}

#[tokio::test]
async fn test_show_spatial_stats() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = test_context( dir.path());

    let res = ctx.call_tool( "show_spatial_stats", json!({ "band": "DSM", "bbox": [138.0, 36.0, 138.5, 36.5], "dlim": ["2021-01-01", "2021-12-31"] })).await.unwrap();
    println!("{res:#}");
    let image = res["images"][0].as_str().unwrap();
    assert!( image.ends_with("JAXA.EORC_ALOS.PRISM_AW3D30.v3.2_global_DSM_stats.png"));
    assert!( Path::new( image).is_file());
    let (min, max) = (res["statistics"]["min"].as_f64().unwrap(), res["statistics"]["max"].as_f64().unwrap());
    assert!( min <= max);
    assert_eq!( res["bbox"], json!([138.0, 36.0, 138.5, 36.5]));
}

#[tokio::test]
async fn test_temporal_stats() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = test_context( dir.path());
    let collection = "JAXA.G-Portal_GCOM-C.SGLI_standard.L2-LST.daytime.v3_global_monthly";

    let res = ctx.call_tool( "calc_temporal_stats", json!({
        "collection": collection, "band": "LST", "date_range": ["2021-01-01", "2021-12-31"],
        "dates": ["2021-01-01", "2021-04-01", "2021-07-01"], "method": "max", "bounds": [138.0, 36.0, 138.5, 36.5]
    })).await.unwrap();
    println!("{res:#}");
    assert_eq!( res["method"], "max");
    assert_eq!( res["dates"].as_array().unwrap().len(), 3);
    assert_eq!( res["shape"], json!([24, 24]));
    let image = res["images"][0].as_str().unwrap();
    assert!( image.ends_with("_LST_temporal_max.png"));
    assert!( Path::new( image).is_file());

    // without a date list the range end points are used
    let res = ctx.call_tool( "calc_temporal_stats", json!({ "collection": collection, "date_range": ["2021-01-01", "2021-12-31"], "method": "median" })).await.unwrap();
    assert_eq!( res["dates"], json!(["2021-01-01", "2021-12-31"]));
    assert_eq!( res["method"], "median");

    let res = ctx.call_tool( "calc_temporal_stats", json!({ "collection": collection, "date_range": ["2021-06-01", "2021-06-01"] })).await.unwrap();
    assert_eq!( res["dates"], json!(["2021-06-01"]));
    assert_eq!( res["method"], "mean");

    match ctx.call_tool( "calc_temporal_stats", json!({ "collection": collection, "date_range": ["2021-01-01", "2021-12-31"], "method": "mode" })).await {
        Err(JeoServerError::InvalidArguments(msg)) => println!("expected error: {msg}"),
        other => panic!("unexpected result: {other:?}")
    }
}

#[tokio::test]
async fn test_sample_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let config = ServerConfig {
        temp_dir: dir.path().join("temp"),
        raster_file: Some( dir.path().join("missing.tif")),
        sample: SampleSource { grid_size: 16, seed: 1 },
        ..ServerConfig::default()
    };
    let ctx = ToolContext::new( config);

    let res = ctx.call_tool( "show_images", json!({ "collection": "JAXA.G-Portal_GCOM-C.SGLI_standard.L2-LST.daytime.v3_global_monthly", "band": "LST" })).await.unwrap();
    println!("{res:#}");
    assert_eq!( res["sample_data"], true);
    assert_eq!( res["shape"], json!([16, 16]));
    let image = res["images"][0].as_str().unwrap();
    assert!( image.ends_with("JAXA.G-Portal_GCOM-C.SGLI_standard.L2-LST.daytime.v3_global_monthly_LST.png"));
    assert!( Path::new( image).is_file());
}

#[tokio::test]
async fn test_terrain_tools() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = test_context( dir.path());
    let args = json!({ "collection": "JAXA.EORC_ALOS.PRISM_AW3D30.v3.2_global", "bounds": [138.5, 35.2, 139.0, 35.5] });

    let hm = ctx.call_tool( "generate_heightmap", args.clone()).await.unwrap();
    println!("{hm:#}");
    assert_eq!( hm["shape"], json!([24, 24]));
    assert!( dir.path().join("temp/heightmap.png").is_file());

    let blender = ctx.call_tool( "export_to_blender", args.clone()).await.unwrap();
    assert!( Path::new( blender["heightmap"].as_str().unwrap()).is_file());

    let unity = ctx.call_tool( "export_to_unity", args.clone()).await.unwrap();
    assert_eq!( unity["metadata"]["depth"], 16);
    assert!( dir.path().join("temp/unity_export/terrain.raw").is_file());

    let mut vr_args = args.clone();
    vr_args["max_polygons"] = json!(200);
    vr_args["texture_size"] = json!(64);
    vr_args["output_dir"] = json!( dir.path().join("vr"));
    let vr = ctx.call_tool( "create_vrchat_terrain", vr_args).await.unwrap();
    println!("{vr:#}");
    assert!( vr["metadata"]["estimated_polygons"].as_u64().unwrap() <= 200);
    assert_eq!( vr["metadata"]["texture_size"], 64);
    assert!( dir.path().join("vr/vrchat_metadata.json").is_file());

    let tex = ctx.call_tool( "export_texture_maps", args).await.unwrap();
    assert!( Path::new( tex["normal"].as_str().unwrap()).is_file());
}

#[tokio::test]
async fn test_feature_tools() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = test_context( dir.path());
    let path = dir.path().join("points.geojson");
    std::fs::write( &path, r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{"name":"Ueda"},"geometry":{"type":"Point","coordinates":[138.25,36.40]}},
        {"type":"Feature","properties":{"name":"Matsumoto"},"geometry":{"type":"Point","coordinates":[137.97,36.24]}}]}"#).unwrap();

    let info = ctx.call_tool( "read_geojson", json!({ "file_path": path })).await.unwrap();
    assert_eq!( info["feature_count"], 2);

    let sel = ctx.call_tool( "select_features", json!({ "file_path": path, "keywords": ["ueda"] })).await.unwrap();
    assert_eq!( sel["names"], json!(["Ueda"]));
}

#[tokio::test]
async fn test_plan_tools() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = test_context( dir.path());

    let created = ctx.call_tool( "create_plan", json!({
        "task_description": "terrain export",
        "objectives": ["heightmap", "unity"],
        "steps": [ { "description": "fetch DSM" }, { "description": "export", "files": ["terrain.raw"] } ]
    })).await.unwrap();
    println!("{created:#}");
    let plan_id = created["plan_id"].as_str().unwrap().to_string();
    assert_eq!( created["total_steps"], 2);
    assert!( dir.path().join("plans").join( format!("{plan_id}.md")).is_file());

    let upd = ctx.call_tool( "update_plan_status", json!({ "plan_id": plan_id, "step_index": 0, "status": "completed" })).await.unwrap();
    assert_eq!( upd["progress"], "1/2 steps completed (50%)");
    assert_eq!( upd["overall_status"], "in_progress");

    let v = ctx.call_tool_json( "update_plan_status", json!({ "plan_id": plan_id, "step_index": -1, "status": "completed" })).await;
    assert!( v["error"].as_str().unwrap().contains("-1"));

    let v = ctx.call_tool_json( "update_plan_status", json!({ "plan_id": plan_id, "step_index": 0, "status": "done" })).await;
    assert!( v.get("error").is_some());

    let status = ctx.call_tool( "get_plan_status", json!({ "plan_id": plan_id })).await.unwrap();
    assert_eq!( status["percentage"], 50);
    assert_eq!( status["steps"][1]["files"], json!(["terrain.raw"]));
}
