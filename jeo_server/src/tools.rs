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

//! the tool registry of the server: names, JSON input schemas and the JSON in / JSON out tool implementations

use std::path::PathBuf;
use lazy_static::lazy_static;
use reqwest::Client;
use serde::{Serialize, Deserialize, de::DeserializeOwned};
use serde_json::{json, Value};
use tracing::{debug,warn};
use jeo_common::{BoundingBox, BboxMethod, GeoPoint, compute_bbox, geo::haversine_distance_km};
use jeo_analysis::{
    fetch_or_sample, pixels_per_unit, temporal_stats, ImageQuery, Raster, RasterSource, SpatialStats, TemporalMethod, TiffSource,
    heightmap::{create_vrchat_terrain, export_to_blender, export_to_unity, generate_heightmap, VrchatLimits},
    render::{heatmap_image, save_rgb, stats_image},
    texture::export_texture_maps,
};
use crate::{
    catalog::{Catalog, get_catalog_text},
    config::ServerConfig,
    errors::{Result, JeoServerError, invalid_arguments},
    features::{features_bbox, load_features, read_geojson, select_feature_file},
    plan::{PlanStep, PlanStore, StepStatus},
};

#[derive(Debug,Clone,Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

fn spec (name: &'static str, description: &'static str, properties: Value, required: &[&str]) -> ToolSpec {
    ToolSpec { name, description, input_schema: json!({ "type": "object", "properties": properties, "required": required }) }
}

lazy_static! {
    static ref BBOX_SCHEMA: Value = json!({ "type": "array", "items": {"type": "number"}, "minItems": 4, "maxItems": 4,
        "description": "[min_lon, min_lat, max_lon, max_lat]" });
    static ref DATES_SCHEMA: Value = json!({ "type": "array", "items": {"type": "string"}, "minItems": 2, "maxItems": 2,
        "description": "[start, end] as yyyy-mm-ddThh:mm:ss" });
    static ref POINT_SCHEMA: Value = json!({ "type": "object", "properties": { "lat": {"type": "number"}, "lon": {"type": "number"} },
        "required": ["lat", "lon"] });

    static ref TERRAIN_PROPERTIES: Value = json!({
        "collection": {"type": "string"},
        "bounds": BBOX_SCHEMA.clone(),
        "resolution": {"type": "number", "description": "pixels per degree", "default": 20.0},
        "date_range": DATES_SCHEMA.clone(),
        "output_dir": {"type": "string"}
    });

    pub static ref TOOL_SPECS: Vec<ToolSpec> = vec![
        spec( "search_collections_id",
            "Returns the dataset catalog text. Each dataset lists id, title, description, bands, keywords, startDate, endDate, bbox and epsg, terminated by '---'",
            json!({}), &[]),
        spec( "search_collections", "Search collection ids and their bands that contain all given keywords (e.g. [\"LST\", \"half-month\"])",
            json!({ "keywords": {"type": "array", "items": {"type": "string"}} }), &["keywords"]),
        spec( "list_available_collections", "List all available collections and their bands", json!({}), &[]),
        spec( "compute_bbox", "Bounding box of the circle that has the two points as diameter",
            json!({ "point1": POINT_SCHEMA.clone(), "point2": POINT_SCHEMA.clone(), "method": {"type": "string", "enum": ["flat", "geodesic"], "default": "geodesic"} }),
            &["point1", "point2"]),
        spec( "calc_spatial_stats", "Spatial statistics (mean, std, min, max, median, quartiles) of a collection band within a bounding box",
            json!({ "collection": {"type": "string"}, "band": {"type": "string"}, "date_range": DATES_SCHEMA.clone(), "bounds": BBOX_SCHEMA.clone() }), &[]),
        spec( "get_earth_images",
            "Retrieve a collection image for a date range, resolution (pixels per degree) and bounding box. The extent of an existing GeoJSON file takes precedence over bounds",
            json!({ "collection": {"type": "string"}, "date_range": DATES_SCHEMA.clone(), "resolution": {"type": "number"},
                    "bounds": BBOX_SCHEMA.clone(), "geojson_path": {"type": "string"}, "band": {"type": "string"} }), &["collection"]),
        spec( "show_spatial_stats", "Render spatial statistics of a collection band within a bounding box as box plot PNG",
            json!({ "collection": {"type": "string"}, "band": {"type": "string"}, "dlim": DATES_SCHEMA.clone(), "bbox": BBOX_SCHEMA.clone() }), &[]),
        spec( "calc_temporal_stats", "Per pixel statistics over the images of a date list (default: the date range end points)",
            json!({ "collection": {"type": "string"}, "date_range": DATES_SCHEMA.clone(),
                    "dates": {"type": "array", "items": {"type": "string"}},
                    "method": {"type": "string", "enum": ["mean", "max", "min", "std", "median"], "default": "mean"},
                    "bounds": BBOX_SCHEMA.clone(), "band": {"type": "string"} }), &["collection", "date_range"]),
        spec( "show_images", "Render a collection band within a bounding box as heatmap PNG",
            json!({ "collection": {"type": "string"}, "band": {"type": "string"}, "dlim": DATES_SCHEMA.clone(), "bbox": BBOX_SCHEMA.clone() }), &[]),
        spec( "generate_heightmap", "Generate a 16 bit grayscale heightmap PNG from elevation data",
            json!({ "collection": {"type": "string"}, "bounds": BBOX_SCHEMA.clone(), "resolution": {"type": "number", "default": 20.0},
                    "date_range": DATES_SCHEMA.clone(), "output_path": {"type": "string"} }), &["collection", "bounds"]),
        spec( "export_to_blender", "Export heightmap and texture for Blender", TERRAIN_PROPERTIES.clone(), &["collection", "bounds"]),
        spec( "export_to_unity", "Export 16 bit RAW terrain, texture and metadata for Unity", TERRAIN_PROPERTIES.clone(), &["collection", "bounds"]),
        spec( "create_vrchat_terrain", "Generate terrain data within VRChat polygon and texture limits",
            {
                let mut props = TERRAIN_PROPERTIES.clone();
                props["max_polygons"] = json!({"type": "integer", "default": 100000});
                props["texture_size"] = json!({"type": "integer", "default": 2048});
                props
            }, &["collection", "bounds"]),
        spec( "export_texture_maps", "Export diffuse and normal texture maps", TERRAIN_PROPERTIES.clone(), &["collection", "bounds"]),
        spec( "read_geojson", "Read a GeoJSON file and report its feature count and extent",
            json!({ "file_path": {"type": "string"} }), &["file_path"]),
        spec( "select_features", "Select GeoJSON features with property values containing any of the keywords",
            json!({ "file_path": {"type": "string"}, "keywords": {"type": "array", "items": {"type": "string"}} }), &["file_path", "keywords"]),
        spec( "create_plan", "Create an implementation plan for a complex task",
            json!({ "task_description": {"type": "string"}, "objectives": {"type": "array", "items": {"type": "string"}},
                    "steps": {"type": "array", "items": {"type": "object", "properties": {
                        "description": {"type": "string"}, "files": {"type": "array", "items": {"type": "string"}},
                        "dependencies": {"type": "array", "items": {"type": "string"}}, "risk": {"type": "string"} }}},
                    "estimated_time": {"type": "string"} }), &["task_description", "objectives", "steps"]),
        spec( "update_plan_status", "Update the status of a plan step",
            json!({ "plan_id": {"type": "string"}, "step_index": {"type": "integer"},
                    "status": {"type": "string", "enum": ["pending", "in_progress", "completed", "failed"]}, "notes": {"type": "string"} }),
            &["plan_id", "step_index", "status"]),
        spec( "get_plan_status", "Get the current status of a plan", json!({ "plan_id": {"type": "string"} }), &["plan_id"]),
    ];
}

/// default date range of image retrieval
const YEAR_2021: [&str;2] = ["2021-01-01T00:00:00", "2021-12-31T23:59:59"];

/// width and height of rendered statistics charts
const STATS_CHART_SIZE: (u32,u32) = (400, 300);

pub fn tool_names () -> Vec<&'static str> {
    TOOL_SPECS.iter().map(|s| s.name).collect()
}

/* #region tool arguments ******************************************************************************************/

#[derive(Debug,Deserialize)]
struct KeywordArgs {
    #[serde(default)]
    keywords: Vec<String>,
}

#[derive(Debug,Deserialize)]
struct BboxArgs {
    point1: GeoPoint,
    point2: GeoPoint,
    #[serde(default)]
    method: BboxMethod,
}

#[derive(Debug,Default,Deserialize)]
#[serde(default)]
struct ImageArgs {
    collection: Option<String>,
    band: Option<String>,
    #[serde(alias = "dlim")]
    date_range: Option<[String;2]>,
    #[serde(alias = "bbox")]
    bounds: Option<[f64;4]>,
}

#[derive(Debug,Deserialize)]
struct EarthImageArgs {
    collection: String,
    #[serde(default)]
    date_range: Option<[String;2]>,
    #[serde(default)]
    resolution: Option<f64>,
    #[serde(default, alias = "bbox")]
    bounds: Option<[f64;4]>,
    #[serde(default)]
    geojson_path: Option<PathBuf>,
    #[serde(default)]
    band: Option<String>,
}

#[derive(Debug,Deserialize)]
struct TemporalArgs {
    collection: String,
    date_range: [String;2],
    #[serde(default)]
    dates: Vec<String>,
    #[serde(default)]
    method: TemporalMethod,
    #[serde(default, alias = "bbox")]
    bounds: Option<[f64;4]>,
    #[serde(default)]
    band: Option<String>,
}

fn default_resolution () -> f64 { 20.0 }

#[derive(Debug,Deserialize)]
struct TerrainArgs {
    collection: String,
    #[serde(alias = "bbox")]
    bounds: [f64;4],
    #[serde(default = "default_resolution")]
    resolution: f64,
    #[serde(default)]
    date_range: Option<[String;2]>,
    #[serde(default)]
    output_path: Option<PathBuf>,
    #[serde(default)]
    output_dir: Option<PathBuf>,
    #[serde(default)]
    max_polygons: Option<usize>,
    #[serde(default)]
    texture_size: Option<u32>,
}

#[derive(Debug,Deserialize)]
struct FeatureArgs {
    file_path: PathBuf,
    #[serde(default)]
    keywords: Vec<String>,
}

#[derive(Debug,Deserialize)]
struct CreatePlanArgs {
    task_description: String,
    #[serde(default)]
    objectives: Vec<String>,
    #[serde(default)]
    steps: Vec<PlanStep>,
    #[serde(default)]
    estimated_time: Option<String>,
}

#[derive(Debug,Deserialize)]
struct UpdatePlanArgs {
    plan_id: String,
    step_index: i64,
    status: StepStatus,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug,Deserialize)]
struct PlanIdArgs {
    plan_id: String,
}

fn parse_args<T: DeserializeOwned> (args: Value) -> Result<T> {
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value( args).map_err(|e| invalid_arguments(e))
}

/* #endregion tool arguments */

/// shared state of tool invocations
pub struct ToolContext {
    pub config: ServerConfig,
    pub client: Client,
    pub plans: PlanStore,
    source: Box<dyn RasterSource>,
}

impl ToolContext {
    pub fn new (config: ServerConfig) -> Self {
        let source: Box<dyn RasterSource> = match &config.raster_file {
            Some(path) => Box::new( TiffSource::new( path)),
            None => Box::new( config.sample.clone())
        };
        Self::with_source( config, source)
    }

    pub fn with_source (config: ServerConfig, source: Box<dyn RasterSource>) -> Self {
        let plans = PlanStore::new( &config.plan_dir);
        ToolContext { config, client: Client::new(), plans, source }
    }

    /// invoke tool `name`, reporting failures as `{"error": ..}` result
    pub async fn call_tool_json (&self, name: &str, args: Value) -> Value {
        match self.call_tool( name, args).await {
            Ok(v) => v,
            Err(e) => {
                warn!("tool {name} failed: {e}");
                json!({ "error": e.to_string() })
            }
        }
    }

    pub async fn call_tool (&self, name: &str, args: Value) -> Result<Value> {
        debug!("calling tool {name} with {args}");
        match name {
            "search_collections_id" => Ok( json!({ "text": get_catalog_text( &self.client, &self.config.catalog_url).await? })),
            "search_collections" => self.search_collections( parse_args( args)?).await,
            "list_available_collections" => self.list_available_collections().await,
            "compute_bbox" => self.compute_bbox( parse_args( args)?),
            "calc_spatial_stats" => self.calc_spatial_stats( parse_args( args)?).await,
            "get_earth_images" => self.get_earth_images( parse_args( args)?).await,
            "show_spatial_stats" => self.show_spatial_stats( parse_args( args)?).await,
            "calc_temporal_stats" => self.calc_temporal_stats( parse_args( args)?).await,
            "show_images" => self.show_images( parse_args( args)?).await,
            "generate_heightmap" => self.generate_heightmap( parse_args( args)?).await,
            "export_to_blender" => {
                let args: TerrainArgs = parse_args( args)?;
                let (raster, dir) = self.terrain_input( &args, "blender_export").await?;
                Ok( serde_json::to_value( export_to_blender( &raster, dir)?)? )
            }
            "export_to_unity" => {
                let args: TerrainArgs = parse_args( args)?;
                let (raster, dir) = self.terrain_input( &args, "unity_export").await?;
                Ok( serde_json::to_value( export_to_unity( &raster, dir)?)? )
            }
            "create_vrchat_terrain" => {
                let args: TerrainArgs = parse_args( args)?;
                let defaults = VrchatLimits::default();
                let limits = VrchatLimits {
                    max_polygons: args.max_polygons.unwrap_or( defaults.max_polygons),
                    texture_size: args.texture_size.unwrap_or( defaults.texture_size),
                };
                let (raster, dir) = self.terrain_input( &args, "vrchat_terrain").await?;
                Ok( serde_json::to_value( create_vrchat_terrain( &raster, limits, dir)?)? )
            }
            "export_texture_maps" => {
                let args: TerrainArgs = parse_args( args)?;
                let (raster, dir) = self.terrain_input( &args, "texture_maps").await?;
                Ok( serde_json::to_value( export_texture_maps( &raster, dir)?)? )
            }
            "read_geojson" => {
                let args: FeatureArgs = parse_args( args)?;
                Ok( serde_json::to_value( read_geojson( &args.file_path)?)? )
            }
            "select_features" => {
                let args: FeatureArgs = parse_args( args)?;
                Ok( serde_json::to_value( select_feature_file( &args.file_path, &args.keywords)?)? )
            }
            "create_plan" => {
                let args: CreatePlanArgs = parse_args( args)?;
                Ok( serde_json::to_value( self.plans.create_plan( &args.task_description, args.objectives, args.steps, args.estimated_time)?)? )
            }
            "update_plan_status" => {
                let args: UpdatePlanArgs = parse_args( args)?;
                let idx = usize::try_from( args.step_index).map_err(|_| invalid_arguments( format!("invalid step index: {}", args.step_index)))?;
                Ok( serde_json::to_value( self.plans.update_plan_status( &args.plan_id, idx, args.status, args.notes)?)? )
            }
            "get_plan_status" => {
                let args: PlanIdArgs = parse_args( args)?;
                Ok( serde_json::to_value( self.plans.get_plan_status( &args.plan_id)?)? )
            }
            other => Err( JeoServerError::UnknownTool( other.to_string()))
        }
    }

    async fn search_collections (&self, args: KeywordArgs) -> Result<Value> {
        let catalog = Catalog::fetch( &self.client, &self.config.catalog_url).await?;
        let (collections, bands) = catalog.filter_name( &args.keywords);
        Ok( json!({ "collections": collections, "bands": bands, "keywords": args.keywords }) )
    }

    async fn list_available_collections (&self) -> Result<Value> {
        let catalog = Catalog::fetch( &self.client, &self.config.catalog_url).await?;
        let (collections, bands) = catalog.filter_name::<&str>( &[]);
        Ok( json!({ "total_count": collections.len(), "collections": collections, "bands": bands }) )
    }

    fn compute_bbox (&self, args: BboxArgs) -> Result<Value> {
        args.point1.validate()?;
        args.point2.validate()?;

        let bbox = compute_bbox( &args.point1, &args.point2, args.method);
        Ok( json!({
            "bbox": bbox.to_minmax_array(),
            "method": args.method,
            "distance_km": haversine_distance_km( &args.point1, &args.point2),
            "ppu": pixels_per_unit( &bbox, self.config.image_width).ok(),
        }))
    }

    /// fetch the queried raster, falling back to sample data if the source fails. Degenerate bounding boxes are errors
    pub async fn fetch_raster (&self, query: &ImageQuery) -> Result<(Raster,bool)> {
        query.ppu()?;
        Ok( fetch_or_sample( self.source.as_ref(), &self.config.sample, query).await )
    }

    fn image_query (&self, args: ImageArgs) -> ImageQuery {
        let cfg = &self.config;
        ImageQuery::new(
            args.collection.unwrap_or_else(|| cfg.default_collection.clone()),
            args.band.unwrap_or_else(|| cfg.default_band.clone()),
            args.date_range.unwrap_or_else(|| cfg.default_date_range.clone()),
            args.bounds.map( |b| BoundingBox::from_wsen( &b)).unwrap_or( cfg.default_bbox),
            cfg.image_width
        )
    }

    async fn calc_spatial_stats (&self, args: ImageArgs) -> Result<Value> {
        let query = self.image_query( args);
        let (raster, sample_data) = self.fetch_raster( &query).await?;
        let stats = SpatialStats::from_raster( &raster)?;

        let mut result = serde_json::to_value( stats)?;
        result["collection"] = json!( query.collection);
        result["band"] = json!( query.band);
        result["bbox"] = json!( query.bbox.to_minmax_array());
        result["sample_data"] = json!( sample_data);
        Ok(result)
    }

    async fn get_earth_images (&self, args: EarthImageArgs) -> Result<Value> {
        let cfg = &self.config;
        let bbox = match &args.geojson_path {
            Some(path) if path.is_file() => {
                features_bbox( &load_features( path)?).ok_or_else(|| invalid_arguments( format!("no coordinates in {path:?}")))?
            }
            opt_path => {
                if let Some(path) = opt_path { warn!("GeoJSON file {path:?} not found, using bounds") }
                args.bounds.map(|b| BoundingBox::from_wsen( &b)).unwrap_or( cfg.default_bbox)
            }
        };
        let target_width = match args.resolution {
            Some(ppu) => (ppu * bbox.width()).round().max(0.0) as u32,
            None => cfg.image_width
        };
        let date_range = args.date_range.unwrap_or_else(|| YEAR_2021.map( String::from));
        let band = args.band.unwrap_or_else(|| cfg.default_band.clone());

        let query = ImageQuery::new( &args.collection, band, date_range, bbox, target_width);
        let (raster, sample_data) = self.fetch_raster( &query).await?;
        let extent = raster.bbox.unwrap_or( query.bbox);

        Ok( json!({
            "success": true,
            "collection": query.collection,
            "band": query.band,
            "date_range": query.date_range,
            "sample_data": sample_data,
            "raster_info": {
                "shape": raster.shape(),
                "latlim": [extent.south, extent.north],
                "lonlim": [extent.west, extent.east],
            }
        }))
    }

    async fn show_spatial_stats (&self, args: ImageArgs) -> Result<Value> {
        let query = self.image_query( args);
        let (raster, sample_data) = self.fetch_raster( &query).await?;
        let stats = SpatialStats::from_raster( &raster)?;

        let dir = self.config.temp_dir.join("images");
        jeo_common::fs::ensure_dir( &dir)?;
        let path = dir.join( format!("{}_{}_stats.png", sanitize( &query.collection), sanitize( &query.band)));
        save_rgb( &stats_image( &stats, STATS_CHART_SIZE.0, STATS_CHART_SIZE.1)?, &path)?;

        Ok( json!({
            "images": [ path.to_string_lossy() ],
            "statistics": stats,
            "collection": query.collection,
            "band": query.band,
            "bbox": query.bbox.to_minmax_array(),
            "sample_data": sample_data,
        }))
    }

    /// one fetch per date, reduced cell by cell
    async fn calc_temporal_stats (&self, args: TemporalArgs) -> Result<Value> {
        let mut dates = args.dates;
        if dates.is_empty() {
            dates.push( args.date_range[0].clone());
            if args.date_range[1] != args.date_range[0] { dates.push( args.date_range[1].clone()) }
        }

        let bbox = args.bounds.map(|b| BoundingBox::from_wsen( &b)).unwrap_or( self.config.default_bbox);
        let band = args.band.unwrap_or_else(|| self.config.default_band.clone());

        let mut rasters = Vec::with_capacity( dates.len());
        let mut sample_data = false;
        for date in &dates {
            let query = ImageQuery::new( &args.collection, &band, [date.clone(), date.clone()], bbox, self.config.image_width);
            let (raster, is_sample) = self.fetch_raster( &query).await?;
            sample_data |= is_sample;
            rasters.push( raster);
        }

        let reduced = temporal_stats( &rasters, args.method)?;
        let stats = SpatialStats::from_raster( &reduced)?;

        let dir = self.config.temp_dir.join("images");
        jeo_common::fs::ensure_dir( &dir)?;
        let path = dir.join( format!("{}_{}_temporal_{}.png", sanitize( &args.collection), sanitize( &band), args.method));
        save_rgb( &heatmap_image( &reduced, 1)?, &path)?;

        Ok( json!({
            "success": true,
            "method": args.method,
            "dates": dates,
            "shape": reduced.shape(),
            "statistics": stats,
            "images": [ path.to_string_lossy() ],
            "sample_data": sample_data,
        }))
    }

    async fn show_images (&self, args: ImageArgs) -> Result<Value> {
        let query = self.image_query( args);
        let (raster, sample_data) = self.fetch_raster( &query).await?;

        let dir = self.config.temp_dir.join("images");
        jeo_common::fs::ensure_dir( &dir)?;
        let path = dir.join( format!("{}_{}.png", sanitize( &query.collection), sanitize( &query.band)));
        save_rgb( &heatmap_image( &raster, 1)?, &path)?;

        Ok( json!({
            "images": [ path.to_string_lossy() ],
            "collection": query.collection,
            "band": query.band,
            "bbox": query.bbox.to_minmax_array(),
            "shape": raster.shape(),
            "sample_data": sample_data,
        }))
    }

    async fn terrain_raster (&self, args: &TerrainArgs) -> Result<Raster> {
        let bbox = BoundingBox::from_wsen( &args.bounds);
        let target_width = (args.resolution * bbox.width()).round().max(0.0) as u32;
        let date_range = args.date_range.clone().unwrap_or_else(|| self.config.default_date_range.clone());
        let query = ImageQuery::new( &args.collection, "DSM", date_range, bbox, target_width);

        let (raster, _) = self.fetch_raster( &query).await?;
        Ok(raster)
    }

    async fn terrain_input (&self, args: &TerrainArgs, default_subdir: &str) -> Result<(Raster,PathBuf)> {
        let raster = self.terrain_raster( args).await?;
        let dir = args.output_dir.clone().unwrap_or_else(|| self.config.temp_dir.join( default_subdir));
        Ok( (raster, dir) )
    }

    async fn generate_heightmap (&self, args: TerrainArgs) -> Result<Value> {
        let raster = self.terrain_raster( &args).await?;
        let path = args.output_path.clone().unwrap_or_else(|| self.config.temp_dir.join("heightmap.png"));
        Ok( serde_json::to_value( generate_heightmap( &raster, path)?)? )
    }
}

fn sanitize (s: &str) -> String {
    s.chars().map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '.' { c } else { '_' }).collect()
}
