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

use jeo_common::{define_error, JeoCommonError};
use jeo_analysis::JeoAnalysisError;

pub type Result<T> = std::result::Result<T, JeoServerError>;

define_error!{ pub JeoServerError =
    IOError(#[from] std::io::Error) : "IO error: {0}",
    JsonError(#[from] serde_json::Error) : "JSON error: {0}",
    HttpError(#[from] reqwest::Error) : "http error: {0}",
    GeoJsonError(#[from] geojson::Error) : "GeoJSON error: {0}",
    CommonError(#[from] JeoCommonError) : "{0}",
    AnalysisError(#[from] JeoAnalysisError) : "{0}",
    NotFoundError(String) : "not found: {0}",
    InvalidStepIndex(usize) : "invalid step index: {0}",
    UnknownTool(String) : "unknown tool: {0}",
    InvalidArguments(String) : "invalid arguments: {0}",
    OpFailed(String) : "operation failed: {0}",
}

pub fn op_failed (msg: impl ToString)->JeoServerError {
    JeoServerError::OpFailed(msg.to_string())
}

pub fn invalid_arguments (msg: impl ToString)->JeoServerError {
    JeoServerError::InvalidArguments(msg.to_string())
}
