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

pub type Result<T> = std::result::Result<T, JeoAnalysisError>;

define_error!{ pub JeoAnalysisError =
    ImageError(#[from] image::ImageError) : "Image error {0}",
    IOError(#[from] std::io::Error) : "IO error: {0}",
    TiffError(#[from] tiff::TiffError) : "Tiff error: {0}",
    SerdeError(#[from] serde_json::Error) : "serialization/deserialization error: {0}",
    CommonError(#[from] JeoCommonError) : "{0}",
    ShapeError(#[from] ndarray::ShapeError) : "array shape error: {0}",
    InvalidImageFormat(String) : "invalid image format: {0}",
    InvalidBoundingBox(String) : "invalid bounding box: {0}",
    InvalidDimensions(String) : "invalid dimension error: {0}",
    IllegalArgument(String) : "illegal argument: {0}",
    InsufficientData(String) : "insufficient data: {0}",
    OpFailed(String) : "operation failed: {0}",
}

pub fn op_failed (msg: impl ToString)->JeoAnalysisError {
    JeoAnalysisError::OpFailed(msg.to_string())
}

pub fn invalid_bbox (msg: impl ToString)->JeoAnalysisError {
    JeoAnalysisError::InvalidBoundingBox(msg.to_string())
}

pub fn insufficient_data (msg: impl ToString)->JeoAnalysisError {
    JeoAnalysisError::InsufficientData(msg.to_string())
}
