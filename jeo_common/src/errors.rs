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

use crate::define_error;

pub type Result<T> = std::result::Result<T, JeoCommonError>;

define_error!{ pub JeoCommonError =
    IOError(#[from] std::io::Error) : "IO error: {0}",
    JsonError(#[from] serde_json::Error) : "JSON error: {0}",
    RonError(#[from] ron::error::SpannedError) : "config RON error: {0}",
    InvalidCoordinate(String) : "invalid coordinate: {0}",
    MissingCoordinates(String) : "coordinates not configured: {0}",
    ConfigError(String) : "config error: {0}"
}

pub fn invalid_coordinate<S: ToString> (msg: S)->JeoCommonError {
    JeoCommonError::InvalidCoordinate(msg.to_string())
}

pub fn config_error<S: ToString> (msg: S)->JeoCommonError {
    JeoCommonError::ConfigError(msg.to_string())
}
