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

/// common geodetic constants that should be consistent through JEO applications

/// mean earth radius in kilometers as used by the haversine bounding box derivation
pub const MEAN_EARTH_RADIUS_KM: f64 = 6371.0;

/// flat approximation of the length of one degree (latitude or longitude) in kilometers.
/// This is only accurate for latitude degrees, longitude degrees shrink with cos(lat)
pub const KM_PER_DEGREE: f64 = 111.0;
