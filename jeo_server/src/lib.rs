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

//! tool server for Earth observation dataset discovery, retrieval and terrain generation

mod errors;
pub use errors::{Result, JeoServerError, op_failed, invalid_arguments};

pub mod config;
pub use config::ServerConfig;

pub mod catalog;
pub use catalog::{Catalog, CollectionInfo, parse_catalog};

pub mod plan;
pub use plan::{Plan, PlanStep, PlanStore, PlanStatus, StepStatus};

pub mod features;
pub mod tools;
pub use tools::{ToolContext, ToolSpec, TOOL_SPECS};

pub mod dispatch;
pub use dispatch::{Intent, ToolRequest, classify, dispatch, ask};

pub mod rpc;
