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

//! persistent implementation plans with per-step status tracking
//!
//! Each plan is stored as `<plan_id>.json` plus a rendered `<plan_id>.md` in the plan directory. Plan ids are
//! derived from the local creation time (`plan_%Y-%m-%d_%H-%M-%S`)

use std::{fmt::Write as FmtWrite, path::{Path,PathBuf}};
use chrono::{DateTime, Local};
use serde::{Serialize,Deserialize};
use strum::{Display, EnumString};
use tracing::info;
use jeo_common::fs::{ensure_dir, filepath_contents_as_string, path_to_lossy_string, set_filepath_contents};
use crate::errors::{Result, JeoServerError};

#[derive(Debug,Clone,Copy,Default,PartialEq,Eq,Serialize,Deserialize,Display,EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StepStatus {
    #[default] Pending,
    InProgress,
    Completed,
    Failed,
}

impl StepStatus {
    fn icon (&self) -> &'static str {
        match self {
            StepStatus::Pending => "⏳",
            StepStatus::InProgress => "🔄",
            StepStatus::Completed => "✅",
            StepStatus::Failed => "❌",
        }
    }
}

#[derive(Debug,Clone,Copy,Default,PartialEq,Eq,Serialize,Deserialize,Display,EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlanStatus {
    #[default] Created,
    InProgress,
    Completed,
}

#[derive(Debug,Clone,Default,Serialize,Deserialize,PartialEq)]
#[serde(default)]
pub struct PlanStep {
    pub description: String,
    pub files: Vec<String>,
    pub dependencies: Vec<String>,
    #[serde(skip_serializing_if = "jeo_common::is_none")]
    pub risk: Option<String>,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "jeo_common::is_none")]
    pub notes: Option<String>,
}

impl PlanStep {
    pub fn new (description: impl ToString) -> Self {
        PlanStep { description: description.to_string(), ..Default::default() }
    }
}

#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
pub struct Plan {
    pub id: String,
    pub task_description: String,
    pub objectives: Vec<String>,
    pub steps: Vec<PlanStep>,
    pub estimated_time: Option<String>,
    pub status: PlanStatus,
    pub created_at: String,
    pub completed_steps: Vec<usize>,
    pub current_step: Option<usize>,
}

impl Plan {
    pub fn total_steps (&self) -> usize { self.steps.len() }
    pub fn completed_count (&self) -> usize { self.completed_steps.len() }

    pub fn percentage (&self) -> usize {
        let total = self.total_steps();
        if total > 0 { self.completed_count() * 100 / total } else { 0 }
    }

    /// set the status of step `idx` and update the completed set, current step and overall plan status
    pub fn set_step_status (&mut self, idx: usize, status: StepStatus, notes: Option<String>) -> Result<()> {
        let step = self.steps.get_mut(idx).ok_or( JeoServerError::InvalidStepIndex(idx))?;
        step.status = status;
        if let Some(notes) = notes.filter(|n| !n.is_empty()) {
            step.notes = Some(notes);
        }

        if status == StepStatus::Completed {
            if !self.completed_steps.contains(&idx) { self.completed_steps.push(idx) }
        } else {
            self.completed_steps.retain(|i| *i != idx);
        }

        if status == StepStatus::InProgress {
            self.current_step = Some(idx);
        } else if status == StepStatus::Completed && self.current_step == Some(idx) {
            self.current_step = None;
        }

        if self.completed_count() == self.total_steps() {
            self.status = PlanStatus::Completed;
        } else if self.completed_count() > 0 || self.steps.iter().any(|s| s.status == StepStatus::InProgress) {
            self.status = PlanStatus::InProgress;
        }
        Ok(())
    }

    pub fn to_markdown (&self) -> String {
        let mut md = String::new();
        // writing to a String does not fail
        let _ = self.write_markdown( &mut md);
        md
    }

    fn write_markdown (&self, md: &mut String) -> std::fmt::Result {
        writeln!( md, "# Implementation Plan: {}\n", self.task_description)?;
        writeln!( md, "**Plan ID**: `{}`", self.id)?;
        writeln!( md, "**Created**: {}", self.created_at)?;
        writeln!( md, "**Status**: {}\n", self.status)?;
        if let Some(t) = &self.estimated_time {
            writeln!( md, "**Estimated Time**: {t}\n")?;
        }

        writeln!( md, "## Overview\n\n{}\n", self.task_description)?;

        writeln!( md, "## Objectives\n")?;
        for obj in &self.objectives { writeln!( md, "- {obj}")?; }
        writeln!( md)?;

        writeln!( md, "## Execution Plan\n")?;
        for (i, step) in self.steps.iter().enumerate() {
            writeln!( md, "### Step {}: {}", i+1, if step.description.is_empty() { "N/A" } else { &step.description })?;
            writeln!( md, "**Status**: {} {}\n", step.status.icon(), step.status)?;
            if !step.files.is_empty() {
                let files: Vec<String> = step.files.iter().map(|f| format!("`{f}`")).collect();
                writeln!( md, "**Files**: {}\n", files.join(", "))?;
            }
            if !step.dependencies.is_empty() {
                writeln!( md, "**Dependencies**: {}\n", step.dependencies.join(", "))?;
            }
            if let Some(risk) = &step.risk { writeln!( md, "**Risk**: {risk}\n")?; }
            if let Some(notes) = &step.notes { writeln!( md, "**Notes**: {notes}\n")?; }
            writeln!( md, "---\n")?;
        }

        writeln!( md, "## Progress\n")?;
        writeln!( md, "**Completed**: {}/{} steps ({}%)\n", self.completed_count(), self.total_steps(), self.percentage())
    }
}

#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
pub struct PlanCreated {
    pub plan_id: String,
    pub status: PlanStatus,
    pub plan_file: String,
    pub markdown_file: String,
    pub total_steps: usize,
    pub message: String,
}

#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
pub struct PlanUpdated {
    pub plan_id: String,
    pub step_index: usize,
    pub status: StepStatus,
    pub progress: String,
    pub overall_status: PlanStatus,
}

#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
pub struct StepSummary {
    pub index: usize,
    pub description: String,
    pub status: StepStatus,
    pub files: Vec<String>,
}

#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
pub struct PlanSummary {
    pub plan_id: String,
    pub task_description: String,
    pub status: PlanStatus,
    pub progress: String,
    pub percentage: usize,
    pub current_step: Option<usize>,
    pub steps: Vec<StepSummary>,
}

/// plan ids are plain file stems within the plan directory
pub fn is_valid_plan_id (plan_id: &str) -> bool {
    !plan_id.is_empty() && !plan_id.contains("..") && !plan_id.contains(['/', '\\', ':'])
}

/// directory backed plan records
#[derive(Debug,Clone)]
pub struct PlanStore {
    dir: PathBuf,
}

impl PlanStore {
    pub fn new (dir: impl Into<PathBuf>) -> Self {
        PlanStore { dir: dir.into() }
    }

    pub fn dir (&self) -> &Path { &self.dir }

    fn json_path (&self, id: &str) -> PathBuf { self.dir.join( format!("{id}.json")) }
    fn md_path (&self, id: &str) -> PathBuf { self.dir.join( format!("{id}.md")) }

    pub fn create_plan (&self, task_description: &str, objectives: Vec<String>, steps: Vec<PlanStep>, estimated_time: Option<String>) -> Result<PlanCreated> {
        self.create_plan_at( Local::now(), task_description, objectives, steps, estimated_time)
    }

    /// create a plan with an explicit creation time. Plans created within the same second get a numeric suffix
    pub fn create_plan_at (&self, now: DateTime<Local>, task_description: &str, objectives: Vec<String>, steps: Vec<PlanStep>, estimated_time: Option<String>) -> Result<PlanCreated> {
        ensure_dir( &self.dir)?;

        let created_at = now.format("%Y-%m-%d_%H-%M-%S").to_string();
        let mut id = format!("plan_{created_at}");
        let mut n = 1;
        while self.json_path( &id).exists() {
            id = format!("plan_{created_at}_{n}");
            n += 1;
        }

        let plan = Plan {
            id,
            task_description: task_description.to_string(),
            objectives,
            steps,
            estimated_time,
            status: PlanStatus::Created,
            created_at,
            completed_steps: Vec::new(),
            current_step: None,
        };
        self.store( &plan)?;
        info!("created plan {} with {} steps", plan.id, plan.total_steps());

        Ok( PlanCreated {
            plan_id: plan.id.clone(),
            status: plan.status,
            plan_file: path_to_lossy_string( self.json_path( &plan.id)),
            markdown_file: path_to_lossy_string( self.md_path( &plan.id)),
            total_steps: plan.total_steps(),
            message: format!("Plan created successfully with {} steps", plan.total_steps()),
        })
    }

    pub fn load (&self, plan_id: &str) -> Result<Plan> {
        if !is_valid_plan_id( plan_id) {
            return Err( JeoServerError::NotFoundError( format!("plan {plan_id}")))
        }
        let path = self.json_path( plan_id);
        if !path.is_file() {
            return Err( JeoServerError::NotFoundError( format!("plan {plan_id}")))
        }
        Ok( serde_json::from_str( &filepath_contents_as_string( &path)?)? )
    }

    pub fn store (&self, plan: &Plan) -> Result<()> {
        ensure_dir( &self.dir)?;
        set_filepath_contents( self.json_path( &plan.id), serde_json::to_string_pretty( plan)?.as_bytes())?;
        set_filepath_contents( self.md_path( &plan.id), plan.to_markdown().as_bytes())?;
        Ok(())
    }

    pub fn update_plan_status (&self, plan_id: &str, step_index: usize, status: StepStatus, notes: Option<String>) -> Result<PlanUpdated> {
        let mut plan = self.load( plan_id)?;
        plan.set_step_status( step_index, status, notes)?;
        self.store( &plan)?;

        Ok( PlanUpdated {
            plan_id: plan.id.clone(),
            step_index,
            status,
            progress: format!("{}/{} steps completed ({}%)", plan.completed_count(), plan.total_steps(), plan.percentage()),
            overall_status: plan.status,
        })
    }

    pub fn get_plan_status (&self, plan_id: &str) -> Result<PlanSummary> {
        let plan = self.load( plan_id)?;

        Ok( PlanSummary {
            plan_id: plan.id.clone(),
            task_description: plan.task_description.clone(),
            status: plan.status,
            progress: format!("{}/{} steps completed", plan.completed_count(), plan.total_steps()),
            percentage: plan.percentage(),
            current_step: plan.current_step,
            steps: plan.steps.iter().enumerate().map(|(index, s)| StepSummary {
                index,
                description: s.description.clone(),
                status: s.status,
                files: s.files.clone(),
            }).collect(),
        })
    }
}
