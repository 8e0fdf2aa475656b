use crate::{Error, Result, estimation::EstimationResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Delayed,
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Delayed => "delayed",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: ItemStatus,
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_suggested_duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_reasoning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    /// Another step of the same task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on_step_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: ItemStatus,
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_suggested_duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_reasoning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    /// Another task of the same phase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on_task_id: Option<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub order: u32,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phases: Vec<Phase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_estimated_end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_actual_end_date: Option<DateTime<Utc>>,
}

/// Anything an accepted AI estimate can be written onto.
pub trait EstimateTarget {
    fn name(&self) -> &str;
    fn apply_estimate(&mut self, estimate: &EstimationResult);
}

impl EstimateTarget for Task {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply_estimate(&mut self, estimate: &EstimationResult) {
        self.ai_suggested_duration = Some(estimate.duration_estimate.clone());
        self.ai_reasoning = Some(estimate.reasoning.clone());
    }
}

impl EstimateTarget for Step {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply_estimate(&mut self, estimate: &EstimationResult) {
        self.ai_suggested_duration = Some(estimate.duration_estimate.clone());
        self.ai_reasoning = Some(estimate.reasoning.clone());
    }
}

/// Fresh identifier such as `task-3f2a...`.
pub fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}

impl Task {
    pub fn new(name: impl Into<String>, order: u32) -> Self {
        Self {
            id: new_id("task"),
            name: name.into(),
            order,
            ..Default::default()
        }
    }

    pub fn step(&self, step_id: &str) -> Result<&Step> {
        self.steps
            .iter()
            .find(|s| s.id == step_id)
            .ok_or_else(|| Error::not_found("step", step_id))
    }

    pub fn step_mut(&mut self, step_id: &str) -> Result<&mut Step> {
        self.steps
            .iter_mut()
            .find(|s| s.id == step_id)
            .ok_or_else(|| Error::not_found("step", step_id))
    }

    /// Appends a step at the end of the task's ordering.
    pub fn add_step(&mut self, mut step: Step) -> &Step {
        step.order = self.steps.len() as u32 + 1;
        self.steps.push(step);
        &self.steps[self.steps.len() - 1]
    }

    pub fn remove_step(&mut self, step_id: &str) -> Result<Step> {
        let idx = self
            .steps
            .iter()
            .position(|s| s.id == step_id)
            .ok_or_else(|| Error::not_found("step", step_id))?;
        Ok(self.steps.remove(idx))
    }

    /// The step `step_id` depends on, if it names one that exists in this task.
    pub fn dependency_of(&self, step_id: &str) -> Result<Option<&Step>> {
        let step = self.step(step_id)?;
        Ok(step
            .depends_on_step_id
            .as_deref()
            .and_then(|dep| self.steps.iter().find(|s| s.id == dep)))
    }
}

impl Step {
    pub fn new(name: impl Into<String>, order: u32) -> Self {
        Self {
            id: new_id("step"),
            name: name.into(),
            order,
            ..Default::default()
        }
    }
}

impl Phase {
    pub fn new(name: impl Into<String>, order: u32) -> Self {
        Self {
            id: new_id("phase"),
            name: name.into(),
            order,
            ..Default::default()
        }
    }

    pub fn task(&self, task_id: &str) -> Result<&Task> {
        self.tasks
            .iter()
            .find(|t| t.id == task_id)
            .ok_or_else(|| Error::not_found("task", task_id))
    }

    pub fn task_mut(&mut self, task_id: &str) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| Error::not_found("task", task_id))
    }

    pub fn add_task(&mut self, mut task: Task) -> &Task {
        task.order = self.tasks.len() as u32 + 1;
        self.tasks.push(task);
        &self.tasks[self.tasks.len() - 1]
    }

    pub fn remove_task(&mut self, task_id: &str) -> Result<Task> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == task_id)
            .ok_or_else(|| Error::not_found("task", task_id))?;
        Ok(self.tasks.remove(idx))
    }

    pub fn dependency_of(&self, task_id: &str) -> Result<Option<&Task>> {
        let task = self.task(task_id)?;
        Ok(task
            .depends_on_task_id
            .as_deref()
            .and_then(|dep| self.tasks.iter().find(|t| t.id == dep)))
    }

    pub fn completed_tasks(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status == ItemStatus::Completed)
            .count()
    }

    /// Share of completed tasks as a whole percentage; 0 for an empty phase.
    pub fn progress(&self) -> u8 {
        percentage(self.completed_tasks(), self.tasks.len())
    }

    /// Status rolled up from the tasks. Order matters: all-completed wins,
    /// then any delayed, then any in progress.
    pub fn derived_status(&self) -> ItemStatus {
        if self.tasks.is_empty() {
            return ItemStatus::Pending;
        }
        if self.completed_tasks() == self.tasks.len() {
            return ItemStatus::Completed;
        }
        if self.tasks.iter().any(|t| t.status == ItemStatus::Delayed) {
            return ItemStatus::Delayed;
        }
        if self.tasks.iter().any(|t| t.status == ItemStatus::InProgress) {
            return ItemStatus::InProgress;
        }
        ItemStatus::Pending
    }
}

impl Project {
    pub fn phase(&self, phase_id: &str) -> Result<&Phase> {
        self.phases
            .iter()
            .find(|p| p.id == phase_id)
            .ok_or_else(|| Error::not_found("phase", phase_id))
    }

    pub fn phase_mut(&mut self, phase_id: &str) -> Result<&mut Phase> {
        self.phases
            .iter_mut()
            .find(|p| p.id == phase_id)
            .ok_or_else(|| Error::not_found("phase", phase_id))
    }

    pub fn add_phase(&mut self, mut phase: Phase) -> &Phase {
        phase.order = self.phases.len() as u32 + 1;
        self.phases.push(phase);
        &self.phases[self.phases.len() - 1]
    }

    pub fn remove_phase(&mut self, phase_id: &str) -> Result<Phase> {
        let idx = self
            .phases
            .iter()
            .position(|p| p.id == phase_id)
            .ok_or_else(|| Error::not_found("phase", phase_id))?;
        Ok(self.phases.remove(idx))
    }

    pub fn tasks(&self) -> impl Iterator<Item = (&Phase, &Task)> {
        self.phases
            .iter()
            .flat_map(|phase| phase.tasks.iter().map(move |task| (phase, task)))
    }

    pub fn overall_progress(&self) -> u8 {
        let total = self.tasks().count();
        let completed = self
            .tasks()
            .filter(|(_, t)| t.status == ItemStatus::Completed)
            .count();
        percentage(completed, total)
    }
}

pub(crate) fn percentage(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u8
}
