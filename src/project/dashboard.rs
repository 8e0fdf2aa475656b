use super::model::{ItemStatus, Project, Task};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Why a task shows up on the dashboard's attention list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "reason")]
pub enum DelayReason {
    /// Stored status is `delayed`.
    Flagged,
    /// Not completed and its end date lies at least a full day in the past.
    /// The stored status is left untouched.
    #[serde(rename_all = "camelCase")]
    PastDue { days_overdue: i64 },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttentionItem {
    pub phase_name: String,
    pub task: Task,
    #[serde(flatten)]
    pub reason: DelayReason,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Pending plus in-progress.
    pub active_tasks: usize,
    /// Whole days until the estimated end date; negative once overdue.
    pub days_to_deadline: Option<i64>,
    pub overall_progress: u8,
    pub attention: Vec<AttentionItem>,
}

impl DashboardSummary {
    pub fn compute(project: &Project, now: DateTime<Utc>) -> Self {
        let mut total_tasks = 0;
        let mut completed_tasks = 0;
        let mut active_tasks = 0;
        let mut attention = Vec::new();

        for (phase, task) in project.tasks() {
            total_tasks += 1;
            match task.status {
                ItemStatus::Completed => completed_tasks += 1,
                ItemStatus::Pending | ItemStatus::InProgress => active_tasks += 1,
                ItemStatus::Delayed => {}
            }

            if let Some(reason) = delay_reason(task, now) {
                attention.push(AttentionItem {
                    phase_name: phase.name.clone(),
                    task: task.clone(),
                    reason,
                });
            }
        }

        let days_to_deadline = project
            .project_estimated_end_date
            .map(|end| (end - now).num_days());

        Self {
            total_tasks,
            completed_tasks,
            active_tasks,
            days_to_deadline,
            overall_progress: project.overall_progress(),
            attention,
        }
    }

    pub fn is_overdue(&self) -> bool {
        self.days_to_deadline.is_some_and(|days| days <= 0)
    }
}

pub fn delay_reason(task: &Task, now: DateTime<Utc>) -> Option<DelayReason> {
    match task.status {
        ItemStatus::Delayed => Some(DelayReason::Flagged),
        ItemStatus::Completed => None,
        ItemStatus::Pending | ItemStatus::InProgress => {
            let days_overdue = (now - task.end_date?).num_days();
            (days_overdue > 0).then_some(DelayReason::PastDue { days_overdue })
        }
    }
}
