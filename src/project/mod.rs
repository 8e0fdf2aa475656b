//! House-building project structure (phases, tasks, steps) and the
//! dashboard figures derived from it.

mod dashboard;
mod model;

pub use dashboard::{AttentionItem, DashboardSummary, DelayReason, delay_reason};
pub use model::{EstimateTarget, ItemStatus, Phase, Project, Step, Task, User, new_id};
