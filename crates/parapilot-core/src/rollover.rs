//! Detection of tasks that keep rolling over.
//!
//! A task that is still open several days past its due date is usually
//! too big, mis-prioritized or no longer wanted. These are surfaced so the
//! caller can suggest breaking it down, rescheduling or archiving it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Rollover detection tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolloverConfig {
    /// Whole days past due before a task counts as rolled over (exclusive).
    #[serde(default = "default_overdue_days")]
    pub overdue_days: i64,
}

fn default_overdue_days() -> i64 {
    3
}

impl Default for RolloverConfig {
    fn default() -> Self {
        Self {
            overdue_days: default_overdue_days(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverCandidate {
    pub task_id: String,
    pub title: String,
    pub days_overdue: i64,
}

/// Open tasks overdue by more than `overdue_days` whole days, most overdue
/// first. Ties are ordered by task id.
pub fn detect_rollovers(
    tasks: &[Task],
    now: DateTime<Utc>,
    config: &RolloverConfig,
) -> Vec<RolloverCandidate> {
    let mut candidates: Vec<RolloverCandidate> = tasks
        .iter()
        .filter(|task| !task.completed)
        .filter_map(|task| {
            let days_overdue = (now - task.due_at?).num_days();
            (days_overdue > config.overdue_days).then(|| RolloverCandidate {
                task_id: task.id.clone(),
                title: task.title.clone(),
                days_overdue,
            })
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.days_overdue
            .cmp(&a.days_overdue)
            .then_with(|| a.task_id.cmp(&b.task_id))
    });

    if !candidates.is_empty() {
        tracing::debug!(count = candidates.len(), "detected rollover tasks");
    }
    candidates
}
