//! End-of-day quick-win picks.

use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Quick-win selection tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickWinConfig {
    /// Longest estimate that still counts, inclusive.
    #[serde(default = "default_max_minutes")]
    pub max_minutes: u32,
    /// How many tasks to suggest.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_max_minutes() -> u32 {
    15
}
fn default_limit() -> usize {
    3
}

impl Default for QuickWinConfig {
    fn default() -> Self {
        Self {
            max_minutes: default_max_minutes(),
            limit: default_limit(),
        }
    }
}

/// Incomplete tasks estimated at `max_minutes` or less, highest priority
/// first, at most `limit` of them. Tasks without an estimate never qualify.
pub fn quick_wins(tasks: &[Task], config: &QuickWinConfig) -> Vec<Task> {
    let mut picks: Vec<&Task> = tasks
        .iter()
        .filter(|task| !task.completed)
        .filter(|task| {
            task.duration_minutes
                .is_some_and(|minutes| minutes <= config.max_minutes)
        })
        .collect();

    picks.sort_by_key(|task| std::cmp::Reverse(task.priority.rank()));
    picks.into_iter().take(config.limit).cloned().collect()
}
