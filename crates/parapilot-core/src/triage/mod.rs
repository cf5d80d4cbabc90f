//! Deterministic triage for overloaded task lists.
//!
//! When more tasks are due soon than can realistically be done, the list is
//! split into three buckets:
//! - **keep**: the top few by (priority, quick win, due date)
//! - **reconsider**: low-priority or very long tasks among the rest
//! - **defer**: everything else
//!
//! Every input task lands in exactly one bucket.

mod quick_wins;

pub use quick_wins::{quick_wins, QuickWinConfig};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::task::{Priority, Task};

/// Triage tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageConfig {
    /// Task counts at or below this need no triage.
    #[serde(default = "default_threshold")]
    pub threshold: usize,
    /// Lower bound of the keep bucket.
    #[serde(default = "default_keep_min")]
    pub keep_min: usize,
    /// Upper bound of the keep bucket.
    #[serde(default = "default_keep_max")]
    pub keep_max: usize,
    /// Tasks shorter than this count as quick wins.
    #[serde(default = "default_quick_win_minutes")]
    pub quick_win_minutes: u32,
    /// Duration assumed for tasks without an estimate.
    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: u32,
    /// Non-kept tasks longer than this are sent to reconsider.
    #[serde(default = "default_reconsider_duration_minutes")]
    pub reconsider_duration_minutes: u32,
    /// Look-ahead used by [`select_due_soon`].
    #[serde(default = "default_horizon_hours")]
    pub horizon_hours: u32,
}

fn default_threshold() -> usize {
    3
}
fn default_keep_min() -> usize {
    3
}
fn default_keep_max() -> usize {
    5
}
fn default_quick_win_minutes() -> u32 {
    30
}
fn default_duration_minutes() -> u32 {
    60
}
fn default_reconsider_duration_minutes() -> u32 {
    180
}
fn default_horizon_hours() -> u32 {
    24
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            keep_min: default_keep_min(),
            keep_max: default_keep_max(),
            quick_win_minutes: default_quick_win_minutes(),
            default_duration_minutes: default_duration_minutes(),
            reconsider_duration_minutes: default_reconsider_duration_minutes(),
            horizon_hours: default_horizon_hours(),
        }
    }
}

/// Task ids per bucket, each in ranked order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageSuggestions {
    pub keep: Vec<String>,
    pub defer: Vec<String>,
    pub reconsider: Vec<String>,
}

impl TriageSuggestions {
    pub fn total(&self) -> usize {
        self.keep.len() + self.defer.len() + self.reconsider.len()
    }
}

/// Outcome of [`triage`].
///
/// When no triage is needed only `needs_reprioritization` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageResult {
    pub needs_reprioritization: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<TriageSuggestions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl TriageResult {
    fn not_needed() -> Self {
        Self::default()
    }
}

/// Split an overloaded task list into keep/defer/reconsider.
pub fn triage(tasks: &[Task], config: &TriageConfig) -> TriageResult {
    let total = tasks.len();
    if total <= config.threshold {
        tracing::debug!(total, threshold = config.threshold, "no triage needed");
        return TriageResult::not_needed();
    }

    let keep_count = (total / 3)
        .max(config.keep_min)
        .min(config.keep_max)
        .min(total);

    let ranked = rank_tasks(tasks, config);
    let mut suggestions = TriageSuggestions::default();

    for (position, task) in ranked.into_iter().enumerate() {
        let bucket = if position < keep_count {
            &mut suggestions.keep
        } else if needs_reconsideration(task, config) {
            &mut suggestions.reconsider
        } else {
            &mut suggestions.defer
        };
        bucket.push(task.id.clone());
    }

    tracing::debug!(
        total,
        keep = suggestions.keep.len(),
        defer = suggestions.defer.len(),
        reconsider = suggestions.reconsider.len(),
        "triaged task list"
    );

    let message = format!("You have {total} tasks due soon. Focus on the top {keep_count}.");
    let reasoning = format!(
        "Keeping {} highest-priority tasks, deferring {}, reconsidering {}.",
        suggestions.keep.len(),
        suggestions.defer.len(),
        suggestions.reconsider.len()
    );

    TriageResult {
        needs_reprioritization: true,
        message: Some(message),
        suggestions: Some(suggestions),
        reasoning: Some(reasoning),
    }
}

/// Order tasks by priority (desc), quick win (desc), then due date.
///
/// The due-date tie-break compares the fixed-width ISO-8601 strings from
/// [`Task::due_key`] lexically rather than parsed instants; tasks without a
/// due date come last. The sort is stable, so full ties keep input order.
pub fn rank_tasks<'a>(tasks: &'a [Task], config: &TriageConfig) -> Vec<&'a Task> {
    let mut keyed: Vec<(&Task, u8, Option<String>)> = tasks
        .iter()
        .map(|task| (task, quick_win_bonus(task, config), task.due_key()))
        .collect();

    keyed.sort_by(|(a, a_bonus, a_due), (b, b_bonus, b_due)| {
        b.priority
            .rank()
            .cmp(&a.priority.rank())
            .then_with(|| b_bonus.cmp(a_bonus))
            .then_with(|| compare_due(a_due.as_deref(), b_due.as_deref()))
    });

    keyed.into_iter().map(|(task, _, _)| task).collect()
}

fn quick_win_bonus(task: &Task, config: &TriageConfig) -> u8 {
    let minutes = task.duration_minutes.unwrap_or(config.default_duration_minutes);
    u8::from(minutes < config.quick_win_minutes)
}

fn compare_due(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn needs_reconsideration(task: &Task, config: &TriageConfig) -> bool {
    task.priority == Priority::Low
        || task.duration_minutes.unwrap_or(config.default_duration_minutes)
            > config.reconsider_duration_minutes
}

/// Incomplete tasks due within `horizon_hours` of `now`, overdue ones included.
pub fn select_due_soon(tasks: &[Task], now: DateTime<Utc>, horizon_hours: u32) -> Vec<Task> {
    let cutoff = now + Duration::hours(i64::from(horizon_hours));
    tasks
        .iter()
        .filter(|task| !task.completed)
        .filter(|task| task.due_at.is_some_and(|due| due <= cutoff))
        .cloned()
        .collect()
}
