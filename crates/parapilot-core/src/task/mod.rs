//! Task record shared by the extractor, triage and rollover logic.
//!
//! Tasks are transient: built per call, never mutated by the engine, and
//! never retained across calls. Persistence belongs to the caller.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::{Result, ValidationError};

/// Task priority level.
///
/// Unrecognized input always maps to [`Priority::Medium`], both through
/// [`Priority::parse_lossy`] and when deserializing.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Numeric rank used for ordering (urgent=4 ... low=1).
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Urgent => 4,
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    /// Parse a priority name, falling back to medium.
    pub fn parse_lossy(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "urgent" => Priority::Urgent,
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Priority::parse_lossy).unwrap_or_default())
    }
}

/// A task as seen by the decision engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, alias = "due_date")]
    pub due_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "estimated_duration_minutes")]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub completed: bool,
    /// When the task was completed, if it has been.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a task with a fresh id and every optional field at its default.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            due_at: None,
            duration_minutes: None,
            priority: Priority::Medium,
            keywords: Vec::new(),
            completed: false,
            completed_at: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    /// Mark the task completed at `at`.
    pub fn with_completed_at(mut self, at: DateTime<Utc>) -> Self {
        self.completed = true;
        self.completed_at = Some(at);
        self
    }

    /// Check the structural invariants: the id is non-blank and a duration,
    /// when present, is positive.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MalformedInput(format!(
                "task '{}' has an empty id",
                self.title
            ))
            .into());
        }
        if self.duration_minutes == Some(0) {
            return Err(ValidationError::InvalidValue {
                field: "duration_minutes".into(),
                message: format!("task '{}' has a zero duration", self.id),
            }
            .into());
        }
        Ok(())
    }

    /// ISO-8601 rendering of the due date, used for lexical tie-breaks.
    ///
    /// Precision is fixed at microseconds so every key has the same width.
    pub fn due_key(&self) -> Option<String> {
        self.due_at
            .map(|due| due.to_rfc3339_opts(SecondsFormat::Micros, true))
    }
}

/// Decode a JSON task list.
///
/// Fails with [`ValidationError::MalformedInput`] when the top level is not
/// an array, an element does not describe a valid task, or two tasks share
/// an id.
pub fn parse_tasks(json: &str) -> Result<Vec<Task>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let items = match value {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(ValidationError::MalformedInput(format!(
                "expected a JSON array of tasks, got {}",
                json_kind(&other)
            ))
            .into())
        }
    };

    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| -> Result<Task> {
            let task: Task = serde_json::from_value(item).map_err(|e| {
                ValidationError::MalformedInput(format!("task at index {index}: {e}"))
            })?;
            task.validate()?;
            if !seen.insert(task.id.clone()) {
                return Err(ValidationError::MalformedInput(format!(
                    "task at index {index}: duplicate id '{}'",
                    task.id
                ))
                .into());
            }
            Ok(task)
        })
        .collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
