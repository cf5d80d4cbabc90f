//! Context-aware suggestions.
//!
//! The current local time selects a context (Friday afternoon, morning,
//! end of day) and each context turns the open task list into a short set
//! of suggestions. Completion histograms live in [`stats`].

mod stats;

pub use stats::{
    completion_by_period, completion_by_weekday, completion_stats, CompletionStats, DayCount,
    DayPeriod, PeriodCount,
};

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::task::{Priority, Task};
use crate::triage::{quick_wins, QuickWinConfig};

/// Situation the user is in, derived from the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionContext {
    Friday,
    Morning,
    EndOfDay,
    General,
}

impl SuggestionContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionContext::Friday => "friday",
            SuggestionContext::Morning => "morning",
            SuggestionContext::EndOfDay => "end_of_day",
            SuggestionContext::General => "general",
        }
    }
}

impl fmt::Display for SuggestionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SuggestionContext {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "friday" => Ok(SuggestionContext::Friday),
            "morning" => Ok(SuggestionContext::Morning),
            "end_of_day" | "end-of-day" => Ok(SuggestionContext::EndOfDay),
            "general" => Ok(SuggestionContext::General),
            other => Err(ValidationError::InvalidValue {
                field: "context".into(),
                message: format!("unknown context '{other}'"),
            }),
        }
    }
}

/// Pick the context for a wall-clock time.
///
/// Friday from 15:00 wins over everything else, then mornings (06:00 to
/// 10:00), then evenings (17:00 to 20:00). All ranges are half-open.
pub fn detect_context<Tz: TimeZone>(now: &DateTime<Tz>) -> SuggestionContext {
    let hour = now.hour();
    if now.weekday() == Weekday::Fri && hour >= 15 {
        SuggestionContext::Friday
    } else if (6..10).contains(&hour) {
        SuggestionContext::Morning
    } else if (17..20).contains(&hour) {
        SuggestionContext::EndOfDay
    } else {
        SuggestionContext::General
    }
}

/// Suggestion tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestConfig {
    /// How many of today's tasks the morning plan highlights.
    #[serde(default = "default_morning_limit")]
    pub morning_limit: usize,
}

fn default_morning_limit() -> usize {
    3
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            morning_limit: default_morning_limit(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    DailyPlan,
    NoTasks,
    QuickWin,
    WeeklyReview,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

/// Compact task view carried inside a suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub id: String,
    pub title: String,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    /// Countdown to the due time, e.g. "45 minutes".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_in: Option<String>,
}

impl TaskSummary {
    fn from_task(task: &Task, now: DateTime<Utc>) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            priority: task.priority,
            duration_minutes: task.duration_minutes,
            due_in: task.due_at.map(|due| time_until(now, due)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub title: String,
    pub description: String,
    pub urgency: Urgency,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<TaskSummary>,
}

/// Suggestions for one context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestions {
    pub context: SuggestionContext,
    pub suggestions: Vec<Suggestion>,
}

/// Open tasks due on the calendar day of `now`, in `now`'s time zone.
pub fn due_today<'a, Tz: TimeZone>(tasks: &'a [Task], now: &DateTime<Tz>) -> Vec<&'a Task> {
    let tz = now.timezone();
    let today = now.date_naive();
    tasks
        .iter()
        .filter(|task| !task.completed)
        .filter(|task| {
            task.due_at
                .is_some_and(|due| due.with_timezone(&tz).date_naive() == today)
        })
        .collect()
}

/// Morning plan: the highest-priority tasks due today, or a nudge to plan
/// the day when nothing is due.
pub fn morning_plan<Tz: TimeZone>(
    tasks: &[Task],
    now: &DateTime<Tz>,
    config: &SuggestConfig,
) -> Suggestion {
    let mut today = due_today(tasks, now);
    if today.is_empty() {
        return Suggestion {
            kind: SuggestionKind::NoTasks,
            title: "No tasks scheduled for today".into(),
            description: "Want to run auto-schedule to fill your day?".into(),
            urgency: Urgency::Low,
            tasks: Vec::new(),
        };
    }

    let count = today.len();
    today.sort_by_key(|task| std::cmp::Reverse(task.priority.rank()));
    let now_utc = now.with_timezone(&Utc);

    Suggestion {
        kind: SuggestionKind::DailyPlan,
        title: format!("Good morning! You have {count} tasks today"),
        description: "Here are your top priorities".into(),
        urgency: Urgency::High,
        tasks: today
            .into_iter()
            .take(config.morning_limit)
            .map(|task| TaskSummary::from_task(task, now_utc))
            .collect(),
    }
}

/// Build the suggestions for `context`, or for the context detected from
/// `now` when none is given.
pub fn suggest<Tz: TimeZone>(
    tasks: &[Task],
    now: &DateTime<Tz>,
    context: Option<SuggestionContext>,
    config: &SuggestConfig,
    quick_win_config: &QuickWinConfig,
) -> Suggestions {
    let context = context.unwrap_or_else(|| detect_context(now));
    let now_utc = now.with_timezone(&Utc);

    let suggestions = match context {
        SuggestionContext::Morning => vec![morning_plan(tasks, now, config)],
        SuggestionContext::EndOfDay => {
            let picks = quick_wins(tasks, quick_win_config);
            if picks.is_empty() {
                Vec::new()
            } else {
                vec![Suggestion {
                    kind: SuggestionKind::QuickWin,
                    title: format!(
                        "{} quick task{} to finish your day strong",
                        picks.len(),
                        if picks.len() == 1 { "" } else { "s" }
                    ),
                    description: format!(
                        "These tasks take {} minutes or less",
                        quick_win_config.max_minutes
                    ),
                    urgency: Urgency::Low,
                    tasks: picks
                        .iter()
                        .map(|task| TaskSummary::from_task(task, now_utc))
                        .collect(),
                }]
            }
        }
        SuggestionContext::Friday => vec![Suggestion {
            kind: SuggestionKind::WeeklyReview,
            title: "Ready to start your weekly review?".into(),
            description: "Reflect on the week and plan for the next one".into(),
            urgency: Urgency::Medium,
            tasks: Vec::new(),
        }],
        SuggestionContext::General => Vec::new(),
    };

    tracing::debug!(%context, count = suggestions.len(), "built suggestions");
    Suggestions {
        context,
        suggestions,
    }
}

/// Human-readable countdown from `now` to `future`.
///
/// Anything under a minute away, including the past, reads "now". Under an
/// hour is shown in whole minutes, otherwise in whole hours.
pub fn time_until(now: DateTime<Utc>, future: DateTime<Utc>) -> String {
    let minutes = (future - now).num_minutes();
    if minutes < 1 {
        "now".to_string()
    } else if minutes < 60 {
        format!("{minutes} minute{}", if minutes == 1 { "" } else { "s" })
    } else {
        let hours = minutes / 60;
        format!("{hours} hour{}", if hours == 1 { "" } else { "s" })
    }
}
