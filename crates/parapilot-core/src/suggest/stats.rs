//! Completion histograms by weekday and by period of the day.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use serde::Serialize;

use crate::task::Task;

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Coarse period of the day a completion falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPeriod {
    EarlyMorning,
    Morning,
    Lunch,
    Afternoon,
    Evening,
    Night,
}

impl DayPeriod {
    pub const ALL: [DayPeriod; 6] = [
        DayPeriod::EarlyMorning,
        DayPeriod::Morning,
        DayPeriod::Lunch,
        DayPeriod::Afternoon,
        DayPeriod::Evening,
        DayPeriod::Night,
    ];

    /// Bucket an hour (0-23). Hours from 20:00 through 05:59 are night.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=8 => DayPeriod::EarlyMorning,
            9..=11 => DayPeriod::Morning,
            12..=13 => DayPeriod::Lunch,
            14..=16 => DayPeriod::Afternoon,
            17..=19 => DayPeriod::Evening,
            _ => DayPeriod::Night,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayPeriod::EarlyMorning => "Early Morning (6-9am)",
            DayPeriod::Morning => "Morning (9am-12pm)",
            DayPeriod::Lunch => "Lunch (12-2pm)",
            DayPeriod::Afternoon => "Afternoon (2-5pm)",
            DayPeriod::Evening => "Evening (5-8pm)",
            DayPeriod::Night => "Night (8pm+)",
        }
    }

    fn index(&self) -> usize {
        match self {
            DayPeriod::EarlyMorning => 0,
            DayPeriod::Morning => 1,
            DayPeriod::Lunch => 2,
            DayPeriod::Afternoon => 3,
            DayPeriod::Evening => 4,
            DayPeriod::Night => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub day: &'static str,
    pub completed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodCount {
    pub period: DayPeriod,
    pub label: &'static str,
    pub completed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionStats {
    pub total_completed: usize,
    pub by_weekday: Vec<DayCount>,
    pub by_period: Vec<PeriodCount>,
}

/// Completion times of tasks that are completed and carry one.
fn completions(tasks: &[Task]) -> impl Iterator<Item = DateTime<Utc>> + '_ {
    tasks
        .iter()
        .filter(|task| task.completed)
        .filter_map(|task| task.completed_at)
}

/// Completions per weekday in `tz`, always all seven days from Monday.
pub fn completion_by_weekday<Tz: TimeZone>(tasks: &[Task], tz: &Tz) -> Vec<DayCount> {
    let mut counts = [0usize; 7];
    for at in completions(tasks) {
        let day = at.with_timezone(tz).weekday().num_days_from_monday() as usize;
        counts[day] += 1;
    }

    WEEKDAY_NAMES
        .into_iter()
        .zip(counts)
        .map(|(day, completed)| DayCount { day, completed })
        .collect()
}

/// Completions per period of the day in `tz`. Empty periods are omitted;
/// the rest keep the order of [`DayPeriod::ALL`].
pub fn completion_by_period<Tz: TimeZone>(tasks: &[Task], tz: &Tz) -> Vec<PeriodCount> {
    let mut counts = [0usize; 6];
    for at in completions(tasks) {
        counts[DayPeriod::from_hour(at.with_timezone(tz).hour()).index()] += 1;
    }

    DayPeriod::ALL
        .iter()
        .filter(|period| counts[period.index()] > 0)
        .map(|period| PeriodCount {
            period: *period,
            label: period.label(),
            completed: counts[period.index()],
        })
        .collect()
}

pub fn completion_stats<Tz: TimeZone>(tasks: &[Task], tz: &Tz) -> CompletionStats {
    CompletionStats {
        total_completed: completions(tasks).count(),
        by_weekday: completion_by_weekday(tasks, tz),
        by_period: completion_by_period(tasks, tz),
    }
}
