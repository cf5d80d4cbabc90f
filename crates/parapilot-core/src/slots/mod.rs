//! Free-slot search and conflict detection over busy calendar intervals.
//!
//! Intervals are half-open `[start, end)`: back-to-back commitments do not
//! conflict, and a free slot may end exactly where a busy interval begins.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// A half-open time range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Strict half-open overlap test.
    pub fn conflicts_with(&self, other: &Interval) -> bool {
        self.start < other.end && self.end > other.start
    }

    fn validate(&self) -> Result<()> {
        if self.end < self.start {
            return Err(ValidationError::InvalidTimeRange {
                start: self.start,
                end: self.end,
            }
            .into());
        }
        Ok(())
    }
}

/// Whether two intervals overlap. Touching endpoints do not conflict.
pub fn conflicts(a: &Interval, b: &Interval) -> bool {
    a.conflicts_with(b)
}

/// Busy intervals that conflict with `candidate`, ordered by start.
pub fn find_conflicts(candidate: &Interval, busy: &[Interval]) -> Vec<Interval> {
    let mut hits: Vec<Interval> = busy
        .iter()
        .filter(|b| candidate.conflicts_with(b))
        .copied()
        .collect();
    hits.sort_by_key(|b| b.start);
    hits
}

/// Find free windows of at least `duration_minutes` inside
/// `[window_start, window_end)`.
///
/// Busy intervals may be unsorted and may overlap; they are sorted by start
/// but not merged. A cursor walks them from `window_start`, emitting the gap
/// before each busy interval when it is long enough and then advancing to
/// that interval's end if it lies further ahead.
///
/// Every gap is clipped to `window_end`, so a busy interval starting after
/// the window never stretches a slot past it.
///
/// # Errors
///
/// Returns a validation error if the window or a busy interval ends before
/// it starts, or if `duration_minutes` is not positive.
pub fn free_slots(
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    busy: &[Interval],
    duration_minutes: i64,
) -> Result<Vec<Interval>> {
    Interval::new(window_start, window_end).validate()?;
    if duration_minutes <= 0 {
        return Err(ValidationError::InvalidValue {
            field: "duration_minutes".into(),
            message: format!("must be positive, got {duration_minutes}"),
        }
        .into());
    }
    for interval in busy {
        interval.validate()?;
    }

    let needed = Duration::minutes(duration_minutes);
    let mut sorted = busy.to_vec();
    sorted.sort_by_key(|b| b.start);

    let mut slots = Vec::new();
    let mut cursor = window_start;

    for b in &sorted {
        // a commitment after the window still closes the window
        let gap_end = b.start.min(window_end);
        if fits(cursor, needed, gap_end) {
            tracing::trace!(start = %cursor, end = %gap_end, "free slot");
            slots.push(Interval::new(cursor, gap_end));
        }
        cursor = cursor.max(b.end);
    }

    if fits(cursor, needed, window_end) {
        tracing::trace!(start = %cursor, end = %window_end, "free slot");
        slots.push(Interval::new(cursor, window_end));
    }

    Ok(slots)
}

fn fits(cursor: DateTime<Utc>, needed: Duration, limit: DateTime<Utc>) -> bool {
    cursor
        .checked_add_signed(needed)
        .is_some_and(|end| end <= limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 21, hour, minute, 0).unwrap()
    }

    fn span(h1: u32, m1: u32, h2: u32, m2: u32) -> Interval {
        Interval::new(at(h1, m1), at(h2, m2))
    }

    #[test]
    fn back_to_back_intervals_do_not_conflict() {
        assert!(!conflicts(&span(9, 0, 10, 0), &span(10, 0, 11, 0)));
        assert!(!conflicts(&span(10, 0, 11, 0), &span(9, 0, 10, 0)));
        assert!(conflicts(&span(9, 0, 10, 0), &span(9, 30, 10, 30)));
        assert!(conflicts(&span(9, 0, 12, 0), &span(10, 0, 11, 0)));
    }

    #[test]
    fn find_conflicts_returns_sorted_hits() {
        let busy = vec![span(13, 0, 14, 0), span(8, 0, 9, 30), span(9, 30, 10, 0)];
        let hits = find_conflicts(&span(9, 0, 13, 30), &busy);
        assert_eq!(hits, vec![span(8, 0, 9, 30), span(9, 30, 10, 0), span(13, 0, 14, 0)]);
        assert!(find_conflicts(&span(10, 0, 13, 0), &busy).is_empty());
    }

    #[test]
    fn slot_of_exact_duration_is_kept() {
        let busy = vec![span(12, 0, 13, 0), span(9, 0, 10, 0)];
        let slots = free_slots(at(8, 0), at(17, 0), &busy, 60).unwrap();
        assert_eq!(slots, vec![span(8, 0, 9, 0), span(10, 0, 12, 0), span(13, 0, 17, 0)]);
    }

    #[test]
    fn short_gaps_are_skipped() {
        let busy = vec![span(9, 0, 10, 0), span(10, 30, 11, 0)];
        let slots = free_slots(at(9, 0), at(12, 0), &busy, 45).unwrap();
        assert_eq!(slots, vec![span(11, 0, 12, 0)]);
    }

    #[test]
    fn empty_busy_list_yields_whole_window() {
        let slots = free_slots(at(8, 0), at(17, 0), &[], 30).unwrap();
        assert_eq!(slots, vec![span(8, 0, 17, 0)]);

        assert!(free_slots(at(8, 0), at(8, 0), &[], 30).unwrap().is_empty());
    }

    #[test]
    fn overlapping_busy_intervals_advance_cursor_monotonically() {
        let busy = vec![span(9, 0, 11, 0), span(10, 0, 10, 30), span(12, 0, 13, 0)];
        let slots = free_slots(at(8, 0), at(14, 0), &busy, 60).unwrap();
        assert_eq!(slots, vec![span(8, 0, 9, 0), span(11, 0, 12, 0), span(13, 0, 14, 0)]);
    }

    #[test]
    fn busy_outside_window_never_stretches_slots() {
        let busy = vec![span(6, 0, 7, 0), span(18, 0, 19, 0)];
        let slots = free_slots(at(8, 0), at(17, 0), &busy, 60).unwrap();
        assert_eq!(slots, vec![span(8, 0, 17, 0)]);

        let straddling = vec![span(7, 0, 9, 0)];
        let slots = free_slots(at(8, 0), at(12, 0), &straddling, 60).unwrap();
        assert_eq!(slots, vec![span(9, 0, 12, 0)]);
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(free_slots(at(17, 0), at(8, 0), &[], 30).is_err());
        assert!(free_slots(at(8, 0), at(17, 0), &[], 0).is_err());
        assert!(free_slots(at(8, 0), at(17, 0), &[], -15).is_err());
        assert!(free_slots(at(8, 0), at(17, 0), &[span(11, 0, 10, 0)], 30).is_err());
    }
}
