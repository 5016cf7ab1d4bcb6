//! Core domain entities for habit tracking.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of week-days; valid week-day values are `0..WEEK_DAY_COUNT`.
///
/// Week-day numbering follows `chrono`'s `num_days_from_sunday`:
/// Sunday = 0, Monday = 1, ... Saturday = 6.
pub const WEEK_DAY_COUNT: u8 = 7;

/// Habit identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HabitId(pub Uuid);

impl HabitId {
    pub fn new(value: Uuid) -> Self {
        HabitId(value)
    }

    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        HabitId(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for HabitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A recurring task scheduled on specific week-days.
///
/// Title and week-day set are immutable after creation; a habit is removed
/// only by an explicit delete, which cascades to its completion records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub title: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    /// Week-days the habit is scheduled on. A `BTreeSet` keeps the invariant
    /// "unique, unordered subset of 0..=6" by construction.
    pub week_days: BTreeSet<u8>,
}

impl Habit {
    /// True if the habit is scheduled on the given week-day (0 = Sunday).
    pub fn scheduled_on(&self, week_day: u8) -> bool {
        self.week_days.contains(&week_day)
    }
}

/// Week-day number for a calendar date, with Sunday = 0.
pub fn week_day_of(date: NaiveDate) -> u8 {
    use chrono::Datelike;
    date.weekday().num_days_from_sunday() as u8
}

/// Per-date aggregate of scheduled vs. completed habit counts.
///
/// Derived projection, computed on read and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub scheduled: u32,
    pub completed: u32,
}

impl DaySummary {
    pub fn new(date: NaiveDate, scheduled: u32, completed: u32) -> Self {
        Self {
            date,
            scheduled,
            completed,
        }
    }
}
