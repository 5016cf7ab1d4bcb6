//! Transfer objects for the service boundary.
//!
//! Conversions between entities and transfer objects are explicit, hand
//! written `From` impls so the contract stays statically checkable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::habit::{Habit, HabitId};

/// Boundary representation of a [`Habit`].
///
/// Never the source of truth; always produced from a persisted entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitDto {
    pub id: HabitId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
    /// Week-days as a sorted list (the entity stores a set).
    pub week_days: Vec<u8>,
}

impl From<&Habit> for HabitDto {
    fn from(habit: &Habit) -> Self {
        Self {
            id: habit.id,
            title: habit.title.clone(),
            created_at: habit.created_at,
            user_id: habit.user_id.clone(),
            week_days: habit.week_days.iter().copied().collect(),
        }
    }
}

impl From<Habit> for HabitDto {
    fn from(habit: Habit) -> Self {
        HabitDto::from(&habit)
    }
}

/// Validated-at-the-service input for habit creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHabitInput {
    pub title: String,
    pub week_days: Vec<u8>,
    #[serde(default)]
    pub user_id: String,
}

/// Result of a day query: habits scheduled for the date's week-day plus the
/// ids already completed on that date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayHabits {
    pub possible_habits: Vec<HabitDto>,
    pub completed_habits: Vec<HabitId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dto_from_habit_sorts_week_days() {
        let habit = Habit {
            id: HabitId::generate(),
            title: "Read".to_string(),
            user_id: "u1".to_string(),
            created_at: Utc::now(),
            week_days: [5, 1, 3].into_iter().collect(),
        };

        let dto = HabitDto::from(&habit);
        assert_eq!(dto.title, habit.title);
        assert_eq!(dto.week_days, vec![1, 3, 5]);
        assert_eq!(dto.id, habit.id);
    }
}
