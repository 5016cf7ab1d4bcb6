//! Habit service layer.
//!
//! Business-rule validation and orchestration on top of the repository
//! traits. This layer has no transport knowledge: it takes already-parsed
//! input, raises typed failures, and returns transfer objects. Status-code
//! mapping lives in `http::error`.

use chrono::{NaiveDate, Utc};
use log::debug;

use crate::db::repository::{FullRepository, RepositoryError};
use crate::models::{
    week_day_of, CreateHabitInput, DayHabits, DaySummary, Habit, HabitDto, HabitId, WEEK_DAY_COUNT,
};

/// Date format accepted at the service boundary.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Typed failures raised by the service layer.
///
/// The handler layer maps each kind to a status code via exhaustive
/// matching; there is no catch-all exception translation.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Client-correctable input problem (bad format, missing required field).
    #[error("{0}")]
    Validation(String),

    /// Referenced entity absent.
    #[error("{0}")]
    NotFound(String),

    /// Storage/infrastructure failure, not client-correctable.
    /// Propagated unchanged from the repository.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Parse a calendar date in `YYYY-MM-DD` format.
///
/// Any other shape fails with a validation error; no repository call is made
/// on behalf of an unparsable date.
pub fn parse_date(date_str: &str) -> ServiceResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str, DATE_FORMAT)
        .map_err(|_| ServiceError::Validation("invalid date format".to_string()))
}

fn validate_input(input: &CreateHabitInput) -> ServiceResult<()> {
    if input.title.trim().is_empty() {
        return Err(ServiceError::Validation(
            "title must not be empty".to_string(),
        ));
    }
    if input.week_days.is_empty() {
        return Err(ServiceError::Validation(
            "at least one week day is required".to_string(),
        ));
    }
    if let Some(day) = input.week_days.iter().find(|d| **d >= WEEK_DAY_COUNT) {
        return Err(ServiceError::Validation(format!(
            "week day {} is out of range 0-6",
            day
        )));
    }
    Ok(())
}

/// Create a habit from validated input and persist it.
///
/// Constraints: non-empty title, week-days a non-empty subset of 0-6.
/// Duplicate week-days in the input collapse into the entity's set.
pub async fn create_habit(
    repo: &dyn FullRepository,
    input: CreateHabitInput,
) -> ServiceResult<HabitDto> {
    validate_input(&input)?;

    let habit = Habit {
        id: HabitId::generate(),
        title: input.title.trim().to_string(),
        user_id: input.user_id,
        created_at: Utc::now(),
        week_days: input.week_days.into_iter().collect(),
    };

    let stored = repo.create_habit(habit).await?;
    debug!("Created habit id={}", stored.id);
    Ok(HabitDto::from(stored))
}

/// All habits, mapped to transfer objects, repository ordering preserved.
///
/// Scoped to one user when `user_id` is given. A user with no habits gets an
/// empty list, never an error.
pub async fn get_all_habits(
    repo: &dyn FullRepository,
    user_id: Option<&str>,
) -> ServiceResult<Vec<HabitDto>> {
    let habits = repo.get_all_habits(user_id).await?;
    Ok(habits.iter().map(HabitDto::from).collect())
}

/// Habits scheduled on the given date's week-day plus the ids already
/// completed on that date.
pub async fn get_habits_for_day(
    repo: &dyn FullRepository,
    date_str: &str,
) -> ServiceResult<DayHabits> {
    let date = parse_date(date_str)?;
    let week_day = week_day_of(date);

    let possible = repo.habits_for_week_day(week_day).await?;
    let completed = repo.completed_habit_ids(date).await?;

    Ok(DayHabits {
        possible_habits: possible.iter().map(HabitDto::from).collect(),
        completed_habits: completed,
    })
}

/// Flip the completion state for `(habit_id, date)`.
///
/// Idempotent flip: toggling twice restores the original state. Retrying
/// after a transient repository failure is safe because the flip either
/// landed or it did not.
pub async fn toggle_habit_for_day(
    repo: &dyn FullRepository,
    habit_id: HabitId,
    date_str: &str,
) -> ServiceResult<()> {
    let date = parse_date(date_str)?;

    let habit = repo
        .get_habit(habit_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("habit {} not found", habit_id)))?;

    // A completion record may only exist on dates the habit is scheduled.
    let week_day = week_day_of(date);
    if !habit.scheduled_on(week_day) {
        return Err(ServiceError::Validation(format!(
            "habit is not scheduled on week day {}",
            week_day
        )));
    }

    let completed = repo.toggle_completion(habit_id, date).await?;
    debug!(
        "Toggled habit id={} date={} completed={}",
        habit_id, date, completed
    );
    Ok(())
}

/// Per-date scheduled/completed counts, ordered by date ascending.
pub async fn get_summary(repo: &dyn FullRepository) -> ServiceResult<Vec<DaySummary>> {
    Ok(repo.get_summary().await?)
}

/// Remove a habit and cascade removal of its completion records.
pub async fn delete_habit(repo: &dyn FullRepository, habit_id: HabitId) -> ServiceResult<()> {
    if repo.get_habit(habit_id).await?.is_none() {
        return Err(ServiceError::NotFound(format!(
            "habit {} not found",
            habit_id
        )));
    }

    repo.delete_habit(habit_id).await?;
    debug!("Deleted habit id={}", habit_id);
    Ok(())
}

/// Verify the repository is reachable.
pub async fn health_check(repo: &dyn FullRepository) -> ServiceResult<bool> {
    Ok(repo.health_check().await?)
}
