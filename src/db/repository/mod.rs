//! Repository trait definitions.
//!
//! The persistence layer is consumed exclusively through these traits, one
//! per aggregate, composed into [`FullRepository`]. Implementations are free
//! to back them with any storage engine; the in-memory
//! [`LocalRepository`](crate::db::repositories::LocalRepository) is the
//! reference implementation used for tests and local development.
//!
//! # Concurrency contract
//!
//! This layer holds no locks across calls and performs no retries. A storage
//! implementation is responsible for its own concurrency control; in
//! particular, two requests racing on the same `(habit, date)` toggle are
//! only guaranteed a consistent outcome if the implementation serializes
//! writes per key.

pub mod error;

use async_trait::async_trait;
use chrono::NaiveDate;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use crate::models::{DaySummary, Habit, HabitId};

/// Persistence operations for the habit aggregate.
#[async_trait]
pub trait HabitRepository: Send + Sync {
    /// Persist a new habit and return the stored entity.
    async fn create_habit(&self, habit: Habit) -> RepositoryResult<Habit>;

    /// Fetch a habit by id, `None` if it does not exist.
    async fn get_habit(&self, id: HabitId) -> RepositoryResult<Option<Habit>>;

    /// All habits, in insertion order, optionally scoped to one user.
    async fn get_all_habits(&self, user_id: Option<&str>) -> RepositoryResult<Vec<Habit>>;

    /// Habits scheduled on the given week-day (0 = Sunday), in insertion order.
    async fn habits_for_week_day(&self, week_day: u8) -> RepositoryResult<Vec<Habit>>;

    /// Remove a habit and cascade removal of its completion records.
    async fn delete_habit(&self, id: HabitId) -> RepositoryResult<()>;
}

/// Persistence operations for per-day completion records.
#[async_trait]
pub trait CompletionRepository: Send + Sync {
    /// Flip the completion state for `(habit_id, date)` and register the date
    /// for summaries. Returns the completion state after the flip.
    async fn toggle_completion(&self, habit_id: HabitId, date: NaiveDate)
        -> RepositoryResult<bool>;

    /// Ids of habits completed on the given date, in completion order.
    async fn completed_habit_ids(&self, date: NaiveDate) -> RepositoryResult<Vec<HabitId>>;

    /// Per-date scheduled/completed counts for every registered date,
    /// ordered by date ascending.
    async fn get_summary(&self) -> RepositoryResult<Vec<DaySummary>>;
}

/// Complete repository surface consumed by the service layer.
#[async_trait]
pub trait FullRepository: HabitRepository + CompletionRepository {
    /// Verify the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
