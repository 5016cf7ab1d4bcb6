use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use xtracker::db::repository::{
    CompletionRepository, FullRepository, HabitRepository, RepositoryError, RepositoryResult,
};
use xtracker::models::{DaySummary, Habit, HabitId};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
#[allow(dead_code)]
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK poisoned");
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Repository double whose every operation fails with a connection error.
///
/// Used to exercise the 500 translation paths without a real backend.
#[allow(dead_code)]
#[derive(Default)]
pub struct FailingRepository;

impl FailingRepository {
    fn storage_offline() -> RepositoryError {
        RepositoryError::connection("storage offline")
    }
}

#[async_trait]
impl HabitRepository for FailingRepository {
    async fn create_habit(&self, _habit: Habit) -> RepositoryResult<Habit> {
        Err(Self::storage_offline())
    }

    async fn get_habit(&self, _id: HabitId) -> RepositoryResult<Option<Habit>> {
        Err(Self::storage_offline())
    }

    async fn get_all_habits(&self, _user_id: Option<&str>) -> RepositoryResult<Vec<Habit>> {
        Err(Self::storage_offline())
    }

    async fn habits_for_week_day(&self, _week_day: u8) -> RepositoryResult<Vec<Habit>> {
        Err(Self::storage_offline())
    }

    async fn delete_habit(&self, _id: HabitId) -> RepositoryResult<()> {
        Err(Self::storage_offline())
    }
}

#[async_trait]
impl CompletionRepository for FailingRepository {
    async fn toggle_completion(
        &self,
        _habit_id: HabitId,
        _date: NaiveDate,
    ) -> RepositoryResult<bool> {
        Err(Self::storage_offline())
    }

    async fn completed_habit_ids(&self, _date: NaiveDate) -> RepositoryResult<Vec<HabitId>> {
        Err(Self::storage_offline())
    }

    async fn get_summary(&self) -> RepositoryResult<Vec<DaySummary>> {
        Err(Self::storage_offline())
    }
}

#[async_trait]
impl FullRepository for FailingRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Err(Self::storage_offline())
    }
}
