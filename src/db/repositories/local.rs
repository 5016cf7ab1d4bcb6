//! In-memory repository implementation.
//!
//! Useful for unit testing and local development. Data is lost when the
//! process exits. A single `RwLock` over the whole store serializes writes,
//! which also gives toggles the per-key serialization the repository
//! contract asks of storage backends.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use parking_lot::RwLock;

use crate::db::repository::{
    CompletionRepository, ErrorContext, FullRepository, HabitRepository, RepositoryError,
    RepositoryResult,
};
use crate::models::{week_day_of, DaySummary, Habit, HabitId};

#[derive(Default)]
struct Store {
    /// Insertion-ordered; read operations preserve this ordering.
    habits: Vec<Habit>,
    /// Completed habit ids per date, in completion order.
    completions: HashMap<NaiveDate, Vec<HabitId>>,
    /// Dates that have been toggled at least once. These are the dates the
    /// summary reports on.
    days: BTreeSet<NaiveDate>,
}

/// In-memory implementation of the repository traits.
#[derive(Default)]
pub struct LocalRepository {
    store: RwLock<Store>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HabitRepository for LocalRepository {
    async fn create_habit(&self, habit: Habit) -> RepositoryResult<Habit> {
        let mut store = self.store.write();
        store.habits.push(habit.clone());
        debug!("Stored habit id={} title={:?}", habit.id, habit.title);
        Ok(habit)
    }

    async fn get_habit(&self, id: HabitId) -> RepositoryResult<Option<Habit>> {
        let store = self.store.read();
        Ok(store.habits.iter().find(|h| h.id == id).cloned())
    }

    async fn get_all_habits(&self, user_id: Option<&str>) -> RepositoryResult<Vec<Habit>> {
        let store = self.store.read();
        Ok(store
            .habits
            .iter()
            .filter(|h| user_id.map_or(true, |uid| h.user_id == uid))
            .cloned()
            .collect())
    }

    async fn habits_for_week_day(&self, week_day: u8) -> RepositoryResult<Vec<Habit>> {
        let store = self.store.read();
        Ok(store
            .habits
            .iter()
            .filter(|h| h.scheduled_on(week_day))
            .cloned()
            .collect())
    }

    async fn delete_habit(&self, id: HabitId) -> RepositoryResult<()> {
        let mut store = self.store.write();
        let before = store.habits.len();
        store.habits.retain(|h| h.id != id);
        if store.habits.len() == before {
            return Err(RepositoryError::not_found_with_context(
                format!("Habit {} does not exist", id),
                ErrorContext::new("delete_habit")
                    .with_entity("habit")
                    .with_entity_id(id),
            ));
        }

        // Cascade: drop the habit's completion records.
        for ids in store.completions.values_mut() {
            ids.retain(|completed| *completed != id);
        }
        debug!("Deleted habit id={} and cascaded completions", id);
        Ok(())
    }
}

#[async_trait]
impl CompletionRepository for LocalRepository {
    async fn toggle_completion(
        &self,
        habit_id: HabitId,
        date: NaiveDate,
    ) -> RepositoryResult<bool> {
        let mut store = self.store.write();
        if !store.habits.iter().any(|h| h.id == habit_id) {
            return Err(RepositoryError::not_found_with_context(
                format!("Habit {} does not exist", habit_id),
                ErrorContext::new("toggle_completion")
                    .with_entity("habit")
                    .with_entity_id(habit_id),
            ));
        }

        store.days.insert(date);
        let ids = store.completions.entry(date).or_default();
        let completed = match ids.iter().position(|id| *id == habit_id) {
            Some(pos) => {
                ids.remove(pos);
                false
            }
            None => {
                ids.push(habit_id);
                true
            }
        };
        debug!(
            "Toggled habit id={} date={} completed={}",
            habit_id, date, completed
        );
        Ok(completed)
    }

    async fn completed_habit_ids(&self, date: NaiveDate) -> RepositoryResult<Vec<HabitId>> {
        let store = self.store.read();
        Ok(store.completions.get(&date).cloned().unwrap_or_default())
    }

    async fn get_summary(&self) -> RepositoryResult<Vec<DaySummary>> {
        let store = self.store.read();
        let mut summary = Vec::with_capacity(store.days.len());
        // BTreeSet iteration keeps the ascending date ordering.
        for &day in &store.days {
            let week_day = week_day_of(day);
            let scheduled = store
                .habits
                .iter()
                .filter(|h| h.scheduled_on(week_day))
                .count() as u32;
            let completed = store
                .completions
                .get(&day)
                .map_or(0, |ids| ids.len() as u32);
            summary.push(DaySummary::new(day, scheduled, completed));
        }
        Ok(summary)
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}
