//! Expanded tests for LocalRepository.
//!
//! These tests cover concurrent access patterns, ordering guarantees,
//! cascade behavior and error conditions for the in-memory repository
//! implementation.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use xtracker::db::repositories::LocalRepository;
use xtracker::db::repository::{CompletionRepository, HabitRepository, RepositoryError};
use xtracker::models::{Habit, HabitId};

fn test_habit(title: &str, user_id: &str, week_days: &[u8]) -> Habit {
    Habit {
        id: HabitId::generate(),
        title: title.to_string(),
        user_id: user_id.to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
        week_days: week_days.iter().copied().collect::<BTreeSet<u8>>(),
    }
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

// =========================================================
// Concurrent Access Tests
// =========================================================

#[tokio::test]
async fn test_concurrent_create_different_habits() {
    let repo = Arc::new(LocalRepository::new());

    let mut handles = vec![];
    for i in 0..10 {
        let repo_clone = Arc::clone(&repo);
        let handle = tokio::spawn(async move {
            let habit = test_habit(&format!("habit_{}", i), "u1", &[1, 2]);
            repo_clone.create_habit(habit).await
        });
        handles.push(handle);
    }

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    let habits = repo.get_all_habits(None).await.unwrap();
    assert_eq!(habits.len(), 10);
}

#[tokio::test]
async fn test_concurrent_toggle_same_habit_different_dates() {
    let repo = Arc::new(LocalRepository::new());
    let habit = test_habit("Exercise", "u1", &[0, 1, 2, 3, 4, 5, 6]);
    let id = habit.id;
    repo.create_habit(habit).await.unwrap();

    let mut handles = vec![];
    for day in 1..=9u32 {
        let repo_clone = Arc::clone(&repo);
        let handle = tokio::spawn(async move {
            let d = NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
            repo_clone.toggle_completion(id, d).await
        });
        handles.push(handle);
    }

    for handle in handles {
        assert!(handle.await.unwrap().unwrap());
    }

    let summary = repo.get_summary().await.unwrap();
    assert_eq!(summary.len(), 9);
}

// =========================================================
// Ordering and Scoping
// =========================================================

#[tokio::test]
async fn test_get_all_habits_preserves_insertion_order() {
    let repo = LocalRepository::new();
    for title in ["a", "b", "c", "d"] {
        repo.create_habit(test_habit(title, "u1", &[1])).await.unwrap();
    }

    let habits = repo.get_all_habits(None).await.unwrap();
    let titles: Vec<&str> = habits.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "b", "c", "d"]);
}

#[tokio::test]
async fn test_get_all_habits_scopes_by_user() {
    let repo = LocalRepository::new();
    repo.create_habit(test_habit("mine", "u1", &[1])).await.unwrap();
    repo.create_habit(test_habit("theirs", "u2", &[1])).await.unwrap();

    let mine = repo.get_all_habits(Some("u1")).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].title, "mine");
}

#[tokio::test]
async fn test_habits_for_week_day_filters() {
    let repo = LocalRepository::new();
    repo.create_habit(test_habit("weekday", "u1", &[1, 2, 3, 4, 5]))
        .await
        .unwrap();
    repo.create_habit(test_habit("weekend", "u1", &[0, 6]))
        .await
        .unwrap();

    let monday = repo.habits_for_week_day(1).await.unwrap();
    assert_eq!(monday.len(), 1);
    assert_eq!(monday[0].title, "weekday");

    let sunday = repo.habits_for_week_day(0).await.unwrap();
    assert_eq!(sunday.len(), 1);
    assert_eq!(sunday[0].title, "weekend");
}

// =========================================================
// Toggle and Summary
// =========================================================

#[tokio::test]
async fn test_toggle_registers_day_for_summary() {
    let repo = LocalRepository::new();
    let habit = test_habit("Exercise", "u1", &[1]);
    let id = habit.id;
    repo.create_habit(habit).await.unwrap();

    // 2024-03-25 is a Monday
    assert!(repo.toggle_completion(id, date("2024-03-25")).await.unwrap());

    let summary = repo.get_summary().await.unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].date, date("2024-03-25"));
    assert_eq!(summary[0].scheduled, 1);
    assert_eq!(summary[0].completed, 1);

    // Toggling off keeps the day registered but drops the completion.
    assert!(!repo.toggle_completion(id, date("2024-03-25")).await.unwrap());
    let summary = repo.get_summary().await.unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].completed, 0);
}

#[tokio::test]
async fn test_summary_counts_only_matching_week_days() {
    let repo = LocalRepository::new();

    let monday_habit = test_habit("monday", "u1", &[1]);
    let monday_id = monday_habit.id;
    repo.create_habit(monday_habit).await.unwrap();
    repo.create_habit(test_habit("sunday", "u1", &[0]))
        .await
        .unwrap();

    // 2024-03-25 is a Monday; the Sunday habit does not count as scheduled.
    repo.toggle_completion(monday_id, date("2024-03-25"))
        .await
        .unwrap();

    let summary = repo.get_summary().await.unwrap();
    assert_eq!(summary[0].scheduled, 1);
    assert_eq!(summary[0].completed, 1);
}

#[tokio::test]
async fn test_toggle_unknown_habit_fails() {
    let repo = LocalRepository::new();

    let result = repo
        .toggle_completion(HabitId::generate(), date("2024-03-25"))
        .await;
    assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
}

// =========================================================
// Delete
// =========================================================

#[tokio::test]
async fn test_delete_cascades_completions() {
    let repo = LocalRepository::new();
    let habit = test_habit("Exercise", "u1", &[1]);
    let id = habit.id;
    repo.create_habit(habit).await.unwrap();
    repo.toggle_completion(id, date("2024-03-25")).await.unwrap();

    repo.delete_habit(id).await.unwrap();

    assert!(repo.get_habit(id).await.unwrap().is_none());
    assert!(repo
        .completed_habit_ids(date("2024-03-25"))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_delete_unknown_habit_fails_with_context() {
    let repo = LocalRepository::new();

    let err = repo.delete_habit(HabitId::generate()).await.unwrap_err();
    match &err {
        RepositoryError::NotFound { context, .. } => {
            assert_eq!(context.operation.as_deref(), Some("delete_habit"));
            assert_eq!(context.entity.as_deref(), Some("habit"));
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
}
