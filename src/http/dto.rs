//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! Domain-facing DTOs are re-exported from the models module since they
//! already derive Serialize/Deserialize.

use serde::{Deserialize, Serialize};

pub use crate::models::{CreateHabitInput, DayHabits, DaySummary, HabitDto};

/// Request body for creating a new habit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHabitRequest {
    /// Habit title
    #[serde(default)]
    pub title: String,
    /// Week-days the habit is scheduled on (0 = Sunday .. 6 = Saturday)
    ///
    /// Missing fields default to empty and fail service validation with a
    /// 400 rather than a deserialization rejection.
    #[serde(default)]
    pub week_days: Vec<u8>,
    /// Owning user id
    #[serde(default)]
    pub user_id: String,
}

impl From<CreateHabitRequest> for CreateHabitInput {
    fn from(req: CreateHabitRequest) -> Self {
        Self {
            title: req.title,
            week_days: req.week_days,
            user_id: req.user_id,
        }
    }
}

/// Query parameters for the habit list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ListHabitsQuery {
    /// Scope the listing to one user (optional)
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Query parameters for date-scoped endpoints (day view, toggle).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayQuery {
    /// Calendar date in `YYYY-MM-DD` format
    pub date: String,
}

/// Habit list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitListResponse {
    /// List of habits, repository ordering preserved
    pub habits: Vec<HabitDto>,
    /// Total count
    pub total: usize,
}

/// Confirmation message response for update/delete operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository connection status
    pub database: String,
}
