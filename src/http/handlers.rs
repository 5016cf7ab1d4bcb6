//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic; handlers own no business rules beyond parsing
//! transport input.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::dto::{
    CreateHabitRequest, DayHabits, DayQuery, DaySummary, HabitDto, HabitListResponse,
    HealthResponse, ListHabitsQuery, MessageResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::services;
use crate::models::HabitId;

/// Confirmation message for a successful toggle.
pub const HABIT_UPDATED: &str = "habit updated";
/// Confirmation message for a successful delete.
pub const HABIT_DELETED: &str = "habit deleted successfully";

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the repository
/// is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Habit CRUD
// =============================================================================

/// POST /v1/habits
///
/// Create a new habit. Responds 201 with the created resource.
pub async fn create_habit(
    State(state): State<AppState>,
    Json(request): Json<CreateHabitRequest>,
) -> Result<(StatusCode, Json<HabitDto>), AppError> {
    let habit = services::create_habit(state.repository.as_ref(), request.into()).await?;
    Ok((StatusCode::CREATED, Json(habit)))
}

/// GET /v1/habits
///
/// List habits, optionally scoped to one user via `?user_id=`.
pub async fn list_habits(
    State(state): State<AppState>,
    Query(query): Query<ListHabitsQuery>,
) -> HandlerResult<HabitListResponse> {
    let habits =
        services::get_all_habits(state.repository.as_ref(), query.user_id.as_deref()).await?;
    let total = habits.len();

    Ok(Json(HabitListResponse { habits, total }))
}

/// GET /v1/habits/day?date=YYYY-MM-DD
///
/// Habits scheduled on the date's week-day plus the ids completed on that
/// date.
pub async fn get_day(
    State(state): State<AppState>,
    Query(query): Query<DayQuery>,
) -> HandlerResult<DayHabits> {
    let day = services::get_habits_for_day(state.repository.as_ref(), &query.date).await?;
    Ok(Json(day))
}

/// PATCH /v1/habits/{habit_id}/toggle?date=YYYY-MM-DD
///
/// Flip the completion state of a habit for the given date.
pub async fn toggle_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<Uuid>,
    Query(query): Query<DayQuery>,
) -> HandlerResult<MessageResponse> {
    services::toggle_habit_for_day(state.repository.as_ref(), HabitId::new(habit_id), &query.date)
        .await?;
    Ok(Json(MessageResponse::new(HABIT_UPDATED)))
}

/// GET /v1/habits/summary
///
/// Per-date scheduled/completed counts, ordered by date ascending.
pub async fn get_summary(State(state): State<AppState>) -> HandlerResult<Vec<DaySummary>> {
    let summary = services::get_summary(state.repository.as_ref()).await?;
    Ok(Json(summary))
}

/// DELETE /v1/habits/{habit_id}
///
/// Remove a habit and its completion records.
pub async fn delete_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<Uuid>,
) -> HandlerResult<MessageResponse> {
    services::delete_habit(state.repository.as_ref(), HabitId::new(habit_id)).await?;
    Ok(Json(MessageResponse::new(HABIT_DELETED)))
}
