//! # XTracker Backend
//!
//! Habit-tracking backend: clients create habits scheduled on specific
//! week-days, toggle per-day completion records, and fetch per-date
//! summaries. The crate exposes a REST API via Axum backed by a repository
//! abstraction.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Domain entities ([`models::Habit`]) and transfer objects
//!   ([`models::HabitDto`]) with explicit conversions between the two
//! - [`db`]: Repository traits, typed errors, the in-memory backend, and the
//!   habit service layer ([`db::services`])
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! Request flow is strictly layered: HTTP handlers parse transport input and
//! delegate to the service layer, which validates business rules and
//! orchestrates repository calls. Typed failures short-circuit at each layer
//! and are translated to status codes in exactly one place
//! (`http::error`).

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod db;
pub mod models;

#[cfg(feature = "http-server")]
pub mod http;
