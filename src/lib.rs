//! FocusFlow backend: users, task cards, flashcards, pomodoro settings/tasks/sessions
//! and daily streaks behind a JSON REST API.
//!
//! Every response uses the same envelope, `{success, status, message, payload}`
//! (see [`response::ApiResponse`]); failures are mapped onto it by [`error::AppError`].

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod response;
pub mod services;
pub mod state;
pub mod streak;
pub mod validation;
