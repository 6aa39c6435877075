//! rubric-server: persistence backend for survey scores and reader feedback
//!
//! Two endpoints: `POST /api/postUserData` upserts a user (keyed by name,
//! degree and topic) together with its per-dimension scores, and
//! `POST /api/submitFeedback` appends a free-text feedback snippet.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{ConfigError, ServerConfig};
pub use db::{DbError, MemoryStore, PgStore, SurveyStore};
pub use http::{build_router, run_server, AppState, ServerError};
