//! Database layer - storage gateway, repositories and stores
//!
//! # Design Principles
//!
//! - One pool, created at startup and closed at shutdown
//! - One transaction per submission; dropping it rolls back and releases the connection
//! - The users table's unique key is the last word on duplicates
//! - Score reconciliation is planned in plain Rust, then applied by the store

pub mod error;
pub mod memory;
pub mod pool;
pub mod postgres;
pub mod reconcile;
pub mod repos;
pub mod rows;
pub mod schema;
pub mod store;

pub use error::DbError;
pub use memory::MemoryStore;
pub use pool::{create_pool, DEFAULT_MAX_CONNECTIONS};
pub use postgres::PgStore;
pub use store::SurveyStore;
