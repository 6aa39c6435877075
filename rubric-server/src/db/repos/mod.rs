//! Postgres repositories
//!
//! - users / scores: borrow a connection, so the caller owns the transaction
//! - feedback: single INSERT straight on the pool

pub mod users;
pub mod scores;
pub mod feedback;

pub use users::UserRepo;
pub use scores::ScoreRepo;
pub use feedback::FeedbackRepo;
