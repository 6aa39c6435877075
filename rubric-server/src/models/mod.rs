//! Domain models with validation at construction
//!
//! Request payloads are converted into these types before anything touches
//! the store. Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod label;
pub mod score;
pub mod submission;
pub mod feedback;

pub use validation::ValidationError;
pub use label::{Label, MAX_LABEL_LEN};
pub use score::Score;
pub use submission::{DimensionScore, Identity, Submission, SubmissionReceipt};
pub use feedback::{FeedbackEntry, FeedbackText};
