//! Score submissions: who is being scored and on which dimensions

use super::{Label, Score, ValidationError};

/// Natural key plus aggregate score of a scored user
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub name: Label,
    pub degree: Label,
    pub topic: Label,
    pub total_score: Score,
}

impl Identity {
    pub fn new(
        name: &str,
        degree: &str,
        topic: &str,
        total_score: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: Label::new("name", name)?,
            degree: Label::new("degree", degree)?,
            topic: Label::new("topic", topic)?,
            total_score: Score::from_submitted("total_score", total_score)?,
        })
    }
}

/// One named dimension score
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionScore {
    pub dimension_name: Label,
    pub score: Score,
}

impl DimensionScore {
    pub fn new(dimension_name: &str, score: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            dimension_name: Label::new("dimension_name", dimension_name)?,
            score: Score::from_submitted("score", score)?,
        })
    }
}

/// A validated submission, ready for the store
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub identity: Identity,
    /// In submission order; later entries win over earlier ones for the same dimension
    pub scores: Vec<DimensionScore>,
}

/// Outcome of recording a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub user_id: i32,
    /// True when the user row was inserted by this submission
    pub created: bool,
    pub scores_inserted: usize,
    pub scores_updated: usize,
}
