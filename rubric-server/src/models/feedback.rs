//! Free-text reader feedback

use super::ValidationError;

/// Validated `TEXT` content. No length limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackText(String);

impl FeedbackText {
    /// Create feedback text for `field`.
    ///
    /// Empty text is rejected; anything else, whitespace included, is stored verbatim.
    pub fn new(field: &'static str, s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A feedback snippet tied to the passage it comments on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackEntry {
    pub selected_text: FeedbackText,
    pub feedback: FeedbackText,
}

impl FeedbackEntry {
    pub fn new(selected_text: &str, feedback: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            selected_text: FeedbackText::new("selectedText", selected_text)?,
            feedback: FeedbackText::new("feedback", feedback)?,
        })
    }
}
