//! Short text labels stored in `VARCHAR(255)` columns

use super::ValidationError;

/// Maximum length, in characters, of a label column
pub const MAX_LABEL_LEN: usize = 255;

/// Validated short text (user name, degree, topic, dimension name).
///
/// Content is kept exactly as submitted: no trimming, no case folding.
/// `"Clarity"` and `"clarity"` are different labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    /// Create a new label for `field`.
    ///
    /// The only rule is the column width: at most 255 characters.
    /// Empty strings are valid labels.
    ///
    /// # Example
    /// ```
    /// use rubric_server::models::Label;
    ///
    /// assert!(Label::new("name", "Alice").is_ok());
    /// assert!(Label::new("name", "").is_ok());
    /// assert!(Label::new("name", &"a".repeat(256)).is_err());
    /// ```
    pub fn new(field: &'static str, s: &str) -> Result<Self, ValidationError> {
        if s.chars().count() > MAX_LABEL_LEN {
            return Err(ValidationError::TooLong {
                field,
                max: MAX_LABEL_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
