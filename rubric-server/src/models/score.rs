//! Numeric score coercion
//!
//! Scores arrive as JSON numbers (integral or fractional) and are stored in
//! `INTEGER` columns. Fractions are truncated toward zero.

use super::ValidationError;

/// A score that fits an `INTEGER` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(i32);

impl Score {
    /// Coerce a submitted number into a storable score.
    ///
    /// `85.9` becomes `85`, `-2.7` becomes `-2`. NaN, infinities and values
    /// whose integral part does not fit in `i32` are rejected.
    pub fn from_submitted(field: &'static str, value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::OutOfRange { field, value });
        }

        let truncated = value.trunc();
        if truncated < f64::from(i32::MIN) || truncated > f64::from(i32::MAX) {
            return Err(ValidationError::OutOfRange { field, value });
        }

        Ok(Self(truncated as i32))
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

impl From<i32> for Score {
    fn from(value: i32) -> Self {
        Self(value)
    }
}
