//! Validated primitive types shared by the clinic crates.
//!
//! Values of these types can only be obtained through their checked constructors, so any
//! record holding them is valid by construction.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// Errors that can occur when creating an [`Age`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AgeError {
    /// The input was below zero.
    #[error("Age cannot be negative (got {0})")]
    Negative(i64),

    /// The input does not fit the supported range.
    #[error("Age is out of range (got {0})")]
    OutOfRange(i64),
}

/// A string type that guarantees non-empty content.
///
/// The input is trimmed of leading and trailing whitespace during construction, and
/// construction fails if nothing is left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the input is empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A person's age in whole years.
///
/// Inputs arrive as signed integers (for example from parsed files), so the constructor takes
/// an `i64` and rejects anything below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Age(u32);

impl Age {
    /// Creates a new `Age`.
    ///
    /// # Errors
    ///
    /// Returns `AgeError::Negative` for values below zero and `AgeError::OutOfRange` for values
    /// that do not fit in a `u32`.
    pub fn new(years: i64) -> Result<Self, AgeError> {
        if years < 0 {
            return Err(AgeError::Negative(years));
        }
        u32::try_from(years)
            .map(Self)
            .map_err(|_| AgeError::OutOfRange(years))
    }

    pub fn years(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for Age {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_input() {
        let text = NonEmptyText::new("  Alice  ").expect("should accept padded text");
        assert_eq!(text.as_str(), "Alice");
    }

    #[test]
    fn non_empty_text_rejects_whitespace() {
        let err = NonEmptyText::new(" \t ").expect_err("whitespace-only text should fail");
        assert_eq!(err, TextError::Empty);
    }

    #[test]
    fn age_rejects_negative_values() {
        let err = Age::new(-1).expect_err("negative age should fail");
        assert_eq!(err, AgeError::Negative(-1));
    }

    #[test]
    fn age_accepts_zero() {
        assert_eq!(Age::new(0).expect("zero is a valid age").years(), 0);
    }

    #[test]
    fn age_rejects_values_beyond_u32() {
        let err = Age::new(i64::from(u32::MAX) + 1).expect_err("oversized age should fail");
        assert!(matches!(err, AgeError::OutOfRange(_)));
    }
}
