//! Email address value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// A validated email address.
///
/// Validation is deliberately shallow: one `@` with non-empty local and
/// domain parts, and a dot somewhere in the domain. Addresses arrive from an
/// untrusted classification oracle, so anything that fails this shape is
/// discarded by the caller rather than stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parses and validates an email address.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the input is empty or whitespace
    /// - `InvalidFormat` if the input does not look like `local@domain.tld`
    pub fn parse(input: impl Into<String>) -> Result<Self, ValidationError> {
        let input = input.into();
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }

        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(ValidationError::invalid_format("email", "missing '@'"));
        };

        if local.is_empty() || domain.is_empty() {
            return Err(ValidationError::invalid_format(
                "email",
                "empty local or domain part",
            ));
        }

        if domain.contains('@') {
            return Err(ValidationError::invalid_format("email", "multiple '@'"));
        }

        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(ValidationError::invalid_format(
                "email",
                "domain must contain an interior '.'",
            ));
        }

        if trimmed.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format(
                "email",
                "contains whitespace",
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EmailAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
