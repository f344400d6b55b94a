//! State code parsing for alert queries
//!
//! A query is a single two-letter US state or territory code. It is derived
//! from raw user input at trigger time and used once to build a request URL.

use crate::error::InvalidStateCode;
use std::fmt;

/// Message shown when the input is not a two-letter state code
pub const VALIDATION_MESSAGE: &str = "Please enter a two-letter state abbreviation.";

/// A validated, uppercased two-letter state code
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateCode(String);

impl StateCode {
    /// Parse raw user input into a state code
    ///
    /// The input is trimmed and uppercased before its length is checked.
    /// Only the length is validated; whether the code names a real state is
    /// left to the alerts service.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateCode` if the normalized input is not exactly
    /// two characters long.
    pub fn parse(input: &str) -> Result<Self, InvalidStateCode> {
        let normalized = input.trim().to_uppercase();

        if normalized.chars().count() != 2 {
            return Err(InvalidStateCode { input: normalized });
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StateCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
