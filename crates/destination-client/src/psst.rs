//! Utilities for avoiding accidental disclosure of secrets.
use std::fmt;

/// A client secret or access token that is never printed by `Debug`.
#[derive(Clone, Eq, PartialEq, serde::Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(s: impl ToString) -> Self {
        Self(s.to_string())
    }

    pub fn dangerous_reveal(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***")
    }
}
