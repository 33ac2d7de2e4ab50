use std::fmt;

use serde::{Deserialize, Serialize};

/// Form field and session key shared by the flow controller and the
/// session store.
pub const SEARCH_TERM_KEY: &str = "search_term";

pub const MAX_SEARCH_TERM_CHARS: usize = 100;

/// A search term that passed both validation stages.
///
/// Only [`crate::validation::validate`] hands these out, so holding one is
/// proof the value is safe to persist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub(crate) fn new_unchecked(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    SqlInjectionSuspected,
    InvalidCharacters,
}

impl Rejection {
    pub fn message(self) -> &'static str {
        match self {
            Rejection::SqlInjectionSuspected => "SQL injection patterns are not allowed.",
            Rejection::InvalidCharacters => {
                "Invalid input. Only letters, numbers, and spaces are allowed."
            }
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Accepted(SearchTerm),
    Rejected(Rejection),
}

impl ValidationResult {
    pub fn into_result(self) -> Result<SearchTerm, Rejection> {
        match self {
            ValidationResult::Accepted(term) => Ok(term),
            ValidationResult::Rejected(reason) => Err(reason),
        }
    }
}
