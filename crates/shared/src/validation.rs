//! Two-stage search term filter.
//!
//! The injection heuristic runs first so its more specific message wins
//! when both stages would reject. The allow-list is the actual safety
//! boundary: on its own it already excludes every SQL metacharacter.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::{Rejection, SearchTerm, ValidationResult, MAX_SEARCH_TERM_CHARS};

// `\b` is Unicode-aware, so "android", "AND5" and "éAND" contain no
// whole-word AND. Combining marks count as word characters here, so
// "AND\u{301}" is left to the allow-list.
const SQL_INJECTION_PATTERN: &str = r#"(?i)('|"|;|--|#|/\*|\*/|\bOR\b|\bAND\b|\bSELECT\b|\bINSERT\b|\bUPDATE\b|\bDELETE\b|\bDROP\b|\bUNION\b|\bWHERE\b)"#;

fn sql_injection_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SQL_INJECTION_PATTERN).expect("sql injection pattern compiles"))
}

fn search_term_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(r"\A[A-Za-z0-9 ]{{1,{MAX_SEARCH_TERM_CHARS}}}\z");
        Regex::new(&pattern).expect("search term pattern compiles")
    })
}

/// True when `raw` contains a quote, statement separator, comment marker or
/// a whole-word SQL keyword, ignoring case.
pub fn is_sql_injection(raw: &str) -> bool {
    sql_injection_regex().is_match(raw)
}

/// True when the whole of `raw` is 1 to 100 ASCII letters, digits or spaces.
pub fn is_valid_search_term(raw: &str) -> bool {
    search_term_regex().is_match(raw)
}

pub fn validate(raw: &str) -> ValidationResult {
    if is_sql_injection(raw) {
        return ValidationResult::Rejected(Rejection::SqlInjectionSuspected);
    }
    if !is_valid_search_term(raw) {
        return ValidationResult::Rejected(Rejection::InvalidCharacters);
    }
    ValidationResult::Accepted(SearchTerm::new_unchecked(raw))
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
