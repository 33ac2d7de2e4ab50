//! Request flow for the search form: validate, persist to the session,
//! and decide between re-rendering the form and redirecting to the result.

use serde_json::{json, Value};
use shared::{
    domain::{Rejection, SearchTerm, ValidationResult, SEARCH_TERM_KEY},
    validation::validate,
};
use tracing::{debug, info};

pub mod session;

pub use session::{SessionData, SessionStore};

pub fn home_route() -> &'static str {
    "/"
}

pub fn result_route() -> &'static str {
    "/result"
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMethod {
    Get,
    Post,
}

/// Submitted form body. A missing field is the same as an empty one.
#[derive(Debug, Clone, Default)]
pub struct SearchForm {
    pub search_term: Option<String>,
}

impl SearchForm {
    pub fn new(search_term: impl Into<String>) -> Self {
        Self {
            search_term: Some(search_term.into()),
        }
    }

    /// Builds the form from decoded name/value pairs. When `search_term` is
    /// repeated only the first occurrence counts.
    pub fn from_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let search_term = fields
            .into_iter()
            .find(|(name, _)| name == SEARCH_TERM_KEY)
            .map(|(_, value)| value);
        Self { search_term }
    }

    pub fn raw_search_term(&self) -> &str {
        self.search_term.as_deref().unwrap_or_default()
    }
}

/// What to show, independent of markup. The templating layer owns escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    SearchForm {
        error: Option<Rejection>,
        input_value: String,
    },
    SearchResult {
        search_term: Option<SearchTerm>,
    },
}

impl View {
    pub fn empty_form() -> Self {
        View::SearchForm {
            error: None,
            input_value: String::new(),
        }
    }

    pub fn template_name(&self) -> &'static str {
        match self {
            View::SearchForm { .. } => "search.html",
            View::SearchResult { .. } => "result.html",
        }
    }

    pub fn context(&self) -> Value {
        match self {
            View::SearchForm { error, input_value } => json!({
                "error": error.map(Rejection::message),
                "input_value": input_value,
            }),
            View::SearchResult { search_term } => json!({
                "search_term": search_term.as_ref().map(SearchTerm::as_str),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Render(View),
    Redirect(&'static str),
}

pub fn home(method: FormMethod, form: &SearchForm, session: &mut impl SessionStore) -> Outcome {
    match method {
        FormMethod::Get => Outcome::Render(View::empty_form()),
        FormMethod::Post => submit(form, session),
    }
}

pub fn submit(form: &SearchForm, session: &mut impl SessionStore) -> Outcome {
    match validate(form.raw_search_term()) {
        ValidationResult::Rejected(reason) => {
            // Never log or echo the rejected value itself.
            info!(?reason, "search term rejected");
            Outcome::Render(View::SearchForm {
                error: Some(reason),
                input_value: String::new(),
            })
        }
        ValidationResult::Accepted(term) => {
            debug!(len = term.as_str().len(), "search term accepted");
            session.set(SEARCH_TERM_KEY, term.into_inner());
            Outcome::Redirect(result_route())
        }
    }
}

pub fn show_result(session: &impl SessionStore) -> View {
    let search_term = session
        .get(SEARCH_TERM_KEY)
        .and_then(|raw| validate(&raw).into_result().ok());
    debug!(present = search_term.is_some(), "rendering search result");
    View::SearchResult { search_term }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
