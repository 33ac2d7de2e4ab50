use std::collections::BTreeMap;

/// Per-client key/value state as seen by the flow controller.
///
/// Where the values live between requests (and how they are signed) is the
/// store's business, not the controller's.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

/// Session contents for a single request, with a dirty flag so the hosting
/// layer only re-issues the cookie when something changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionData {
    values: BTreeMap<String, String>,
    modified: bool,
}

impl SessionData {
    pub fn from_values(values: BTreeMap<String, String>) -> Self {
        Self {
            values,
            modified: false,
        }
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }
}

impl SessionStore for SessionData {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
        self.modified = true;
    }
}
