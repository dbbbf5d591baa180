use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// Identifier of the content a route resolves to.
///
/// A route never owns its content; the surrounding store manages the
/// content lifecycle and a [`ContentResolver`] turns the identifier back
/// into the real object at dispatch time.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ContentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ContentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Lookup from a [`ContentId`] to the content it names
pub trait ContentResolver {
    type Content;

    /// Returns `None` when the content no longer exists
    fn resolve(&self, id: &ContentId) -> Option<Self::Content>;
}

impl<T: Clone> ContentResolver for HashMap<ContentId, T> {
    type Content = T;

    fn resolve(&self, id: &ContentId) -> Option<T> {
        self.get(id).cloned()
    }
}
