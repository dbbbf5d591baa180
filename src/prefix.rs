//! Location prefix injection.
//!
//! Route entries do not persist the part of their location that is not part
//! of the URL. The store runs an [`IdPrefixListener`] after loading and after
//! persisting an entry so that [`RouteEntry::static_prefix`] can be derived.

use tracing::{debug, warn};

use crate::route::RouteEntry;

/// Injects the configured repository root as the location prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdPrefixListener {
    prefix: String,
}

impl IdPrefixListener {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Called by the store after an entry was materialized
    pub fn post_load(&self, entry: &mut RouteEntry) {
        self.inject(entry);
    }

    /// Called by the store after an entry was written
    pub fn post_persist(&self, entry: &mut RouteEntry) {
        self.inject(entry);
    }

    fn inject(&self, entry: &mut RouteEntry) {
        let location = entry.location().unwrap_or_default().to_string();
        if location.starts_with(&self.prefix) {
            debug!(location = %location, prefix = %self.prefix, "Injecting location prefix");
            entry.set_prefix(self.prefix.as_str());
        } else {
            warn!(
                location = %location,
                prefix = %self.prefix,
                "Route outside the routing root, prefix not injected"
            );
        }
    }
}
