use anyhow::Context;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

use super::{RouteRecord, RouteStore};
use crate::attributes::AttributeEncoding;
use crate::error::RouteError;
use crate::prefix::IdPrefixListener;
use crate::route::RouteEntry;

/// In-memory route store keyed by location
///
/// Runs the same hooks a repository-backed store must run: attributes are
/// encoded before a record is written and decoded after it is read, and
/// the prefix listener is applied after both.
#[derive(Debug, Clone, Default)]
pub struct MemoryRouteStore {
    records: BTreeMap<String, RouteRecord>,
    encoding: AttributeEncoding,
    listener: Option<IdPrefixListener>,
}

impl MemoryRouteStore {
    #[must_use]
    pub fn new(encoding: AttributeEncoding) -> Self {
        Self {
            records: BTreeMap::new(),
            encoding,
            listener: None,
        }
    }

    #[must_use]
    pub fn with_listener(mut self, listener: IdPrefixListener) -> Self {
        self.listener = Some(listener);
        self
    }

    #[must_use]
    pub fn encoding(&self) -> AttributeEncoding {
        self.encoding
    }

    /// Raw record stored at `location`
    #[must_use]
    pub fn record(&self, location: &str) -> Option<&RouteRecord> {
        self.records.get(location)
    }

    /// Insert a raw record as if written by another process
    pub fn insert_record(&mut self, record: RouteRecord) {
        self.records.insert(record.path.clone(), record);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Load every stored entry in location order
    pub fn load_all(&self) -> Result<Vec<RouteEntry>, RouteError> {
        self.records
            .values()
            .map(|record| self.materialize(record))
            .collect()
    }

    /// Read records from a JSON file holding a list of [`RouteRecord`]s
    pub fn read_json(path: &Path, encoding: AttributeEncoding) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read route store {}", path.display()))?;
        let records: Vec<RouteRecord> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse route store {}", path.display()))?;

        let mut store = Self::new(encoding);
        for record in records {
            store.insert_record(record);
        }
        info!(path = %path.display(), routes_count = store.len(), "Route store loaded");
        Ok(store)
    }

    /// Write all records to `path` as a JSON list
    pub fn write_json(&self, path: &Path) -> anyhow::Result<()> {
        let records: Vec<&RouteRecord> = self.records.values().collect();
        let content = serde_json::to_string_pretty(&records)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write route store {}", path.display()))?;
        Ok(())
    }

    fn materialize(&self, record: &RouteRecord) -> Result<RouteEntry, RouteError> {
        let mut entry = RouteEntry::from_record(record.clone())?;
        if let Some(listener) = &self.listener {
            listener.post_load(&mut entry);
        }
        Ok(entry)
    }
}

impl RouteStore for MemoryRouteStore {
    fn persist(&mut self, entry: &mut RouteEntry) -> Result<(), RouteError> {
        let record = entry.to_record(self.encoding)?;
        debug!(location = %record.path, "Persisting route");
        self.records.insert(record.path.clone(), record);
        entry.mark_persisted();
        if let Some(listener) = &self.listener {
            listener.post_persist(entry);
        }
        Ok(())
    }

    fn load(&self, location: &str) -> Result<Option<RouteEntry>, RouteError> {
        self.records
            .get(location)
            .map(|record| self.materialize(record))
            .transpose()
    }

    fn remove(&mut self, location: &str) -> bool {
        self.records.remove(location).is_some()
    }
}
