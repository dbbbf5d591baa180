//! # Storage Module
//!
//! Boundary between route entries and the repository that persists them.
//!
//! A store must
//! - persist the entry location as its identity,
//! - encode the attribute groups right before writing ([`RouteEntry::to_record`]),
//! - decode them right after reading ([`RouteEntry::from_record`]),
//! - never persist the location prefix, and run the prefix listener after
//!   loading instead.
//!
//! [`MemoryRouteStore`] is the in-process implementation used by the CLI and
//! the tests.

mod memory;
mod record;

pub use memory::MemoryRouteStore;
pub use record::RouteRecord;

use crate::error::RouteError;
use crate::route::RouteEntry;

/// Persistence operations a route store provides
pub trait RouteStore {
    /// Write `entry` and mark it persisted
    ///
    /// Fails with [`RouteError::Unpositioned`] if the entry has no location.
    fn persist(&mut self, entry: &mut RouteEntry) -> Result<(), RouteError>;

    /// Materialize the entry stored at `location`
    fn load(&self, location: &str) -> Result<Option<RouteEntry>, RouteError>;

    /// Delete the entry at `location`, returning whether it existed
    fn remove(&mut self, location: &str) -> bool;
}
