//! # Route Module
//!
//! Route table entries anchored in a hierarchical content repository.
//!
//! ## Overview
//!
//! - [`Route`] is a generic route value: full pattern, defaults,
//!   requirements, options and a lazily compiled matcher.
//! - [`RouteEntry`] wraps a `Route` and adds the repository location. The
//!   location minus an injected prefix is the static start of the URL
//!   pattern; the entry stores only the variable rest.
//! - [`ContentId`] is the non-owning reference from an entry to the content
//!   it serves, resolved through a [`ContentResolver`].
//!
//! ## Lifecycle
//!
//! ```text
//! RouteEntry::new()
//!     → set_position(parent, name)        (only before persisting)
//!     → store.persist()                   (attributes encoded)
//!     → store.load()                      (attributes decoded, prefix injected)
//!     → pattern() / compile()             (static prefix derived, matcher cached)
//! ```

mod content;
mod entry;
#[allow(clippy::module_inception)]
mod route;

pub use content::{ContentId, ContentResolver};
pub use entry::RouteEntry;
pub use route::{CompileState, Route};
