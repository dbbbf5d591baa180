//! # pathroute
//!
//! **pathroute** models route table entries that live in a hierarchical,
//! path-addressed content repository. Every stored node is both a location in
//! the tree and a URL-routable object: the node path (minus the routing root)
//! is the static start of its URL pattern.
//!
//! ## Architecture
//!
//! - **[`route`]** - [`RouteEntry`](route::RouteEntry), the location-anchored
//!   adapter around a generic [`Route`](route::Route) value
//! - **[`pattern`]** - pattern compilers turning full patterns into regex matchers
//! - **[`attributes`]** - the parallel-array codec for defaults, requirements and options
//! - **[`storage`]** - the storage boundary and an in-memory store
//! - **[`prefix`]** - location prefix injection after load
//! - **[`config`]** - YAML routing configuration
//! - **[`logging`]** / **[`cli`]** - support for the `pathroute` binary
//!
//! ### Load and dispatch flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Store as RouteStore
//!     participant Entry as RouteEntry
//!     participant Listener as IdPrefixListener
//!     participant Compiler as PatternCompiler
//!
//!     Store->>Entry: from_record(record)
//!     Entry->>Entry: decode defaults / requirements / options
//!     Store->>Listener: post_load(entry)
//!     Listener->>Entry: set_prefix(root)
//!     Note over Entry: pattern() = static prefix + variable pattern
//!     Entry->>Compiler: compile(pattern) (only when dirty)
//!     Compiler-->>Entry: CompiledRoute
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pathroute::attributes::AttributeEncoding;
//! use pathroute::pattern::CompilerRegistry;
//! use pathroute::prefix::IdPrefixListener;
//! use pathroute::route::RouteEntry;
//! use pathroute::storage::{MemoryRouteStore, RouteStore};
//!
//! let mut store = MemoryRouteStore::new(AttributeEncoding::ParallelArrays)
//!     .with_listener(IdPrefixListener::new("/cms/routes"));
//!
//! let mut entry = RouteEntry::new();
//! entry.set_position("/cms/routes", "news").unwrap();
//! entry.set_variable_pattern("/{slug}");
//! store.persist(&mut entry).unwrap();
//!
//! let mut loaded = store.load("/cms/routes/news").unwrap().unwrap();
//! let compiled = loaded.compile(&CompilerRegistry::new()).unwrap();
//! assert_eq!(loaded.pattern().unwrap(), "/news/{slug}");
//! assert!(compiled.is_match("/news/hello-world"));
//! ```

pub mod attributes;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod pattern;
pub mod prefix;
pub mod route;
pub mod storage;

pub use error::RouteError;
pub use pattern::{CompiledRoute, CompilerRegistry, PatternCompiler};
pub use route::{ContentId, Route, RouteEntry};
