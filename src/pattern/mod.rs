//! # Pattern Module
//!
//! Turns a full URL pattern such as `/about/{id}` into a [`CompiledRoute`]
//! that can test a request path and extract the variable segments.
//!
//! ## Overview
//!
//! - [`PatternCompiler`] is the seam: route entries never build matchers
//!   themselves, they hand the full pattern to whichever compiler their
//!   `compiler_class` option selects.
//! - [`RegexCompiler`] is the default compiler, registered under
//!   [`DEFAULT_COMPILER`]. Each `{name}` segment becomes a named capture
//!   group; a requirement for `name` replaces the default `[^/]+` body.
//! - [`CompilerRegistry`] maps compiler identifiers to implementations.
//!
//! ## Example
//!
//! ```rust
//! use pathroute::attributes::AttributeMap;
//! use pathroute::pattern::{PatternCompiler, RegexCompiler};
//!
//! let compiled = RegexCompiler
//!     .compile("/about/{id}", &AttributeMap::new(), &AttributeMap::new())
//!     .unwrap();
//! let params = compiled.matches("/about/42").unwrap();
//! assert_eq!(params[0].1, "42");
//! assert_eq!(compiled.static_prefix(), "/about");
//! ```

mod compiler;
mod registry;
#[cfg(test)]
mod tests;

pub use compiler::{CompiledRoute, ParamVec, PatternCompiler, RegexCompiler, MAX_INLINE_PARAMS};
pub use registry::CompilerRegistry;

/// Identifier of the compiler used when a route does not choose one
pub const DEFAULT_COMPILER: &str = "pathroute::pattern::RegexCompiler";
