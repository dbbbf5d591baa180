//! # CLI Module
//!
//! Command-line access to a JSON route store.
//!
//! ## Commands
//!
//! ### `show`
//!
//! Print the derived pattern, static prefix, attributes and compiled regex of
//! one entry:
//!
//! ```bash
//! pathroute show --store routes.json /cms/routes/news
//! ```
//!
//! ### `match`
//!
//! Find the first entry (in location order) whose compiled pattern accepts a
//! URL path, and print the extracted variables:
//!
//! ```bash
//! pathroute match --store routes.json --config routing.yaml /news/2024
//! ```
//!
//! The store file is a JSON list of route records with attribute groups in
//! parallel-array form. The location prefix comes from `repository.root` of
//! the configuration (default `/cms/routes`).

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run_cli, Cli, Commands};
