use std::fmt;

use crate::attributes::AttributeGroup;

/// Consistency error raised by route entries, the attribute codec and the
/// pattern compilers.
///
/// Every variant describes a programming or configuration mistake. None of
/// them is expected at steady state, so callers typically abort the current
/// request or transaction instead of retrying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The location prefix was never injected.
    ///
    /// Raised both for entries that were never persisted and for entries that
    /// were loaded without a prefix listener. The two cases are not told apart.
    PrefixUnavailable,
    /// The injected prefix is not a literal prefix of the entry location
    PrefixMismatch {
        /// The injected location prefix
        prefix: String,
        /// The repository location of the entry
        location: String,
    },
    /// A full pattern does not start with the location-derived static prefix
    ///
    /// Move the entry to the matching location first.
    PatternPrefixMismatch {
        /// The rejected pattern
        pattern: String,
        /// The static prefix derived from the entry location
        static_prefix: String,
    },
    /// Stored key and value sequences of an attribute group differ in length
    CorruptAttributeData {
        /// Which attribute group was being decoded
        group: AttributeGroup,
        /// Number of stored keys
        keys: usize,
        /// Number of stored values
        values: usize,
    },
    /// The position was assigned again after the entry was persisted
    PositionLocked {
        /// The location the entry is persisted at
        location: String,
    },
    /// The entry was persisted before a position was assigned
    Unpositioned,
    /// The full pattern could not be compiled into a matcher
    InvalidPattern {
        /// The pattern handed to the compiler
        pattern: String,
        /// Compiler diagnostic
        reason: String,
    },
    /// `options["compiler_class"]` names a compiler that is not registered
    UnknownCompiler {
        /// The requested compiler identifier
        id: String,
    },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::PrefixUnavailable => write!(
                f,
                "Can not determine the prefix. Either this is a new, unpersisted route \
                or the listener that injects the prefix is not set up correctly."
            ),
            RouteError::PrefixMismatch { prefix, location } => write!(
                f,
                "The location prefix '{}' does not match the route location '{}'",
                prefix, location
            ),
            RouteError::PatternPrefixMismatch {
                pattern,
                static_prefix,
            } => write!(
                f,
                "Pattern '{}' does not start with the static prefix '{}' of the route location. \
                Move the route to the correct location first.",
                pattern, static_prefix
            ),
            RouteError::CorruptAttributeData {
                group,
                keys,
                values,
            } => write!(
                f,
                "Corrupt {} data: {} keys but {} values",
                group, keys, values
            ),
            RouteError::PositionLocked { location } => write!(
                f,
                "Route at '{}' is already persisted; its position can not be changed",
                location
            ),
            RouteError::Unpositioned => {
                write!(f, "Route has no position; call set_position before persisting")
            }
            RouteError::InvalidPattern { pattern, reason } => {
                write!(f, "Can not compile pattern '{}': {}", pattern, reason)
            }
            RouteError::UnknownCompiler { id } => {
                write!(f, "No pattern compiler registered as '{}'", id)
            }
        }
    }
}

impl std::error::Error for RouteError {}
