//! # Attribute Codec
//!
//! Route defaults, requirements and options are string maps, but the
//! repository this crate persists into only stores ordered lists of scalars.
//! Each map is therefore written as two parallel sequences where `keys[i]`
//! names `values[i]`.
//!
//! ```text
//! { "_controller": "page", "id": "1" }
//!     ── encode ──▶ keys:   ["_controller", "id"]
//!                   values: ["page", "1"]
//!     ◀─ decode ──
//! ```
//!
//! Stores that do support maps keep them as [`StoredAttributes::Native`] and
//! skip the parallel-array form entirely; [`AttributeEncoding`] selects which
//! variant is written.
//!
//! The `options` group never persists `compiler_class` when it names the
//! default compiler. The generic route re-inserts the default on decode, so
//! changing the default in code does not leave stale values in storage.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RouteError;
use crate::pattern::DEFAULT_COMPILER;

/// Semantic form of an attribute group
pub type AttributeMap = BTreeMap<String, String>;

/// Reserved option key selecting the pattern compiler
pub const COMPILER_CLASS_OPTION: &str = "compiler_class";

/// The three independently encoded attribute groups of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeGroup {
    Defaults,
    Requirements,
    Options,
}

impl fmt::Display for AttributeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeGroup::Defaults => write!(f, "defaults"),
            AttributeGroup::Requirements => write!(f, "requirements"),
            AttributeGroup::Options => write!(f, "options"),
        }
    }
}

/// How a store writes attribute groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttributeEncoding {
    /// The store persists maps as they are
    Native,
    /// The store only persists ordered value lists
    #[default]
    ParallelArrays,
}

/// Persisted form of one attribute group
///
/// Serialized untagged: a native group is a plain JSON/YAML map, an encoded
/// group is an object with optional `keys` and `values` lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredAttributes {
    Native(AttributeMap),
    Encoded {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        keys: Option<Vec<String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        values: Option<Vec<String>>,
    },
}

impl Default for StoredAttributes {
    fn default() -> Self {
        StoredAttributes::Encoded {
            keys: None,
            values: None,
        }
    }
}

impl StoredAttributes {
    /// Restore the semantic map of `group`
    pub fn decode(&self, group: AttributeGroup) -> Result<AttributeMap, RouteError> {
        match self {
            StoredAttributes::Native(map) => Ok(map.clone()),
            StoredAttributes::Encoded { keys, values } => {
                decode(group, keys.as_deref(), values.as_deref())
            }
        }
    }

    /// Encode `map` for `group` in the form the store understands
    ///
    /// The default compiler is stripped from the options group in both forms.
    #[must_use]
    pub fn encode(group: AttributeGroup, map: &AttributeMap, encoding: AttributeEncoding) -> Self {
        let stripped;
        let map = if group == AttributeGroup::Options {
            stripped = strip_default_compiler(map);
            &stripped
        } else {
            map
        };

        match encoding {
            AttributeEncoding::Native => StoredAttributes::Native(map.clone()),
            AttributeEncoding::ParallelArrays => {
                let (keys, values) = encode(map);
                StoredAttributes::Encoded {
                    keys: Some(keys),
                    values: Some(values),
                }
            }
        }
    }
}

/// Zip parallel key and value sequences back into a map
///
/// Absent and empty value sequences both yield an empty map. Any other
/// length mismatch is reported as [`RouteError::CorruptAttributeData`]; the
/// sequences are never truncated or padded.
pub fn decode(
    group: AttributeGroup,
    keys: Option<&[String]>,
    values: Option<&[String]>,
) -> Result<AttributeMap, RouteError> {
    let values = match values {
        Some(values) if !values.is_empty() => values,
        _ => return Ok(AttributeMap::new()),
    };
    let keys = keys.unwrap_or_default();

    if keys.len() != values.len() {
        return Err(RouteError::CorruptAttributeData {
            group,
            keys: keys.len(),
            values: values.len(),
        });
    }

    debug!(group = %group, entries = keys.len(), "Decoded attribute group");

    Ok(keys.iter().cloned().zip(values.iter().cloned()).collect())
}

/// Split a map into parallel key and value sequences
///
/// Both sequences come from one traversal, so `keys[i]` always names
/// `values[i]`.
#[must_use]
pub fn encode(map: &AttributeMap) -> (Vec<String>, Vec<String>) {
    map.iter().map(|(k, v)| (k.clone(), v.clone())).unzip()
}

/// Encode the options group, leaving out a default `compiler_class`
#[must_use]
pub fn encode_options(options: &AttributeMap) -> (Vec<String>, Vec<String>) {
    encode(&strip_default_compiler(options))
}

fn strip_default_compiler(options: &AttributeMap) -> AttributeMap {
    let mut options = options.clone();
    if options.get(COMPILER_CLASS_OPTION).map(String::as_str) == Some(DEFAULT_COMPILER) {
        options.remove(COMPILER_CLASS_OPTION);
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> AttributeMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_encode_keeps_positions_aligned() {
        let (keys, values) = encode(&map(&[("b", "2"), ("a", "1"), ("c", "3")]));
        assert_eq!(keys, strings(&["a", "b", "c"]));
        assert_eq!(values, strings(&["1", "2", "3"]));
    }

    #[test]
    fn test_decode_restores_encoded_map() {
        let original = map(&[("_controller", "page"), ("id", "1")]);
        let (keys, values) = encode(&original);
        let decoded = decode(AttributeGroup::Defaults, Some(keys.as_slice()), Some(values.as_slice())).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_decode_is_order_independent() {
        let keys = strings(&["id", "_controller"]);
        let values = strings(&["1", "page"]);
        let decoded = decode(AttributeGroup::Defaults, Some(keys.as_slice()), Some(values.as_slice())).unwrap();
        assert_eq!(decoded, map(&[("_controller", "page"), ("id", "1")]));
    }

    #[test]
    fn test_decode_absent_and_empty_are_identical() {
        let empty: Vec<String> = Vec::new();
        assert!(decode(AttributeGroup::Options, None, None).unwrap().is_empty());
        assert!(decode(AttributeGroup::Options, Some(empty.as_slice()), Some(empty.as_slice()))
            .unwrap()
            .is_empty());
        assert!(decode(AttributeGroup::Options, None, Some(empty.as_slice()))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_decode_length_mismatch_is_corrupt() {
        let keys = strings(&["a", "b"]);
        let values = strings(&["1"]);
        let err = decode(AttributeGroup::Requirements, Some(keys.as_slice()), Some(values.as_slice())).unwrap_err();
        assert_eq!(
            err,
            RouteError::CorruptAttributeData {
                group: AttributeGroup::Requirements,
                keys: 2,
                values: 1,
            }
        );
    }

    #[test]
    fn test_decode_values_without_keys_is_corrupt() {
        let values = strings(&["1"]);
        let err = decode(AttributeGroup::Defaults, None, Some(values.as_slice())).unwrap_err();
        assert!(matches!(
            err,
            RouteError::CorruptAttributeData { keys: 0, values: 1, .. }
        ));
    }

    #[test]
    fn test_encode_options_strips_default_compiler() {
        let options = map(&[(COMPILER_CLASS_OPTION, DEFAULT_COMPILER), ("utf8", "true")]);
        let (keys, values) = encode_options(&options);
        assert_eq!(keys, strings(&["utf8"]));
        assert_eq!(values, strings(&["true"]));
    }

    #[test]
    fn test_encode_options_keeps_custom_compiler() {
        let options = map(&[(COMPILER_CLASS_OPTION, "custom")]);
        let (keys, _) = encode_options(&options);
        assert_eq!(keys, strings(&[COMPILER_CLASS_OPTION]));
    }

    #[test]
    fn test_stripping_only_touches_options_group() {
        let defaults = map(&[(COMPILER_CLASS_OPTION, DEFAULT_COMPILER)]);
        let stored = StoredAttributes::encode(
            AttributeGroup::Defaults,
            &defaults,
            AttributeEncoding::ParallelArrays,
        );
        assert_eq!(stored.decode(AttributeGroup::Defaults).unwrap(), defaults);

        let stored = StoredAttributes::encode(
            AttributeGroup::Options,
            &defaults,
            AttributeEncoding::Native,
        );
        assert_eq!(stored, StoredAttributes::Native(AttributeMap::new()));
    }

    #[test]
    fn test_stored_attributes_deserialize_both_forms() {
        let native: StoredAttributes = serde_json::from_str(r#"{"id": "1"}"#).unwrap();
        assert_eq!(native, StoredAttributes::Native(map(&[("id", "1")])));

        let encoded: StoredAttributes =
            serde_json::from_str(r#"{"keys": ["id"], "values": ["1"]}"#).unwrap();
        assert_eq!(
            encoded.decode(AttributeGroup::Defaults).unwrap(),
            map(&[("id", "1")])
        );
    }
}
