use serde::{Deserialize, Serialize};

use crate::attributes::StoredAttributes;
use crate::route::ContentId;

/// Raw stored fields of one route entry
///
/// `path` is the addressable identity. The location prefix is never part of
/// a record; it is injected again on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_content: Option<ContentId>,
    #[serde(default)]
    pub defaults: StoredAttributes,
    #[serde(default)]
    pub requirements: StoredAttributes,
    #[serde(default)]
    pub options: StoredAttributes,
}
