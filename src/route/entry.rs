use std::sync::Arc;
use tracing::debug;

use super::content::{ContentId, ContentResolver};
use super::route::Route;
use crate::attributes::{AttributeEncoding, AttributeGroup, AttributeMap, StoredAttributes};
use crate::error::RouteError;
use crate::pattern::{CompiledRoute, CompilerRegistry};
use crate::storage::RouteRecord;

/// A routable node of the content repository.
///
/// The repository location doubles as the static part of the URL pattern:
/// with the location prefix `/cms/routes`, the entry at
/// `/cms/routes/about` serves `/about` followed by its variable pattern.
/// Only the variable part is stored; the static part is derived from the
/// location on every read.
///
/// The location prefix is not persisted. A prefix listener injects it
/// after the entry is loaded, see [`crate::prefix::IdPrefixListener`].
///
/// # Example
///
/// ```rust
/// use pathroute::route::RouteEntry;
///
/// let mut entry = RouteEntry::new();
/// entry.set_position("/cms/routes", "about").unwrap();
/// entry.set_prefix("/cms/routes");
/// entry.set_variable_pattern("/{id}");
///
/// assert_eq!(entry.static_prefix().unwrap(), "/about");
/// assert_eq!(entry.pattern().unwrap(), "/about/{id}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteEntry {
    parent: Option<String>,
    name: Option<String>,
    location: Option<String>,
    location_prefix: Option<String>,
    variable_pattern: String,
    route_content: Option<ContentId>,
    route: Route,
    persisted: bool,
}

impl RouteEntry {
    /// Create an unpositioned, unpersisted entry with empty attributes
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the entry below `parent` under the node name `name`
    ///
    /// Only allowed before the entry is persisted. Name uniqueness is left
    /// to the store.
    pub fn set_position(&mut self, parent: &str, name: &str) -> Result<&mut Self, RouteError> {
        if self.persisted {
            return Err(RouteError::PositionLocked {
                location: self.location.clone().unwrap_or_default(),
            });
        }

        let location = if parent.ends_with('/') {
            format!("{}{}", parent, name)
        } else {
            format!("{}/{}", parent, name)
        };
        debug!(location = %location, "Route positioned");

        self.parent = Some(parent.to_string());
        self.name = Some(name.to_string());
        self.location = Some(location);
        self.route.invalidate();
        Ok(self)
    }

    /// Full repository path of the entry
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Node name, the last segment of the location
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    pub(crate) fn mark_persisted(&mut self) {
        self.persisted = true;
    }

    /// Inject the part of the location that is not part of the URL
    ///
    /// Emptiness is not checked here; [`static_prefix`](Self::static_prefix)
    /// reports a missing prefix.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.location_prefix = Some(prefix.into());
        self.route.invalidate();
    }

    #[must_use]
    pub fn location_prefix(&self) -> Option<&str> {
        self.location_prefix.as_deref()
    }

    /// The location with the location prefix removed
    ///
    /// An empty remainder is the root route `/`.
    ///
    /// # Errors
    ///
    /// * [`RouteError::PrefixUnavailable`] - no prefix was injected
    /// * [`RouteError::PrefixMismatch`] - the location does not start with the prefix
    pub fn static_prefix(&self) -> Result<String, RouteError> {
        let prefix = self
            .location_prefix
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or(RouteError::PrefixUnavailable)?;
        let location = self.location.as_deref().unwrap_or_default();

        let url = location
            .strip_prefix(prefix)
            .ok_or_else(|| RouteError::PrefixMismatch {
                prefix: prefix.to_string(),
                location: location.to_string(),
            })?;

        if url.is_empty() {
            Ok("/".to_string())
        } else {
            Ok(url.to_string())
        }
    }

    /// Full URL pattern: static prefix followed by the variable pattern
    ///
    /// Recomputed on every call so a relocation or a new prefix is always
    /// reflected.
    pub fn pattern(&self) -> Result<String, RouteError> {
        let static_prefix = self.static_prefix()?;
        Ok(join_pattern(&static_prefix, &self.variable_pattern))
    }

    /// Set the full URL pattern
    ///
    /// `pattern` must start with the current static prefix; only the rest is
    /// stored. Prefer [`set_variable_pattern`](Self::set_variable_pattern).
    ///
    /// # Errors
    ///
    /// [`RouteError::PatternPrefixMismatch`] if the pattern does not belong to
    /// this location, or the errors of [`static_prefix`](Self::static_prefix).
    /// The entry is unchanged on error.
    pub fn set_pattern(&mut self, pattern: &str) -> Result<&mut Self, RouteError> {
        let static_prefix = self.static_prefix()?;

        let variable = if static_prefix == "/" {
            pattern.starts_with('/').then_some(pattern)
        } else {
            pattern.strip_prefix(static_prefix.as_str())
        };

        match variable {
            Some(variable) => {
                let variable = variable.to_string();
                Ok(self.set_variable_pattern(variable))
            }
            None => Err(RouteError::PatternPrefixMismatch {
                pattern: pattern.to_string(),
                static_prefix,
            }),
        }
    }

    /// The part of the URL pattern after the static prefix
    #[must_use]
    pub fn variable_pattern(&self) -> &str {
        &self.variable_pattern
    }

    /// Store the variable pattern; the matcher is recompiled lazily
    pub fn set_variable_pattern(&mut self, variable_pattern: impl Into<String>) -> &mut Self {
        self.variable_pattern = variable_pattern.into();
        self.route.invalidate();
        self
    }

    /// Return the matcher for the current full pattern
    ///
    /// Compiles only when the pattern or attributes changed since the last
    /// call; otherwise the cached matcher is returned.
    pub fn compile(&mut self, compilers: &CompilerRegistry) -> Result<Arc<CompiledRoute>, RouteError> {
        if self.route.is_dirty() {
            let pattern = self.pattern()?;
            debug!(
                location = self.location.as_deref().unwrap_or_default(),
                pattern = %pattern,
                "Recompiling route"
            );
            self.route.set_derived_pattern(pattern);
        }
        self.route.compile(compilers)
    }

    /// The generic route holding attributes and the compiled matcher
    #[must_use]
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Replace all defaults
    pub fn set_defaults(&mut self, defaults: AttributeMap) -> &mut Self {
        self.route.set_defaults(defaults);
        self
    }

    pub fn set_default(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.route.set_default(name, value);
        self
    }

    /// Replace all requirements; `^` and `$` anchors are stripped
    pub fn set_requirements(&mut self, requirements: AttributeMap) -> &mut Self {
        self.route.set_requirements(requirements);
        self
    }

    pub fn set_requirement(&mut self, name: impl Into<String>, regex: &str) -> &mut Self {
        self.route.set_requirement(name, regex);
        self
    }

    /// Replace all options; `compiler_class` falls back to the default compiler
    pub fn set_options(&mut self, options: AttributeMap) -> &mut Self {
        self.route.set_options(options);
        self
    }

    pub fn set_option(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.route.set_option(name, value);
        self
    }

    #[must_use]
    pub fn defaults(&self) -> &AttributeMap {
        self.route.defaults()
    }

    #[must_use]
    pub fn requirements(&self) -> &AttributeMap {
        self.route.requirements()
    }

    #[must_use]
    pub fn options(&self) -> &AttributeMap {
        self.route.options()
    }

    pub fn set_route_content(&mut self, content: Option<ContentId>) -> &mut Self {
        self.route_content = content;
        self
    }

    /// Identifier of the content this route resolves to
    #[must_use]
    pub fn route_content(&self) -> Option<&ContentId> {
        self.route_content.as_ref()
    }

    /// Look the referenced content up through `resolver`
    pub fn resolve_content<R: ContentResolver>(&self, resolver: &R) -> Option<R::Content> {
        self.route_content.as_ref().and_then(|id| resolver.resolve(id))
    }

    /// Materialize an entry from its raw stored fields
    ///
    /// Decodes all three attribute groups before building the entry, so a
    /// corrupt group leaves nothing half-loaded. The result is marked
    /// persisted and still needs its location prefix.
    pub fn from_record(record: RouteRecord) -> Result<Self, RouteError> {
        let defaults = record.defaults.decode(AttributeGroup::Defaults)?;
        let requirements = record.requirements.decode(AttributeGroup::Requirements)?;
        let options = record.options.decode(AttributeGroup::Options)?;

        let (parent, name) = match record.path.rsplit_once('/') {
            Some((parent, name)) if parent.is_empty() => (Some("/".to_string()), Some(name.to_string())),
            Some((parent, name)) => (Some(parent.to_string()), Some(name.to_string())),
            None => (None, None),
        };

        let mut route = Route::default();
        route
            .set_defaults(defaults)
            .set_requirements(requirements)
            .set_options(options);

        Ok(Self {
            parent,
            name,
            location: Some(record.path),
            location_prefix: None,
            variable_pattern: record.variable_pattern.unwrap_or_default(),
            route_content: record.route_content,
            route,
            persisted: true,
        })
    }

    /// Raw fields to write for this entry
    ///
    /// Attribute groups are encoded as `encoding` requires; a default
    /// `compiler_class` option is left out. The location prefix is never part
    /// of the record.
    pub fn to_record(&self, encoding: AttributeEncoding) -> Result<RouteRecord, RouteError> {
        let path = self.location.clone().ok_or(RouteError::Unpositioned)?;

        Ok(RouteRecord {
            path,
            variable_pattern: Some(self.variable_pattern.clone()).filter(|p| !p.is_empty()),
            route_content: self.route_content.clone(),
            defaults: StoredAttributes::encode(AttributeGroup::Defaults, self.defaults(), encoding),
            requirements: StoredAttributes::encode(
                AttributeGroup::Requirements,
                self.requirements(),
                encoding,
            ),
            options: StoredAttributes::encode(AttributeGroup::Options, self.options(), encoding),
        })
    }
}

/// Join a static prefix and a variable pattern
///
/// The root prefix `/` does not double a leading slash of the variable part.
fn join_pattern(static_prefix: &str, variable_pattern: &str) -> String {
    if static_prefix == "/" && variable_pattern.starts_with('/') {
        variable_pattern.to_string()
    } else {
        format!("{}{}", static_prefix, variable_pattern)
    }
}
