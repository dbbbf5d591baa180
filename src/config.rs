//! # Routing Configuration
//!
//! Declarative configuration of the routing layer, loaded from YAML.
//!
//! ```yaml
//! chain:
//!   routers_by_id:
//!     router.default: 100
//!     routing.repository_router: 20
//!   replace_default_router: true
//! repository:
//!   enabled: true
//!   root: /cms/routes
//!   controllers_by_alias:
//!     static_pages: static_pages.controller:pageAction
//! ```
//!
//! Only `repository.root` affects route entries: it is the location prefix
//! injected into every loaded entry. The controller and template maps are
//! carried for the dispatching layer and are not interpreted here.
//!
//! ## Environment Variables
//!
//! ### `PATHROUTE_REPOSITORY_ROOT`
//!
//! Overrides `repository.root`.

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::Path;

use crate::prefix::IdPrefixListener;

pub const REPOSITORY_ROOT_ENV: &str = "PATHROUTE_REPOSITORY_ROOT";

/// Complete routing configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub chain: ChainConfig,
    pub repository: RepositoryConfig,
}

/// Router chain settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Router service ids with their priority
    pub routers_by_id: BTreeMap<String, i32>,
    /// Replace the framework's default router with the chain
    pub replace_default_router: bool,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            routers_by_id: BTreeMap::new(),
            replace_default_router: true,
        }
    }
}

/// Repository-backed router settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    pub enabled: bool,
    pub registry_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_name: Option<String>,
    /// Controller used when neither alias nor class select one
    pub generic_controller: String,
    pub controllers_by_alias: BTreeMap<String, String>,
    pub controllers_by_class: BTreeMap<String, String>,
    pub templates_by_class: BTreeMap<String, String>,
    pub route_repository_service: String,
    /// Repository path under which all route entries live
    pub root: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            registry_id: "doctrine_phpcr".to_string(),
            manager_name: None,
            generic_controller: "content.controller:indexAction".to_string(),
            controllers_by_alias: BTreeMap::new(),
            controllers_by_class: BTreeMap::new(),
            templates_by_class: BTreeMap::new(),
            route_repository_service: "routing.route_repository".to_string(),
            root: "/cms/routes".to_string(),
        }
    }
}

impl RepositoryConfig {
    /// Controller configured for `alias`, or the generic controller
    #[must_use]
    pub fn controller_for(&self, alias: &str) -> &str {
        self.controllers_by_alias
            .get(alias)
            .map(String::as_str)
            .unwrap_or(self.generic_controller.as_str())
    }

    /// Template configured for a content class
    #[must_use]
    pub fn template_for(&self, class: &str) -> Option<&str> {
        self.templates_by_class.get(class).map(String::as_str)
    }
}

impl RoutingConfig {
    /// Load a YAML file, apply environment overrides and validate
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let mut config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Parse YAML without environment overrides or validation
    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        // an empty document means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply `PATHROUTE_*` environment overrides
    pub fn apply_env(&mut self) {
        if let Ok(root) = env::var(REPOSITORY_ROOT_ENV) {
            self.repository.root = root;
        }
    }

    /// Reject a repository root that would derive broken static prefixes
    pub fn validate(&self) -> anyhow::Result<()> {
        let root = &self.repository.root;
        if !root.starts_with('/') {
            bail!("repository.root '{}' must be an absolute path", root);
        }
        if root.ends_with('/') {
            bail!("repository.root '{}' must not end with '/'", root);
        }
        Ok(())
    }

    /// Prefix listener for the configured repository root
    #[must_use]
    pub fn prefix_listener(&self) -> IdPrefixListener {
        IdPrefixListener::new(self.repository.root.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RoutingConfig::from_yaml("").unwrap();
        assert!(config.chain.replace_default_router);
        assert!(!config.repository.enabled);
        assert_eq!(config.repository.registry_id, "doctrine_phpcr");
        assert_eq!(config.repository.root, "/cms/routes");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = RoutingConfig::from_yaml(
            r#"
chain:
  routers_by_id:
    router.default: 100
repository:
  enabled: true
  root: /site/routes
"#,
        )
        .unwrap();
        assert_eq!(config.chain.routers_by_id.get("router.default"), Some(&100));
        assert!(config.chain.replace_default_router);
        assert!(config.repository.enabled);
        assert_eq!(config.repository.root, "/site/routes");
        assert_eq!(
            config.repository.generic_controller,
            "content.controller:indexAction"
        );
    }

    #[test]
    fn test_validate_rejects_bad_roots() {
        let mut config = RoutingConfig::default();
        config.repository.root = "cms/routes".into();
        assert!(config.validate().is_err());

        config.repository.root = "/cms/routes/".into();
        assert!(config.validate().is_err());

        config.repository.root = "/".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_controller_for_falls_back_to_generic() {
        let mut config = RoutingConfig::default();
        config
            .repository
            .controllers_by_alias
            .insert("static_pages".into(), "pages:show".into());

        assert_eq!(config.repository.controller_for("static_pages"), "pages:show");
        assert_eq!(
            config.repository.controller_for("blog"),
            "content.controller:indexAction"
        );
        assert_eq!(config.repository.template_for("Page"), None);
    }

    #[test]
    fn test_prefix_listener_uses_root() {
        let config = RoutingConfig::default();
        assert_eq!(config.prefix_listener().prefix(), "/cms/routes");
    }
}
