use std::sync::Arc;

use crate::attributes::{AttributeMap, COMPILER_CLASS_OPTION};
use crate::error::RouteError;
use crate::pattern::{CompiledRoute, CompilerRegistry, DEFAULT_COMPILER};

/// Compilation state of a route
///
/// Any change to the pattern or attributes moves the route to `Dirty`; only
/// [`Route::compile`] moves it back to `Clean`.
#[derive(Debug, Clone)]
pub enum CompileState {
    Dirty,
    Clean(Arc<CompiledRoute>),
}

/// Generic route: a full pattern plus defaults, requirements and options,
/// with a cached matcher
#[derive(Debug, Clone)]
pub struct Route {
    pattern: String,
    defaults: AttributeMap,
    requirements: AttributeMap,
    options: AttributeMap,
    state: CompileState,
}

impl Route {
    pub fn new(pattern: &str) -> Self {
        let mut route = Self {
            pattern: String::new(),
            defaults: AttributeMap::new(),
            requirements: AttributeMap::new(),
            options: AttributeMap::new(),
            state: CompileState::Dirty,
        };
        route.set_pattern(pattern);
        route.set_options(AttributeMap::new());
        route
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Replace the full pattern
    ///
    /// Surrounding whitespace is trimmed and the pattern always starts with
    /// exactly one `/`.
    pub fn set_pattern(&mut self, pattern: &str) -> &mut Self {
        self.pattern = format!("/{}", pattern.trim().trim_start_matches('/'));
        self.invalidate()
    }

    /// Replace the full pattern as given, without normalization
    ///
    /// Used by [`RouteEntry`](super::RouteEntry), whose derived pattern is
    /// compiled exactly as [`RouteEntry::pattern`](super::RouteEntry::pattern)
    /// reports it.
    pub(crate) fn set_derived_pattern(&mut self, pattern: String) -> &mut Self {
        self.pattern = pattern;
        self.invalidate()
    }

    #[must_use]
    pub fn defaults(&self) -> &AttributeMap {
        &self.defaults
    }

    pub fn set_defaults(&mut self, defaults: AttributeMap) -> &mut Self {
        self.defaults = defaults;
        self.invalidate()
    }

    #[must_use]
    pub fn default_value(&self, name: &str) -> Option<&str> {
        self.defaults.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn has_default(&self, name: &str) -> bool {
        self.defaults.contains_key(name)
    }

    pub fn set_default(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.defaults.insert(name.into(), value.into());
        self.invalidate()
    }

    #[must_use]
    pub fn requirements(&self) -> &AttributeMap {
        &self.requirements
    }

    /// Replace all requirements
    ///
    /// A leading `^` and a trailing `$` are stripped from every requirement;
    /// the compiler anchors the whole pattern itself.
    pub fn set_requirements(&mut self, requirements: AttributeMap) -> &mut Self {
        self.requirements = requirements
            .into_iter()
            .map(|(k, v)| {
                let v = sanitize_requirement(&v).to_string();
                (k, v)
            })
            .collect();
        self.invalidate()
    }

    #[must_use]
    pub fn requirement(&self, name: &str) -> Option<&str> {
        self.requirements.get(name).map(String::as_str)
    }

    pub fn set_requirement(&mut self, name: impl Into<String>, regex: &str) -> &mut Self {
        self.requirements
            .insert(name.into(), sanitize_requirement(regex).to_string());
        self.invalidate()
    }

    #[must_use]
    pub fn options(&self) -> &AttributeMap {
        &self.options
    }

    /// Replace all options
    ///
    /// `compiler_class` is reset to [`DEFAULT_COMPILER`] unless `options`
    /// names another compiler.
    pub fn set_options(&mut self, options: AttributeMap) -> &mut Self {
        self.options.clear();
        self.options
            .insert(COMPILER_CLASS_OPTION.to_string(), DEFAULT_COMPILER.to_string());
        self.options.extend(options);
        self.invalidate()
    }

    #[must_use]
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    pub fn set_option(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.options.insert(name.into(), value.into());
        self.invalidate()
    }

    #[must_use]
    pub fn state(&self) -> &CompileState {
        &self.state
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        matches!(self.state, CompileState::Dirty)
    }

    /// Return the compiled matcher, compiling first if the route is dirty
    ///
    /// The compiler is picked from `compilers` by the `compiler_class` option.
    /// On error the route stays dirty.
    pub fn compile(&mut self, compilers: &CompilerRegistry) -> Result<Arc<CompiledRoute>, RouteError> {
        if let CompileState::Clean(compiled) = &self.state {
            return Ok(Arc::clone(compiled));
        }

        let compiler = compilers.resolve(&self.options)?;
        let compiled = Arc::new(compiler.compile(&self.pattern, &self.defaults, &self.requirements)?);
        self.state = CompileState::Clean(Arc::clone(&compiled));
        Ok(compiled)
    }

    pub(crate) fn invalidate(&mut self) -> &mut Self {
        self.state = CompileState::Dirty;
        self
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::new("/")
    }
}

fn sanitize_requirement(regex: &str) -> &str {
    let regex = regex.strip_prefix('^').unwrap_or(regex);
    regex.strip_suffix('$').unwrap_or(regex)
}
