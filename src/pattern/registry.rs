use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::{PatternCompiler, RegexCompiler, DEFAULT_COMPILER};
use crate::attributes::{AttributeMap, COMPILER_CLASS_OPTION};
use crate::error::RouteError;

/// Pattern compilers by identifier
///
/// A route selects its compiler through `options["compiler_class"]`; a
/// missing key resolves to [`DEFAULT_COMPILER`]. The default registry
/// contains only the [`RegexCompiler`].
#[derive(Clone)]
pub struct CompilerRegistry {
    compilers: HashMap<String, Arc<dyn PatternCompiler>>,
}

impl CompilerRegistry {
    /// Create a registry holding the default compiler
    #[must_use]
    pub fn new() -> Self {
        let mut compilers: HashMap<String, Arc<dyn PatternCompiler>> = HashMap::new();
        compilers.insert(DEFAULT_COMPILER.to_string(), Arc::new(RegexCompiler));
        Self { compilers }
    }

    /// Register `compiler` under `id`, returning the compiler it replaced
    ///
    /// Registering under [`DEFAULT_COMPILER`] swaps the default for every
    /// route that does not choose a compiler explicitly.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        compiler: Arc<dyn PatternCompiler>,
    ) -> Option<Arc<dyn PatternCompiler>> {
        self.compilers.insert(id.into(), compiler)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&dyn PatternCompiler> {
        self.compilers.get(id).map(|c| &**c)
    }

    /// Look up the compiler selected by a route's options
    pub fn resolve(&self, options: &AttributeMap) -> Result<&dyn PatternCompiler, RouteError> {
        let id = options
            .get(COMPILER_CLASS_OPTION)
            .map(String::as_str)
            .unwrap_or(DEFAULT_COMPILER);
        self.get(id).ok_or_else(|| RouteError::UnknownCompiler { id: id.to_string() })
    }
}

impl Default for CompilerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CompilerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&str> = self.compilers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("CompilerRegistry")
            .field("compilers", &ids)
            .finish()
    }
}
