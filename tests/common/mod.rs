#![allow(dead_code)]

use pathroute::attributes::AttributeMap;
use pathroute::pattern::{CompiledRoute, PatternCompiler, RegexCompiler};
use pathroute::RouteError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Pattern compiler double counting how often it is asked to compile
#[derive(Debug, Default)]
pub struct CountingCompiler {
    calls: AtomicUsize,
}

impl CountingCompiler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PatternCompiler for CountingCompiler {
    fn compile(
        &self,
        pattern: &str,
        defaults: &AttributeMap,
        requirements: &AttributeMap,
    ) -> Result<CompiledRoute, RouteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        RegexCompiler.compile(pattern, defaults, requirements)
    }
}

pub fn attrs(pairs: &[(&str, &str)]) -> AttributeMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
