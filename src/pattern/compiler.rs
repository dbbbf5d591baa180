use regex::Regex;
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::debug;

use crate::attributes::AttributeMap;
use crate::error::RouteError;

/// Maximum number of route variables before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Extracted variables in pattern order.
///
/// Names are shared with the compiled route, values are per-request data.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Turns a full URL pattern into a matcher.
///
/// Implementations must be synchronous and free of side effects; a route
/// entry may call `compile` again whenever its pattern or attributes change.
pub trait PatternCompiler: Send + Sync {
    /// Compile `pattern` using the route's defaults and requirements
    fn compile(
        &self,
        pattern: &str,
        defaults: &AttributeMap,
        requirements: &AttributeMap,
    ) -> Result<CompiledRoute, RouteError>;
}

/// Matchable form of a full route pattern
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    pattern: String,
    static_prefix: String,
    regex: Regex,
    variables: Vec<Arc<str>>,
    defaults: AttributeMap,
}

impl CompiledRoute {
    /// The full pattern this matcher was compiled from
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Literal text of the pattern before the first variable
    #[must_use]
    pub fn static_prefix(&self) -> &str {
        &self.static_prefix
    }

    /// The compiled regular expression
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Variable names in pattern order
    #[must_use]
    pub fn variables(&self) -> &[Arc<str>] {
        &self.variables
    }

    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Test `path` and extract the variable values
    ///
    /// Optional variables missing from `path` take their default value.
    ///
    /// # Returns
    ///
    /// * `Some(params)` - one `(name, value)` pair per variable, in pattern order
    /// * `None` - the path does not match
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<ParamVec> {
        let caps = self.regex.captures(path)?;
        let mut params = ParamVec::new();
        for name in &self.variables {
            if let Some(value) = caps.name(name) {
                params.push((Arc::clone(name), value.as_str().to_string()));
            } else if let Some(default) = self.defaults.get(&**name) {
                params.push((Arc::clone(name), default.clone()));
            }
        }
        Some(params)
    }
}

enum Segment<'a> {
    Static(&'a str),
    Variable(&'a str),
}

/// Default pattern compiler
///
/// Transforms `/users/{id}/posts` into `^/users/(?P<id>[^/]+)/posts$`.
/// A requirement for a variable replaces `[^/]+`. Trailing variables that
/// have a default are optional, so `/blog/{page}` with `page = 1` matches
/// both `/blog` and `/blog/3`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexCompiler;

impl RegexCompiler {
    fn parse(pattern: &str) -> Result<Vec<Segment<'_>>, RouteError> {
        let mut segments = Vec::with_capacity(pattern.matches('/').count());
        let mut seen: Vec<&str> = Vec::new();

        for part in pattern.split('/').filter(|s| !s.is_empty()) {
            if part.starts_with('{') && part.ends_with('}') && part.len() > 1 {
                let name = &part[1..part.len() - 1];
                if !is_variable_name(name) {
                    return Err(RouteError::InvalidPattern {
                        pattern: pattern.to_string(),
                        reason: format!("invalid variable name '{}'", name),
                    });
                }
                if seen.contains(&name) {
                    return Err(RouteError::InvalidPattern {
                        pattern: pattern.to_string(),
                        reason: format!("variable '{}' is used more than once", name),
                    });
                }
                seen.push(name);
                segments.push(Segment::Variable(name));
            } else {
                segments.push(Segment::Static(part));
            }
        }

        Ok(segments)
    }
}

impl PatternCompiler for RegexCompiler {
    fn compile(
        &self,
        pattern: &str,
        defaults: &AttributeMap,
        requirements: &AttributeMap,
    ) -> Result<CompiledRoute, RouteError> {
        let segments = Self::parse(pattern)?;

        // index of the first segment of the optional tail
        let mut optional_from = segments.len();
        for (i, segment) in segments.iter().enumerate().rev() {
            match segment {
                Segment::Variable(name) if defaults.contains_key(*name) => optional_from = i,
                _ => break,
            }
        }

        let mut source = String::with_capacity(pattern.len() * 2 + 2);
        source.push('^');
        let mut variables = Vec::new();
        let mut open_groups = 0;

        for (i, segment) in segments.iter().enumerate() {
            let optional = i >= optional_from;
            if optional && i == 0 {
                source.push_str("/(?:");
            } else if optional {
                source.push_str("(?:/");
            } else {
                source.push('/');
            }
            if optional {
                open_groups += 1;
            }

            match segment {
                Segment::Static(text) => source.push_str(&regex::escape(text)),
                Segment::Variable(name) => {
                    let body = requirements
                        .get(*name)
                        .map(String::as_str)
                        .unwrap_or("[^/]+");
                    source.push_str("(?P<");
                    source.push_str(name);
                    source.push('>');
                    source.push_str(body);
                    source.push(')');
                    variables.push(Arc::<str>::from(*name));
                }
            }
        }

        for _ in 0..open_groups {
            source.push_str(")?");
        }
        if segments.is_empty() {
            source.push('/');
        }
        source.push('$');

        let regex = Regex::new(&source).map_err(|e| RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        let static_prefix = match pattern.find('{') {
            Some(idx) => pattern[..idx].trim_end_matches('/').to_string(),
            None => pattern.to_string(),
        };

        debug!(
            pattern = %pattern,
            regex = %source,
            variables = variables.len(),
            "Compiled route pattern"
        );

        Ok(CompiledRoute {
            pattern: pattern.to_string(),
            static_prefix,
            regex,
            variables,
            defaults: defaults.clone(),
        })
    }
}

fn is_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
