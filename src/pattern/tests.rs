use super::{CompilerRegistry, PatternCompiler, RegexCompiler, DEFAULT_COMPILER};
use crate::attributes::{AttributeMap, COMPILER_CLASS_OPTION};
use crate::error::RouteError;

fn attrs(pairs: &[(&str, &str)]) -> AttributeMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn compile(pattern: &str) -> super::CompiledRoute {
    RegexCompiler
        .compile(pattern, &AttributeMap::new(), &AttributeMap::new())
        .unwrap()
}

#[test]
fn test_root_path() {
    let compiled = compile("/");
    assert!(compiled.is_match("/"));
    assert!(!compiled.is_match("/about"));
    assert!(compiled.variables().is_empty());
    assert_eq!(compiled.static_prefix(), "/");
}

#[test]
fn test_parameterized_path() {
    let compiled = compile("/items/{id}");
    let params = compiled.matches("/items/123").unwrap();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].0.as_ref(), "id");
    assert_eq!(params[0].1, "123");
    assert!(compiled.matches("/items").is_none());
    assert!(compiled.matches("/items/1/2").is_none());
}

#[test]
fn test_nested_path() {
    let compiled = compile("/a/{b}/c");
    assert!(compiled.is_match("/a/1/c"));
    assert!(!compiled.is_match("/a/1/d"));
    assert_eq!(compiled.static_prefix(), "/a");
}

#[test]
fn test_static_segments_are_escaped() {
    let compiled = compile("/files/report.pdf");
    assert!(compiled.is_match("/files/report.pdf"));
    assert!(!compiled.is_match("/files/reportXpdf"));
}

#[test]
fn test_requirement_replaces_default_body() {
    let compiled = RegexCompiler
        .compile("/news/{id}", &AttributeMap::new(), &attrs(&[("id", r"\d+")]))
        .unwrap();
    assert!(compiled.is_match("/news/42"));
    assert!(!compiled.is_match("/news/latest"));
}

#[test]
fn test_trailing_variable_with_default_is_optional() {
    let compiled = RegexCompiler
        .compile("/blog/{page}", &attrs(&[("page", "1")]), &AttributeMap::new())
        .unwrap();

    let params = compiled.matches("/blog").unwrap();
    assert_eq!(params[0].1, "1");

    let params = compiled.matches("/blog/3").unwrap();
    assert_eq!(params[0].1, "3");
}

#[test]
fn test_optional_root_variable_matches_slash() {
    let compiled = RegexCompiler
        .compile("/{page}", &attrs(&[("page", "home")]), &AttributeMap::new())
        .unwrap();
    assert_eq!(compiled.matches("/").unwrap()[0].1, "home");
    assert_eq!(compiled.matches("/contact").unwrap()[0].1, "contact");
}

#[test]
fn test_default_before_required_variable_is_not_optional() {
    let compiled = RegexCompiler
        .compile("/{lang}/{slug}", &attrs(&[("lang", "en")]), &AttributeMap::new())
        .unwrap();
    assert!(!compiled.is_match("/about"));
    assert!(compiled.is_match("/de/about"));
}

#[test]
fn test_invalid_variable_name() {
    let err = RegexCompiler
        .compile("/x/{1st}", &AttributeMap::new(), &AttributeMap::new())
        .unwrap_err();
    assert!(matches!(err, RouteError::InvalidPattern { .. }));
}

#[test]
fn test_duplicate_variable_name() {
    let err = RegexCompiler
        .compile("/{id}/{id}", &AttributeMap::new(), &AttributeMap::new())
        .unwrap_err();
    assert!(matches!(err, RouteError::InvalidPattern { .. }));
}

#[test]
fn test_invalid_requirement_regex() {
    let err = RegexCompiler
        .compile("/{id}", &AttributeMap::new(), &attrs(&[("id", "(")]))
        .unwrap_err();
    assert!(matches!(err, RouteError::InvalidPattern { .. }));
}

#[test]
fn test_registry_resolves_default_without_option() {
    let registry = CompilerRegistry::new();
    assert!(registry.resolve(&AttributeMap::new()).is_ok());
    assert!(registry
        .resolve(&attrs(&[(COMPILER_CLASS_OPTION, DEFAULT_COMPILER)]))
        .is_ok());
}

#[test]
fn test_registry_unknown_compiler() {
    let registry = CompilerRegistry::new();
    let err = registry
        .resolve(&attrs(&[(COMPILER_CLASS_OPTION, "app::Missing")]))
        .err()
        .unwrap();
    assert_eq!(
        err,
        RouteError::UnknownCompiler {
            id: "app::Missing".into()
        }
    );
}
