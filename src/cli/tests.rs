//! Unit tests for CLI commands

use super::commands::{describe, find_match};
use crate::attributes::AttributeEncoding;
use crate::cli::{Cli, Commands};
use crate::pattern::CompilerRegistry;
use crate::prefix::IdPrefixListener;
use crate::route::RouteEntry;
use crate::storage::{MemoryRouteStore, RouteStore};
use clap::Parser;

fn populated_store() -> MemoryRouteStore {
    let mut store = MemoryRouteStore::new(AttributeEncoding::ParallelArrays)
        .with_listener(IdPrefixListener::new("/cms/routes"));

    let mut about = RouteEntry::new();
    about.set_position("/cms/routes", "about").unwrap();
    about.set_route_content(Some("page-about".into()));
    store.persist(&mut about).unwrap();

    let mut news = RouteEntry::new();
    news.set_position("/cms/routes", "news").unwrap();
    news.set_variable_pattern("/{year}");
    news.set_requirement("year", r"\d{4}");
    store.persist(&mut news).unwrap();

    store
}

#[test]
fn test_show_command_parses() {
    let cli = Cli::try_parse_from([
        "pathroute",
        "show",
        "--store",
        "routes.json",
        "/cms/routes/about",
    ])
    .unwrap();

    match cli.command {
        Commands::Show {
            store,
            config,
            location,
        } => {
            assert_eq!(store.to_string_lossy(), "routes.json");
            assert!(config.is_none());
            assert_eq!(location, "/cms/routes/about");
        }
        _ => panic!("Expected Show command"),
    }
}

#[test]
fn test_match_command_parses_config() {
    let cli = Cli::try_parse_from([
        "pathroute",
        "match",
        "-s",
        "routes.json",
        "-c",
        "routing.yaml",
        "/news/2024",
    ])
    .unwrap();

    match cli.command {
        Commands::Match { config, url, .. } => {
            assert_eq!(config.unwrap().to_string_lossy(), "routing.yaml");
            assert_eq!(url, "/news/2024");
        }
        _ => panic!("Expected Match command"),
    }
}

#[test]
fn test_match_requires_url() {
    assert!(Cli::try_parse_from(["pathroute", "match", "--store", "routes.json"]).is_err());
}

#[test]
fn test_describe_entry() {
    let store = populated_store();
    let mut entry = store.load("/cms/routes/news").unwrap().unwrap();
    let report = describe(&mut entry, &CompilerRegistry::new()).unwrap();

    assert!(report.contains("pattern:       /news/{year}"));
    assert!(report.contains("static prefix: /news"));
    assert!(report.contains(r"year = \d{4}"));
}

#[test]
fn test_find_match_extracts_variables() {
    let store = populated_store();
    let compilers = CompilerRegistry::new();

    let report = find_match(&store, &compilers, "/news/2024").unwrap().unwrap();
    assert!(report.contains("/cms/routes/news"));
    assert!(report.contains("year = 2024"));

    let report = find_match(&store, &compilers, "/about").unwrap().unwrap();
    assert!(report.contains("content = page-about"));

    assert!(find_match(&store, &compilers, "/news/latest").unwrap().is_none());
}
