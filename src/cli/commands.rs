use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::attributes::AttributeEncoding;
use crate::config::RoutingConfig;
use crate::pattern::CompilerRegistry;
use crate::route::RouteEntry;
use crate::storage::{MemoryRouteStore, RouteStore};

/// Command-line interface for inspecting route stores
#[derive(Parser)]
#[command(name = "pathroute")]
#[command(about = "Inspect and match repository-anchored routes", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print one route entry: pattern, attributes and compiled regex
    Show {
        /// JSON file holding the stored route records
        #[arg(short, long)]
        store: PathBuf,

        /// Routing configuration (YAML); defaults apply when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Repository location of the entry (e.g. /cms/routes/about)
        location: String,
    },
    /// Find the first route entry whose pattern matches a URL path
    Match {
        /// JSON file holding the stored route records
        #[arg(short, long)]
        store: PathBuf,

        /// Routing configuration (YAML); defaults apply when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// URL path to match (e.g. /news/2024)
        url: String,
    },
}

/// Execute the parsed command, writing the report to stdout
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let compilers = CompilerRegistry::new();
    match cli.command {
        Commands::Show {
            store,
            config,
            location,
        } => {
            let store = open_store(&store, config.as_deref())?;
            let mut entry = store
                .load(&location)?
                .with_context(|| format!("No route stored at {}", location))?;
            print!("{}", describe(&mut entry, &compilers)?);
        }
        Commands::Match { store, config, url } => {
            let store = open_store(&store, config.as_deref())?;
            match find_match(&store, &compilers, &url)? {
                Some(report) => print!("{}", report),
                None => println!("no route matches {}", url),
            }
        }
    }
    Ok(())
}

fn open_store(path: &Path, config: Option<&Path>) -> anyhow::Result<MemoryRouteStore> {
    let config = match config {
        Some(path) => RoutingConfig::from_file(path)?,
        None => {
            let mut config = RoutingConfig::default();
            config.apply_env();
            config.validate()?;
            config
        }
    };
    Ok(MemoryRouteStore::read_json(path, AttributeEncoding::ParallelArrays)?
        .with_listener(config.prefix_listener()))
}

pub(crate) fn describe(entry: &mut RouteEntry, compilers: &CompilerRegistry) -> anyhow::Result<String> {
    let compiled = entry.compile(compilers)?;
    let mut out = String::new();
    out.push_str(&format!("location:      {}\n", entry.location().unwrap_or_default()));
    out.push_str(&format!("pattern:       {}\n", entry.pattern()?));
    out.push_str(&format!("static prefix: {}\n", entry.static_prefix()?));
    out.push_str(&format!("regex:         {}\n", compiled.regex().as_str()));
    if let Some(content) = entry.route_content() {
        out.push_str(&format!("content:       {}\n", content));
    }
    for (label, map) in [
        ("default", entry.defaults()),
        ("requirement", entry.requirements()),
        ("option", entry.options()),
    ] {
        for (k, v) in map {
            out.push_str(&format!("{:<14} {} = {}\n", format!("{}:", label), k, v));
        }
    }
    Ok(out)
}

pub(crate) fn find_match(
    store: &MemoryRouteStore,
    compilers: &CompilerRegistry,
    url: &str,
) -> anyhow::Result<Option<String>> {
    for mut entry in store.load_all()? {
        let compiled = entry.compile(compilers)?;
        if let Some(params) = compiled.matches(url) {
            let mut out = format!(
                "{} -> {} ({})\n",
                url,
                entry.location().unwrap_or_default(),
                compiled.pattern()
            );
            for (name, value) in &params {
                out.push_str(&format!("  {} = {}\n", name, value));
            }
            if let Some(content) = entry.route_content() {
                out.push_str(&format!("  content = {}\n", content));
            }
            return Ok(Some(out));
        }
    }
    Ok(None)
}
