use clap::Parser;
use pathroute::cli::{run_cli, Cli};
use pathroute::logging::{init_logging, LogConfig};

fn main() -> anyhow::Result<()> {
    init_logging(&LogConfig::from_env())?;
    run_cli(Cli::parse())
}
