use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use loadplan::cli::{self, Cli};

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(args.log_level());

    cli::run(&args).with_context(|| format!("Failed to compile `{}`", args.input.display()))?;
    Ok(())
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
