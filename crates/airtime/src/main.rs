//! `airtime` - prints flight statistics for a directory of IGC logs.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;

use airtime::cli::Cli;
use airtime::{init_logging, Config};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    airtime::run(&cli.root, &config, &mut out)
        .with_context(|| format!("failed to summarize flights under {}", cli.root.display()))?;
    Ok(())
}
