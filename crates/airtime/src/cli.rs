//! Command-line interface for airtime.

use std::path::PathBuf;

use clap::Parser;

use crate::logging::Verbosity;

/// airtime - Flight statistics from IGC logs
///
/// Summarizes every subdirectory of ROOT (typically one per year) and then
/// ROOT as a whole: number of flights, airtime, distance, average speed and
/// the most flown sites.
#[derive(Debug, Parser)]
#[command(name = "airtime")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the flight logs
    #[arg(value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Path to custom configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all diagnostics except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}
