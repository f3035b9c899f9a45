//! `airtime` - Flight statistics from IGC flight logs
//!
//! This library extracts airborne time, distance and takeoff site from IGC
//! files and folds them into per-directory summaries: flight count, total
//! and average airtime, total distance, average speed and a site histogram.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod bucket;
pub mod cli;
pub mod config;
pub mod error;
pub mod flight;
pub mod igc;
pub mod logging;
pub mod report;

pub use bucket::{run, Aggregator, BucketSummary};
pub use config::Config;
pub use error::{Error, Result};
pub use flight::FlightSummary;
pub use igc::{IgcLog, LogError};
pub use logging::init_logging;
