//! Per-directory aggregation of flight summaries.
//!
//! A bucket is a directory whose flight logs, found recursively, are folded
//! into one [`BucketSummary`]. Every immediate subdirectory of the root is a
//! bucket (usually one per year), and the root itself is summarized last as
//! an all-time bucket that covers the same files again.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::TimeDelta;
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::flight::FlightSummary;
use crate::report;

/// Totals over all flights of one bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSummary {
    /// Display name, the final segment of the bucket path.
    pub name: String,
    /// Number of flights folded in.
    pub flight_count: usize,
    /// Sum of all flight durations.
    pub total_duration: TimeDelta,
    /// Sum of all flight distances.
    pub total_distance_km: f64,
    /// Number of flights per site.
    pub site_histogram: HashMap<String, usize>,
    /// Logs flagged as possible dummies, in fold order.
    pub dummy_logs: Vec<PathBuf>,
}

impl BucketSummary {
    /// Create an empty summary.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flight_count: 0,
            total_duration: TimeDelta::zero(),
            total_distance_km: 0.0,
            site_histogram: HashMap::new(),
            dummy_logs: Vec::new(),
        }
    }

    /// Add one flight to the totals.
    pub fn fold(&mut self, flight: &FlightSummary) {
        self.flight_count += 1;
        self.total_duration += flight.duration;
        self.total_distance_km += flight.distance_km;
        *self.site_histogram.entry(flight.site.clone()).or_insert(0) += 1;
    }

    /// Mean flight duration, `None` for an empty bucket.
    #[must_use]
    pub fn average_duration(&self) -> Option<TimeDelta> {
        let count = i64::try_from(self.flight_count).ok().filter(|&c| c > 0)?;
        Some(TimeDelta::seconds(self.total_duration.num_seconds() / count))
    }

    /// Total distance over total airborne time in whole hours.
    ///
    /// Partial hours are dropped from the divisor. `None` when the bucket
    /// has less than one full hour of airtime.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_speed_kmh(&self) -> Option<f64> {
        let hours = self.total_duration.num_seconds() / 3600;
        if self.flight_count == 0 || hours <= 0 {
            return None;
        }
        Some(self.total_distance_km / hours as f64)
    }

    /// Sites with their flight counts, most frequent first.
    ///
    /// Sites with equal counts are ordered by name.
    #[must_use]
    pub fn sites_by_count(&self) -> Vec<(&str, usize)> {
        let mut sites: Vec<(&str, usize)> = self
            .site_histogram
            .iter()
            .map(|(site, &count)| (site.as_str(), count))
            .collect();
        sites.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        sites
    }
}

/// Folds the flight logs below a directory into bucket summaries.
#[derive(Debug, Clone)]
pub struct Aggregator {
    suffix: String,
    dummy_threshold: u64,
}

impl Aggregator {
    /// Create an aggregator matching files ending in `suffix` and flagging
    /// logs smaller than `dummy_threshold` bytes.
    #[must_use]
    pub fn new(suffix: impl Into<String>, dummy_threshold: u64) -> Self {
        Self {
            suffix: suffix.into(),
            dummy_threshold,
        }
    }

    /// Create an aggregator from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.scan.suffix.clone(), config.dummy.threshold_bytes)
    }

    /// Whether a file name marks a flight log.
    #[must_use]
    pub fn is_log_name(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.suffix)
    }

    /// Summarize every flight log below `dir`.
    ///
    /// # Errors
    ///
    /// Fails on the first directory that cannot be listed or the first log
    /// that cannot be read or summarized.
    pub fn summarize(&self, dir: &Path) -> Result<BucketSummary> {
        let logs = self.find_logs(dir)?;
        self.fold_logs(bucket_name(dir), &logs)
    }

    /// Fold already discovered logs into a summary named `name`.
    ///
    /// # Errors
    ///
    /// Fails on the first log that cannot be read or summarized.
    pub fn fold_logs(&self, name: impl Into<String>, logs: &[PathBuf]) -> Result<BucketSummary> {
        let mut summary = BucketSummary::new(name);
        debug!(bucket = %summary.name, logs = logs.len(), "summarizing bucket");

        for path in logs {
            let flight = FlightSummary::from_path(path)?;
            summary.fold(&flight);
            if flight.is_possible_dummy(self.dummy_threshold) {
                debug!(path = %path.display(), size = flight.size_bytes, "possible dummy log");
                summary.dummy_logs.push(path.clone());
            }
        }

        debug!(
            bucket = %summary.name,
            flights = summary.flight_count,
            "bucket summarized"
        );
        Ok(summary)
    }

    /// All flight logs below `dir`, depth first, in file name order.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be listed.
    pub fn find_logs(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut logs = Vec::new();
        self.collect_logs(dir, &mut logs)?;
        Ok(logs)
    }

    fn collect_logs(&self, dir: &Path, logs: &mut Vec<PathBuf>) -> Result<()> {
        for entry in sorted_entries(dir)? {
            let file_type = entry.file_type().map_err(|source| Error::Metadata {
                path: entry.path(),
                source,
            })?;
            let path = entry.path();
            if file_type.is_dir() {
                self.collect_logs(&path, logs)?;
            } else if self.is_log_name(&entry.file_name().to_string_lossy()) && path.is_file() {
                logs.push(path);
            }
        }
        Ok(())
    }
}

/// The directories to summarize under `root`, in processing order.
///
/// Every immediate subdirectory in name order, then `root` itself when
/// `include_root` is set.
///
/// # Errors
///
/// Returns an error if `root` cannot be listed.
pub fn bucket_dirs(root: &Path, include_root: bool) -> Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = sorted_entries(root)?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    if include_root {
        dirs.push(root.to_path_buf());
    }
    Ok(dirs)
}

/// Summarize every bucket under `root` and write a report for each.
///
/// A bucket's header and flight count are written before its logs are
/// read, so a failing bucket leaves the earlier reports and its own header
/// in `out`.
///
/// # Errors
///
/// Stops at the first listing, read, extraction, or write failure.
pub fn run<W: Write>(root: &Path, config: &Config, out: &mut W) -> Result<()> {
    let aggregator = Aggregator::from_config(config);
    for dir in bucket_dirs(root, config.scan.include_root)? {
        let name = bucket_name(&dir);
        report::write_header(out, &name)?;
        let logs = aggregator.find_logs(&dir)?;
        report::write_flight_count(out, logs.len())?;
        let summary = aggregator.fold_logs(name, &logs)?;
        report::write_totals(out, &summary)?;
    }
    Ok(())
}

/// Final path segment of a bucket, or the path itself if it has none.
#[must_use]
pub fn bucket_name(dir: &Path) -> String {
    dir.file_name().map_or_else(
        || dir.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

fn sorted_entries(dir: &Path) -> Result<Vec<std::fs::DirEntry>> {
    let read_error = |source| Error::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = std::fs::read_dir(dir)
        .map_err(read_error)?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(read_error)?;
    entries.sort_by_key(std::fs::DirEntry::file_name);
    Ok(entries)
}
