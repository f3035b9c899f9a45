//! Per-file flight summaries.
//!
//! A [`FlightSummary`] is built from a single read of a log file. Extraction
//! failures are not recovered from: a log that lacks a fix, a site or a
//! distance aborts the whole run.

use std::path::{Path, PathBuf};

use chrono::TimeDelta;
use tracing::trace;

use crate::error::{Error, Result};
use crate::igc::IgcLog;

/// Logs smaller than this many bytes are reported as possible dummy logs.
pub const DEFAULT_DUMMY_THRESHOLD: u64 = 5000;

/// Facts extracted from one flight log.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightSummary {
    /// Path of the log file.
    pub path: PathBuf,
    /// Time between the first and last fix.
    pub duration: TimeDelta,
    /// Flown distance in kilometers.
    pub distance_km: f64,
    /// Declared takeoff site.
    pub site: String,
    /// Size of the log file.
    pub size_bytes: u64,
}

impl FlightSummary {
    /// Read a log file and extract its summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or lacks one of the
    /// records a summary is built from.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let size_bytes = bytes.len() as u64;
        let text = decode_latin1(&bytes);

        let summary = Self::from_text(path, &text, size_bytes)?;
        trace!(
            path = %path.display(),
            duration_secs = summary.duration.num_seconds(),
            distance_km = summary.distance_km,
            site = %summary.site,
            "summarized flight"
        );
        Ok(summary)
    }

    /// Build a summary from already decoded log text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLog`] if a required record is missing or malformed.
    pub fn from_text(path: impl Into<PathBuf>, text: &str, size_bytes: u64) -> Result<Self> {
        let path = path.into();
        let log = IgcLog::scan(text);
        let extracted = log.time_span().and_then(|span| {
            Ok((span.duration(), log.distance_km()?, log.site()?))
        });
        match extracted {
            Ok((duration, distance_km, site)) => Ok(Self {
                path,
                duration,
                distance_km,
                site,
                size_bytes,
            }),
            Err(source) => Err(Error::invalid_log(path, source)),
        }
    }

    /// Whether this log is suspiciously small.
    #[must_use]
    pub fn is_possible_dummy(&self, threshold_bytes: u64) -> bool {
        is_possible_dummy(self.size_bytes, threshold_bytes)
    }
}

/// Classify a log of `size_bytes` as a likely placeholder recording.
///
/// The boundary is strict: a log of exactly `threshold_bytes` is not flagged.
#[must_use]
pub fn is_possible_dummy(size_bytes: u64, threshold_bytes: u64) -> bool {
    size_bytes < threshold_bytes
}

/// Decode ISO-8859-1 bytes. Every byte maps to the code point of the same value.
#[must_use]
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
