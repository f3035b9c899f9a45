//! IGC record extraction.
//!
//! An IGC file is line oriented and every record type is identified by a
//! fixed prefix. Airtime only needs three facts out of a log:
//!
//! - the time span between the first and the last fix (`B` records),
//! - the flown distance from the `LXSX;` device extension record,
//! - the takeoff site from the `HPSITSITE` header record.
//!
//! [`IgcLog::scan`] walks the text once and remembers the lines each fact is
//! derived from. The facts themselves are parsed on demand, so a log that
//! lacks one record can still answer for the others.

use std::num::ParseFloatError;

use chrono::{NaiveTime, TimeDelta};
use thiserror::Error;

/// Prefix of a fix record.
const FIX_PREFIX: &str = "B";

/// Prefix of the site declaration header.
const SITE_PREFIX: &str = "HPSITSITE";

/// Prefix of the device extension record carrying the distance.
const DISTANCE_PREFIX: &str = "LXSX;";

/// Name prefix of the distance field inside the extension record.
const DISTANCE_FIELD: &str = "Dist";

/// Byte range of the HHMMSS timestamp inside a fix record.
const FIX_TIME_RANGE: std::ops::Range<usize> = 1..7;

/// A log did not contain a record airtime relies on, or the record was malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogError {
    /// The log has no `B` record.
    #[error("no fix records")]
    NoFixRecords,

    /// A fix record does not carry a valid HHMMSS timestamp.
    #[error("invalid fix time in record {line:?}")]
    InvalidFixTime {
        /// The offending record.
        line: String,
    },

    /// No `Dist` field in any `LXSX;` record.
    #[error("missing distance field")]
    MissingDistance,

    /// The `Dist` value is not a number.
    #[error("invalid distance {value:?}: {source}")]
    InvalidDistance {
        /// The raw value.
        value: String,
        /// The parse failure.
        #[source]
        source: ParseFloatError,
    },

    /// The log has no `HPSITSITE` record.
    #[error("missing site record")]
    MissingSite,
}

/// A single timestamped position record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Fix {
    /// Time of day the fix was taken.
    pub time: NaiveTime,
}

impl Fix {
    /// Parse the time of day out of a `B` record.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::InvalidFixTime`] if the record is too short or the
    /// timestamp is not a valid 24-hour HHMMSS value.
    pub fn parse(line: &str) -> Result<Self, LogError> {
        line.get(FIX_TIME_RANGE)
            .and_then(|raw| NaiveTime::parse_from_str(raw, "%H%M%S").ok())
            .map(|time| Self { time })
            .ok_or_else(|| LogError::InvalidFixTime {
                line: line.to_string(),
            })
    }
}

/// First and last fix of a flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpan {
    /// The first fix in file order.
    pub start: Fix,
    /// The last fix in file order.
    pub end: Fix,
}

impl TimeSpan {
    /// Airborne time. Negative if the log crosses midnight.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end.time - self.start.time
    }
}

/// The records of one log that airtime extracts facts from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IgcLog<'a> {
    first_fix: Option<&'a str>,
    last_fix: Option<&'a str>,
    site_line: Option<&'a str>,
    distance_value: Option<&'a str>,
}

impl<'a> IgcLog<'a> {
    /// Scan the text of a log once, keeping the records of interest.
    #[must_use]
    pub fn scan(text: &'a str) -> Self {
        let mut log = Self::default();
        for line in text.lines() {
            if line.starts_with(FIX_PREFIX) {
                if log.first_fix.is_none() {
                    log.first_fix = Some(line);
                }
                log.last_fix = Some(line);
            } else if line.starts_with(SITE_PREFIX) && log.site_line.is_none() {
                log.site_line = Some(line);
            } else if line.starts_with(DISTANCE_PREFIX) && log.distance_value.is_none() {
                log.distance_value = distance_value(line);
            }
        }
        log
    }

    /// Time span between the first and the last fix in file order.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::NoFixRecords`] if there is no `B` record, or
    /// [`LogError::InvalidFixTime`] if either boundary fix is malformed.
    pub fn time_span(&self) -> Result<TimeSpan, LogError> {
        let (first, last) = self
            .first_fix
            .zip(self.last_fix)
            .ok_or(LogError::NoFixRecords)?;
        Ok(TimeSpan {
            start: Fix::parse(first)?,
            end: Fix::parse(last)?,
        })
    }

    /// Flown distance in kilometers.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::MissingDistance`] if no `LXSX;` record carries a
    /// `Dist` value, or [`LogError::InvalidDistance`] if it is not a number.
    pub fn distance_km(&self) -> Result<f64, LogError> {
        let value = self.distance_value.ok_or(LogError::MissingDistance)?;
        value
            .trim()
            .parse::<f64>()
            .map_err(|source| LogError::InvalidDistance {
                value: value.to_string(),
                source,
            })
    }

    /// Name of the declared site, trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::MissingSite`] if there is no `HPSITSITE` record,
    /// or the first one has nothing after its `:`.
    pub fn site(&self) -> Result<String, LogError> {
        self.site_line
            .and_then(|line| line.split(':').nth(1))
            .filter(|site| !site.is_empty())
            .map(|site| site.trim().to_string())
            .ok_or(LogError::MissingSite)
    }
}

/// The value of the first non-empty `Dist` field of an extension record.
fn distance_value(line: &str) -> Option<&str> {
    line.split(';')
        .filter(|field| field.starts_with(DISTANCE_FIELD))
        .filter_map(|field| field.split(':').nth(1))
        .find(|value| !value.is_empty())
}
