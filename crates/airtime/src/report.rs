//! Plain-text bucket reports.

use std::io::Write;

use chrono::TimeDelta;

use crate::bucket::BucketSummary;
use crate::error::Result;

/// Format a duration as `H:MM:SS`, prefixed with `-` when negative.
///
/// Hours are not padded and may exceed 24.
#[must_use]
pub fn format_duration(duration: TimeDelta) -> String {
    let seconds = duration.num_seconds();
    let abs = seconds.unsigned_abs();
    let positive = format!("{}:{:02}:{:02}", abs / 3600, (abs % 3600) / 60, abs % 60);
    if seconds < 0 {
        format!("-{positive}")
    } else {
        positive
    }
}

/// Format a distance in kilometers, keeping a trailing `.0` on whole numbers.
#[must_use]
pub fn format_distance(km: f64) -> String {
    format!("{km:?}km")
}

/// Write the header line naming a bucket.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_header<W: Write>(out: &mut W, name: &str) -> Result<()> {
    writeln!(out, "======= {name} =======")?;
    Ok(())
}

/// Write the number of flights found in a bucket.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_flight_count<W: Write>(out: &mut W, count: usize) -> Result<()> {
    writeln!(out, "Number of flights:\t{count}")?;
    Ok(())
}

/// Write the totals, site list and dummy-log notices of a folded bucket.
///
/// Nothing is written for an empty bucket.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_totals<W: Write>(out: &mut W, summary: &BucketSummary) -> Result<()> {
    let Some(average) = summary.average_duration() else {
        return Ok(());
    };

    writeln!(out, "flight time:\t\t{}", format_duration(summary.total_duration))?;
    writeln!(out, "average flight time:\t{}", format_duration(average))?;
    writeln!(out, "distance:\t\t{}", format_distance(summary.total_distance_km))?;
    if let Some(speed) = summary.average_speed_kmh() {
        writeln!(out, "average speed:\t\t{speed:.2}km/h")?;
    }
    writeln!(out, "locations:")?;
    for (site, count) in summary.sites_by_count() {
        writeln!(out, "\t\t\t{site}: {count}")?;
    }
    writeln!(out)?;

    for path in &summary.dummy_logs {
        writeln!(out, "possible dummy log: {}", path.display())?;
    }
    Ok(())
}

/// Write the full report block of one bucket.
///
/// An empty bucket only gets its header and flight count.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_bucket<W: Write>(out: &mut W, summary: &BucketSummary) -> Result<()> {
    write_header(out, &summary.name)?;
    write_flight_count(out, summary.flight_count)?;
    write_totals(out, summary)
}
