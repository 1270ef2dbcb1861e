//! Output formatting and persistence for check reports.
//!
//! Supports pretty-printing, JSON serialization, and a per-route CSV
//! summary append.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::checks::aggregate::{RouteReport, SystemReport};
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &SystemReport) {
    debug!("{:#?}", report);
}

/// Logs a report as pretty-printed JSON.
pub fn print_json(report: &SystemReport) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Writes the full report as pretty JSON to a file.
pub fn write_json(path: &str, report: &SystemReport) -> Result<()> {
    std::fs::write(path, serde_json::to_vec_pretty(report)?)?;
    Ok(())
}

/// One CSV row of per-route finding counts.
#[derive(Serialize)]
struct RouteSummaryRow<'a> {
    generated_at: DateTime<Utc>,
    route_id: &'a str,
    stops: usize,
    nearby_different_stops: usize,
    unnamed_stops: usize,
    no_terminus: usize,
    unconnected_segments: usize,
    similar_names: usize,
}

impl<'a> RouteSummaryRow<'a> {
    fn from_report(generated_at: DateTime<Utc>, report: &'a RouteReport<'a>) -> Self {
        let count = |name: &str| report.findings.get(name).map_or(0, |o| o.finding_count());
        RouteSummaryRow {
            generated_at,
            route_id: report.route_id,
            stops: report.stop_count,
            nearby_different_stops: count("nearby different stops"),
            unnamed_stops: count("unnamed stops"),
            no_terminus: count("no terminus"),
            unconnected_segments: count("unconnected segments"),
            similar_names: count("similar names"),
        }
    }
}

/// Appends one summary row per route to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_summary(path: &str, report: &SystemReport) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV summary");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for route in &report.routes {
        writer.serialize(RouteSummaryRow::from_report(report.generated_at, route))?;
    }
    writer.flush()?;

    Ok(())
}
