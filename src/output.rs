//! Output formatting and persistence for pipeline results.
//!
//! Supports pretty-printing, JSON serialization, and CSV files for each
//! result series and for normalized tables.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::{self, File};
use std::path::Path;
use tracing::{debug, info};

use crate::analyzers::types::PipelineReport;
use crate::table::CategoryTable;

pub const REPORT_JSON: &str = "report.json";
pub const UPDATE_TOTALS_CSV: &str = "update_totals.csv";
pub const CHILD_COMPLIANCE_CSV: &str = "child_compliance.csv";
pub const ADULT_TREND_CSV: &str = "adult_trend.csv";

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(report: &PipelineReport) {
    debug!("{:#?}", report);
}

/// Logs the report as pretty-printed JSON.
pub fn print_json(report: &PipelineReport) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Writes `value` as pretty JSON, replacing any existing file.
pub fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}

/// Writes one CSV row per record, with a header derived from the record type.
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = records.len(), "Wrote CSV");
    Ok(())
}

/// Writes a table with its own column names; null cells are empty.
pub fn write_table(path: &Path, table: &CategoryTable) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|c| c.render()))?;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = table.len(), "Wrote table");
    Ok(())
}

/// Writes `report.json` plus one CSV per computed result into `dir`.
///
/// Results that failed to compute are skipped.
pub fn write_report(dir: &Path, report: &PipelineReport) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    write_json(&dir.join(REPORT_JSON), report)?;

    if let Some(totals) = report.update_totals() {
        write_records(&dir.join(UPDATE_TOTALS_CSV), totals)?;
    }
    if let Some(ranked) = report.child_compliance() {
        write_records(&dir.join(CHILD_COMPLIANCE_CSV), ranked.entries())?;
    }
    if let Some(trend) = report.adult_trend() {
        write_records(&dir.join(ADULT_TREND_CSV), trend.points())?;
    }

    info!(dir = %dir.display(), "Report written");
    Ok(())
}
