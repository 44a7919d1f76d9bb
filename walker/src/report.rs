//! Report writers and duplicate grouping.
//!
//! Renders a [`ScanReport`] as CSV, JSON, or aligned plain text, and
//! groups records sharing a digest for the duplicates report. Output
//! goes to the configured file, or stdout when none is set.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;

use chrono::{DateTime, Local};

use crate::config::{ReportFormat, WalkerConfig};
use crate::error::{Result, WalkError};
use crate::walk::{FileRecord, ScanReport};

/// Writes the main report to `config.output`, or stdout when unset.
pub fn write_report(report: &ScanReport, config: &WalkerConfig) -> Result<()> {
    emit(&render_report(report, config)?, config.output.as_deref())
}

/// Writes groups of records sharing a digest to `config.duplicates`.
/// Does nothing when no duplicates path is configured.
pub fn write_duplicates(report: &ScanReport, config: &WalkerConfig) -> Result<()> {
    let Some(path) = config.duplicates.as_deref() else {
        return Ok(());
    };
    let groups = duplicate_groups(&report.records);
    tracing::debug!(groups = groups.len(), "writing duplicate report");
    emit(&render_duplicates(&groups, config)?, Some(path))
}

fn emit(text: &str, path: Option<&std::path::Path>) -> Result<()> {
    match path {
        Some(path) => fs::write(path, text).map_err(WalkError::Report),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes()).map_err(WalkError::Report)
        }
    }
}

/// Renders the main report in the configured format.
pub fn render_report(report: &ScanReport, config: &WalkerConfig) -> Result<String> {
    match config.format {
        ReportFormat::Csv => render_csv(&report.records, config),
        ReportFormat::Json => {
            let doc = serde_json::json!({
                "algorithm": config.algorithm.label(),
                "files": &report.records,
                "errors": &report.errors,
            });
            Ok(format!("{}\n", serde_json::to_string_pretty(&doc)?))
        }
        ReportFormat::Plain => Ok(render_plain(&report.records)),
    }
}

/// Groups records by digest and keeps groups with more than one member,
/// ordered by digest for deterministic output.
pub fn duplicate_groups(records: &[FileRecord]) -> Vec<Vec<&FileRecord>> {
    let mut by_digest: BTreeMap<&str, Vec<&FileRecord>> = BTreeMap::new();
    for record in records {
        by_digest.entry(&record.digest).or_default().push(record);
    }
    by_digest
        .into_values()
        .filter(|group| group.len() > 1)
        .collect()
}

fn render_duplicates(groups: &[Vec<&FileRecord>], config: &WalkerConfig) -> Result<String> {
    match config.format {
        ReportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(["group", "path", "size", "modified", config.algorithm.label()])?;
            for (index, group) in groups.iter().enumerate() {
                for record in group {
                    writer.write_record([
                        (index + 1).to_string(),
                        record.path.display().to_string(),
                        record.size.to_string(),
                        stamp(record.modified),
                        record.digest.clone(),
                    ])?;
                }
            }
            finish_csv(writer)
        }
        ReportFormat::Json => {
            let doc = serde_json::json!({
                "algorithm": config.algorithm.label(),
                "groups": groups,
            });
            Ok(format!("{}\n", serde_json::to_string_pretty(&doc)?))
        }
        ReportFormat::Plain => {
            let mut out = String::new();
            for group in groups {
                for record in group {
                    out.push_str(&plain_line(record));
                }
                out.push('\n');
            }
            Ok(out)
        }
    }
}

fn render_csv(records: &[FileRecord], config: &WalkerConfig) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["path", "size", "modified", config.algorithm.label()])?;
    for record in records {
        writer.write_record([
            record.path.display().to_string(),
            record.size.to_string(),
            stamp(record.modified),
            record.digest.clone(),
        ])?;
    }
    finish_csv(writer)
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|err| WalkError::Report(err.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn render_plain(records: &[FileRecord]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&plain_line(record));
    }
    out
}

fn plain_line(record: &FileRecord) -> String {
    format!(
        "{}  {:>12}  {:>19}  {}\n",
        record.digest,
        record.size,
        stamp(record.modified),
        record.path.display()
    )
}

fn stamp(modified: Option<DateTime<Local>>) -> String {
    modified
        .map(|stamp| stamp.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}
