//! Batch orchestration: many workbook files in, one consolidated result out.
//!
//! Files are read sequentially in selection order. A file that fails to
//! open or parse is logged and recorded, never fatal: the batch continues
//! with the remaining files (per-file failure isolation). Surviving rows
//! are concatenated in order, typed, and aggregated.

use serde::Serialize;
use std::path::PathBuf;

use crate::api::logs::{log_error, log_info, log_success, log_warning};
use crate::config::ReportConfig;
use crate::models::PhysicianSummary;
use crate::parser::{parse_workbook_bytes, parse_workbook_file, rows_to_records, SheetRows};
use crate::transform::aggregate::summarize;

/// Options for a consolidation run.
#[derive(Debug, Clone, Default)]
pub struct ConsolidateOptions {
    /// Report configuration (exclusion list, locale, default selection).
    pub config: ReportConfig,
}

impl ConsolidateOptions {
    /// Options carrying the reference configuration.
    pub fn reference() -> Self {
        Self {
            config: ReportConfig::reference(),
        }
    }
}

/// Result of consolidating a batch of workbook files.
///
/// An empty batch is not an error; the only hard failure mode of the whole
/// pipeline is an empty summary list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidateResult {
    /// Per-physician summaries, sorted descending by overall total.
    pub summaries: Vec<PhysicianSummary>,
    /// Number of rows read across all surviving files.
    pub record_count: usize,
    /// Number of files read successfully.
    pub files_read: usize,
    /// Files dropped from the batch: (file name, error message).
    pub failed_files: Vec<(String, String)>,
}

impl ConsolidateResult {
    /// The configured initially-active physician, if present in the batch.
    pub fn default_selection<'a>(&'a self, config: &ReportConfig) -> Option<&'a PhysicianSummary> {
        config
            .default_selection
            .as_deref()
            .and_then(|term| crate::transform::aggregate::default_selection(&self.summaries, term))
    }
}

/// Consolidate workbook files from disk.
pub fn consolidate_files(paths: &[PathBuf], options: &ConsolidateOptions) -> ConsolidateResult {
    log_info(format!("Reading {} file(s)...", paths.len()));

    let outcomes = paths.iter().map(|path| {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        (name, parse_workbook_file(path).map_err(|e| e.to_string()))
    });

    consolidate_outcomes(outcomes, options)
}

/// Consolidate uploaded workbook buffers (HTTP path). `files` pairs each
/// buffer with its client-side file name, preserved for error reporting.
pub fn consolidate_named_bytes(
    files: &[(String, Vec<u8>)],
    options: &ConsolidateOptions,
) -> ConsolidateResult {
    log_info(format!("Reading {} uploaded file(s)...", files.len()));

    let outcomes = files.iter().map(|(name, bytes)| {
        (
            name.clone(),
            parse_workbook_bytes(bytes).map_err(|e| e.to_string()),
        )
    });

    consolidate_outcomes(outcomes, options)
}

fn consolidate_outcomes(
    outcomes: impl Iterator<Item = (String, Result<SheetRows, String>)>,
    options: &ConsolidateOptions,
) -> ConsolidateResult {
    let mut all_rows = Vec::new();
    let mut files_read = 0;
    let mut failed_files = Vec::new();

    for (name, outcome) in outcomes {
        match outcome {
            Ok(sheet) => {
                log_success(format!(
                    "{}: {} row(s) from sheet '{}'",
                    name,
                    sheet.rows.len(),
                    sheet.sheet
                ));
                all_rows.extend(sheet.rows);
                files_read += 1;
            }
            Err(message) => {
                log_error(format!("{}: {}", name, message));
                failed_files.push((name, message));
            }
        }
    }

    let records = rows_to_records(&all_rows);
    let record_count = records.len();
    let summaries = summarize(&records, &options.config);

    if summaries.is_empty() {
        log_warning("No physician-bearing rows in the batch");
    } else {
        log_success(format!(
            "Consolidated {} record(s) into {} physician(s)",
            record_count,
            summaries.len()
        ));
    }

    ConsolidateResult {
        summaries,
        record_count,
        files_read,
        failed_files,
    }
}
