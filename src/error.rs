//! Error types for the honoraria consolidation pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`WorkbookError`] - Spreadsheet reading errors
//! - [`ExportError`] - Report writing errors
//! - [`PipelineError`] - Top-level orchestration errors
//! - [`ServerError`] - HTTP server errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.
//!
//! Date parsing is NOT represented here: month resolution is total and
//! turns unparseable dates into sentinel labels (see
//! [`crate::dates::month_label`]).

use thiserror::Error;

// =============================================================================
// Workbook Reading Errors
// =============================================================================

/// Errors while reading a spreadsheet file.
///
/// These are caught per file by the pipeline: a failed file is logged and
/// dropped from the batch, it never aborts the run.
#[derive(Debug, Error)]
pub enum WorkbookError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// The spreadsheet library could not open or read the workbook.
    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    /// Workbook contains no sheets.
    #[error("Workbook contains no sheets")]
    NoSheets,

    /// The first sheet has no header row.
    #[error("Sheet '{0}' has no header row")]
    EmptySheet(String),
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors while writing the two-sheet report.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The spreadsheet writer failed.
    #[error("Failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// IO error while saving the file.
    #[error("Failed to save report: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level orchestration errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Workbook reading error.
    #[error("Workbook error: {0}")]
    Workbook(#[from] WorkbookError),

    /// Report export error.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Invalid report configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Report export error.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Requested physician is not in the uploaded batch.
    #[error("Physician not found: {0}")]
    PhysicianNotFound(String),

    /// Server internal error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for workbook reading.
pub type WorkbookResult<T> = Result<T, WorkbookError>;

/// Result type for report export.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // WorkbookError -> PipelineError
        let wb_err = WorkbookError::NoSheets;
        let pipeline_err: PipelineError = wb_err.into();
        assert!(pipeline_err.to_string().contains("no sheets"));

        // PipelineError -> ServerError
        let server_err: ServerError = pipeline_err.into();
        assert!(server_err.to_string().contains("no sheets"));
    }

    #[test]
    fn test_empty_sheet_message() {
        let err = WorkbookError::EmptySheet("Hoja1".into());
        assert!(err.to_string().contains("Hoja1"));
    }

    #[test]
    fn test_physician_not_found_message() {
        let err = ServerError::PhysicianNotFound("SMITH A".into());
        assert!(err.to_string().contains("SMITH A"));
    }
}
