//! REST API types for frontend integration.
//!
//! The response carries the full per-physician summaries; the frontend
//! renders them directly and keeps its own selection/search state.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::ReportConfig;
use crate::models::{MonthBucket, PhysicianSummary};
use crate::transform::aggregate::bucket_unpaid_by_month;
use crate::transform::pipeline::ConsolidateResult;

/// Response sent to the frontend after a consolidation upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidateResponse {
    /// Status: "ok" when every file was read, "warning" otherwise.
    pub status: String,

    /// Per-physician summaries, sorted descending by overall total.
    pub summaries: Vec<PhysicianSummary>,

    /// Name of the initially selected physician, when the configured
    /// default-selection term matched.
    pub default_selection: Option<String>,

    /// Unpaid-by-month buckets for the default selection.
    pub default_selection_buckets: Vec<MonthBucket>,

    /// Metadata about the batch.
    pub metadata: ResponseMetadata,
}

/// Metadata about the consolidation batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    /// Rows read across all surviving files.
    pub record_count: usize,

    /// Distinct physicians in the batch.
    pub physician_count: usize,

    /// Files read successfully.
    pub files_read: usize,

    /// Files dropped from the batch.
    pub failed_files: Vec<FailedFile>,
}

/// A file dropped from the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedFile {
    pub file: String,
    pub error: String,
}

impl ConsolidateResponse {
    /// Build the response envelope from a pipeline result.
    pub fn new(result: ConsolidateResult, config: &ReportConfig) -> Self {
        let selected = result.default_selection(config);
        let default_selection = selected.map(|s| s.physician.clone());
        let default_selection_buckets = selected.map(bucket_unpaid_by_month).unwrap_or_default();

        let status = if result.failed_files.is_empty() { "ok" } else { "warning" };

        ConsolidateResponse {
            status: status.to_string(),
            default_selection,
            default_selection_buckets,
            metadata: ResponseMetadata {
                record_count: result.record_count,
                physician_count: result.summaries.len(),
                files_read: result.files_read,
                failed_files: result
                    .failed_files
                    .into_iter()
                    .map(|(file, error)| FailedFile { file, error })
                    .collect(),
            },
            summaries: result.summaries,
        }
    }
}

/// Create an error response
pub fn error_response(error: &str) -> Value {
    json!({
        "status": "error",
        "error": error,
        "summaries": [],
        "metadata": {
            "recordCount": 0,
            "physicianCount": 0,
            "filesRead": 0,
            "failedFiles": []
        }
    })
}
