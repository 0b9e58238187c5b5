//! # Honoraria - Physician honoraria consolidation
//!
//! Honoraria ingests Excel exports of medical billing records, aggregates
//! them per physician, and classifies each charge as paid or not paid
//! against a configurable list of excluded payer institutions.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌─────────────┐     ┌──────────────┐
//! │  xlsx files  │────▶│   Parser    │────▶│  Aggregate  │────▶│  Summaries / │
//! │  (per batch) │     │ (calamine)  │     │ (classify + │     │  xlsx report │
//! └──────────────┘     └─────────────┘     │  group/sum) │     └──────────────┘
//!                                          └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use honoraria::{consolidate_files, ConsolidateOptions};
//!
//! let result = consolidate_files(&paths, &ConsolidateOptions::reference());
//! for summary in &result.summaries {
//!     println!("{}: {}", summary.physician, summary.total_overall);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (BillingRecord, PhysicianSummary)
//! - [`config`] - Report configuration (exclusion list, locale, currency)
//! - [`parser`] - Workbook reading with defaulting
//! - [`dates`] - Date-to-month resolution
//! - [`classify`] - Excluded-institution classification
//! - [`transform`] - Aggregation and batch pipeline
//! - [`export`] - Two-sheet report writer
//! - [`format`] - Currency formatting
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod models;

// Configuration
pub mod config;

// Parsing
pub mod parser;

// Domain logic
pub mod classify;
pub mod dates;
pub mod transform;

// Output
pub mod export;
pub mod format;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ExportError, PipelineError, ServerError, WorkbookError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{BillingRecord, DetailRecord, MonthBucket, PhysicianSummary, RawDate};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::{MonthNames, ReportConfig};
pub use format::CurrencyFormat;

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{
    coerce_amount, parse_workbook_bytes, parse_workbook_file, rows_to_records, SheetRows,
};

// =============================================================================
// Re-exports - Domain logic
// =============================================================================

pub use classify::Classifier;
pub use dates::month_label;
pub use transform::{
    bucket_unpaid_by_month, consolidate_files, consolidate_named_bytes, default_selection,
    filter_summaries, summarize, ConsolidateOptions, ConsolidateResult,
};

// =============================================================================
// Re-exports - Export
// =============================================================================

pub use export::{export_summary, export_summary_bytes, report_file_name};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{error_response, ConsolidateResponse, FailedFile, ResponseMetadata};

// Server
pub mod server {
    pub use crate::api::server::start_server;
}
