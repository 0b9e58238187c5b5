//! Aggregation and batch orchestration.
//!
//! - [`aggregate`] - Per-physician summarization, month bucketing,
//!   search filtering and the default-selection hook
//! - [`pipeline`] - Multi-file orchestration with per-file failure isolation

pub mod aggregate;
pub mod pipeline;

pub use aggregate::{bucket_unpaid_by_month, default_selection, filter_summaries, summarize};
pub use pipeline::{consolidate_files, consolidate_named_bytes, ConsolidateOptions, ConsolidateResult};
