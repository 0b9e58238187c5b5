//! Domain models for the honoraria consolidation pipeline.
//!
//! This module contains the core data structures used throughout the pipeline:
//!
//! - [`BillingRecord`] - One typed billing row from a spreadsheet export
//! - [`RawDate`] - The heterogeneous date cell of a billing row
//! - [`PhysicianSummary`] - Accumulated totals and details for one physician
//! - [`DetailRecord`] - One line of a physician's detail listing
//! - [`MonthBucket`] - Unpaid records grouped under one month label

use serde::{Deserialize, Serialize};

// =============================================================================
// Raw Date Cell
// =============================================================================

/// The date cell of a billing row, as it comes out of the spreadsheet.
///
/// Spreadsheet exports are inconsistent here: the cell may be absent, a
/// numeric serial date (days since 1899-12-30), or a date-like string.
/// Resolution into a month label happens in [`crate::dates::month_label`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    /// No date on the row.
    #[default]
    Empty,
    /// Numeric spreadsheet serial date.
    Serial(f64),
    /// Date-like string.
    Text(String),
}

impl RawDate {
    /// True when the cell carried no value.
    pub fn is_empty(&self) -> bool {
        matches!(self, RawDate::Empty)
    }
}

// =============================================================================
// Billing Record
// =============================================================================

/// One billing row, typed at the parse boundary.
///
/// Missing string columns default to `""` and a missing or unparseable
/// amount defaults to `0.0`; no row is ever rejected for a bad field.
/// Records are immutable once created and discarded after aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingRecord {
    /// Physician name, the grouping key. Empty means the row is skipped.
    pub physician: String,
    /// Payer institution name.
    pub institution: String,
    /// Charged amount (honorarios).
    pub amount: f64,
    /// Charge type.
    pub charge_type: String,
    /// Free-text description of the charge.
    pub description: String,
    /// Raw date cell, resolved into a month label during aggregation.
    #[serde(default)]
    pub raw_date: RawDate,
}

// =============================================================================
// Detail Record
// =============================================================================

/// One line of a physician's detail listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRecord {
    pub description: String,
    pub charge_type: String,
    pub institution: String,
    pub amount: f64,
    /// Resolved month label ("Enero 2024", or a sentinel).
    pub month_label: String,
    /// Paid flag. Populated on the all-records listing only; unpaid
    /// detail lines leave it out, mirroring the exported report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_paid: Option<bool>,
}

// =============================================================================
// Physician Summary
// =============================================================================

/// Accumulated totals and detail listings for one physician.
///
/// Built incrementally during the aggregation scan and never mutated
/// afterwards. Invariants (held during and after the scan):
///
/// - `total_overall == total_paid + total_unpaid` (floating-point ε)
/// - `paid_count + unpaid_count == all_details.len()`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicianSummary {
    /// Physician name (exact string from the records, case-sensitive key).
    pub physician: String,
    /// Sum of amounts for records whose institution is not excluded.
    pub total_paid: f64,
    /// Sum of amounts for records charged to excluded institutions.
    pub total_unpaid: f64,
    /// Sum of all amounts.
    pub total_overall: f64,
    /// Number of paid records.
    pub paid_count: usize,
    /// Number of unpaid records.
    pub unpaid_count: usize,
    /// Every record for this physician, in input order.
    pub all_details: Vec<DetailRecord>,
    /// Only the excluded-institution records, in input order.
    pub unpaid_details: Vec<DetailRecord>,
}

impl PhysicianSummary {
    /// Create an empty summary for a physician.
    pub fn new(physician: impl Into<String>) -> Self {
        Self {
            physician: physician.into(),
            total_paid: 0.0,
            total_unpaid: 0.0,
            total_overall: 0.0,
            paid_count: 0,
            unpaid_count: 0,
            all_details: Vec::new(),
            unpaid_details: Vec::new(),
        }
    }
}

// =============================================================================
// Month Bucket
// =============================================================================

/// Unpaid records of one physician sharing a month label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthBucket {
    /// Month label shared by all records in the bucket.
    pub label: String,
    /// Sum of amounts in the bucket.
    pub total: f64,
    /// Records in input order.
    pub records: Vec<DetailRecord>,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_date_untagged_serde() {
        let serial: RawDate = serde_json::from_value(json!(45000.0)).unwrap();
        assert_eq!(serial, RawDate::Serial(45000.0));

        let text: RawDate = serde_json::from_value(json!("2023-03-15")).unwrap();
        assert_eq!(text, RawDate::Text("2023-03-15".into()));
    }

    #[test]
    fn test_billing_record_defaults_raw_date() {
        let record: BillingRecord = serde_json::from_value(json!({
            "physician": "SMITH A",
            "institution": "GENERAL HOSPITAL",
            "amount": 1000.0,
            "chargeType": "RX",
            "description": "Thorax",
        }))
        .unwrap();
        assert!(record.raw_date.is_empty());
    }

    #[test]
    fn test_detail_record_omits_absent_paid_flag() {
        let detail = DetailRecord {
            description: "Thorax".into(),
            charge_type: "RX".into(),
            institution: "GENERAL HOSPITAL".into(),
            amount: 1000.0,
            month_label: "Marzo 2023".into(),
            is_paid: None,
        };
        let json = serde_json::to_string(&detail).unwrap();
        assert!(!json.contains("isPaid"));
        assert!(json.contains("monthLabel"));
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = PhysicianSummary::new("SMITH A");
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("totalPaid"));
        assert!(json.contains("unpaidDetails"));
    }
}
