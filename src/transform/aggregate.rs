//! Per-physician aggregation.
//!
//! This module is the core of the consolidator: a single scan over all
//! billing records that classifies each charge, resolves its month label,
//! and accumulates one [`PhysicianSummary`] per distinct physician name.
//!
//! ```text
//! Records (all files, in order)      →  Summaries (ranked)
//! ┌──────────────────────────────┐      ┌─────────────────────────┐
//! │ SMITH A · HOSPITAL  · 1000   │      │ SMITH A                 │
//! │ SMITH A · SINDICATO ·  500   │  →   │ paid 1000 / unpaid 500  │
//! │ JONES B · HOSPITAL  ·  250   │      ├─────────────────────────┤
//! └──────────────────────────────┘      │ JONES B                 │
//!                                       │ paid 250 / unpaid 0     │
//!                                       └─────────────────────────┘
//! ```

use indexmap::IndexMap;
use std::collections::BTreeMap;

use crate::classify::Classifier;
use crate::config::ReportConfig;
use crate::dates::month_label;
use crate::models::{BillingRecord, DetailRecord, MonthBucket, PhysicianSummary};

/// Aggregate billing records into per-physician summaries.
///
/// Records are scanned in input order (file-selection order across files).
/// Rows with an empty physician name are skipped. The result is sorted
/// descending by overall total; the sort is stable, so physicians with
/// equal totals keep their first-encounter order.
pub fn summarize(records: &[BillingRecord], config: &ReportConfig) -> Vec<PhysicianSummary> {
    let classifier = Classifier::new(&config.excluded_institutions);
    let mut by_physician: IndexMap<String, PhysicianSummary> = IndexMap::new();

    for record in records {
        if record.physician.is_empty() {
            continue;
        }

        let summary = by_physician
            .entry(record.physician.clone())
            .or_insert_with(|| PhysicianSummary::new(&record.physician));

        let excluded = classifier.is_excluded(&record.institution);
        let label = month_label(&record.raw_date, &config.month_names);

        let detail = DetailRecord {
            description: record.description.clone(),
            charge_type: record.charge_type.clone(),
            institution: record.institution.clone(),
            amount: record.amount,
            month_label: label,
            is_paid: None,
        };

        if excluded {
            summary.total_unpaid += record.amount;
            summary.unpaid_count += 1;
            summary.unpaid_details.push(detail.clone());
        } else {
            summary.total_paid += record.amount;
            summary.paid_count += 1;
        }

        summary.total_overall += record.amount;
        summary.all_details.push(DetailRecord {
            is_paid: Some(!excluded),
            ..detail
        });
    }

    let mut summaries: Vec<PhysicianSummary> = by_physician.into_values().collect();
    // Vec::sort_by is stable: ties keep insertion order.
    summaries.sort_by(|a, b| b.total_overall.total_cmp(&a.total_overall));
    summaries
}

/// Group a physician's unpaid details by month label.
///
/// Buckets are emitted in ascending lexicographic order of the label, not
/// chronological order - the ordering the reference report shows its users
/// (see DESIGN.md). Records inside a bucket keep input order.
pub fn bucket_unpaid_by_month(summary: &PhysicianSummary) -> Vec<MonthBucket> {
    let mut buckets: BTreeMap<&str, Vec<DetailRecord>> = BTreeMap::new();
    for detail in &summary.unpaid_details {
        buckets
            .entry(detail.month_label.as_str())
            .or_default()
            .push(detail.clone());
    }

    buckets
        .into_iter()
        .map(|(label, records)| MonthBucket {
            label: label.to_string(),
            total: records.iter().map(|r| r.amount).sum(),
            records,
        })
        .collect()
}

/// Case-insensitive substring search over physician names. An empty query
/// matches everything.
pub fn filter_summaries<'a>(
    summaries: &'a [PhysicianSummary],
    query: &str,
) -> Vec<&'a PhysicianSummary> {
    let needle = query.trim().to_uppercase();
    summaries
        .iter()
        .filter(|s| needle.is_empty() || s.physician.to_uppercase().contains(&needle))
        .collect()
}

/// Find the initially selected physician: the first summary whose
/// uppercased name contains the uppercased term. UI-convenience hook,
/// driven by [`ReportConfig::default_selection`].
pub fn default_selection<'a>(
    summaries: &'a [PhysicianSummary],
    term: &str,
) -> Option<&'a PhysicianSummary> {
    let needle = term.trim().to_uppercase();
    if needle.is_empty() {
        return None;
    }
    summaries
        .iter()
        .find(|s| s.physician.to_uppercase().contains(&needle))
}
