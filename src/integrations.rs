//! Splitting discovered integrations into eager and lazy listings.
//!
//! The dashboard shows the few configured "important" packages right away
//! and only counts the rest; the scan endpoint later returns the rest in
//! full. Both paths share [`is_important`] and the sort key from
//! [`IntegrationRecord::sort_key`] so that no package shows up in both
//! listings or in neither.
use serde::Serialize;
use std::collections::BTreeSet;

use crate::facts::IntegrationRecord;

/// Important integrations plus the size of the deferred remainder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardIntegrations {
    /// Configured packages, sorted case-insensitively.
    pub important: Vec<IntegrationRecord>,
    /// How many discovered packages were left for the scan endpoint.
    pub other_count: usize,
}

/// The deferred listing served by the scan endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OtherIntegrations {
    /// Non-important packages, sorted case-insensitively.
    pub integrations: Vec<IntegrationRecord>,
    /// Length of `integrations`.
    pub count: usize,
}

/// Membership test shared by both listings.
///
/// Matching is exact: the configured names are distribution names.
#[must_use]
pub fn is_important(record: &IntegrationRecord, important_names: &BTreeSet<String>) -> bool {
    important_names.contains(&record.package_name)
}

fn sort_by_name(records: &mut [IntegrationRecord]) {
    records.sort_by_cached_key(IntegrationRecord::sort_key);
}

/// Dashboard path: keep important records and only count the others.
#[must_use]
pub fn classify(
    records: &[IntegrationRecord],
    important_names: &BTreeSet<String>,
) -> DashboardIntegrations {
    let mut important = Vec::new();
    let mut other_count = 0;

    for record in records {
        if is_important(record, important_names) {
            important.push(record.clone());
        } else {
            other_count += 1;
        }
    }
    sort_by_name(&mut important);

    tracing::debug!(
        "{} important integration(s), {other_count} deferred",
        important.len()
    );
    DashboardIntegrations {
        important,
        other_count,
    }
}

/// Scan path: every non-important record, sorted.
#[must_use]
pub fn classify_full(
    records: Vec<IntegrationRecord>,
    important_names: &BTreeSet<String>,
) -> OtherIntegrations {
    let mut integrations: Vec<_> = records
        .into_iter()
        .filter(|record| !is_important(record, important_names))
        .collect();
    sort_by_name(&mut integrations);

    OtherIntegrations {
        count: integrations.len(),
        integrations,
    }
}
