use std::collections::BTreeMap;

use serde::Serialize;

/// Counts per grouping label together with their grand total
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelCounts {
    pub counts: BTreeMap<String, i64>,
    pub total: i64,
}

/// Count the items accepted by `filter`, grouped by `label`.
///
/// Labels are trimmed before grouping, so `"A "` and `" A"` land in the same
/// bucket. `total` always equals the sum of the per-label counts.
pub fn count_by_label<T, F, L>(items: &[T], filter: F, label: L) -> LabelCounts
where
    F: Fn(&T) -> bool,
    L: Fn(&T) -> &str,
{
    let mut result = LabelCounts::default();

    for item in items.iter().filter(|item| filter(*item)) {
        *result.counts.entry(label(item).trim().to_string()).or_insert(0) += 1;
        result.total += 1;
    }

    result
}
