//! Group-wise ratio between two grouped sums, ranked.

use std::collections::BTreeMap;

use crate::analyzers::aggregate::group_sums;
use crate::analyzers::types::{RankedRatio, RatioEntry};
use crate::analyzers::utility::cmp_ratio_desc;
use crate::error::AggregateError;
use crate::table::CategoryTable;

/// A (table, group column, value column) triple to group and sum.
#[derive(Debug, Clone, Copy)]
pub struct Selection<'a> {
    pub table: &'a CategoryTable,
    pub key: &'a str,
    pub value: &'a str,
}

impl<'a> Selection<'a> {
    pub fn new(table: &'a CategoryTable, key: &'a str, value: &'a str) -> Self {
        Self { table, key, value }
    }
}

/// Ratio of `numerator` sums to `denominator` sums for every key present in
/// both maps. Keys on only one side produce no entry. A zero denominator
/// yields `inf` (or NaN for 0/0) rather than an error.
pub fn rank_ratios(
    denominator: &BTreeMap<String, f64>,
    numerator: &BTreeMap<String, f64>,
) -> RankedRatio {
    let mut entries: Vec<RatioEntry> = numerator
        .iter()
        .filter_map(|(key, num)| {
            denominator.get(key).map(|den| RatioEntry {
                key: key.clone(),
                ratio: num / den,
            })
        })
        .collect();

    entries.sort_by(|a, b| cmp_ratio_desc(a.ratio, b.ratio).then_with(|| a.key.cmp(&b.key)));

    RankedRatio { entries }
}

/// Groups both selections and ranks `second / first` per group.
pub fn ranked_ratio(first: Selection<'_>, second: Selection<'_>) -> Result<RankedRatio, AggregateError> {
    let denominator = group_sums(first.table, first.key, first.value)?;
    let numerator = group_sums(second.table, second.key, second.value)?;
    Ok(rank_ratios(&denominator, &numerator))
}
