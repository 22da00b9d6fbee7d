//! Scaffold frequency tables
//!
//! Counts how often each scaffold key occurs in a dataset and expresses it
//! as a percentage of all counted rows. These records feed the composite
//! labels used in reports.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::dataset::Dataset;
use super::normalizer::{normalize_key, ScaffoldKey};
use crate::error::IdentityError;

/// One row of a frequency table
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrequencyRecord {
    pub key: ScaffoldKey,
    /// Number of rows carrying `key`
    pub amount: u64,
    /// Share of counted rows, in percent, rounded to two decimals
    pub frequency: f64,
}

/// Build a frequency table over the `key_column` of `dataset`
///
/// Keys are normalized first. With `keep_absent == false` rows without a
/// scaffold are left out of both the table and the denominator; otherwise
/// they are counted under the sentinel. Records are sorted by amount
/// (descending), then key. `top` keeps only the first `n` records when
/// `n > 0`.
pub fn scaffold_frequency(
    dataset: &Dataset,
    key_column: &str,
    keep_absent: bool,
    top: Option<usize>,
) -> Result<Vec<FrequencyRecord>, IdentityError> {
    let index = dataset.require_column(key_column, "dataset")?;

    let mut counts: HashMap<ScaffoldKey, u64> = HashMap::new();
    for key in dataset.column_values(index).map(normalize_key) {
        if key.is_absent() && !keep_absent {
            continue;
        }
        *counts.entry(key).or_default() += 1;
    }

    let total: u64 = counts.values().sum();
    let denominator = total.max(1) as f64;

    let mut records: Vec<FrequencyRecord> = counts
        .into_iter()
        .map(|(key, amount)| FrequencyRecord {
            key,
            amount,
            frequency: round2(amount as f64 / denominator * 100.0),
        })
        .collect();

    records.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.key.cmp(&b.key)));

    if let Some(n) = top.filter(|n| *n > 0) {
        records.truncate(n);
    }

    Ok(records)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
