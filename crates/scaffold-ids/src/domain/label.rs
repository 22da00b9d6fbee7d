//! Composite labels for frequency-table rows
//!
//! Format: `{amount}.{round(frequency)}.{suffix}` (e.g. `12.7.ABC`). The
//! random suffix keeps otherwise identical labels apart in charts, so two
//! calls for the same record differ. [`stable_composite_label`] is the
//! reproducible variant.

use serde::{Deserialize, Serialize};

use super::alphabet::Alphabet;
use super::frequency::FrequencyRecord;
use super::random_id::random_id;
use super::stable_hash::stable_id;
use crate::ports::RandomSource;

/// Frequency record with its label attached
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabeledRecord {
    #[serde(flatten)]
    pub record: FrequencyRecord,
    pub label: String,
}

/// Label with a random suffix
pub fn composite_label(
    record: &FrequencyRecord,
    suffix_length: usize,
    suffix_alphabet: &Alphabet,
    source: &mut dyn RandomSource,
) -> String {
    let suffix = random_id(suffix_length, suffix_alphabet, source);
    format!("{}.{}.{}", record.amount, rounded_percent(record.frequency), suffix)
}

/// Label whose suffix is hashed from the record
///
/// Suffix symbols come from the base-32 alphabet rather than `A-Z`.
pub fn stable_composite_label(record: &FrequencyRecord, suffix_length: usize) -> String {
    let material = format!("{}|{}|{}", record.key, record.amount, record.frequency);
    let suffix = stable_id(Some(&material), suffix_length);
    format!("{}.{}.{}", record.amount, rounded_percent(record.frequency), suffix)
}

/// Nearest integer, halves to even
fn rounded_percent(frequency: f64) -> i64 {
    frequency.round_ties_even() as i64
}
