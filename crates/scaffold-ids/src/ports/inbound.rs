//! Inbound Ports (Driving Ports)
//!
//! The API callers use to assign identifiers to datasets.

use crate::domain::{Dataset, FrequencyRecord, LabeledRecord, Strategy};
use crate::error::IdentityError;

/// Primary identity assignment API (Driving Port)
///
/// Methods take `&mut self`: the random paths mutate one used-identifier
/// set and one random source, so callers sharing a service across threads
/// must serialize access (e.g. behind a `Mutex`).
pub trait IdentityApi {
    /// Assign an identifier to every row of `dataset`
    ///
    /// # Arguments
    /// * `dataset` - Rows carrying the configured key column
    /// * `strategy` - `Stable` hashes each key; `Random` gives every row a
    ///   distinct identifier
    /// * `length` - Identifier length in characters
    ///
    /// # Returns
    /// A copy of `dataset` with the identifier column set
    ///
    /// With `Random`, rows that repeat a key get different identifiers, so
    /// the output only works as a registry for [`Self::extrapolate_ids`]
    /// when the duplicate-key policy is `FirstWins` or `LastWins`. The
    /// default `Reject` policy refuses it with `ConflictingRegistryKey`.
    fn assign_ids(
        &mut self,
        dataset: &Dataset,
        strategy: Strategy,
        length: usize,
    ) -> Result<Dataset, IdentityError>;

    /// Assign identifiers to `new_rows`, reusing those of `existing`
    ///
    /// # Arguments
    /// * `existing` - Previously annotated rows (key and identifier columns)
    /// * `new_rows` - Rows carrying the key column
    /// * `strategy_new` - Strategy for keys the registry does not know
    /// * `length` - Length of newly produced identifiers
    ///
    /// # Returns
    /// A copy of `new_rows` with the identifier column set. Merging it with
    /// `existing` is up to the caller. Newly minted random identifiers avoid
    /// every identifier in `existing`, including those of rows the
    /// duplicate-key policy discarded.
    fn extrapolate_ids(
        &mut self,
        existing: &Dataset,
        new_rows: &Dataset,
        strategy_new: Strategy,
        length: usize,
    ) -> Result<Dataset, IdentityError>;

    /// Label one frequency record with a random suffix
    fn composite_label(&mut self, record: &FrequencyRecord) -> String;

    /// Label every record of a frequency table
    fn label_frequency_table(&mut self, records: &[FrequencyRecord]) -> Vec<LabeledRecord>;
}
