//! Identity Service
//!
//! Orchestrates domain logic: per-row assignment, extrapolation against a
//! prior registry and frequency-table labelling.

use rayon::prelude::*;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::adapters::StdRandomSource;
use crate::domain::{
    composite_label, hash_key, normalize_key, Dataset, FrequencyRecord, Identifier,
    IdentityConfig, LabelConfig, LabeledRecord, Registry, StableCollisionPolicy, Strategy,
    UniquenessAllocator, STABLE_ID_MAX_LEN,
};
use crate::error::IdentityError;
use crate::metrics::Metrics;
use crate::ports::{IdentityApi, RandomSource};

/// Identity Service implementation
///
/// Implements the `IdentityApi` port using an injected random source.
pub struct IdentityService<R: RandomSource = StdRandomSource> {
    config: IdentityConfig,
    label_config: LabelConfig,
    rng: R,
    metrics: Arc<Metrics>,
}

impl IdentityService<StdRandomSource> {
    /// Default configuration, entropy-seeded randomness
    pub fn with_defaults() -> Self {
        Self {
            config: IdentityConfig::default(),
            label_config: LabelConfig::default(),
            rng: StdRandomSource::new(),
            metrics: Arc::new(Metrics::new()),
        }
    }
}

impl<R: RandomSource> IdentityService<R> {
    /// Create a new service, validating `config`
    pub fn new(config: IdentityConfig, rng: R) -> Result<Self, IdentityError> {
        config.validate()?;
        Ok(Self {
            config,
            label_config: LabelConfig::default(),
            rng,
            metrics: Arc::new(Metrics::new()),
        })
    }

    /// Replace the label configuration
    pub fn with_label_config(mut self, label_config: LabelConfig) -> Self {
        self.label_config = label_config;
        self
    }

    /// Share an externally owned metrics collector
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &IdentityConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    fn check_length(strategy: Strategy, length: usize) -> Result<(), IdentityError> {
        if length == 0 {
            return Err(IdentityError::InvalidConfig(
                "identifier length must be positive".to_string(),
            ));
        }
        if strategy == Strategy::Stable && length > STABLE_ID_MAX_LEN {
            return Err(IdentityError::InvalidConfig(format!(
                "stable identifiers are at most {STABLE_ID_MAX_LEN} characters, got {length}"
            )));
        }
        Ok(())
    }

    /// Hash every key; parallel above the configured threshold
    fn stable_column(&self, keys: Vec<&Value>, length: usize) -> Vec<Value> {
        let hash = |cell: &&Value| Value::String(hash_key(&normalize_key(cell), length));
        if keys.len() < self.config.parallel_threshold {
            keys.iter().map(hash).collect()
        } else {
            keys.par_iter().map(hash).collect()
        }
    }

    fn allocate(&mut self, allocator: &mut UniquenessAllocator) -> Result<Identifier, IdentityError> {
        allocator.allocate(&mut self.rng).inspect_err(|_| {
            self.metrics.record_exhausted();
        })
    }
}

impl<R: RandomSource> IdentityApi for IdentityService<R> {
    fn assign_ids(
        &mut self,
        dataset: &Dataset,
        strategy: Strategy,
        length: usize,
    ) -> Result<Dataset, IdentityError> {
        Self::check_length(strategy, length)?;
        let key_index = dataset.require_column(&self.config.key_column, "dataset")?;

        let keys: Vec<&Value> = dataset.column_values(key_index).collect();
        let ids = match strategy {
            Strategy::Stable => self.stable_column(keys, length),
            Strategy::Random => {
                // One used set for the whole call: every row gets a distinct identifier
                let mut allocator = UniquenessAllocator::new(length, self.config.alphabet.clone());
                let mut ids = Vec::with_capacity(keys.len());
                for _ in &keys {
                    let id = self.allocate(&mut allocator)?;
                    ids.push(Value::String(id));
                }
                self.metrics.record_retries(allocator.retries());
                ids
            }
        };

        self.metrics.record_assignment(ids.len(), ids.len(), 0);
        debug!(
            rows = ids.len(),
            strategy = %strategy,
            length,
            "Assigned scaffold identifiers"
        );

        Ok(dataset.with_column(&self.config.id_column, ids))
    }

    fn extrapolate_ids(
        &mut self,
        existing: &Dataset,
        new_rows: &Dataset,
        strategy_new: Strategy,
        length: usize,
    ) -> Result<Dataset, IdentityError> {
        Self::check_length(strategy_new, length)?;
        existing.require_column(&self.config.key_column, "existing registry")?;
        existing.require_column(&self.config.id_column, "existing registry")?;
        let key_index = new_rows.require_column(&self.config.key_column, "new dataset")?;

        let mut registry = Registry::from_dataset(
            existing,
            &self.config.key_column,
            &self.config.id_column,
            self.config.duplicate_keys,
        )?;
        let mut allocator = UniquenessAllocator::new(length, self.config.alphabet.clone())
            .with_used(registry.identifiers().cloned());

        let mut ids = Vec::with_capacity(new_rows.len());
        let mut reused = 0usize;
        let mut minted = 0usize;

        for cell in new_rows.column_values(key_index) {
            let key = normalize_key(cell);
            if let Some(id) = registry.get(&key) {
                reused += 1;
                ids.push(Value::String(id.clone()));
                continue;
            }

            let id = match strategy_new {
                Strategy::Stable => {
                    let id = hash_key(&key, length);
                    if !allocator.reserve(id.clone()) {
                        self.metrics.record_stable_collision();
                        if self.config.stable_collisions == StableCollisionPolicy::Reject {
                            return Err(IdentityError::StableCollision {
                                key: key.to_string(),
                                id,
                            });
                        }
                        // Rerolling would break determinism; surface it instead
                        warn!(key = %key, id = %id, "Stable identifier already held by another key");
                    }
                    id
                }
                Strategy::Random => self.allocate(&mut allocator)?,
            };

            registry.insert(key, id.clone());
            minted += 1;
            ids.push(Value::String(id));
        }

        self.metrics.record_retries(allocator.retries());
        self.metrics.record_assignment(ids.len(), minted, reused);
        debug!(
            rows = ids.len(),
            reused,
            minted,
            strategy = %strategy_new,
            used_identifiers = allocator.len(),
            "Extrapolated scaffold identifiers"
        );

        Ok(new_rows.with_column(&self.config.id_column, ids))
    }

    fn composite_label(&mut self, record: &FrequencyRecord) -> String {
        composite_label(
            record,
            self.label_config.suffix_length,
            &self.label_config.alphabet,
            &mut self.rng,
        )
    }

    fn label_frequency_table(&mut self, records: &[FrequencyRecord]) -> Vec<LabeledRecord> {
        records
            .iter()
            .map(|record| LabeledRecord {
                record: record.clone(),
                label: self.composite_label(record),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FixedRandomSource;
    use crate::domain::{Alphabet, DuplicateKeyPolicy, IdentityConfigBuilder, Record};
    use serde_json::json;
    use std::collections::HashSet;

    fn service(seed: u64) -> IdentityService {
        IdentityService::new(IdentityConfig::default(), StdRandomSource::seeded(seed)).unwrap()
    }

    fn keys(cells: Vec<Value>) -> Dataset {
        Dataset::from_column("scaffold_smiles", cells)
    }

    fn ids(dataset: &Dataset) -> Vec<String> {
        dataset
            .column("scaffold_id")
            .unwrap()
            .into_iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect()
    }

    fn registry(pairs: &[(&str, &str)]) -> Dataset {
        let records: Vec<Record> = pairs
            .iter()
            .map(|(k, id)| {
                serde_json::from_value(json!({"scaffold_smiles": k, "scaffold_id": id})).unwrap()
            })
            .collect();
        Dataset::from_records(records)
    }

    #[test]
    fn test_stable_worked_example() {
        let dataset = keys(vec![json!("c1ccccc1"), json!("c1ccccc1"), json!("NCCc1ccccc1")]);
        let first = ids(&service(1).assign_ids(&dataset, Strategy::Stable, 6).unwrap());
        let second = ids(&service(2).assign_ids(&dataset, Strategy::Stable, 6).unwrap());

        assert_eq!(first[0], first[1]);
        assert_ne!(first[0], first[2]);
        assert_eq!(first, vec!["QREAIM", "QREAIM", "6QLIIS"]);
        assert_eq!(first, second, "Rerun must reproduce stable identifiers");
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let cells: Vec<Value> = (0..300).map(|i| json!(format!("C{i}CC"))).collect();
        let dataset = keys(cells);

        let sequential = IdentityConfigBuilder::new().parallel_threshold(usize::MAX).build().unwrap();
        let parallel = IdentityConfigBuilder::new().parallel_threshold(0).build().unwrap();

        let a = IdentityService::new(sequential, StdRandomSource::seeded(0))
            .unwrap()
            .assign_ids(&dataset, Strategy::Stable, 8)
            .unwrap();
        let b = IdentityService::new(parallel, StdRandomSource::seeded(0))
            .unwrap()
            .assign_ids(&dataset, Strategy::Stable, 8)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_assignment_unique_per_row() {
        let dataset = keys(vec![json!("c1ccccc1"); 200]);
        let out = service(4).assign_ids(&dataset, Strategy::Random, 8).unwrap();
        let ids = ids(&out);
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 200, "Every row gets a distinct random identifier");
        assert!(ids.iter().all(|id| id.len() == 8 && Alphabet::upper_alnum().spells(id)));
    }

    #[test]
    fn test_random_assignment_exhaustion() {
        let config = IdentityConfigBuilder::new()
            .alphabet(Alphabet::new("AB").unwrap())
            .build()
            .unwrap();
        let mut service = IdentityService::new(config, StdRandomSource::seeded(9)).unwrap();
        let dataset = keys(vec![json!("a"), json!("b"), json!("c")]);

        let err = service.assign_ids(&dataset, Strategy::Random, 1).unwrap_err();
        assert!(matches!(err, IdentityError::AllocationExhausted { .. }));
        assert_eq!(service.metrics().snapshot().allocations_exhausted, 1);
    }

    #[test]
    fn test_assign_missing_column() {
        let dataset = Dataset::from_column("smiles", ["CCO"]);
        let err = service(0).assign_ids(&dataset, Strategy::Stable, 8).unwrap_err();
        assert!(matches!(err, IdentityError::MissingColumn { ref column, .. } if column == "scaffold_smiles"));
    }

    #[test]
    fn test_invalid_lengths() {
        let dataset = keys(vec![json!("c1ccccc1")]);
        let mut service = service(0);
        assert!(matches!(
            service.assign_ids(&dataset, Strategy::Random, 0),
            Err(IdentityError::InvalidConfig(_))
        ));
        assert!(matches!(
            service.assign_ids(&dataset, Strategy::Stable, 33),
            Err(IdentityError::InvalidConfig(_))
        ));
        // Random identifiers may exceed the digest length
        assert!(service.assign_ids(&dataset, Strategy::Random, 33).is_ok());
    }

    #[test]
    fn test_assign_replaces_existing_id_column() {
        let dataset = registry(&[("c1ccccc1", "OLD")]);
        let out = service(0).assign_ids(&dataset, Strategy::Stable, 8).unwrap();
        assert_eq!(out.columns().len(), 2);
        assert_eq!(ids(&out), vec!["QREAIMMB"]);
    }

    #[test]
    fn test_extrapolation_worked_example() {
        let existing = registry(&[("c1ccccc1", "AB12CD")]);
        let new_rows = keys(vec![json!("c1ccccc1"), json!("c1ccncc1")]);

        let mut service = service(5);
        let out = service
            .extrapolate_ids(&existing, &new_rows, Strategy::Random, 8)
            .unwrap();
        let ids = ids(&out);

        assert_eq!(ids[0], "AB12CD");
        assert_ne!(ids[1], "AB12CD");
        assert_eq!(ids[1].len(), 8);

        let snapshot = service.metrics().snapshot();
        assert_eq!(snapshot.identifiers_reused, 1);
        assert_eq!(snapshot.identifiers_minted, 1);
    }

    #[test]
    fn test_extrapolation_reuses_minted_for_repeated_unseen_keys() {
        let existing = registry(&[("c1ccccc1", "AB12CD")]);
        let new_rows = keys(vec![json!("C1CC1"), json!(" C1CC1 "), json!("C1CCC1")]);
        let out = service(6)
            .extrapolate_ids(&existing, &new_rows, Strategy::Random, 8)
            .unwrap();
        let ids = ids(&out);
        assert_eq!(ids[0], ids[1]);
        assert_ne!(ids[0], ids[2]);
    }

    #[test]
    fn test_extrapolation_never_reuses_registry_identifiers() {
        // Two-symbol alphabet, length 1: only "A" and "B" exist, "A" is taken
        let config = IdentityConfigBuilder::new()
            .alphabet(Alphabet::new("AB").unwrap())
            .build()
            .unwrap();
        let mut service = IdentityService::new(config, FixedRandomSource::sequence(vec![0, 0, 1]))
            .unwrap();
        let existing = registry(&[("c1ccccc1", "A")]);
        let new_rows = keys(vec![json!("C1CC1")]);

        let out = service
            .extrapolate_ids(&existing, &new_rows, Strategy::Random, 1)
            .unwrap();
        assert_eq!(ids(&out), vec!["B"]);
        assert_eq!(service.metrics().snapshot().allocation_retries, 2);
    }

    #[test]
    fn test_extrapolation_stable_collision_is_counted() {
        // Registry already holds the stable identifier of an unseen key
        let existing = registry(&[("c1ccccc1", "N2CYWJXF")]);
        let new_rows = keys(vec![json!("c1ccncc1")]);
        let mut service = service(0);

        let out = service
            .extrapolate_ids(&existing, &new_rows, Strategy::Stable, 8)
            .unwrap();
        assert_eq!(ids(&out), vec!["N2CYWJXF"]);
        assert_eq!(service.metrics().snapshot().stable_collisions, 1);
    }

    #[test]
    fn test_extrapolation_stable_collision_can_fail() {
        let config = IdentityConfigBuilder::new()
            .stable_collisions(StableCollisionPolicy::Reject)
            .build()
            .unwrap();
        let mut service = IdentityService::new(config, StdRandomSource::seeded(0)).unwrap();
        let existing = registry(&[("c1ccccc1", "N2CYWJXF")]);
        let new_rows = keys(vec![json!("c1ccncc1")]);

        let err = service
            .extrapolate_ids(&existing, &new_rows, Strategy::Stable, 8)
            .unwrap_err();
        assert!(matches!(err, IdentityError::StableCollision { ref key, ref id }
            if key == "c1ccncc1" && id == "N2CYWJXF"));
        assert_eq!(service.metrics().snapshot().stable_collisions, 1);
    }

    #[test]
    fn test_extrapolation_avoids_shadowed_registry_identifiers() {
        // "A" and "B" are both in the registry even though only one survives
        // the duplicate-key policy; the only free identifier is "C"
        for policy in [DuplicateKeyPolicy::FirstWins, DuplicateKeyPolicy::LastWins] {
            let config = IdentityConfigBuilder::new()
                .alphabet(Alphabet::new("ABC").unwrap())
                .duplicate_keys(policy)
                .build()
                .unwrap();
            let mut service =
                IdentityService::new(config, FixedRandomSource::sequence(vec![0, 1, 2])).unwrap();
            let existing = registry(&[("c1ccccc1", "A"), ("c1ccccc1", "B")]);
            let new_rows = keys(vec![json!("C1CC1")]);

            let out = service
                .extrapolate_ids(&existing, &new_rows, Strategy::Random, 1)
                .unwrap();
            assert_eq!(ids(&out), vec!["C"], "{policy:?}");
            assert_eq!(service.metrics().snapshot().allocation_retries, 2, "{policy:?}");
        }
    }

    #[test]
    fn test_random_assignment_needs_duplicate_policy_to_extrapolate() {
        let dataset = keys(vec![json!("c1ccccc1"), json!("c1ccccc1"), json!("C1CC1")]);
        let annotated = service(12).assign_ids(&dataset, Strategy::Random, 8).unwrap();
        let new_rows = keys(vec![json!("c1ccccc1"), json!("c1ccncc1")]);

        // Repeated keys got distinct identifiers, which the default policy refuses
        let err = service(12)
            .extrapolate_ids(&annotated, &new_rows, Strategy::Random, 8)
            .unwrap_err();
        assert!(matches!(err, IdentityError::ConflictingRegistryKey { .. }));

        let config = IdentityConfigBuilder::new()
            .duplicate_keys(DuplicateKeyPolicy::LastWins)
            .build()
            .unwrap();
        let mut service = IdentityService::new(config, StdRandomSource::seeded(12)).unwrap();
        let out = service
            .extrapolate_ids(&annotated, &new_rows, Strategy::Random, 8)
            .unwrap();
        let prior = ids(&annotated);
        let out = ids(&out);
        assert_eq!(out[0], prior[1], "Last mapping of the repeated key is reused");
        assert!(!prior.contains(&out[1]), "Fresh identifier avoids every prior one");
    }

    #[test]
    fn test_extrapolation_schema_errors() {
        let mut service = service(0);
        let new_rows = keys(vec![json!("c1ccccc1")]);

        let no_ids = keys(vec![json!("c1ccccc1")]);
        let err = service
            .extrapolate_ids(&no_ids, &new_rows, Strategy::Stable, 8)
            .unwrap_err();
        assert!(matches!(err, IdentityError::MissingColumn { ref column, ref dataset, .. }
            if column == "scaffold_id" && dataset == "existing registry"));

        let existing = registry(&[("c1ccccc1", "AB12CD")]);
        let wrong = Dataset::from_column("smiles", ["CCO"]);
        let err = service
            .extrapolate_ids(&existing, &wrong, Strategy::Stable, 8)
            .unwrap_err();
        assert!(matches!(err, IdentityError::MissingColumn { ref dataset, .. } if dataset == "new dataset"));
    }

    #[test]
    fn test_extrapolation_rejects_conflicting_registry() {
        let existing = registry(&[("c1ccccc1", "AB12CD"), ("c1ccccc1", "ZZ99ZZ")]);
        let new_rows = keys(vec![json!("c1ccccc1")]);
        let err = service(0)
            .extrapolate_ids(&existing, &new_rows, Strategy::Stable, 8)
            .unwrap_err();
        assert!(matches!(err, IdentityError::ConflictingRegistryKey { .. }));
    }

    #[test]
    fn test_extrapolation_last_wins_policy() {
        let config = IdentityConfigBuilder::new()
            .duplicate_keys(DuplicateKeyPolicy::LastWins)
            .build()
            .unwrap();
        let mut service = IdentityService::new(config, StdRandomSource::seeded(0)).unwrap();
        let existing = registry(&[("c1ccccc1", "AB12CD"), ("c1ccccc1", "ZZ99ZZ")]);
        let new_rows = keys(vec![json!("c1ccccc1")]);
        let out = service
            .extrapolate_ids(&existing, &new_rows, Strategy::Stable, 8)
            .unwrap();
        assert_eq!(ids(&out), vec!["ZZ99ZZ"]);
    }

    #[test]
    fn test_custom_columns() {
        let config = IdentityConfigBuilder::new()
            .key_column("murcko")
            .id_column("murcko_id")
            .build()
            .unwrap();
        let mut service = IdentityService::new(config, StdRandomSource::seeded(0)).unwrap();
        let dataset = Dataset::from_column("murcko", ["c1ccccc1"]);
        let out = service.assign_ids(&dataset, Strategy::Stable, 8).unwrap();
        assert_eq!(out.column("murcko_id").unwrap(), vec![&json!("QREAIMMB")]);
    }

    #[test]
    fn test_label_frequency_table() {
        let mut service = IdentityService::new(
            IdentityConfig::default(),
            FixedRandomSource::sequence(vec![0, 1, 2]),
        )
        .unwrap();
        let records = vec![FrequencyRecord {
            key: crate::domain::normalize_str(Some("c1ccccc1")),
            amount: 12,
            frequency: 7.25,
        }];
        let labeled = service.label_frequency_table(&records);
        assert_eq!(labeled.len(), 1);
        assert_eq!(labeled[0].label, "12.7.ABC");
        assert_eq!(labeled[0].record, records[0]);
    }
}
