//! Key → identifier registry built from a previously annotated dataset

use serde_json::Value;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use super::config::DuplicateKeyPolicy;
use super::dataset::Dataset;
use super::normalizer::{normalize_key, ScaffoldKey};
use super::Identifier;
use crate::error::IdentityError;

/// Mapping from normalized scaffold key to identifier
///
/// Besides the lookup, the registry remembers every identifier it was
/// given, including ones a duplicate-key policy discarded. Those stay taken:
/// a fresh identifier must not repeat anything the prior dataset holds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registry {
    entries: HashMap<ScaffoldKey, Identifier>,
    held: HashSet<Identifier>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the key and identifier columns of an annotated dataset
    ///
    /// Keys are normalized the same way new rows are, so a registry row
    /// with a blank key maps the sentinel. Rows repeating a key with the
    /// same identifier are accepted; differing identifiers are resolved by
    /// `policy`.
    pub fn from_dataset(
        dataset: &Dataset,
        key_column: &str,
        id_column: &str,
        policy: DuplicateKeyPolicy,
    ) -> Result<Self, IdentityError> {
        let key_index = dataset.require_column(key_column, "existing registry")?;
        let id_index = dataset.require_column(id_column, "existing registry")?;

        let mut registry = Self::new();
        let keys = dataset.column_values(key_index);
        let ids = dataset.column_values(id_index);
        for (row, (key, id)) in keys.zip(ids).enumerate() {
            let id = identifier_cell(id).ok_or(IdentityError::MissingRegistryIdentifier { row })?;
            registry.merge(normalize_key(key), id, policy)?;
        }
        Ok(registry)
    }

    fn merge(
        &mut self,
        key: ScaffoldKey,
        id: Identifier,
        policy: DuplicateKeyPolicy,
    ) -> Result<(), IdentityError> {
        self.held.insert(id.clone());
        match self.entries.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
            Entry::Occupied(mut slot) => {
                if *slot.get() == id {
                    return Ok(());
                }
                match policy {
                    DuplicateKeyPolicy::Reject => {
                        return Err(IdentityError::ConflictingRegistryKey {
                            key: slot.key().to_string(),
                            existing: slot.get().clone(),
                            conflicting: id,
                        });
                    }
                    DuplicateKeyPolicy::FirstWins => {}
                    DuplicateKeyPolicy::LastWins => {
                        slot.insert(id);
                    }
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, key: &ScaffoldKey) -> Option<&Identifier> {
        self.entries.get(key)
    }

    /// Record a mapping, returning the previous identifier if any
    pub fn insert(&mut self, key: ScaffoldKey, id: Identifier) -> Option<Identifier> {
        self.held.insert(id.clone());
        self.entries.insert(key, id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every identifier seen, including those shadowed by a duplicate key
    pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> + '_ {
        self.held.iter()
    }
}

/// Identifier stored in a registry cell
///
/// Numbers and booleans are taken in their textual form; null, blank and
/// structured cells carry no identifier.
fn identifier_cell(cell: &Value) -> Option<Identifier> {
    match cell {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
