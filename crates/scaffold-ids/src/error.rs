//! Error types for the identity-assignment subsystem

use thiserror::Error;

/// Coarse classification of an [`IdentityError`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unrecognized strategy or invalid configuration value
    Configuration,
    /// Required column missing from an input dataset
    Schema,
    /// Allocator ran out of attempts, or a stable identifier was taken
    Allocation,
    /// Supplied registry is internally inconsistent
    Registry,
}

/// Errors that can occur while assigning or extrapolating identifiers
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Unknown strategy '{0}' (expected 'stable' or 'random')")]
    UnknownStrategy(String),

    #[error("Unknown duplicate key policy '{0}' (expected 'reject', 'first_wins' or 'last_wins')")]
    UnknownDuplicatePolicy(String),

    #[error("Unknown stable collision policy '{0}' (expected 'warn' or 'reject')")]
    UnknownCollisionPolicy(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Column '{column}' not found in {dataset} (columns present: {present:?})")]
    MissingColumn {
        column: String,
        dataset: String,
        present: Vec<String>,
    },

    #[error(
        "Allocation exhausted after {attempts} attempts \
         (length {length}, alphabet of {alphabet_size} symbols, {used} identifiers in use)"
    )]
    AllocationExhausted {
        attempts: usize,
        length: usize,
        alphabet_size: usize,
        used: usize,
    },

    #[error("Stable identifier '{id}' for key '{key}' is already held by another key")]
    StableCollision { key: String, id: String },

    #[error("Registry maps key '{key}' to both '{existing}' and '{conflicting}'")]
    ConflictingRegistryKey {
        key: String,
        existing: String,
        conflicting: String,
    },

    #[error("Registry row {row} has no identifier")]
    MissingRegistryIdentifier { row: usize },
}

impl IdentityError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownStrategy(_)
            | Self::UnknownDuplicatePolicy(_)
            | Self::UnknownCollisionPolicy(_)
            | Self::InvalidConfig(_) => ErrorKind::Configuration,
            Self::MissingColumn { .. } => ErrorKind::Schema,
            Self::AllocationExhausted { .. } | Self::StableCollision { .. } => {
                ErrorKind::Allocation
            }
            Self::ConflictingRegistryKey { .. } | Self::MissingRegistryIdentifier { .. } => {
                ErrorKind::Registry
            }
        }
    }
}
