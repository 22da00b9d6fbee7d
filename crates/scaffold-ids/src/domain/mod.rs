//! Domain Layer - Pure identity logic
//!
//! This layer contains:
//! - Key normalization
//! - Stable (hash-derived) and random identifiers
//! - The uniqueness allocator
//! - Datasets, registries and frequency tables
//! - Composite labels
//!
//! RULES:
//! - No I/O operations
//! - Randomness only through the `RandomSource` port

pub mod alphabet;
pub mod allocator;
pub mod config;
pub mod dataset;
pub mod frequency;
pub mod label;
pub mod normalizer;
pub mod random_id;
pub mod registry;
pub mod stable_hash;

/// Identifier handed out for a scaffold key
pub type Identifier = String;

pub use alphabet::{Alphabet, UPPER_ALNUM, UPPER_ALPHA};
pub use allocator::{attempt_budget, UniquenessAllocator, MAX_ATTEMPTS, MIN_ATTEMPTS};
pub use config::{
    DuplicateKeyPolicy, IdentityConfig, IdentityConfigBuilder, LabelConfig, StableCollisionPolicy,
    Strategy,
    DEFAULT_ID_COLUMN, DEFAULT_ID_LENGTH, DEFAULT_KEY_COLUMN, DEFAULT_PARALLEL_THRESHOLD,
    DEFAULT_SUFFIX_LENGTH,
};
pub use dataset::{Dataset, Record};
pub use frequency::{scaffold_frequency, FrequencyRecord};
pub use label::{composite_label, stable_composite_label, LabeledRecord};
pub use normalizer::{normalize_key, normalize_str, ScaffoldKey, NA_SCAFFOLD};
pub use random_id::random_id;
pub use registry::Registry;
pub use stable_hash::{hash_key, stable_id, STABLE_ALPHABET, STABLE_ID_MAX_LEN};
