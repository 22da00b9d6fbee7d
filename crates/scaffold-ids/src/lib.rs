//! # Scaffold IDs
//!
//! Stable, collision-aware identifiers for recurring scaffold keys across
//! incremental processing runs.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `normalize_key`: absent/blank/non-string keys → `NA_SCAFFOLD`
//!   - `stable_id`: SHA-1 → base-32, truncated
//!   - `random_id` / `UniquenessAllocator`: random identifiers with a
//!     bounded retry loop against an owned used set
//!   - `Registry`, `Dataset`, `scaffold_frequency`, `composite_label`
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `IdentityApi`: Driving port (inbound API)
//!   - `RandomSource`: Driven port (injectable randomness)
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `IdentityService`: Implements `IdentityApi`
//!
//! - **Adapters Layer** (`adapters/`): `StdRandomSource`, `FixedRandomSource`
//!
//! ## Invariants
//!
//! - **Determinism**: `stable_id(key, length)` is a pure function
//! - **Batch uniqueness**: one allocator never returns an identifier twice
//! - **Append-only registry**: extrapolation never renames a known key
//! - **Novelty**: random identifiers minted during extrapolation avoid every
//!   identifier of the prior registry
//!
//! ## Usage Example
//!
//! ```ignore
//! use scaffold_ids::{Dataset, IdentityApi, IdentityService, Strategy};
//!
//! let mut service = IdentityService::with_defaults();
//! let first = Dataset::from_column("scaffold_smiles", ["c1ccccc1", "C1CC1"]);
//! let registry = service.assign_ids(&first, Strategy::Stable, 8)?;
//!
//! let second = Dataset::from_column("scaffold_smiles", ["c1ccccc1", "c1ccncc1"]);
//! let grown = service.extrapolate_ids(&registry, &second, Strategy::Random, 8)?;
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{FixedRandomSource, StdRandomSource};
pub use domain::{
    composite_label, normalize_key, normalize_str, random_id, scaffold_frequency,
    stable_composite_label, stable_id, Alphabet, Dataset, DuplicateKeyPolicy, FrequencyRecord,
    Identifier, IdentityConfig, IdentityConfigBuilder, LabelConfig, LabeledRecord, Record, Registry,
    ScaffoldKey, StableCollisionPolicy, Strategy, UniquenessAllocator, NA_SCAFFOLD,
};
pub use error::{ErrorKind, IdentityError};
pub use metrics::{Metrics, MetricsSnapshot};
pub use ports::{IdentityApi, RandomSource};
pub use service::IdentityService;
