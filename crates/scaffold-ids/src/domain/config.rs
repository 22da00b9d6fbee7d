//! Identity assignment configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use scaffold_ids::domain::IdentityConfigBuilder;
//!
//! let config = IdentityConfigBuilder::new()
//!     .key_column("scaffold")
//!     .id_column("scaffold_id")
//!     .duplicate_keys(DuplicateKeyPolicy::LastWins)
//!     .build()?;
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::alphabet::Alphabet;
use crate::error::IdentityError;

/// Default identifier length
pub const DEFAULT_ID_LENGTH: usize = 8;

/// Default composite-label suffix length
pub const DEFAULT_SUFFIX_LENGTH: usize = 3;

/// Default key column name
pub const DEFAULT_KEY_COLUMN: &str = "scaffold_smiles";

/// Default identifier column name
pub const DEFAULT_ID_COLUMN: &str = "scaffold_id";

/// Rows below which stable hashing stays on the calling thread
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

/// How identifiers are produced for keys without one
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Hash-derived; same key always yields the same identifier
    #[default]
    Stable,
    /// Pseudorandom; unique within the operation's used set
    Random,
}

impl FromStr for Strategy {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stable" => Ok(Self::Stable),
            "random" => Ok(Self::Random),
            other => Err(IdentityError::UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stable => f.write_str("stable"),
            Self::Random => f.write_str("random"),
        }
    }
}

/// What to do when a registry maps one key to two identifiers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKeyPolicy {
    /// Fail with `ConflictingRegistryKey`
    #[default]
    Reject,
    /// Keep the mapping seen first
    FirstWins,
    /// Keep the mapping seen last
    LastWins,
}

impl FromStr for DuplicateKeyPolicy {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reject" => Ok(Self::Reject),
            "first_wins" => Ok(Self::FirstWins),
            "last_wins" => Ok(Self::LastWins),
            other => Err(IdentityError::UnknownDuplicatePolicy(other.to_string())),
        }
    }
}

/// What to do when a stable identifier minted during extrapolation is
/// already held by a different key
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StableCollisionPolicy {
    /// Keep the hashed identifier, log it and count it in the metrics
    #[default]
    Warn,
    /// Fail with `StableCollision`
    Reject,
}

impl FromStr for StableCollisionPolicy {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warn" => Ok(Self::Warn),
            "reject" => Ok(Self::Reject),
            other => Err(IdentityError::UnknownCollisionPolicy(other.to_string())),
        }
    }
}

/// Identity assignment configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Column holding scaffold keys
    pub key_column: String,
    /// Column receiving identifiers
    pub id_column: String,
    /// Symbols for random identifiers
    pub alphabet: Alphabet,
    /// Registry duplicate-key handling
    pub duplicate_keys: DuplicateKeyPolicy,
    /// Stable identifier collisions during extrapolation
    pub stable_collisions: StableCollisionPolicy,
    /// Rows below which stable hashing is sequential
    pub parallel_threshold: usize,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            key_column: DEFAULT_KEY_COLUMN.to_string(),
            id_column: DEFAULT_ID_COLUMN.to_string(),
            alphabet: Alphabet::upper_alnum(),
            duplicate_keys: DuplicateKeyPolicy::Reject,
            stable_collisions: StableCollisionPolicy::Warn,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl IdentityConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), IdentityError> {
        if self.key_column.trim().is_empty() {
            return Err(IdentityError::InvalidConfig(
                "key_column cannot be empty".to_string(),
            ));
        }

        if self.id_column.trim().is_empty() {
            return Err(IdentityError::InvalidConfig(
                "id_column cannot be empty".to_string(),
            ));
        }

        if self.key_column == self.id_column {
            return Err(IdentityError::InvalidConfig(format!(
                "key_column and id_column are both '{}'",
                self.key_column
            )));
        }

        if self.alphabet.is_empty() {
            return Err(IdentityError::InvalidConfig(
                "alphabet cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for IdentityConfig with validation
#[derive(Default)]
pub struct IdentityConfigBuilder {
    key_column: Option<String>,
    id_column: Option<String>,
    alphabet: Option<Alphabet>,
    duplicate_keys: Option<DuplicateKeyPolicy>,
    stable_collisions: Option<StableCollisionPolicy>,
    parallel_threshold: Option<usize>,
}

impl IdentityConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_column(mut self, name: impl Into<String>) -> Self {
        self.key_column = Some(name.into());
        self
    }

    pub fn id_column(mut self, name: impl Into<String>) -> Self {
        self.id_column = Some(name.into());
        self
    }

    pub fn alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = Some(alphabet);
        self
    }

    pub fn duplicate_keys(mut self, policy: DuplicateKeyPolicy) -> Self {
        self.duplicate_keys = Some(policy);
        self
    }

    pub fn stable_collisions(mut self, policy: StableCollisionPolicy) -> Self {
        self.stable_collisions = Some(policy);
        self
    }

    pub fn parallel_threshold(mut self, rows: usize) -> Self {
        self.parallel_threshold = Some(rows);
        self
    }

    /// Build the IdentityConfig, validating all parameters
    pub fn build(self) -> Result<IdentityConfig, IdentityError> {
        let defaults = IdentityConfig::default();

        let config = IdentityConfig {
            key_column: self.key_column.unwrap_or(defaults.key_column),
            id_column: self.id_column.unwrap_or(defaults.id_column),
            alphabet: self.alphabet.unwrap_or(defaults.alphabet),
            duplicate_keys: self.duplicate_keys.unwrap_or(defaults.duplicate_keys),
            stable_collisions: self.stable_collisions.unwrap_or(defaults.stable_collisions),
            parallel_threshold: self.parallel_threshold.unwrap_or(defaults.parallel_threshold),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Composite label configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Random suffix length
    pub suffix_length: usize,
    /// Random suffix symbols
    pub alphabet: Alphabet,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            suffix_length: DEFAULT_SUFFIX_LENGTH,
            alphabet: Alphabet::upper_alpha(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = IdentityConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.key_column, "scaffold_smiles");
        assert_eq!(config.id_column, "scaffold_id");
        assert_eq!(config.alphabet.len(), 36);
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("stable".parse::<Strategy>().unwrap(), Strategy::Stable);
        assert_eq!("random".parse::<Strategy>().unwrap(), Strategy::Random);
        assert!(matches!(
            "hashed".parse::<Strategy>(),
            Err(IdentityError::UnknownStrategy(s)) if s == "hashed"
        ));
        // Matching is exact
        assert!("Stable".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_strategy_display_round_trips() {
        for strategy in [Strategy::Stable, Strategy::Random] {
            assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn test_duplicate_policy_parsing() {
        assert_eq!(
            "last_wins".parse::<DuplicateKeyPolicy>().unwrap(),
            DuplicateKeyPolicy::LastWins
        );
        assert!(matches!(
            "newest".parse::<DuplicateKeyPolicy>(),
            Err(IdentityError::UnknownDuplicatePolicy(_))
        ));
    }

    #[test]
    fn test_collision_policy_parsing() {
        assert_eq!(IdentityConfig::default().stable_collisions, StableCollisionPolicy::Warn);
        assert_eq!(
            "reject".parse::<StableCollisionPolicy>().unwrap(),
            StableCollisionPolicy::Reject
        );
        assert!(matches!(
            "ignore".parse::<StableCollisionPolicy>(),
            Err(IdentityError::UnknownCollisionPolicy(_))
        ));
    }

    #[test]
    fn test_builder_rejects_same_columns() {
        let result = IdentityConfigBuilder::new()
            .key_column("scaffold")
            .id_column("scaffold")
            .build();
        assert!(matches!(result, Err(IdentityError::InvalidConfig(_))));
    }

    #[test]
    fn test_builder_rejects_blank_column() {
        let result = IdentityConfigBuilder::new().id_column("  ").build();
        assert!(matches!(result, Err(IdentityError::InvalidConfig(_))));
    }

    #[test]
    fn test_builder_uses_defaults() {
        let config = IdentityConfigBuilder::new()
            .key_column("murcko")
            .build()
            .expect("Should use defaults for other fields");

        let defaults = IdentityConfig::default();
        assert_eq!(config.key_column, "murcko");
        assert_eq!(config.id_column, defaults.id_column);
        assert_eq!(config.parallel_threshold, defaults.parallel_threshold);
    }

    #[test]
    fn test_config_deserializes_partial_json() {
        let config: IdentityConfig =
            serde_json::from_str(r#"{"key_column": "scaf", "duplicate_keys": "first_wins"}"#)
                .unwrap();
        assert_eq!(config.key_column, "scaf");
        assert_eq!(config.duplicate_keys, DuplicateKeyPolicy::FirstWins);
        assert_eq!(config.id_column, DEFAULT_ID_COLUMN);
    }

    #[test]
    fn test_label_config_defaults() {
        let config = LabelConfig::default();
        assert_eq!(config.suffix_length, 3);
        assert_eq!(config.alphabet.len(), 26);
    }
}
