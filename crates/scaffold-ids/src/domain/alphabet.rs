//! Symbol sets for random identifiers and label suffixes

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::IdentityError;

/// Uppercase letters and digits (36 symbols)
pub const UPPER_ALNUM: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Uppercase letters (26 symbols)
pub const UPPER_ALPHA: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Non-empty set of distinct symbols
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Build an alphabet, rejecting empty input and repeated symbols
    ///
    /// Repeated symbols would skew the distribution away from uniform.
    pub fn new(symbols: &str) -> Result<Self, IdentityError> {
        let chars: Vec<char> = symbols.chars().collect();
        if chars.is_empty() {
            return Err(IdentityError::InvalidConfig(
                "alphabet cannot be empty".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(chars.len());
        if let Some(dup) = chars.iter().find(|c| !seen.insert(**c)) {
            return Err(IdentityError::InvalidConfig(format!(
                "alphabet contains '{dup}' more than once"
            )));
        }

        Ok(Self { symbols: chars })
    }

    /// `A-Z0-9`
    pub fn upper_alnum() -> Self {
        Self {
            symbols: UPPER_ALNUM.chars().collect(),
        }
    }

    /// `A-Z`
    pub fn upper_alpha() -> Self {
        Self {
            symbols: UPPER_ALPHA.chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbol at `index`; callers draw indices in `0..len()`
    pub fn symbol(&self, index: usize) -> char {
        self.symbols[index]
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.symbols.contains(&symbol)
    }

    /// True if every character of `id` belongs to this alphabet
    pub fn spells(&self, id: &str) -> bool {
        id.chars().all(|c| self.contains(c))
    }

    /// Number of distinct identifiers of `length`, or `None` on overflow
    pub fn keyspace(&self, length: usize) -> Option<usize> {
        u32::try_from(length)
            .ok()
            .and_then(|exp| self.symbols.len().checked_pow(exp))
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::upper_alnum()
    }
}

impl TryFrom<String> for Alphabet {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Alphabet> for String {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.symbols.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_alphabets() {
        assert_eq!(Alphabet::upper_alnum().len(), 36);
        assert_eq!(Alphabet::upper_alpha().len(), 26);
        assert_eq!(Alphabet::default(), Alphabet::upper_alnum());
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            Alphabet::new(""),
            Err(IdentityError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_symbols() {
        assert!(matches!(
            Alphabet::new("ABCA"),
            Err(IdentityError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_keyspace() {
        let ab = Alphabet::new("AB").unwrap();
        assert_eq!(ab.keyspace(3), Some(8));
        assert_eq!(Alphabet::upper_alnum().keyspace(2), Some(1296));
        assert_eq!(Alphabet::upper_alnum().keyspace(64), None);
    }

    #[test]
    fn test_spells() {
        let alphabet = Alphabet::upper_alpha();
        assert!(alphabet.spells("ABC"));
        assert!(!alphabet.spells("AB1"));
    }

    #[test]
    fn test_serde_round_trip_validates() {
        let json = serde_json::to_string(&Alphabet::new("XYZ").unwrap()).unwrap();
        assert_eq!(json, "\"XYZ\"");
        let parsed: Alphabet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 3);
        assert!(serde_json::from_str::<Alphabet>("\"XX\"").is_err());
    }
}
