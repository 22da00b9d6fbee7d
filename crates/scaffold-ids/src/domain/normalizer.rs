//! Scaffold key normalization
//!
//! Every identifier is derived from a normalized key, never from the raw
//! cell. Absent, blank and non-string cells collapse onto one sentinel so
//! that acyclic molecules (no scaffold) share a single identity.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Sentinel standing in for an absent, blank or non-string key
pub const NA_SCAFFOLD: &str = "NA_SCAFFOLD";

/// Normalized scaffold key
///
/// Opaque string; equality is exact string equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScaffoldKey(String);

impl ScaffoldKey {
    /// The sentinel key
    pub fn absent() -> Self {
        Self(NA_SCAFFOLD.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if this key is the sentinel
    pub fn is_absent(&self) -> bool {
        self.0 == NA_SCAFFOLD
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ScaffoldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ScaffoldKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize an optional string key
pub fn normalize_str(key: Option<&str>) -> ScaffoldKey {
    match key.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => ScaffoldKey(trimmed.to_string()),
        _ => ScaffoldKey::absent(),
    }
}

/// Normalize a dataset cell
///
/// Only JSON strings carry a key; `null`, numbers, booleans, arrays and
/// objects all map to the sentinel.
pub fn normalize_key(cell: &Value) -> ScaffoldKey {
    match cell {
        Value::String(s) => normalize_str(Some(s)),
        _ => ScaffoldKey::absent(),
    }
}
