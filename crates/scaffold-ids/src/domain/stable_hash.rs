//! Deterministic, hash-derived identifiers
//!
//! SHA-1 over the normalized key's UTF-8 bytes, RFC 4648 base-32 without
//! padding, truncated. The output matches identifiers produced by earlier
//! pipeline runs, so registries built by them stay valid.
//!
//! Truncation discards entropy: 8 characters keep 40 of the 160 digest bits.
//! Around 2^20 distinct keys the birthday bound makes a collision between
//! two keys likely. Callers choosing short lengths accept that.

use data_encoding::BASE32_NOPAD;
use sha1::{Digest, Sha1};

use super::normalizer::{normalize_str, ScaffoldKey};
use super::Identifier;

/// Symbols a stable identifier can contain
pub const STABLE_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Length of the full encoded digest (160 bits / 5 bits per symbol)
pub const STABLE_ID_MAX_LEN: usize = 32;

/// Hash an already-normalized key
///
/// Lengths above [`STABLE_ID_MAX_LEN`] yield the full encoded digest.
pub fn hash_key(key: &ScaffoldKey, length: usize) -> Identifier {
    let digest = Sha1::digest(key.as_str().as_bytes());
    let mut encoded = BASE32_NOPAD.encode(&digest);
    // base-32 output is ASCII, so truncating at any index is a char boundary
    encoded.truncate(length);
    encoded
}

/// Stable identifier for a raw key
///
/// `None`, blank strings and the literal sentinel all hash identically.
pub fn stable_id(key: Option<&str>, length: usize) -> Identifier {
    hash_key(&normalize_str(key), length)
}
