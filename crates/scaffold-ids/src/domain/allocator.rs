//! Uniqueness-enforcing allocator for random identifiers
//!
//! The allocator owns the set of identifiers already in use. Every call to
//! [`UniquenessAllocator::allocate`] draws candidates until one is free,
//! records it and returns it, so one allocator instance never hands out the
//! same identifier twice.
//!
//! ## Retry bound
//!
//! The draw loop is capped at `16 * alphabet_size^length` attempts (at
//! least [`MIN_ATTEMPTS`], at most [`MAX_ATTEMPTS`]). An undersized
//! alphabet/length combination fails with `AllocationExhausted` instead of
//! spinning as the used set fills up.

use std::collections::HashSet;
use tracing::warn;

use super::alphabet::Alphabet;
use super::random_id::random_id;
use super::Identifier;
use crate::error::IdentityError;
use crate::ports::RandomSource;

/// Attempts granted per identifier in the keyspace
pub const ATTEMPTS_PER_SLOT: usize = 16;

/// Floor on the attempt budget
pub const MIN_ATTEMPTS: usize = 64;

/// Ceiling on the attempt budget
pub const MAX_ATTEMPTS: usize = 1 << 20;

/// Attempt budget for one allocation
pub fn attempt_budget(alphabet: &Alphabet, length: usize) -> usize {
    alphabet
        .keyspace(length)
        .map(|keyspace| keyspace.saturating_mul(ATTEMPTS_PER_SLOT))
        .unwrap_or(MAX_ATTEMPTS)
        .clamp(MIN_ATTEMPTS, MAX_ATTEMPTS)
}

/// Random identifier allocator with an owned used-identifier set
#[derive(Clone, Debug)]
pub struct UniquenessAllocator {
    length: usize,
    alphabet: Alphabet,
    used: HashSet<Identifier>,
    max_attempts: usize,
    retries: u64,
}

impl UniquenessAllocator {
    /// Create an allocator with an empty used set
    pub fn new(length: usize, alphabet: Alphabet) -> Self {
        let max_attempts = attempt_budget(&alphabet, length);
        Self {
            length,
            alphabet,
            used: HashSet::new(),
            max_attempts,
            retries: 0,
        }
    }

    /// Seed the used set, e.g. with every identifier of a prior registry
    pub fn with_used<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = Identifier>,
    {
        self.used.extend(ids);
        self
    }

    /// Override the attempt budget
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Draw a fresh identifier and mark it used
    pub fn allocate(&mut self, source: &mut dyn RandomSource) -> Result<Identifier, IdentityError> {
        for attempt in 0..self.max_attempts {
            let candidate = random_id(self.length, &self.alphabet, source);
            if !self.used.contains(&candidate) {
                self.used.insert(candidate.clone());
                self.retries += attempt as u64;
                return Ok(candidate);
            }
        }

        self.retries += self.max_attempts as u64;
        warn!(
            attempts = self.max_attempts,
            length = self.length,
            alphabet_size = self.alphabet.len(),
            used = self.used.len(),
            "Identifier allocation exhausted"
        );
        Err(IdentityError::AllocationExhausted {
            attempts: self.max_attempts,
            length: self.length,
            alphabet_size: self.alphabet.len(),
            used: self.used.len(),
        })
    }

    /// Mark an externally produced identifier as used
    ///
    /// Returns `false` if it was already in use.
    pub fn reserve(&mut self, id: Identifier) -> bool {
        self.used.insert(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.used.contains(id)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    /// Candidates rejected because they were already in use
    pub fn retries(&self) -> u64 {
        self.retries
    }
}
