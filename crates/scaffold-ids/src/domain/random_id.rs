//! Pseudorandom identifiers drawn from an alphabet

use super::alphabet::Alphabet;
use super::Identifier;
use crate::ports::RandomSource;

/// Draw `length` symbols independently and uniformly from `alphabet`
pub fn random_id(length: usize, alphabet: &Alphabet, source: &mut dyn RandomSource) -> Identifier {
    (0..length)
        .map(|_| alphabet.symbol(source.random_index(alphabet.len())))
        .collect()
}
