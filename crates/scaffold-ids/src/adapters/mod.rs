//! Adapters Layer - Implementations of driven ports

pub mod random;

pub use random::{FixedRandomSource, StdRandomSource};
