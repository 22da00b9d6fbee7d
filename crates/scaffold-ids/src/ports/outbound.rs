//! Outbound Ports (Driven Ports)
//!
//! The only external dependency of the identity core is a source of
//! randomness. Injecting it keeps random identifiers reproducible under a
//! fixed seed and lets tests force collisions.

/// Source of uniformly distributed indices (Driven Port)
///
/// Not required to be cryptographically secure.
pub trait RandomSource: Send {
    /// Uniform index in `0..upper`
    ///
    /// `upper` is always at least 1.
    fn random_index(&mut self, upper: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn random_index(&mut self, upper: usize) -> usize {
        (**self).random_index(upper)
    }
}
