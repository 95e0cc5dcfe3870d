// ============================================================================
// Random Source Interface
// Boundary to the external pseudo-random generator
// ============================================================================

/// Bounded random draws supplied by the external generator.
pub trait RandomSource {
    /// Return a uniformly distributed value in `[0, bound)`.
    ///
    /// `bound` is always at least 2.
    fn bounded(&mut self, bound: u64) -> u64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    #[inline]
    fn bounded(&mut self, bound: u64) -> u64 {
        (**self).bounded(bound)
    }
}
