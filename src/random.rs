//! Random source abstraction
//!
//! Every random draw the scheduler makes goes through [`RandomSource`], so a
//! deterministic source can be injected where exact sequences matter.

/// Source of uniform random samples
pub trait RandomSource {
    /// Uniform sample in `[0.0, 1.0)`
    fn next_unit(&mut self) -> f32;

    /// Fair coin flip
    fn next_bool(&mut self) -> bool {
        self.next_unit() < 0.5
    }

    /// Uniform sample in `[low, high)`
    fn next_in(&mut self, low: f32, high: f32) -> f32 {
        low + (high - low) * self.next_unit()
    }

    /// Uniform index in `0..len`; `len` must be non-zero
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn next_index(&mut self, len: usize) -> usize {
        let index = (self.next_unit() * len as f32) as usize;
        index.min(len.saturating_sub(1))
    }
}

impl RandomSource for fastrand::Rng {
    fn next_unit(&mut self) -> f32 {
        self.f32()
    }

    fn next_bool(&mut self) -> bool {
        self.bool()
    }

    fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.usize(..len)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }

    fn next_bool(&mut self) -> bool {
        (**self).next_bool()
    }

    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }
}

/// Create the default random source from a seed.
///
/// The seed usually comes from a hardware RNG or the wall clock of the host.
pub fn seeded(seed: u64) -> fastrand::Rng {
    fastrand::Rng::with_seed(seed)
}
