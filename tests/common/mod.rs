//! Shared helpers for integration tests.

#![allow(dead_code)]

use fairy_lights::{Instant, RandomSource};

/// Random source that always returns the same sample.
pub struct FixedRandom(pub f32);

impl RandomSource for FixedRandom {
    fn next_unit(&mut self) -> f32 {
        self.0
    }
}

/// Random source that cycles through a fixed list of samples.
pub struct SequenceRandom {
    samples: &'static [f32],
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(samples: &'static [f32]) -> Self {
        Self { samples, cursor: 0 }
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f32 {
        let sample = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        sample
    }
}

pub fn at_ms(ms: u64) -> Instant {
    Instant::from_millis(ms)
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
