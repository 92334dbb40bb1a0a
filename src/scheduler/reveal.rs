//! Staggered reveal after the settle delay
//!
//! Bulb `i` leaves the initial color at `origin + i * stagger`. Instead of one
//! pending timer per bulb, the reveal keeps a cursor to the next bulb; the
//! deadlines it represents are the same.

use embassy_time::{Duration, Instant};

use crate::color::BulbColor;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Reveal {
    origin: Instant,
    next: usize,
}

impl Reveal {
    pub(crate) fn new(origin: Instant) -> Self {
        Self { origin, next: 0 }
    }

    /// Index of the next bulb to reveal
    pub(crate) fn next_index(&self) -> usize {
        self.next
    }

    pub(crate) fn advance(&mut self) {
        self.next += 1;
    }

    /// Deadline of the next bulb
    pub(crate) fn next_due(&self, stagger: Duration) -> Instant {
        let ticks = stagger.as_ticks().saturating_mul(self.next as u64);
        self.origin + Duration::from_ticks(ticks)
    }
}

/// Color a bulb takes when revealed: the non-initial palette, cycled by index.
pub fn reveal_color(index: usize) -> BulbColor {
    let palette = BulbColor::non_initial();
    palette[index % palette.len()]
}
