//! Bulb animation scheduler
//!
//! The scheduler owns the bulb sequence and every timer that mutates it. It
//! never reads a clock: each operation takes the current [`Instant`], so the
//! same code runs under the engine's real timer and under synthetic time in
//! tests.
//!
//! Lifecycle:
//! - [`BulbScheduler::initialize`] creates the bulbs in the initial state
//! - [`BulbScheduler::start`] arms the settle delay (or resumes ticking)
//! - [`BulbScheduler::update`] fires whatever is due at `now`
//! - [`BulbScheduler::stop`] cancels all pending work

mod interval;
mod reveal;

pub use interval::SpeedClass;
pub use reveal::reveal_color;

use embassy_time::{Duration, Instant};
use heapless::Vec;

use crate::bulb::BulbState;
use crate::config::{AnimationTimings, LightsConfig};
use crate::mode::LightMode;
use crate::random::RandomSource;

use interval::BulbTimers;
use reveal::Reveal;

/// Scheduler state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    /// Nothing is scheduled
    Stopped,
    /// Waiting for the settle delay, all bulbs in the initial color
    InitialSettle,
    /// Revealing colors and/or ticking
    Running,
}

/// Bulb animation scheduler
///
/// Generic over the random source and over `N`, the maximum number of bulbs.
pub struct BulbScheduler<R: RandomSource, const N: usize> {
    bulbs: Vec<BulbState, N>,
    timers: Vec<BulbTimers, N>,
    mode: LightMode,
    timings: AnimationTimings,
    rng: R,
    state: AnimationState,
    /// Set by `initialize`, cleared when the settle delay expires or on stop
    is_initial: bool,
    settle_deadline: Option<Instant>,
    reveal: Option<Reveal>,
    next_tick: Option<Instant>,
}

impl<R: RandomSource, const N: usize> BulbScheduler<R, N> {
    pub fn new(mode: LightMode, timings: AnimationTimings, rng: R) -> Self {
        Self {
            bulbs: Vec::new(),
            timers: Vec::new(),
            mode,
            timings,
            rng,
            state: AnimationState::Stopped,
            is_initial: false,
            settle_deadline: None,
            reveal: None,
            next_tick: None,
        }
    }

    pub fn from_config(config: &LightsConfig, rng: R) -> Self {
        Self::new(config.mode, config.timings, rng)
    }

    /// Current bulb sequence, in string order
    pub fn bulbs(&self) -> &[BulbState] {
        &self.bulbs
    }

    pub fn mode(&self) -> LightMode {
        self.mode
    }

    pub fn timings(&self) -> &AnimationTimings {
        &self.timings
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != AnimationState::Stopped
    }

    /// True from setup until the settle delay expires
    pub fn is_in_initial_state(&self) -> bool {
        self.is_initial
    }

    /// Whether the periodic update step is armed
    pub fn is_ticking(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Maximum number of bulbs this scheduler can hold
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Glow interval currently drawn for bulb `index`
    pub fn glow_interval(&self, index: usize) -> Option<Duration> {
        self.timers.get(index).map(BulbTimers::glow_interval)
    }

    /// Color interval currently drawn for bulb `index`
    pub fn color_interval(&self, index: usize) -> Option<Duration> {
        self.timers.get(index).map(BulbTimers::color_interval)
    }

    /// Earliest instant at which `update` has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        let reveal = self
            .reveal
            .filter(|r| r.next_index() < self.bulbs.len())
            .map(|r| r.next_due(self.timings.stagger));

        [self.settle_deadline, reveal, self.next_tick]
            .into_iter()
            .flatten()
            .min()
    }

    /// Recreate `count` bulbs in the initial state.
    ///
    /// Stops any running animation first. `count` is clamped to the
    /// capacity; zero clears everything.
    pub fn initialize(&mut self, count: usize, now: Instant) {
        self.stop();

        if count > N {
            #[cfg(feature = "log")]
            log::warn!("lights: {} bulbs requested, capacity is {}", count, N);
        }
        let count = count.min(N);

        let timings = &self.timings;
        let rng = &mut self.rng;
        (self.bulbs, self.timers) = (0..count)
            .map(|index| {
                let bulb = BulbState::spawn(index, rng);
                (bulb, BulbTimers::new(index, now, timings, rng))
            })
            .unzip();
        self.is_initial = true;

        #[cfg(feature = "log")]
        log::debug!("lights: initialized {} bulbs", count);
    }

    /// Start the animation. Does nothing when already active.
    pub fn start(&mut self, now: Instant) {
        if self.is_active() {
            return;
        }

        if self.is_initial {
            self.reveal = None;
            self.next_tick = None;
            self.settle_deadline = Some(now + self.timings.settle_delay);
            self.state = AnimationState::InitialSettle;

            #[cfg(feature = "log")]
            log::debug!("lights: settling for {} ms", self.timings.settle_delay.as_millis());
        } else {
            self.state = AnimationState::Running;
            self.start_ticking(now);

            #[cfg(feature = "log")]
            log::debug!("lights: resumed");
        }
    }

    /// Cancel the tick, the settle delay and every pending reveal.
    pub fn stop(&mut self) {
        #[cfg(feature = "log")]
        {
            if self.is_active() {
                log::debug!("lights: stopped");
            }
        }

        self.state = AnimationState::Stopped;
        self.is_initial = false;
        self.settle_deadline = None;
        self.reveal = None;
        self.next_tick = None;
    }

    pub fn set_mode(&mut self, mode: LightMode) {
        if self.mode != mode {
            #[cfg(feature = "log")]
            log::debug!("lights: mode {} -> {}", self.mode.as_str(), mode.as_str());

            self.mode = mode;
        }
    }

    /// Fire everything due at `now`.
    ///
    /// Returns `true` if any bulb changed.
    pub fn update(&mut self, now: Instant) -> bool {
        if !self.is_active() {
            return false;
        }

        let mut changed = false;

        if let Some(deadline) = self.settle_deadline {
            if now >= deadline {
                self.settle_deadline = None;
                self.is_initial = false;
                self.state = AnimationState::Running;
                self.reveal = Some(Reveal::new(deadline));

                #[cfg(feature = "log")]
                log::debug!("lights: settled, revealing {} bulbs", self.bulbs.len());
            }
        }

        if self.reveal.is_some() {
            changed |= self.advance_reveal(now);
        }

        if let Some(due) = self.next_tick {
            if now >= due {
                changed |= self.step(now);
                self.next_tick = Some(self.following_tick(due, now));
            }
        }

        changed
    }

    fn start_ticking(&mut self, now: Instant) {
        if self.next_tick.is_none() {
            self.next_tick = Some(now + self.timings.tick);
        }
    }

    /// First tick on the grid `due + k * tick` strictly after `now`
    fn following_tick(&self, due: Instant, now: Instant) -> Instant {
        let tick = self.timings.tick.as_ticks().max(1);
        let behind = now.saturating_duration_since(due).as_ticks();
        let skipped = behind / tick + 1;
        due + Duration::from_ticks(tick.saturating_mul(skipped))
    }

    fn advance_reveal(&mut self, now: Instant) -> bool {
        let Some(mut reveal) = self.reveal else {
            return false;
        };

        let mut changed = false;
        while reveal.next_index() < self.bulbs.len() && reveal.next_due(self.timings.stagger) <= now {
            let index = reveal.next_index();
            if let (Some(bulb), Some(timers)) = (self.bulbs.get_mut(index), self.timers.get_mut(index)) {
                bulb.color = reveal_color(index);
                timers.reset_color(now, &self.timings, &mut self.rng);
                changed = true;
            }
            reveal.advance();
        }

        if reveal.next_index() >= self.bulbs.len() {
            self.reveal = None;
            self.start_ticking(now);

            #[cfg(feature = "log")]
            log::debug!("lights: reveal complete");
        } else {
            self.reveal = Some(reveal);
        }

        changed
    }

    /// One periodic update over every bulb
    fn step(&mut self, now: Instant) -> bool {
        let Self {
            bulbs,
            timers,
            mode,
            timings,
            rng,
            ..
        } = self;

        let mut changed = false;
        match timings.wave(*mode) {
            None => {
                for (bulb, timer) in bulbs.iter_mut().zip(timers.iter_mut()) {
                    if timer.glow_due(now) {
                        bulb.is_glowing = !bulb.is_glowing;
                        timer.reset_glow(now, timings, rng);
                        changed = true;
                    }
                    if timer.color_due(now) {
                        let palette = bulb.color.others();
                        bulb.color = palette[rng.next_index(palette.len())];
                        timer.reset_color(now, timings, rng);
                        changed = true;
                    }
                }
            }
            Some(wave) => {
                for bulb in bulbs.iter_mut() {
                    let glowing = wave.is_glowing(now, bulb.phase_offset);
                    if bulb.is_glowing != glowing {
                        bulb.is_glowing = glowing;
                        changed = true;
                    }
                }
            }
        }
        changed
    }
}
