//! Lights engine - async driver around the scheduler
//!
//! The engine:
//! - Owns a [`BulbScheduler`]
//! - Accepts commands via async channel
//! - Sleeps until the scheduler's next deadline or the next command
//! - Optionally publishes state to [`SharedBulbs`] for renderers

use embassy_futures::select::{Either, select};
use embassy_time::{Instant, Timer};

use crate::command::{Command, CommandReceiver};
use crate::config::LightsConfig;
use crate::random::RandomSource;
use crate::scheduler::BulbScheduler;
use crate::state::SharedBulbs;

/// Lights engine
///
/// Generic over the random source and the bulb capacity `N`.
pub struct LightsEngine<'a, R: RandomSource, const N: usize> {
    /// Bulb state and timers
    scheduler: BulbScheduler<R, N>,
    /// Command receiver
    commands: CommandReceiver,
    /// Optional shared state for external observation
    shared_state: Option<&'a SharedBulbs<N>>,
}

impl<'a, R: RandomSource, const N: usize> LightsEngine<'a, R, N> {
    pub fn new(commands: CommandReceiver, config: &LightsConfig, rng: R) -> Self {
        Self {
            scheduler: BulbScheduler::from_config(config, rng),
            commands,
            shared_state: None,
        }
    }

    /// Attach shared state for external observation
    #[must_use]
    pub fn with_shared_state(mut self, state: &'a SharedBulbs<N>) -> Self {
        self.shared_state = Some(state);
        self
    }

    pub fn scheduler(&self) -> &BulbScheduler<R, N> {
        &self.scheduler
    }

    /// Apply a single command at `now`
    pub fn apply(&mut self, command: Command, now: Instant) {
        match command {
            Command::Initialize(count) => self.scheduler.initialize(count, now),
            Command::Start => self.scheduler.start(now),
            Command::Stop => self.scheduler.stop(),
            Command::SetMode(mode) => self.scheduler.set_mode(mode),
            Command::Teardown => {
                self.scheduler.initialize(0, now);
                self.scheduler.stop();
            }
        }
        self.publish_state();
    }

    /// Process pending commands from the channel (non-blocking)
    pub fn process_commands(&mut self, now: Instant) {
        while let Ok(command) = self.commands.try_receive() {
            self.apply(command, now);
        }
    }

    /// Advance the scheduler to `now` and publish if anything changed
    pub fn advance(&mut self, now: Instant) -> bool {
        let changed = self.scheduler.update(now);
        if changed {
            self.publish_state();
        }
        changed
    }

    /// Publish current state to shared state (if attached)
    fn publish_state(&self) {
        if let Some(shared) = self.shared_state {
            shared.publish(
                self.scheduler.bulbs(),
                self.scheduler.mode(),
                self.scheduler.is_active(),
            );
        }
    }

    /// Process one step
    ///
    /// Handles queued commands, fires due work, then waits for the next
    /// deadline or command. Call this continuously.
    pub async fn tick(&mut self) {
        let now = Instant::now();
        self.process_commands(now);
        self.advance(now);

        let event = match self.scheduler.next_deadline() {
            Some(deadline) => select(self.commands.receive(), Timer::at(deadline)).await,
            None => Either::First(self.commands.receive().await),
        };

        if let Either::First(command) = event {
            self.apply(command, Instant::now());
        }
    }

    /// Run the engine loop indefinitely
    pub async fn run(&mut self) -> ! {
        loop {
            self.tick().await;
        }
    }
}
