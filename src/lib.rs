#![no_std]

//! Fairy lights - animated bulb string
//!
//! Architecture layers:
//! - `bulb` / `color` - Bulb state model and palette
//! - `mode` - Glow rules (classic, pulse, breathe)
//! - `scheduler` - Settle, staggered reveal and periodic tick over injected time
//! - `engine` - Async driver fed by a command channel
//! - `state` - Shared state for renderers on other tasks
//! - `layout` - Bulb placement along the wire
//! - `release` - Release payload evaluation and check schedule
//!
//! The scheduler is generic over [`RandomSource`], so tests can inject a
//! deterministic source.

pub mod bulb;
pub mod color;
pub mod command;
pub mod config;
pub mod engine;
pub mod layout;
pub mod models;
pub mod mode;
pub mod random;
pub mod release;
pub mod scheduler;
pub mod state;

pub use bulb::BulbState;
pub use color::{BulbColor, ColorChoice, Rgb};
pub use command::{Command, CommandChannel, CommandReceiver, CommandSender};
pub use config::{AnimationTimings, ConfigError, IntervalRange, LightsConfig};
pub use engine::LightsEngine;
pub use layout::{BulbPlacement, StringLayout};
pub use mode::{GlowWave, LightMode};
pub use models::LightsSnapshot;
pub use random::RandomSource;
pub use release::{AppVersion, CheckFrequency, Release, ReleaseError, UpdateSchedule, UpdateStatus};
pub use scheduler::{AnimationState, BulbScheduler, SpeedClass};
pub use state::SharedBulbs;

pub use embassy_time::{Duration, Instant};
