//! Integration tests for the lights engine and shared state.

mod common;

use common::{FixedRandom, at_ms, init_logger};
use embassy_sync::channel::Channel;
use fairy_lights::{
    AnimationTimings, BulbColor, Command, CommandChannel, Duration, LightMode, LightsConfig,
    LightsEngine, SharedBulbs,
};

// -----------------------------------------------------------------------------
// Command handling with synthetic time
// -----------------------------------------------------------------------------

#[test]
fn commands_drive_scheduler_and_publish() {
    init_logger();
    static CHANNEL: CommandChannel = Channel::new();
    let shared: SharedBulbs<16> = SharedBulbs::new();
    let mut engine = LightsEngine::new(CHANNEL.receiver(), &LightsConfig::default(), FixedRandom(0.3))
        .with_shared_state(&shared);

    let sender = CHANNEL.sender();
    sender.try_send(Command::Initialize(5)).unwrap();
    sender.try_send(Command::Start).unwrap();
    engine.process_commands(at_ms(0));

    let snapshot = shared.snapshot();
    assert_eq!(snapshot.bulbs.len(), 5);
    assert!(snapshot.is_active);
    assert_eq!(snapshot.glowing_count(), 5);
    assert!(snapshot.bulbs.iter().all(|b| b.color == BulbColor::INITIAL));

    assert!(engine.advance(at_ms(3_400)));
    let snapshot = shared.snapshot();
    for (index, bulb) in snapshot.bulbs.iter().enumerate() {
        assert_eq!(bulb.color, BulbColor::non_initial()[index % 3]);
    }
}

#[test]
fn teardown_clears_shared_state() {
    static CHANNEL: CommandChannel = Channel::new();
    let shared: SharedBulbs<16> = SharedBulbs::new();
    let mut engine = LightsEngine::new(CHANNEL.receiver(), &LightsConfig::default(), FixedRandom(0.3))
        .with_shared_state(&shared);

    engine.apply(Command::Initialize(4), at_ms(0));
    engine.apply(Command::Start, at_ms(0));
    engine.advance(at_ms(3_500));
    assert_eq!(shared.len(), 4);

    engine.apply(Command::Teardown, at_ms(3_500));

    assert!(shared.is_empty());
    assert!(!shared.snapshot().is_active);
    assert!(!engine.scheduler().is_in_initial_state());
    assert_eq!(engine.scheduler().next_deadline(), None);
    assert!(!engine.advance(at_ms(10_000)));
}

#[test]
fn set_mode_is_published() {
    static CHANNEL: CommandChannel = Channel::new();
    let shared: SharedBulbs<8> = SharedBulbs::new();
    let mut engine = LightsEngine::new(CHANNEL.receiver(), &LightsConfig::default(), FixedRandom(0.3))
        .with_shared_state(&shared);

    engine.apply(Command::SetMode(LightMode::Breathe), at_ms(0));

    assert_eq!(shared.snapshot().mode, LightMode::Breathe);
    assert_eq!(engine.scheduler().mode(), LightMode::Breathe);
}

#[test]
fn stop_command_keeps_bulbs() {
    static CHANNEL: CommandChannel = Channel::new();
    let shared: SharedBulbs<8> = SharedBulbs::new();
    let mut engine = LightsEngine::new(CHANNEL.receiver(), &LightsConfig::default(), FixedRandom(0.3))
        .with_shared_state(&shared);

    engine.apply(Command::Initialize(3), at_ms(0));
    engine.apply(Command::Start, at_ms(0));
    engine.apply(Command::Stop, at_ms(100));

    let snapshot = shared.snapshot();
    assert_eq!(snapshot.bulbs.len(), 3);
    assert!(!snapshot.is_active);
}

// -----------------------------------------------------------------------------
// Async loop on the host clock
// -----------------------------------------------------------------------------

#[test]
fn tick_loop_reaches_running_state() {
    static CHANNEL: CommandChannel = Channel::new();
    let config = LightsConfig {
        timings: AnimationTimings {
            tick: Duration::from_millis(5),
            settle_delay: Duration::from_millis(20),
            stagger: Duration::from_millis(2),
            ..AnimationTimings::default()
        },
        ..LightsConfig::default()
    };
    let shared: SharedBulbs<8> = SharedBulbs::new();
    let mut engine = LightsEngine::new(CHANNEL.receiver(), &config, FixedRandom(0.3))
        .with_shared_state(&shared);

    let sender = CHANNEL.sender();
    sender.try_send(Command::Initialize(3)).unwrap();
    sender.try_send(Command::Start).unwrap();

    for _ in 0..50 {
        embassy_futures::block_on(engine.tick());
        if engine.scheduler().is_ticking() {
            break;
        }
    }

    assert!(engine.scheduler().is_ticking());
    assert!(!engine.scheduler().is_in_initial_state());
    let snapshot = shared.snapshot();
    assert!(snapshot.bulbs.iter().all(|b| b.color != BulbColor::INITIAL));
}
