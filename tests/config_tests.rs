//! Integration tests for configuration parsing.

use fairy_lights::{
    AnimationTimings, BulbColor, ColorChoice, ConfigError, Duration, IntervalRange, LightMode,
    LightsConfig,
};

#[test]
fn defaults_match_documented_timings() {
    let timings = AnimationTimings::default();

    assert_eq!(timings.tick, Duration::from_millis(250));
    assert_eq!(timings.settle_delay, Duration::from_millis(3_000));
    assert_eq!(timings.stagger, Duration::from_millis(100));
    assert_eq!(timings.color_interval, IntervalRange::from_millis(8_000, 15_000));
    assert_eq!(timings.glow_slow, IntervalRange::from_millis(3_000, 6_000));
    assert_eq!(timings.glow_medium, IntervalRange::from_millis(1_000, 3_000));
    assert_eq!(timings.glow_fast, IntervalRange::from_millis(1_000, 2_000));
    assert_eq!(timings.pulse_period, Duration::from_millis(1_500));
    assert_eq!(timings.breathe_period, Duration::from_millis(6_000));

    let config = LightsConfig::default();
    assert_eq!(config.mode, LightMode::Classic);
    assert_eq!(config.color, ColorChoice::Default);
}

#[test]
fn empty_object_gives_defaults() {
    let config = LightsConfig::from_json(b"{}").unwrap();
    assert_eq!(config, LightsConfig::default());
}

#[test]
fn full_object_overrides_everything() {
    let payload = br#"{
        "mode": "breathe",
        "color": "blue",
        "tick_ms": 100,
        "settle_ms": 1000,
        "stagger_ms": 50,
        "color_interval_min_ms": 2000,
        "color_interval_max_ms": 4000,
        "pulse_period_ms": 800,
        "breathe_period_ms": 5000
    }"#;
    let config = LightsConfig::from_json(payload).unwrap();

    assert_eq!(config.mode, LightMode::Breathe);
    assert_eq!(config.color, ColorChoice::Solid(BulbColor::Blue));
    assert_eq!(config.timings.tick, Duration::from_millis(100));
    assert_eq!(config.timings.settle_delay, Duration::from_millis(1_000));
    assert_eq!(config.timings.stagger, Duration::from_millis(50));
    assert_eq!(config.timings.color_interval, IntervalRange::from_millis(2_000, 4_000));
    assert_eq!(config.timings.pulse_period, Duration::from_millis(800));
    assert_eq!(config.timings.breathe_period, Duration::from_millis(5_000));
    assert_eq!(config.timings.glow_slow, AnimationTimings::default().glow_slow);
}

#[test]
fn partial_object_keeps_other_defaults() {
    let config = LightsConfig::from_json(br#"{"mode":"pulse","color":"default"}"#).unwrap();

    assert_eq!(config.mode, LightMode::Pulse);
    assert_eq!(config.color, ColorChoice::Default);
    assert_eq!(config.timings, AnimationTimings::default());
}

#[test]
fn rejects_unknown_names() {
    assert_eq!(
        LightsConfig::from_json(br#"{"mode":"strobe"}"#),
        Err(ConfigError::UnknownMode)
    );
    assert_eq!(
        LightsConfig::from_json(br#"{"color":"purple"}"#),
        Err(ConfigError::UnknownColor)
    );
}

#[test]
fn rejects_invalid_values() {
    assert_eq!(
        LightsConfig::from_json(br#"{"tick_ms":0}"#),
        Err(ConfigError::ZeroDuration)
    );
    assert_eq!(
        LightsConfig::from_json(br#"{"color_interval_min_ms":9000,"color_interval_max_ms":1000}"#),
        Err(ConfigError::InvertedInterval)
    );
    assert_eq!(
        LightsConfig::from_json(b"not json"),
        Err(ConfigError::Deserialization)
    );
}

#[test]
fn mode_names_round_trip_through_parser() {
    for mode in LightMode::ALL {
        assert_eq!(LightMode::parse_from_str(mode.as_str()), Some(mode));
        assert_eq!(LightMode::from_raw(mode as u8), Some(mode));
    }
    assert_eq!(LightMode::from_raw(7), None);
}
