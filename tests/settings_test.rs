use std::fs;

use clap::Parser;

use blockfall::settings::{load_config, parse_config, Args};
use blockfall::types::{GameConfig, Pos, TICK_MS};

fn args(extra: &[&str]) -> Args {
    Args::try_parse_from(std::iter::once("blockfall").chain(extra.iter().copied())).unwrap()
}

#[test]
fn defaults_without_flags() {
    let a = args(&[]);
    assert_eq!(a.tick_ms, TICK_MS);
    assert_eq!(a.best_file.to_str(), Some("blockfall-best.json"));
    assert_eq!(load_config(&a).unwrap(), GameConfig::default());
}

#[test]
fn flags_override_fields() {
    let a = args(&[
        "--width",
        "12",
        "--step-delay-ms",
        "250",
        "--score-per-line",
        "10",
        "--seed",
        "42",
    ]);
    let config = load_config(&a).unwrap();
    assert_eq!(config.width, 12);
    assert_eq!(config.step_delay_ms, 250);
    assert_eq!(config.score_per_line, 10);
    assert_eq!(config.height, 20);
    assert_eq!(a.seed_or_clock(), 42);
}

#[test]
fn partial_json_keeps_defaults() {
    let config = parse_config(r#"{"lock_delay_ms": 300, "spawn": {"x": 0, "y": 7}}"#).unwrap();
    assert_eq!(config.lock_delay_ms, 300);
    assert_eq!(config.spawn, Pos::new(0, 7));
    assert_eq!(config.width, 10);
    assert_eq!(config.preview, Pos::new(8, 6));
}

#[test]
fn config_file_then_flags() {
    let dir = std::env::temp_dir().join(format!("blockfall-settings-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.json");
    fs::write(&path, r#"{"width": 14, "step_delay_ms": 800}"#).unwrap();

    let a = args(&["--config", path.to_str().unwrap(), "--step-delay-ms", "600"]);
    let config = load_config(&a).unwrap();
    assert_eq!(config.width, 14);
    assert_eq!(config.step_delay_ms, 600);
}

#[test]
fn invalid_values_are_rejected() {
    assert!(load_config(&args(&["--lock-delay-ms", "0"])).is_err());
    assert!(load_config(&args(&["--tick-ms", "0"])).is_err());
    // Spawn row 8 is off a 4-row board.
    assert!(load_config(&args(&["--height", "4"])).is_err());
    assert!(parse_config("{").is_err());
}

#[test]
fn missing_config_file_is_an_error() {
    let a = args(&["--config", "/nonexistent/blockfall/config.json"]);
    let err = load_config(&a).unwrap_err();
    assert!(format!("{:#}", err).contains("failed to read"));
}
