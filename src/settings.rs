//! Command-line settings and game configuration loading.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{ensure, Context, Result};
use clap::Parser;

use crate::core::validate_config;
use crate::types::{GameConfig, TICK_MS};

#[derive(Parser, Debug, Clone)]
#[command(name = "blockfall", version, about = "Falling-block puzzle game for the terminal")]
pub struct Args {
    /// JSON file with a full or partial game configuration.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Piece RNG seed. If omitted, the clock is used.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Where the best score is kept.
    #[arg(long, value_name = "FILE", default_value = "blockfall-best.json")]
    pub best_file: PathBuf,

    /// Frame length in milliseconds.
    #[arg(long, default_value_t = TICK_MS)]
    pub tick_ms: u32,

    // ---------------- config overrides ----------------
    #[arg(long)]
    pub width: Option<u16>,

    #[arg(long)]
    pub height: Option<u16>,

    /// Gravity interval.
    #[arg(long, value_name = "ms")]
    pub step_delay_ms: Option<u32>,

    /// Grace period before a resting piece locks.
    #[arg(long, value_name = "ms")]
    pub lock_delay_ms: Option<u32>,

    #[arg(long)]
    pub score_per_line: Option<u32>,
}

impl Args {
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}

/// Parse a configuration file. Missing fields take their defaults.
pub fn parse_config(text: &str) -> Result<GameConfig> {
    serde_json::from_str(text).context("invalid configuration JSON")
}

/// Build the game configuration: defaults, then `--config`, then per-field flags.
pub fn load_config(args: &Args) -> Result<GameConfig> {
    ensure!(args.tick_ms > 0, "--tick-ms must be greater than zero");

    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            parse_config(&text).with_context(|| format!("in {}", path.display()))?
        }
        None => GameConfig::default(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(ms) = args.step_delay_ms {
        config.step_delay_ms = ms;
    }
    if let Some(ms) = args.lock_delay_ms {
        config.lock_delay_ms = ms;
    }
    if let Some(points) = args.score_per_line {
        config.score_per_line = points;
    }

    validate_config(&config).context("invalid game configuration")?;
    Ok(config)
}
