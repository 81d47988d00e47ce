//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! They are plain data with no game logic, so the core, the terminal front end
//! and the binary can all agree on them.
//!
//! # Board coordinates
//!
//! The board is a `width x height` rectangle centred on the origin:
//!
//! - `x` ranges over `[-(width / 2), -(width / 2) + width)`, left to right
//! - `y` ranges over `[-(height / 2), -(height / 2) + height)`, bottom to top
//!
//! With the default 10x20 board that is `x in -5..5` and `y in -10..10`.
//! Gravity moves pieces toward negative `y`.
//!
//! # Timing
//!
//! All durations are whole milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval of the terminal loop (~60 FPS) |
//! | `STEP_DELAY_MS` | 1000 | Time between gravity steps |
//! | `LOCK_DELAY_MS` | 500 | Grace period before a resting piece locks |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, GameConfig, PieceKind, Pos};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.tile_id(), 6);
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! let config = GameConfig::default();
//! assert_eq!(config.spawn, Pos::new(-1, 8));
//! assert!(config.validate().is_ok());
//! ```

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Default board width in cells.
pub const BOARD_WIDTH: u16 = 10;

/// Default board height in cells.
pub const BOARD_HEIGHT: u16 = 20;

/// Largest accepted board side. Keeps board arithmetic and the 2-column
/// terminal layout (`2 * width + 2`) well inside `u16`.
pub const MAX_BOARD_SIDE: u16 = 1000;

/// Frame interval used by the terminal loop (16ms ≈ 60 FPS).
pub const TICK_MS: u32 = 16;

/// Default time between forced downward moves.
pub const STEP_DELAY_MS: u32 = 1000;

/// Default grace period before a piece that stopped moving locks.
pub const LOCK_DELAY_MS: u32 = 500;

/// Default reward for each cleared row.
pub const SCORE_PER_LINE: u32 = 100;

/// Default spawn coordinate of new pieces.
pub const SPAWN_POSITION: Pos = Pos::new(-1, 8);

/// Default anchor of the next-piece preview (outside the board, to the right).
pub const PREVIEW_POSITION: Pos = Pos::new(8, 6);

/// Integer cell coordinate (or offset) on the board plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl Add for Pos {
    type Output = Pos;

    fn add(self, rhs: Pos) -> Pos {
        Pos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every kind, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Position in [`PieceKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::J => 1,
            PieceKind::L => 2,
            PieceKind::O => 3,
            PieceKind::S => 4,
            PieceKind::T => 5,
            PieceKind::Z => 6,
        }
    }

    /// Compact tile id used by snapshots (0 is reserved for empty).
    pub fn tile_id(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Inverse of [`PieceKind::tile_id`].
    pub fn from_tile_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

/// Discrete input events, one per key-down edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    Restart,
}

impl GameAction {
    /// Parse action from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Restart => "restart",
        }
    }
}

/// Cell on the board (None = empty, Some = filled with piece kind)
pub type Cell = Option<PieceKind>;

/// Session parameters. Fixed for the lifetime of a game; they tune the
/// simulation without changing its rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    pub spawn: Pos,
    pub preview: Pos,
    pub step_delay_ms: u32,
    pub lock_delay_ms: u32,
    pub score_per_line: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            spawn: SPAWN_POSITION,
            preview: PREVIEW_POSITION,
            step_delay_ms: STEP_DELAY_MS,
            lock_delay_ms: LOCK_DELAY_MS,
            score_per_line: SCORE_PER_LINE,
        }
    }
}

impl GameConfig {
    /// Leftmost column.
    pub fn x_min(&self) -> i32 {
        -(self.width as i32 / 2)
    }

    /// Bottom row.
    pub fn y_min(&self) -> i32 {
        -(self.height as i32 / 2)
    }

    /// Check the scalar parameters.
    ///
    /// Whether every piece shape fits at `spawn` depends on the piece catalog
    /// and is checked by the core when a game is created.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyBoard {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > MAX_BOARD_SIDE || self.height > MAX_BOARD_SIDE {
            return Err(ConfigError::BoardTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if self.step_delay_ms == 0 {
            return Err(ConfigError::ZeroDelay("step_delay_ms"));
        }
        if self.lock_delay_ms == 0 {
            return Err(ConfigError::ZeroDelay("lock_delay_ms"));
        }
        Ok(())
    }
}

/// Rejected [`GameConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyBoard { width: u16, height: u16 },
    BoardTooLarge { width: u16, height: u16 },
    ZeroDelay(&'static str),
    SpawnOutOfBounds { kind: PieceKind, spawn: Pos },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyBoard { width, height } => {
                write!(f, "board must be at least 1x1, got {}x{}", width, height)
            }
            ConfigError::BoardTooLarge { width, height } => write!(
                f,
                "board must be at most {}x{}, got {}x{}",
                MAX_BOARD_SIDE, MAX_BOARD_SIDE, width, height
            ),
            ConfigError::ZeroDelay(field) => write!(f, "{} must be greater than zero", field),
            ConfigError::SpawnOutOfBounds { kind, spawn } => write!(
                f,
                "piece {} does not fit on an empty board at spawn {}",
                kind.as_str(),
                spawn
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
