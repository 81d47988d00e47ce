//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the falling-block simulation: the grid, the piece
//! catalog, the active piece state machine and the board controller. It has
//! no dependencies on terminals, files or clocks:
//!
//! - **Deterministic**: the RNG is injected, so a seed replays a game exactly
//! - **Frame-driven**: the caller passes elapsed milliseconds and the input
//!   actions of the frame to [`GameState::tick`]
//! - **Closed**: illegal moves are rejected without touching state, and a
//!   blocked spawn is the game-over signal, not an error
//!
//! # Module Structure
//!
//! - [`grid`]: bounded board, occupancy queries, row clearing and compaction
//! - [`pieces`]: the seven tetrominoes, rotation and wall kick tables
//! - [`piece`]: the falling piece (move, rotate, gravity step, hard drop)
//! - [`ghost`]: hard-drop landing projection
//! - [`game_state`]: spawning, locking, scoring, game over and restart
//! - [`rng`]: seeded uniform piece selection
//! - [`store`]: best-score persistence port
//! - [`snapshot`]: read-only render view
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::with_seed(12345);
//!
//! game.tick(16, &[GameAction::MoveRight, GameAction::RotateCw]);
//! let snap = game.tick(16, &[GameAction::HardDrop]);
//!
//! // The dropped piece is on the board and a new one is falling.
//! assert_eq!(snap.occupied().count(), 8);
//! ```

pub mod game_state;
pub mod ghost;
pub mod grid;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod snapshot;
pub mod store;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use game_state::{validate_config, GameEvent, GameState};
pub use ghost::Ghost;
pub use grid::Grid;
pub use piece::Piece;
pub use pieces::{get_shape, rotate_cells, wrap, RotationClass, Tetromino};
pub use rng::{random_kind, PieceRng, SimpleRng};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use store::{MemoryScoreStore, ScoreStore};
