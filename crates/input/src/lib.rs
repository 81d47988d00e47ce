//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::GameAction`] and buffers one action per
//! key-down edge until the next tick.

pub mod edges;
pub mod map;

pub use blockfall_types as types;

pub use edges::{KeyEdges, MAX_PENDING_ACTIONS};
pub use map::{handle_key_event, should_quit};
