//! Key-down edge collection.
//!
//! The simulation takes one action per key press. Auto-repeat and release
//! events are dropped here, and the presses seen between two ticks are
//! buffered so the next tick receives them in arrival order.

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::handle_key_event;
use crate::types::GameAction;

/// Most presses kept between two ticks; extras in the same frame are dropped.
pub const MAX_PENDING_ACTIONS: usize = 16;

/// Buffers the actions of one frame.
#[derive(Debug, Clone, Default)]
pub struct KeyEdges {
    pending: ArrayVec<GameAction, MAX_PENDING_ACTIONS>,
}

impl KeyEdges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key event. Returns the action when it was accepted.
    pub fn handle(&mut self, key: KeyEvent) -> Option<GameAction> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let action = handle_key_event(key)?;
        self.pending.try_push(action).ok()?;
        Some(action)
    }

    /// Actions received since the last [`KeyEdges::clear`].
    pub fn pending(&self) -> &[GameAction] {
        &self.pending
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
