//! Active piece state machine
//!
//! A [`Piece`] owns the falling piece's offsets, position, rotation index and
//! its two timers. Every transition checks the grid before touching any state,
//! so a rejected move or rotation leaves the piece exactly as it was.
//!
//! The grid passed to these methods must not contain the piece's own cells;
//! [`crate::GameState`] lifts the piece out of the grid for the duration of a tick.

use crate::grid::Grid;
use crate::pieces::{rotate_cells, wall_kick_index, wrap, PieceShape, Tetromino};
use crate::types::{PieceKind, Pos};

/// The falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    cells: PieceShape,
    position: Pos,
    rotation: u8,
    /// Milliseconds until the next gravity step. 0 means due.
    step_timer_ms: u32,
    /// Milliseconds since the last successful move.
    lock_timer_ms: u32,
}

impl Piece {
    /// A fresh piece in its default orientation. The first gravity step is due immediately.
    pub fn new(kind: PieceKind, position: Pos) -> Self {
        Self {
            kind,
            cells: Tetromino::of(kind).cells,
            position,
            rotation: 0,
            step_timer_ms: 0,
            lock_timer_ms: 0,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Current offsets, relative to [`Piece::position`].
    pub fn cells(&self) -> &PieceShape {
        &self.cells
    }

    pub fn position(&self) -> Pos {
        self.position
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    pub fn step_timer_ms(&self) -> u32 {
        self.step_timer_ms
    }

    pub fn lock_timer_ms(&self) -> u32 {
        self.lock_timer_ms
    }

    /// Board coordinates of the four cells.
    pub fn world_cells(&self) -> [Pos; 4] {
        self.cells.map(|cell| cell + self.position)
    }

    /// Advance both timers by one frame.
    pub fn advance(&mut self, elapsed_ms: u32) {
        self.lock_timer_ms = self.lock_timer_ms.saturating_add(elapsed_ms);
        self.step_timer_ms = self.step_timer_ms.saturating_sub(elapsed_ms);
    }

    pub fn step_due(&self) -> bool {
        self.step_timer_ms == 0
    }

    pub fn lock_due(&self, lock_delay_ms: u32) -> bool {
        self.lock_timer_ms >= lock_delay_ms
    }

    /// Translate by `(dx, dy)` if the target is legal. A successful move resets the lock timer.
    pub fn try_move(&mut self, grid: &Grid, dx: i32, dy: i32) -> bool {
        let target = self.position.offset(dx, dy);
        if !grid.is_valid_position(&self.cells, target) {
            return false;
        }
        self.position = target;
        self.lock_timer_ms = 0;
        true
    }

    /// Rotate a quarter turn (`+1` clockwise, `-1` counter-clockwise), trying
    /// each wall kick in order. On failure the rotation index and offsets are
    /// restored exactly.
    pub fn rotate(&mut self, grid: &Grid, direction: i32) -> bool {
        let tetromino = Tetromino::of(self.kind);
        let original_rotation = self.rotation;

        self.rotation = wrap(self.rotation as i32 + direction, 0, 4) as u8;
        self.cells = rotate_cells(&self.cells, tetromino.rotation_class, direction);

        if self.test_wall_kicks(grid, direction) {
            return true;
        }

        self.rotation = original_rotation;
        self.cells = rotate_cells(&self.cells, tetromino.rotation_class, -direction);
        false
    }

    fn test_wall_kicks(&mut self, grid: &Grid, direction: i32) -> bool {
        let kicks = Tetromino::of(self.kind).wall_kicks;
        let row = &kicks[wall_kick_index(self.rotation, direction, kicks.len())];
        row.iter().any(|&(dx, dy)| self.try_move(grid, dx, dy))
    }

    /// Gravity step: try to fall one row and re-arm the step timer.
    ///
    /// Returns true when the lock delay has run out and the piece must lock.
    pub fn step(&mut self, grid: &Grid, step_delay_ms: u32, lock_delay_ms: u32) -> bool {
        self.step_timer_ms = step_delay_ms;
        self.try_move(grid, 0, -1);
        self.lock_due(lock_delay_ms)
    }

    /// Fall as far as possible and expire the lock delay. Returns the rows dropped.
    pub fn hard_drop(&mut self, grid: &Grid, lock_delay_ms: u32) -> u32 {
        let mut rows = 0;
        while self.try_move(grid, 0, -1) {
            rows += 1;
        }
        self.lock_timer_ms = lock_delay_ms;
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_piece_defaults() {
        let piece = Piece::new(PieceKind::T, Pos::new(-1, 8));
        assert_eq!(piece.rotation(), 0);
        assert_eq!(piece.cells(), &Tetromino::of(PieceKind::T).cells);
        assert!(piece.step_due());
        assert_eq!(piece.lock_timer_ms(), 0);
    }

    #[test]
    fn test_failed_move_keeps_lock_timer() {
        let grid = Grid::new(10, 20);
        let mut piece = Piece::new(PieceKind::O, Pos::new(0, -10));
        piece.advance(120);

        assert!(!piece.try_move(&grid, 0, -1));
        assert_eq!(piece.lock_timer_ms(), 120);
        assert_eq!(piece.position(), Pos::new(0, -10));

        assert!(piece.try_move(&grid, 1, 0));
        assert_eq!(piece.lock_timer_ms(), 0);
    }

    #[test]
    fn test_advance_saturates_step_timer() {
        let grid = Grid::new(10, 20);
        let mut piece = Piece::new(PieceKind::T, Pos::new(0, 0));
        piece.step(&grid, 1000, 500);
        assert_eq!(piece.step_timer_ms(), 1000);

        piece.advance(400);
        assert!(!piece.step_due());
        piece.advance(700);
        assert!(piece.step_due());
        assert_eq!(piece.step_timer_ms(), 0);
    }

    #[test]
    fn test_hard_drop_reports_distance() {
        let grid = Grid::new(10, 20);
        let mut piece = Piece::new(PieceKind::I, Pos::new(-1, 8));
        // I offsets sit on row +1, so the piece can fall to y = -11.
        assert_eq!(piece.hard_drop(&grid, 500), 19);
        assert_eq!(piece.position(), Pos::new(-1, -11));
        assert!(piece.lock_due(500));
    }
}
