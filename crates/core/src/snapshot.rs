//! Read-only view of a game for renderers.
//!
//! The snapshot is derived from the grid after every tick; nothing reads it
//! back for collision checks.

use crate::piece::Piece;
use crate::types::{PieceKind, Pos};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: u8,
    pub position: Pos,
    pub cells: [Pos; 4],
}

impl From<&Piece> for ActiveSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            kind: value.kind(),
            rotation: value.rotation(),
            position: value.position(),
            cells: value.world_cells(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    pub x_min: i32,
    pub y_min: i32,
    /// Tile ids (0 = empty), row-major, top row first. Includes the active piece.
    pub board: Vec<u8>,
    pub active: Option<ActiveSnapshot>,
    /// Landing cells of the active piece.
    pub ghost: Option<[Pos; 4]>,
    pub next: Option<PieceKind>,
    /// Preview cells, anchored at the configured preview coordinate.
    pub next_cells: [Pos; 4],
    pub score: u32,
    pub best: u32,
    pub episode: u32,
}

impl GameSnapshot {
    /// Resize the board buffer, keeping the allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16, x_min: i32, y_min: i32) {
        self.width = width;
        self.height = height;
        self.x_min = x_min;
        self.y_min = y_min;
        self.board.clear();
        self.board.resize(width as usize * height as usize, 0);
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        let col = pos.x - self.x_min;
        let row_from_top = self.y_min + self.height as i32 - 1 - pos.y;
        if col < 0
            || col >= self.width as i32
            || row_from_top < 0
            || row_from_top >= self.height as i32
        {
            return None;
        }
        Some(row_from_top as usize * self.width as usize + col as usize)
    }

    /// Piece occupying `pos`, if any.
    pub fn cell(&self, pos: Pos) -> Option<PieceKind> {
        self.index(pos)
            .and_then(|idx| PieceKind::from_tile_id(self.board[idx]))
    }

    pub(crate) fn set_cell(&mut self, pos: Pos, kind: PieceKind) {
        if let Some(idx) = self.index(pos) {
            self.board[idx] = kind.tile_id();
        }
    }

    /// All occupied board cells as `(position, kind)`, top row first.
    pub fn occupied(&self) -> impl Iterator<Item = (Pos, PieceKind)> + '_ {
        let width = self.width as i32;
        let top = self.y_min + self.height as i32 - 1;
        let x_min = self.x_min;
        self.board.iter().enumerate().filter_map(move |(i, &id)| {
            let i = i as i32;
            PieceKind::from_tile_id(id)
                .map(|kind| (Pos::new(x_min + i % width, top - i / width), kind))
        })
    }

    /// Convert a board position into `(column, row_from_top)` for drawing.
    pub fn screen_cell(&self, pos: Pos) -> Option<(u16, u16)> {
        self.index(pos).map(|idx| {
            let w = self.width as usize;
            ((idx % w) as u16, (idx / w) as u16)
        })
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            x_min: 0,
            y_min: 0,
            board: Vec::new(),
            active: None,
            ghost: None,
            next: None,
            next_cells: [Pos::default(); 4],
            score: 0,
            best: 0,
            episode: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_rows_are_top_first() {
        let mut snap = GameSnapshot::default();
        snap.resize(10, 20, -5, -10);
        snap.set_cell(Pos::new(-5, 9), PieceKind::I);
        snap.set_cell(Pos::new(4, -10), PieceKind::Z);

        assert_eq!(snap.board[0], PieceKind::I.tile_id());
        assert_eq!(snap.board[199], PieceKind::Z.tile_id());
        assert_eq!(snap.screen_cell(Pos::new(4, -10)), Some((9, 19)));
        assert_eq!(snap.screen_cell(Pos::new(5, 0)), None);

        let cells: Vec<_> = snap.occupied().collect();
        assert_eq!(
            cells,
            vec![
                (Pos::new(-5, 9), PieceKind::I),
                (Pos::new(4, -10), PieceKind::Z)
            ]
        );
    }
}
