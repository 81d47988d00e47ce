//! Ghost projection - where the active piece would land on a hard drop.

use crate::grid::Grid;
use crate::piece::Piece;
use crate::pieces::PieceShape;
use crate::types::Pos;

/// Cached landing position of the active piece. Holds no game state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ghost {
    cells: PieceShape,
    position: Pos,
}

impl Ghost {
    /// Recompute the projection for `piece`.
    ///
    /// `grid` must not contain the piece's own cells, otherwise the projection
    /// collides with the piece itself. The grid is only read.
    pub fn project(&mut self, grid: &Grid, piece: &Piece) {
        let cells = *piece.cells();
        let start = piece.position();
        let bottom = grid.y_min() - 1;

        let mut landing = start;
        for row in (bottom..=start.y).rev() {
            let candidate = Pos::new(start.x, row);
            if !grid.is_valid_position(&cells, candidate) {
                break;
            }
            landing = candidate;
        }

        self.cells = cells;
        self.position = landing;
    }

    pub fn position(&self) -> Pos {
        self.position
    }

    /// Board coordinates of the projected cells.
    pub fn world_cells(&self) -> [Pos; 4] {
        self.cells.map(|cell| cell + self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_ghost_lands_on_floor() {
        let grid = Grid::new(10, 20);
        let piece = Piece::new(PieceKind::O, Pos::new(-1, 8));
        let mut ghost = Ghost::default();
        ghost.project(&grid, &piece);
        assert_eq!(ghost.position(), Pos::new(-1, -10));
    }

    #[test]
    fn test_ghost_stops_on_stack() {
        let mut grid = Grid::new(10, 20);
        grid.occupy(Pos::new(0, -3), PieceKind::Z);
        let piece = Piece::new(PieceKind::O, Pos::new(-1, 8));
        let mut ghost = Ghost::default();
        ghost.project(&grid, &piece);
        // O covers x = -1..=0, rows y and y + 1
        assert_eq!(ghost.position(), Pos::new(-1, -2));
        assert!(ghost
            .world_cells()
            .iter()
            .all(|&p| grid.contains(p) && !grid.is_occupied(p)));
    }

    #[test]
    fn test_ghost_never_writes_grid() {
        let grid = Grid::new(10, 20);
        let before = grid.clone();
        let piece = Piece::new(PieceKind::I, Pos::new(-1, 8));
        let mut ghost = Ghost::default();
        ghost.project(&grid, &piece);
        assert_eq!(grid, before);
    }
}
