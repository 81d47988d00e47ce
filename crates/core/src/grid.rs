//! Grid module - authoritative cell occupancy
//!
//! The grid is a `width x height` rectangle centred on the origin (see
//! [`crate::types`]). Cells are stored in a flat vector, row-major, bottom row
//! first, so compacting rows is a single `copy_within`.

use crate::types::{Cell, PieceKind, Pos};

/// The game grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: i32,
    height: i32,
    x_min: i32,
    y_min: i32,
    /// Flat array of cells, row-major order ((y - y_min) * width + (x - x_min))
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid.
    pub fn new(width: u16, height: u16) -> Self {
        let len = width as usize * height as usize;
        let width = width as i32;
        let height = height as i32;
        Self {
            width,
            height,
            x_min: -(width / 2),
            y_min: -(height / 2),
            cells: vec![None; len],
        }
    }

    #[inline(always)]
    fn index(&self, pos: Pos) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        Some(((pos.y - self.y_min) * self.width + (pos.x - self.x_min)) as usize)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn x_min(&self) -> i32 {
        self.x_min
    }

    /// One past the rightmost column.
    pub fn x_max(&self) -> i32 {
        self.x_min + self.width
    }

    pub fn y_min(&self) -> i32 {
        self.y_min
    }

    /// One past the top row.
    pub fn y_max(&self) -> i32 {
        self.y_min + self.height
    }

    /// True iff `pos` lies inside the board rectangle.
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= self.x_min
            && pos.x < self.x_max()
            && pos.y >= self.y_min
            && pos.y < self.y_max()
    }

    /// Get cell at `pos`. Returns None if out of bounds.
    pub fn get(&self, pos: Pos) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// True iff a piece identity is recorded at `pos`. Out of bounds is never occupied.
    pub fn is_occupied(&self, pos: Pos) -> bool {
        matches!(self.get(pos), Some(Some(_)))
    }

    /// Record `kind` at `pos`. Returns false if out of bounds.
    pub fn occupy(&mut self, pos: Pos, kind: PieceKind) -> bool {
        self.set(pos, Some(kind))
    }

    /// Empty the cell at `pos`. Returns false if out of bounds.
    pub fn clear_cell(&mut self, pos: Pos) -> bool {
        self.set(pos, None)
    }

    fn set(&mut self, pos: Pos, cell: Cell) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if every cell of `shape` translated by `position` is inside the
    /// board and empty. Bounds are checked before occupancy.
    pub fn is_valid_position(&self, shape: &[Pos], position: Pos) -> bool {
        shape.iter().all(|&cell| {
            let p = cell + position;
            self.contains(p) && !self.is_occupied(p)
        })
    }

    /// Write the cells of a piece. Cells outside the board are skipped.
    pub fn set_piece(&mut self, shape: &[Pos], position: Pos, kind: PieceKind) {
        for &cell in shape {
            self.occupy(cell + position, kind);
        }
    }

    /// Erase the cells of a piece. Cells outside the board are skipped.
    pub fn clear_piece(&mut self, shape: &[Pos], position: Pos) {
        for &cell in shape {
            self.clear_cell(cell + position);
        }
    }

    /// Check if a row is completely filled. Rows outside the board never are,
    /// and neither are the empty rows of a zero-width grid.
    pub fn is_row_full(&self, row: i32) -> bool {
        if self.width == 0 || row < self.y_min || row >= self.y_max() {
            return false;
        }
        let start = ((row - self.y_min) * self.width) as usize;
        let end = start + self.width as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Clear every full row, bottom to top, and compact the rows above.
    ///
    /// After a row is removed the same row index is tested again, since the
    /// row that slid into it may be full too. Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        let mut row = self.y_min;

        while row < self.y_max() {
            if self.is_row_full(row) {
                self.collapse_row(row);
                cleared += 1;
            } else {
                row += 1;
            }
        }

        cleared
    }

    /// Remove `row` and shift every row above it down by one. The top row becomes empty.
    fn collapse_row(&mut self, row: i32) {
        let width = self.width as usize;
        let start = ((row - self.y_min) as usize) * width;

        // copy_within handles the overlapping ranges
        self.cells.copy_within(start + width.., start);

        let top = self.cells.len() - width;
        self.cells[top..].fill(None);
    }

    /// Iterate occupied cells as `(position, kind)` pairs, bottom row first.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (Pos, PieceKind)> + '_ {
        let width = self.width;
        let (x_min, y_min) = (self.x_min, self.y_min);
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            let i = i as i32;
            cell.map(|kind| (Pos::new(x_min + i % width, y_min + i / width), kind))
        })
    }

    /// Empty the whole grid.
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(grid: &mut Grid, row: i32, kind: PieceKind) {
        for x in grid.x_min()..grid.x_max() {
            grid.occupy(Pos::new(x, row), kind);
        }
    }

    #[test]
    fn test_grid_bounds_are_centred() {
        let grid = Grid::new(10, 20);
        assert_eq!((grid.x_min(), grid.x_max()), (-5, 5));
        assert_eq!((grid.y_min(), grid.y_max()), (-10, 10));

        assert!(grid.contains(Pos::new(-5, -10)));
        assert!(grid.contains(Pos::new(4, 9)));
        assert!(!grid.contains(Pos::new(5, 0)));
        assert!(!grid.contains(Pos::new(0, 10)));
        assert!(!grid.contains(Pos::new(-6, 0)));
        assert!(!grid.contains(Pos::new(0, -11)));
    }

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(10, 20);
        assert_eq!(grid.index(Pos::new(-5, -10)), Some(0));
        assert_eq!(grid.index(Pos::new(4, -10)), Some(9));
        assert_eq!(grid.index(Pos::new(-5, -9)), Some(10));
        assert_eq!(grid.index(Pos::new(4, 9)), Some(199));
        assert_eq!(grid.index(Pos::new(5, 9)), None);
    }

    #[test]
    fn test_out_of_bounds_queries_do_not_panic() {
        let mut grid = Grid::new(10, 20);
        assert!(!grid.is_occupied(Pos::new(100, -100)));
        assert!(!grid.occupy(Pos::new(-6, 0), PieceKind::T));
        assert!(!grid.clear_cell(Pos::new(0, 20)));
        assert_eq!(grid.get(Pos::new(0, 20)), None);
        assert!(!grid.is_row_full(10));
    }

    #[test]
    fn test_collapse_row_moves_upper_rows_down() {
        let mut grid = Grid::new(4, 4);
        fill_row(&mut grid, -2, PieceKind::I);
        grid.occupy(Pos::new(0, -1), PieceKind::T);
        grid.occupy(Pos::new(1, 1), PieceKind::Z);

        assert_eq!(grid.clear_full_rows(), 1);
        assert_eq!(grid.get(Pos::new(0, -2)), Some(Some(PieceKind::T)));
        assert_eq!(grid.get(Pos::new(1, 0)), Some(Some(PieceKind::Z)));
        assert_eq!(grid.get(Pos::new(1, 1)), Some(None));
        assert_eq!(grid.occupied_cells().count(), 2);
    }

    #[test]
    fn test_clear_full_rows_on_completely_full_board() {
        let mut grid = Grid::new(3, 3);
        for row in grid.y_min()..grid.y_max() {
            fill_row(&mut grid, row, PieceKind::O);
        }
        assert_eq!(grid.clear_full_rows(), 3);
        assert_eq!(grid.occupied_cells().count(), 0);
    }

    #[test]
    fn test_zero_width_grid_has_no_full_rows() {
        let mut grid = Grid::new(0, 4);
        assert!(!grid.is_row_full(0));
        assert_eq!(grid.clear_full_rows(), 0);
    }

    #[test]
    fn test_largest_board_indexes_its_corners() {
        let mut grid = Grid::new(1000, 1000);
        assert!(grid.occupy(Pos::new(499, 499), PieceKind::L));
        assert!(grid.occupy(Pos::new(-500, -500), PieceKind::J));
        assert_eq!(grid.occupied_cells().count(), 2);
    }

    #[test]
    fn test_occupied_cells_reports_world_positions() {
        let mut grid = Grid::new(10, 20);
        grid.occupy(Pos::new(-5, -10), PieceKind::L);
        grid.occupy(Pos::new(4, 9), PieceKind::S);

        let cells: Vec<_> = grid.occupied_cells().collect();
        assert_eq!(
            cells,
            vec![
                (Pos::new(-5, -10), PieceKind::L),
                (Pos::new(4, 9), PieceKind::S)
            ]
        );
    }
}
