//! Pieces module - Tetromino catalog, rotation and wall kick tables
//!
//! Every shape is described by four cell offsets around a pivot. Rotation is
//! computed, not tabulated: offsets go through a quarter-turn rotation matrix.
//! I and O rotate around the corner between cells, so their offsets are
//! shifted by half a cell before rotating and rounded up afterwards; the other
//! shapes rotate around a cell centre and stay integral.
//!
//! Direction `+1` is clockwise (`(x, y) -> (y, -x)` with `y` pointing up) and
//! `-1` is counter-clockwise.

use crate::types::{PieceKind, Pos};

/// Four cell offsets relative to the piece position.
pub type PieceShape = [Pos; 4];

/// Wall kick data
/// Each entry is a (dx, dy) translation to try, in order, after a rotation.
/// Rows are selected by [`wall_kick_index`].
pub type KickTable = [[(i32, i32); 5]; 8];

/// Where a shape's rotation pivot sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationClass {
    /// Pivot on the corner shared by four cells (I, O). Rounds with ceiling.
    HalfCell,
    /// Pivot on a cell centre (J, L, S, T, Z). Rotations stay integral.
    Cell,
}

/// Static definition of one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub cells: PieceShape,
    pub rotation_class: RotationClass,
    pub wall_kicks: &'static KickTable,
}

impl Tetromino {
    /// Catalog entry for `kind`.
    pub fn of(kind: PieceKind) -> &'static Tetromino {
        &TETROMINOES[kind.index()]
    }
}

/// Default (spawn) orientation of a piece kind.
pub fn get_shape(kind: PieceKind) -> PieceShape {
    Tetromino::of(kind).cells
}

const fn shape(cells: [(i32, i32); 4]) -> PieceShape {
    [
        Pos::new(cells[0].0, cells[0].1),
        Pos::new(cells[1].0, cells[1].1),
        Pos::new(cells[2].0, cells[2].1),
        Pos::new(cells[3].0, cells[3].1),
    ]
}

/// Catalog, indexed by [`PieceKind::index`].
static TETROMINOES: [Tetromino; 7] = [
    Tetromino {
        kind: PieceKind::I,
        cells: shape([(-1, 1), (0, 1), (1, 1), (2, 1)]),
        rotation_class: RotationClass::HalfCell,
        wall_kicks: &I_KICKS,
    },
    Tetromino {
        kind: PieceKind::J,
        cells: shape([(-1, 1), (-1, 0), (0, 0), (1, 0)]),
        rotation_class: RotationClass::Cell,
        wall_kicks: &JLOSTZ_KICKS,
    },
    Tetromino {
        kind: PieceKind::L,
        cells: shape([(1, 1), (-1, 0), (0, 0), (1, 0)]),
        rotation_class: RotationClass::Cell,
        wall_kicks: &JLOSTZ_KICKS,
    },
    Tetromino {
        kind: PieceKind::O,
        cells: shape([(0, 1), (1, 1), (0, 0), (1, 0)]),
        rotation_class: RotationClass::HalfCell,
        wall_kicks: &JLOSTZ_KICKS,
    },
    Tetromino {
        kind: PieceKind::S,
        cells: shape([(0, 1), (1, 1), (-1, 0), (0, 0)]),
        rotation_class: RotationClass::Cell,
        wall_kicks: &JLOSTZ_KICKS,
    },
    Tetromino {
        kind: PieceKind::T,
        cells: shape([(0, 1), (-1, 0), (0, 0), (1, 0)]),
        rotation_class: RotationClass::Cell,
        wall_kicks: &JLOSTZ_KICKS,
    },
    Tetromino {
        kind: PieceKind::Z,
        cells: shape([(-1, 1), (0, 1), (0, 0), (1, 0)]),
        rotation_class: RotationClass::Cell,
        wall_kicks: &JLOSTZ_KICKS,
    },
];

/// I piece kick table
const I_KICKS: KickTable = [
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
];

/// Kick table shared by J, L, O, S, T, Z
const JLOSTZ_KICKS: KickTable = [
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
];

/// Wrap `value` into `[min, max)`. Correct for negative inputs.
pub fn wrap(value: i32, min: i32, max: i32) -> i32 {
    min + (value - min).rem_euclid(max - min)
}

/// Kick table row for a rotation that just arrived at `rotation`.
pub fn wall_kick_index(rotation: u8, direction: i32, rows: usize) -> usize {
    let mut index = rotation as i32 * 2;
    if direction < 0 {
        index -= 1;
    }
    wrap(index, 0, rows as i32) as usize
}

/// Rotate every offset of `cells` a quarter turn in `direction` (+1 or -1).
///
/// `rotate_cells(&rotate_cells(c, class, d), class, -d) == c` for every shape.
pub fn rotate_cells(cells: &PieceShape, class: RotationClass, direction: i32) -> PieceShape {
    debug_assert!(direction == 1 || direction == -1);
    let mut out = *cells;
    for cell in out.iter_mut() {
        *cell = rotate_offset(*cell, class, direction);
    }
    out
}

fn rotate_offset(cell: Pos, class: RotationClass, direction: i32) -> Pos {
    // Rotation matrix [cos, sin; -sin, cos] at 90 degrees, scaled by direction.
    match class {
        RotationClass::Cell => Pos::new(cell.y * direction, -cell.x * direction),
        RotationClass::HalfCell => {
            // Doubled coordinates keep the half-cell shift exact.
            let x2 = 2 * cell.x - 1;
            let y2 = 2 * cell.y - 1;
            Pos::new(ceil_half(y2 * direction), ceil_half(-x2 * direction))
        }
    }
}

/// `ceil(v / 2)` for any sign.
fn ceil_half(v: i32) -> i32 {
    v.div_euclid(2) + v.rem_euclid(2)
}
