//! Property tests for the simulation invariants.
//!
//! Generated seeds and action scripts drive full games. After every tick:
//! - every active and ghost cell is inside the board
//! - the active piece never overlaps a locked cell
//! - the ghost sits at or below the active piece and is a legal position
//! - within one session the score never decreases; the best score never does
//! - the snapshot agrees with the grid

use proptest::prelude::*;

use blockfall::core::{get_shape, rotate_cells, GameState, Grid, Piece, Tetromino};
use blockfall::types::{GameAction, PieceKind, Pos};

const ACTIONS: [GameAction; 6] = [
    GameAction::MoveLeft,
    GameAction::MoveRight,
    GameAction::SoftDrop,
    GameAction::HardDrop,
    GameAction::RotateCw,
    GameAction::RotateCcw,
];

fn frame_strategy() -> impl Strategy<Value = (u32, Vec<GameAction>)> {
    (
        0u32..400,
        prop::collection::vec(prop::sample::select(ACTIONS.to_vec()), 0..4),
    )
}

/// Grid with the active piece lifted out.
fn locked_cells(grid: &Grid, piece: &Piece) -> Grid {
    let mut locked = grid.clone();
    locked.clear_piece(piece.cells(), piece.position());
    locked
}

proptest! {
    #[test]
    fn generated_games_respect_core_invariants(
        seed in any::<u32>(),
        frames in prop::collection::vec(frame_strategy(), 1..300),
    ) {
        let mut game = GameState::with_seed(seed);
        let mut last_score = 0;
        let mut last_best = 0;
        let mut last_episode = 0;

        for (elapsed, actions) in &frames {
            game.tick(*elapsed, actions);

            let active = *game.active();
            let locked = locked_cells(game.grid(), &active);
            prop_assert!(locked.is_valid_position(active.cells(), active.position()));
            for cell in active.world_cells() {
                prop_assert_eq!(game.grid().get(cell), Some(Some(active.kind())));
            }

            let ghost = game.ghost();
            prop_assert!(locked.is_valid_position(active.cells(), ghost.position()));
            prop_assert_eq!(ghost.position().x, active.position().x);
            prop_assert!(ghost.position().y <= active.position().y);
            // One more row down would collide.
            prop_assert!(!locked.is_valid_position(active.cells(), ghost.position().offset(0, -1)));

            if game.episode() == last_episode {
                prop_assert!(game.score() >= last_score);
            } else {
                prop_assert!(game.episode() > last_episode);
            }
            prop_assert!(game.best_score() >= last_best);
            last_score = game.score();
            last_best = game.best_score();
            last_episode = game.episode();

            let snap = game.snapshot();
            prop_assert_eq!(snap.occupied().count(), game.grid().occupied_cells().count());
            prop_assert_eq!(snap.score, game.score());
        }
    }

    #[test]
    fn rotation_round_trips_for_any_sequence(
        kind_idx in 0usize..7,
        turns in prop::collection::vec(prop::bool::ANY, 0..12),
    ) {
        let kind = PieceKind::ALL[kind_idx];
        let class = Tetromino::of(kind).rotation_class;
        let mut cells = get_shape(kind);
        for &cw in &turns {
            cells = rotate_cells(&cells, class, if cw { 1 } else { -1 });
        }
        for &cw in turns.iter().rev() {
            cells = rotate_cells(&cells, class, if cw { -1 } else { 1 });
        }
        prop_assert_eq!(cells, get_shape(kind));
    }

    #[test]
    fn rejected_moves_leave_piece_untouched(
        x in -5i32..5,
        y in -10i32..10,
        dx in -2i32..=2,
        dy in -2i32..=2,
        kind_idx in 0usize..7,
    ) {
        let grid = Grid::new(10, 20);
        let mut piece = Piece::new(PieceKind::ALL[kind_idx], Pos::new(x, y));
        let before = piece;
        if !piece.try_move(&grid, dx, dy) {
            prop_assert_eq!(piece, before);
        } else {
            prop_assert!(grid.is_valid_position(piece.cells(), piece.position()));
        }
    }
}
