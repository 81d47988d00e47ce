//! Game state module - the board controller
//!
//! This module ties together the grid, the active piece, the ghost, the RNG
//! and the best-score store. It owns spawning, locking, line clears, scoring
//! and the game-over/restart cycle.
//!
//! Between ticks the active piece's cells are written into the grid, so the
//! grid (and the snapshot derived from it) always shows what is on screen.
//! During a tick the piece is lifted out first, so it never collides with
//! itself.

use arrayvec::ArrayVec;

use crate::ghost::Ghost;
use crate::grid::Grid;
use crate::piece::Piece;
use crate::pieces::{get_shape, PieceShape};
use crate::rng::{random_kind, PieceRng, SimpleRng};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::store::{MemoryScoreStore, ScoreStore};
use crate::types::{ConfigError, GameAction, GameConfig, PieceKind, Pos};

/// Something that happened during the last tick (consumed by observers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A piece was committed to the grid.
    Locked { kind: PieceKind, lines_cleared: u32 },
    /// A new piece could not spawn; the session was scored and restarted.
    GameOver { score: u32, best: u32 },
    /// The player restarted the session.
    Restarted { score: u32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng, S = MemoryScoreStore> {
    config: GameConfig,
    grid: Grid,
    active: Piece,
    next: PieceKind,
    ghost: Ghost,
    rng: R,
    store: S,
    score: u32,
    best: u32,
    /// Monotonic session id (increments on game over and restart).
    episode: u32,
    events: ArrayVec<GameEvent, 4>,
    snapshot: GameSnapshot,
}

impl GameState<SimpleRng, MemoryScoreStore> {
    /// Default board, seeded RNG, in-memory best score.
    pub fn with_seed(seed: u32) -> Self {
        Self::build(
            GameConfig::default(),
            SimpleRng::new(seed),
            MemoryScoreStore::new(),
        )
    }
}

impl<R: PieceRng, S: ScoreStore> GameState<R, S> {
    /// Validate `config`, read the best score from `store` and spawn the first piece.
    pub fn new(config: GameConfig, rng: R, store: S) -> Result<Self, ConfigError> {
        validate_config(&config)?;
        Ok(Self::build(config, rng, store))
    }

    fn build(config: GameConfig, mut rng: R, mut store: S) -> Self {
        let best = store.load();
        let next = random_kind(&mut rng);
        let mut state = Self {
            grid: Grid::new(config.width, config.height),
            active: Piece::new(next, config.spawn),
            next,
            ghost: Ghost::default(),
            rng,
            store,
            score: 0,
            best,
            episode: 0,
            events: ArrayVec::new(),
            snapshot: GameSnapshot::default(),
            config,
        };
        state.spawn_piece();
        state.refresh_ghost();
        state.refresh_snapshot();
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The grid, including the active piece's cells.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    pub fn ghost(&self) -> &Ghost {
        &self.ghost
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Events produced by the last tick.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Snapshot produced by the last tick.
    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    /// Check `shape` at `position` against the grid.
    ///
    /// Between ticks the grid contains the active piece, so checking the
    /// active piece itself reports a collision.
    pub fn is_valid_position(&self, shape: &PieceShape, position: Pos) -> bool {
        self.grid.is_valid_position(shape, position)
    }

    /// Advance the game by one frame.
    ///
    /// Order within a tick: lift the active piece out of the grid, advance its
    /// timers, apply `actions` in order, run gravity (or lock after a hard
    /// drop), write the piece back, then recompute the ghost and the snapshot.
    pub fn tick(&mut self, elapsed_ms: u32, actions: &[GameAction]) -> &GameSnapshot {
        self.events.clear();
        self.grid.clear_piece(self.active.cells(), self.active.position());
        self.active.advance(elapsed_ms);

        let mut hard_dropped = false;
        for &action in actions {
            match action {
                GameAction::MoveLeft => {
                    self.active.try_move(&self.grid, -1, 0);
                }
                GameAction::MoveRight => {
                    self.active.try_move(&self.grid, 1, 0);
                }
                GameAction::SoftDrop => {
                    self.active.try_move(&self.grid, 0, -1);
                }
                GameAction::RotateCw => {
                    self.active.rotate(&self.grid, 1);
                }
                GameAction::RotateCcw => {
                    self.active.rotate(&self.grid, -1);
                }
                GameAction::HardDrop => {
                    self.active.hard_drop(&self.grid, self.config.lock_delay_ms);
                    hard_dropped = true;
                    break;
                }
                GameAction::Restart => {
                    self.restart();
                    return &self.snapshot;
                }
            }
        }

        if hard_dropped {
            self.lock_piece();
        } else if self.active.step_due() {
            let lock = self.active.step(
                &self.grid,
                self.config.step_delay_ms,
                self.config.lock_delay_ms,
            );
            if lock {
                self.lock_piece();
            }
        }

        self.grid
            .set_piece(self.active.cells(), self.active.position(), self.active.kind());
        self.refresh_ghost();
        self.refresh_snapshot();
        &self.snapshot
    }

    /// Make the upcoming piece current and draw a new upcoming piece.
    ///
    /// Returns false when the new piece does not fit, which ends the game
    /// (the session is scored and restarted before this returns).
    pub(crate) fn spawn_piece(&mut self) -> bool {
        self.active = Piece::new(self.next, self.config.spawn);
        self.next = random_kind(&mut self.rng);

        if !self.grid.is_valid_position(self.active.cells(), self.active.position()) {
            self.game_over();
            return false;
        }

        self.grid
            .set_piece(self.active.cells(), self.active.position(), self.active.kind());
        true
    }

    /// Commit the active piece, clear full rows, award score and spawn the next piece.
    fn lock_piece(&mut self) {
        let kind = self.active.kind();
        self.grid
            .set_piece(self.active.cells(), self.active.position(), kind);

        let lines_cleared = self.grid.clear_full_rows();
        self.score = self
            .score
            .saturating_add(lines_cleared.saturating_mul(self.config.score_per_line));
        self.push_event(GameEvent::Locked {
            kind,
            lines_cleared,
        });

        self.spawn_piece();
    }

    fn game_over(&mut self) {
        let score = self.score;
        if score > self.best {
            self.best = score;
            self.store.save(score);
        }
        self.push_event(GameEvent::GameOver {
            score,
            best: self.best,
        });
        self.reset_session();
    }

    /// Start a new session without recording the current score.
    pub fn restart(&mut self) {
        self.events.clear();
        self.push_event(GameEvent::Restarted { score: self.score });
        self.reset_session();
        self.refresh_ghost();
        self.refresh_snapshot();
    }

    fn reset_session(&mut self) {
        self.grid.reset();
        self.score = 0;
        self.episode = self.episode.wrapping_add(1);
        self.next = random_kind(&mut self.rng);
        // A validated config always fits on an empty grid, so this cannot recurse again.
        self.spawn_piece();
    }

    fn push_event(&mut self, event: GameEvent) {
        let _ = self.events.try_push(event);
    }

    fn refresh_ghost(&mut self) {
        self.grid.clear_piece(self.active.cells(), self.active.position());
        self.ghost.project(&self.grid, &self.active);
        self.grid
            .set_piece(self.active.cells(), self.active.position(), self.active.kind());
    }

    fn refresh_snapshot(&mut self) {
        let mut snap = std::mem::take(&mut self.snapshot);
        self.snapshot_into(&mut snap);
        self.snapshot = snap;
    }

    /// Write the current state into an existing snapshot, reusing its allocation.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.resize(
            self.config.width,
            self.config.height,
            self.grid.x_min(),
            self.grid.y_min(),
        );
        for (pos, kind) in self.grid.occupied_cells() {
            out.set_cell(pos, kind);
        }

        out.active = Some(ActiveSnapshot::from(&self.active));
        out.ghost = Some(self.ghost.world_cells());
        out.next = Some(self.next);
        out.next_cells = get_shape(self.next).map(|cell| cell + self.config.preview);
        out.score = self.score;
        out.best = self.best;
        out.episode = self.episode;
    }
}

/// Full config check: scalar fields plus every shape fitting at the spawn point.
pub fn validate_config(config: &GameConfig) -> Result<(), ConfigError> {
    config.validate()?;
    let grid = Grid::new(config.width, config.height);
    for kind in PieceKind::ALL {
        if !grid.is_valid_position(&get_shape(kind), config.spawn) {
            return Err(ConfigError::SpawnOutOfBounds {
                kind,
                spawn: config.spawn,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Force the active piece, keeping the grid bracketing intact.
    fn replace_active(state: &mut GameState, kind: PieceKind) {
        state
            .grid
            .clear_piece(state.active.cells(), state.active.position());
        state.active = Piece::new(kind, state.config.spawn);
        state
            .grid
            .set_piece(state.active.cells(), state.active.position(), kind);
    }

    fn fill_row_except(state: &mut GameState, row: i32, gaps: &[i32]) {
        for x in state.grid.x_min()..state.grid.x_max() {
            if !gaps.contains(&x) {
                state.grid.occupy(Pos::new(x, row), PieceKind::Z);
            }
        }
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::with_seed(12345);
        assert_eq!(state.score(), 0);
        assert_eq!(state.episode(), 0);
        assert_eq!(state.active().position(), state.config().spawn);
        assert_eq!(state.active().rotation(), 0);
        // The active piece is drawn into the grid between ticks.
        for cell in state.active().world_cells() {
            assert!(state.grid().is_occupied(cell));
        }
    }

    #[test]
    fn test_spawn_promotes_next_piece() {
        let mut state = GameState::with_seed(99);
        let upcoming = state.next_kind();
        state.tick(16, &[GameAction::HardDrop]);
        assert_eq!(state.active().kind(), upcoming);
    }

    #[test]
    fn test_blocked_spawn_is_game_over() {
        let mut state = GameState::with_seed(5);
        state.score = 300;
        let spawn_cells = get_shape(state.next).map(|c| c + state.config.spawn);
        state
            .grid
            .clear_piece(state.active.cells(), state.active.position());
        state.grid.occupy(spawn_cells[0], PieceKind::T);

        assert!(!state.spawn_piece());
        assert_eq!(state.episode(), 1);
        assert_eq!(state.score(), 0);
        assert_eq!(state.best_score(), 300);
        assert_eq!(state.store().saves(), &[300]);
        assert_eq!(
            state.events(),
            &[GameEvent::GameOver {
                score: 300,
                best: 300
            }]
        );
        // Fresh board: only the respawned piece.
        assert_eq!(state.grid().occupied_cells().count(), 4);
    }

    #[test]
    fn test_best_score_keeps_maximum_across_sessions() {
        let mut state = GameState::with_seed(1);
        state.score = 120;
        state.game_over();
        assert_eq!(state.best_score(), 120);

        state.score = 40;
        state.game_over();
        assert_eq!(state.best_score(), 120);
        assert_eq!(state.store().saves(), &[120]);
        assert_eq!(state.episode(), 2);
    }

    #[test]
    fn test_restart_does_not_record_best() {
        let mut state = GameState::with_seed(1);
        state.score = 500;
        state.tick(16, &[GameAction::Restart]);
        assert_eq!(state.score(), 0);
        assert_eq!(state.best_score(), 0);
        assert!(state.store().saves().is_empty());
        assert_eq!(state.events(), &[GameEvent::Restarted { score: 500 }]);
    }

    #[test]
    fn test_hard_drop_clears_line_and_scores() {
        let mut state = GameState::with_seed(1);
        replace_active(&mut state, PieceKind::I);
        // The I piece spans x = -2..=1 on its row.
        fill_row_except(&mut state, -10, &[-2, -1, 0, 1]);

        state.tick(16, &[GameAction::HardDrop]);

        assert_eq!(state.score(), 100);
        assert_eq!(
            state.events()[0],
            GameEvent::Locked {
                kind: PieceKind::I,
                lines_cleared: 1
            }
        );
        // Only the freshly spawned piece remains.
        assert_eq!(state.grid().occupied_cells().count(), 4);
    }

    #[test]
    fn test_tetris_with_cascading_rows() {
        let mut state = GameState::with_seed(1);
        replace_active(&mut state, PieceKind::I);
        assert!(state.tick(16, &[GameAction::RotateCw]).active.is_some());
        let column = state.active().world_cells()[0].x;
        for row in -10..-6 {
            fill_row_except(&mut state, row, &[column]);
        }
        state.tick(16, &[GameAction::HardDrop]);
        assert_eq!(state.score(), 400);
    }

    #[test]
    fn test_gravity_steps_on_first_tick_then_waits() {
        let mut state = GameState::with_seed(3);
        let start = state.active().position();

        state.tick(16, &[]);
        assert_eq!(state.active().position(), start.offset(0, -1));

        state.tick(500, &[]);
        assert_eq!(state.active().position(), start.offset(0, -1));

        state.tick(500, &[]);
        assert_eq!(state.active().position(), start.offset(0, -2));
    }

    #[test]
    fn test_resting_piece_locks_after_lock_delay() {
        let mut state = GameState::with_seed(3);
        let kind = state.active().kind();
        state.tick(16, &[GameAction::HardDrop]);
        assert!(matches!(
            state.events()[0],
            GameEvent::Locked { kind: k, .. } if k == kind
        ));

        // Soft drop to the floor, then let gravity run out the lock delay.
        for _ in 0..30 {
            state.tick(16, &[GameAction::SoftDrop]);
        }
        let resting = state.active().position();
        let mut locked = false;
        for _ in 0..10 {
            state.tick(1000, &[]);
            if !state.events().is_empty() {
                locked = true;
                break;
            }
        }
        assert!(locked);
        assert_ne!(state.active().position(), resting);
    }

    #[test]
    fn test_ghost_ignores_active_piece_cells() {
        let state = GameState::with_seed(8);
        let ghost = state.ghost().world_cells();
        let active = state.active().world_cells();

        // Empty board: the projection rests on the floor, directly below the piece.
        assert_eq!(ghost.iter().map(|p| p.y).min(), Some(state.grid().y_min()));
        assert_eq!(state.ghost().position().x, state.active().position().x);
        for p in ghost {
            assert!(state.grid().contains(p));
            assert!(!state.grid().is_occupied(p) || active.contains(&p));
        }
    }

    #[test]
    fn test_validate_config_rejects_oversized_board_before_building_grid() {
        let config = GameConfig {
            width: u16::MAX,
            height: u16::MAX,
            ..GameConfig::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::BoardTooLarge { .. })
        ));
    }

    #[test]
    fn test_validate_config_rejects_spawn_outside_board() {
        let config = GameConfig {
            spawn: Pos::new(-1, 9),
            ..GameConfig::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::SpawnOutOfBounds { .. })
        ));
        assert!(GameState::new(config, SimpleRng::new(1), MemoryScoreStore::new()).is_err());
    }
}
