//! Best-score persistence port.
//!
//! The core only reads the stored best score once at start-up and writes it
//! when a game ends with a higher score. Where it lives is up to the caller.

/// Storage for the single persisted "best score" integer.
pub trait ScoreStore {
    /// Stored best score, 0 when nothing has been stored yet.
    fn load(&mut self) -> u32;

    /// Persist a new best score.
    fn save(&mut self, best: u32);
}

/// In-memory store, for tests and headless runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryScoreStore {
    best: u32,
    saves: Vec<u32>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a best score.
    pub fn with_best(best: u32) -> Self {
        Self {
            best,
            saves: Vec::new(),
        }
    }

    /// Every value passed to [`ScoreStore::save`], in order.
    pub fn saves(&self) -> &[u32] {
        &self.saves
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&mut self) -> u32 {
        self.best
    }

    fn save(&mut self, best: u32) {
        self.best = best;
        self.saves.push(best);
    }
}
