//! Best-score persistence backed by a small JSON file.
//!
//! The core only sees [`ScoreStore`], which cannot fail. File errors are kept
//! here and reported by the binary once the terminal is restored.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::ScoreStore;

/// On-disk format: `{"best": N}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct BestRecord {
    best: u32,
}

#[derive(Debug)]
pub struct FileScoreStore {
    path: PathBuf,
    last_error: Option<anyhow::Error>,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_error: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Most recent load/save failure.
    pub fn last_error(&self) -> Option<&anyhow::Error> {
        self.last_error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.last_error.take()
    }

    /// Read the stored best score. A missing file is a best of zero.
    pub fn try_load(&self) -> Result<u32> {
        if !self.path.exists() {
            return Ok(0);
        }
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let record: BestRecord = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        Ok(record.best)
    }

    pub fn try_save(&self, best: u32) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let text = serde_json::to_string(&BestRecord { best })?;
        fs::write(&self.path, text)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&mut self) -> u32 {
        match self.try_load() {
            Ok(best) => best,
            Err(err) => {
                self.last_error = Some(err);
                0
            }
        }
    }

    fn save(&mut self, best: u32) {
        if let Err(err) = self.try_save(best) {
            self.last_error = Some(err);
        }
    }
}
