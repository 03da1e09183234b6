// Whimsy Server - Oblique Strategy Picker
// Copyright 2026 Joseph Stone - All Rights Reserved
//
// Draws one line at random from a newline-delimited file. The file is read
// on every pick so edits take effect without a restart.

use crate::error::ToolError;
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct StrategyPicker {
    path: PathBuf,
}

impl StrategyPicker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Non-blank trimmed lines of the file
    pub fn load(&self) -> Result<Vec<String>, ToolError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| ToolError::SourceUnavailable {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        let lines: Vec<String> = raw
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        if lines.is_empty() {
            return Err(ToolError::EmptyStrategySet { path: self.path.display().to_string() });
        }
        Ok(lines)
    }

    pub fn pick(&self) -> Result<String, ToolError> {
        self.pick_with(&mut rand::thread_rng())
    }

    pub fn pick_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, ToolError> {
        let lines = self.load()?;
        let chosen = lines
            .choose(rng)
            .cloned()
            .ok_or_else(|| ToolError::EmptyStrategySet { path: self.path.display().to_string() })?;
        log::debug!("Picked strategy from {:?} ({} candidates)", self.path, lines.len());
        Ok(chosen)
    }
}

// ============================================================================
// TESTS
// ============================================================================
