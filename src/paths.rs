// Whimsy Server - Path Resolution
// Copyright 2026 Joseph Stone - All Rights Reserved
//
// Single source of truth for locating the oblique strategies file.
// Resolution never fails: a path that does not exist is still returned,
// the picker reports it as unavailable at call time.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const STRATEGIES_FILE_NAME: &str = "oblique_strategies.txt";
pub const STRATEGIES_ENV: &str = "WHIMSY_STRATEGIES";

static DISCOVERED_CACHE: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Walk up from the binary location looking for the strategies file.
/// Cached; the binary does not move while running.
pub fn discovered_strategies() -> Option<&'static Path> {
    DISCOVERED_CACHE
        .get_or_init(|| {
            let exe = std::env::current_exe().ok()?.canonicalize().ok()?;
            let mut dir = exe.parent();
            while let Some(d) = dir {
                let candidate = d.join(STRATEGIES_FILE_NAME);
                if candidate.is_file() {
                    return Some(candidate);
                }
                dir = d.parent();
            }
            None
        })
        .as_deref()
}

/// Strategies file location.
///
/// Resolution order:
///   1. Explicit CLI flag
///   2. WHIMSY_STRATEGIES environment variable
///   3. `strategies_path` from config
///   4. Walk up from binary location
///   5. ./oblique_strategies.txt
pub fn resolve_strategies_path(
    cli: Option<&Path>,
    env: Option<&str>,
    config: Option<&Path>,
) -> PathBuf {
    if let Some(p) = cli {
        return p.to_path_buf();
    }
    if let Some(p) = env.filter(|s| !s.trim().is_empty()) {
        return PathBuf::from(p);
    }
    if let Some(p) = config {
        return p.to_path_buf();
    }
    if let Some(p) = discovered_strategies() {
        return p.to_path_buf();
    }
    PathBuf::from(STRATEGIES_FILE_NAME)
}

// ============================================================================
// TESTS
// ============================================================================
