// Whimsy Server - Configuration
// Copyright 2026 Joseph Stone - All Rights Reserved
//
// Process-wide settings: tool profile, initial level, default style,
// strategies file. Loaded from JSON, falling back to compiled defaults.

use crate::schema::ToolProfile;
use crate::session::{Style, WhimsyLevel};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Master server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub profile: ToolProfile,
    pub initial_level: WhimsyLevel,
    /// Style used when set_level omits one and no style was ever chosen
    pub default_style: Style,
    pub strategies_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            profile: ToolProfile::Full,
            initial_level: WhimsyLevel::Subtle,
            default_style: Style::Playful,
            strategies_path: None,
        }
    }
}

impl ServerConfig {
    /// Load config from JSON file, falling back to defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            log::warn!("Config not found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
