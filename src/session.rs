// Whimsy Server - Session State
// Copyright 2026 Joseph Stone - All Rights Reserved
//
// In-memory session state, one per process, owned by the dispatcher.
// Tracks: whimsy level + style, main thought history, branches.
// Nothing is persisted; the session ends with the process.

use crate::guidance;
use crate::thought::{Placement, ThoughtRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whimsy tier. Ordered so a cap is a plain `min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhimsyLevel {
    Off,
    Subtle,
    Overt,
}

impl WhimsyLevel {
    pub const CODES: &'static [i64] = &[0, 1, 2];

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(WhimsyLevel::Off),
            1 => Some(WhimsyLevel::Subtle),
            2 => Some(WhimsyLevel::Overt),
            _ => None,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            WhimsyLevel::Off => 0,
            WhimsyLevel::Subtle => 1,
            WhimsyLevel::Overt => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WhimsyLevel::Off => "OFF",
            WhimsyLevel::Subtle => "SUBTLE",
            WhimsyLevel::Overt => "OVERT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    Playful,
    Wonder,
    Curiosity,
    GentleHumor,
}

impl Style {
    pub const NAMES: &'static [&'static str] = &["playful", "wonder", "curiosity", "gentle-humor"];

    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "playful" => Some(Style::Playful),
            "wonder" => Some(Style::Wonder),
            "curiosity" => Some(Style::Curiosity),
            "gentle-humor" => Some(Style::GentleHumor),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Playful => "playful",
            Style::Wonder => "wonder",
            Style::Curiosity => "curiosity",
            Style::GentleHumor => "gentle-humor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seriousness {
    Low,
    Medium,
    High,
}

impl Seriousness {
    pub const NAMES: &'static [&'static str] = &["low", "medium", "high"];

    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Seriousness::Low),
            "medium" => Some(Seriousness::Medium),
            "high" => Some(Seriousness::High),
            _ => None,
        }
    }
}

/// Active session state: lives in RAM for the life of the process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub level: WhimsyLevel,
    pub style: Option<Style>,
    /// Fallback when `style` was never set
    pub default_style: Style,
    history: Vec<ThoughtRecord>,
    branches: BTreeMap<String, Vec<ThoughtRecord>>,
}

impl Session {
    pub fn new(level: WhimsyLevel, default_style: Style) -> Self {
        Self {
            level,
            style: None,
            default_style,
            history: Vec::new(),
            branches: BTreeMap::new(),
        }
    }

    /// Overwrite level and style unconditionally
    pub fn set_level(&mut self, level: WhimsyLevel, style: Option<Style>) {
        self.level = level;
        self.style = style;
    }

    pub fn resolved_style(&self) -> Style {
        self.style.unwrap_or(self.default_style)
    }

    /// Tier actually applied: high seriousness caps at SUBTLE
    pub fn effective_level(&self, seriousness: Option<Seriousness>) -> WhimsyLevel {
        match seriousness {
            Some(Seriousness::High) => self.level.min(WhimsyLevel::Subtle),
            _ => self.level,
        }
    }

    /// Guidance text for the current level. OFF ignores every argument.
    pub fn guidance(&self, context: &str, seriousness: Option<Seriousness>) -> String {
        if self.level == WhimsyLevel::Off {
            return guidance::OFF_DIRECTIVE.to_string();
        }
        guidance::compose(self.effective_level(seriousness), self.resolved_style(), context)
    }

    /// Append a record to the main line or its branch.
    /// A branch is seeded from history[0..origin) on first reference only.
    pub fn record_thought(&mut self, record: ThoughtRecord) {
        let branch = match record.placement() {
            Placement::MainLine => None,
            Placement::Branch { id, origin } => Some((id.to_string(), origin)),
        };
        match branch {
            None => self.history.push(record),
            Some((id, origin)) => {
                let history = &self.history;
                let seq = self.branches.entry(id).or_insert_with(|| {
                    let end = (origin as usize).min(history.len());
                    history[..end].to_vec()
                });
                seq.push(record);
            }
        }
    }

    pub fn history(&self) -> &[ThoughtRecord] {
        &self.history
    }

    pub fn branch(&self, id: &str) -> Option<&[ThoughtRecord]> {
        self.branches.get(id).map(|v| v.as_slice())
    }

    pub fn branch_ids(&self) -> impl Iterator<Item = &str> {
        self.branches.keys().map(|k| k.as_str())
    }

    /// Status summary string. Branch ids are listed in sorted order.
    pub fn status_summary(&self) -> String {
        let mut summary = format!(
            "Level: {} | Style: {} | Thoughts: {} | Branches: {}",
            self.level.label(),
            self.resolved_style().as_str(),
            self.history.len(),
            self.branches.len(),
        );
        if !self.branches.is_empty() {
            let ids: Vec<&str> = self.branch_ids().collect();
            summary.push_str(&format!(" ({})", ids.join(", ")));
        }
        summary
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(WhimsyLevel::Subtle, Style::Playful)
    }
}

// ============================================================================
// TESTS
// ============================================================================
