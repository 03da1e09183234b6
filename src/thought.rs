// Whimsy Server - Thought Records
// Copyright 2026 Joseph Stone - All Rights Reserved
//
// A single validated step of a thinking sequence, plus where it belongs:
// the main history or a named branch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Curious,
    Playful,
    Wonder,
    Gentle,
    Reflective,
}

impl Tone {
    pub const NAMES: &'static [&'static str] = &["curious", "playful", "wonder", "gentle", "reflective"];

    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "curious" => Some(Tone::Curious),
            "playful" => Some(Tone::Playful),
            "wonder" => Some(Tone::Wonder),
            "gentle" => Some(Tone::Gentle),
            "reflective" => Some(Tone::Reflective),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Curious => "curious",
            Tone::Playful => "playful",
            Tone::Wonder => "wonder",
            Tone::Gentle => "gentle",
            Tone::Reflective => "reflective",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStyle {
    Analogy,
    Metaphor,
    Story,
    Pun,
    Observation,
}

impl ConnectionStyle {
    pub const NAMES: &'static [&'static str] = &["analogy", "metaphor", "story", "pun", "observation"];

    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "analogy" => Some(ConnectionStyle::Analogy),
            "metaphor" => Some(ConnectionStyle::Metaphor),
            "story" => Some(ConnectionStyle::Story),
            "pun" => Some(ConnectionStyle::Pun),
            "observation" => Some(ConnectionStyle::Observation),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStyle::Analogy => "analogy",
            ConnectionStyle::Metaphor => "metaphor",
            ConnectionStyle::Story => "story",
            ConnectionStyle::Pun => "pun",
            ConnectionStyle::Observation => "observation",
        }
    }
}

/// Where a record lands in the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement<'a> {
    MainLine,
    Branch { id: &'a str, origin: u32 },
}

/// One validated thinking step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThoughtRecord {
    pub content: String,
    pub continuation_requested: bool,
    pub sequence_index: u32,
    pub declared_total: u32,
    pub joy_score: Option<u8>,
    pub insight: Option<String>,
    #[serde(default)]
    pub tangents: Vec<String>,
    pub tone: Option<Tone>,
    pub feeling: Option<String>,
    pub connection_style: Option<ConnectionStyle>,
    pub next_hint: Option<String>,
    #[serde(default)]
    pub is_revision: bool,
    pub revises_index: Option<u32>,
    pub branch_origin_index: Option<u32>,
    pub branch_id: Option<String>,
    #[serde(default)]
    pub allows_exceeding_total: bool,
    pub recorded_at: DateTime<Utc>,
}

impl ThoughtRecord {
    /// Minimal record with every optional field unset
    pub fn new(content: impl Into<String>, sequence_index: u32, declared_total: u32) -> Self {
        Self {
            content: content.into(),
            continuation_requested: false,
            sequence_index,
            declared_total,
            joy_score: None,
            insight: None,
            tangents: Vec::new(),
            tone: None,
            feeling: None,
            connection_style: None,
            next_hint: None,
            is_revision: false,
            revises_index: None,
            branch_origin_index: None,
            branch_id: None,
            allows_exceeding_total: false,
            recorded_at: Utc::now(),
        }
    }

    /// Branch only when both id and origin are present
    pub fn placement(&self) -> Placement<'_> {
        match (self.branch_id.as_deref(), self.branch_origin_index) {
            (Some(id), Some(origin)) => Placement::Branch { id, origin },
            _ => Placement::MainLine,
        }
    }

    pub fn overflows(&self) -> bool {
        self.sequence_index > self.declared_total && !self.allows_exceeding_total
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_needs_both_branch_fields() {
        let mut r = ThoughtRecord::new("a", 1, 3);
        assert_eq!(r.placement(), Placement::MainLine);

        r.branch_id = Some("x".to_string());
        assert_eq!(r.placement(), Placement::MainLine);

        r.branch_origin_index = Some(2);
        assert_eq!(r.placement(), Placement::Branch { id: "x", origin: 2 });

        r.branch_id = None;
        assert_eq!(r.placement(), Placement::MainLine);
    }

    #[test]
    fn overflow_respects_allow_flag() {
        let mut r = ThoughtRecord::new("a", 4, 3);
        assert!(r.overflows());
        r.allows_exceeding_total = true;
        assert!(!r.overflows());
        assert!(!ThoughtRecord::new("a", 3, 3).overflows());
    }

    #[test]
    fn wire_names_cover_every_variant() {
        for name in Tone::NAMES {
            assert_eq!(Tone::from_wire(name).map(|t| t.as_str()), Some(*name));
        }
        for name in ConnectionStyle::NAMES {
            assert_eq!(ConnectionStyle::from_wire(name).map(|c| c.as_str()), Some(*name));
        }
        assert!(Tone::from_wire("grumpy").is_none());
    }
}
