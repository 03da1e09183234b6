// Whimsy Server - Thought Formatter
// Copyright 2026 Joseph Stone - All Rights Reserved
//
// Turns a validated ThoughtRecord into display text. Pure and deterministic.
// Section order: header, content, insight, tangents, feeling, footer.
// Missing optional fields drop their section; rendering never fails.

use crate::thought::ThoughtRecord;
use std::fmt::Write;

const RULE: &str = "────────────────────────────────────────";

// Fixed fragments for the auto variant
const AUTO_INSIGHT: &str = "Every question is a door that was pretending to be a wall.";
const AUTO_TANGENTS: &[&str] = &[
    "What would this look like drawn by a seven-year-old?",
    "Which part of this would a cat find most suspicious?",
];
const AUTO_FEELING: &str = "Quietly delighted, like finding a spare sock that matches.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Only what the caller supplied
    #[default]
    Full,
    /// Insight, tangents and feeling come from fixed templates
    Auto,
}

fn header(record: &ThoughtRecord) -> String {
    let mut line = format!("Thought {}/{}", record.sequence_index, record.declared_total);
    if record.sequence_index > record.declared_total {
        line.push_str(" (beyond plan)");
    }
    if record.is_revision {
        match record.revises_index {
            Some(i) => {
                let _ = write!(line, " [revising #{}]", i);
            }
            None => line.push_str(" [revision]"),
        }
    }
    if let (Some(id), Some(origin)) = (record.branch_id.as_deref(), record.branch_origin_index) {
        let _ = write!(line, " [branch '{}' from #{}]", id, origin);
    }
    if let Some(joy) = record.joy_score {
        let _ = write!(line, " | joy {}/10", joy);
    }
    let mut tags = Vec::new();
    if let Some(tone) = record.tone {
        tags.push(format!("tone: {}", tone.as_str()));
    }
    if let Some(style) = record.connection_style {
        tags.push(format!("connection: {}", style.as_str()));
    }
    if !tags.is_empty() {
        let _ = write!(line, "\n{}", tags.join(" | "));
    }
    line
}

fn footer(record: &ThoughtRecord) -> String {
    match (record.continuation_requested, record.next_hint.as_deref()) {
        (true, Some(hint)) => format!("Next: {}", hint),
        (true, None) => "More thoughts to come...".to_string(),
        (false, _) => "Thinking complete.".to_string(),
    }
}

/// Render a record as a text block
pub fn render(record: &ThoughtRecord, mode: RenderMode) -> String {
    let (insight, tangents, feeling): (Option<&str>, Vec<&str>, Option<&str>) = match mode {
        RenderMode::Full => (
            record.insight.as_deref(),
            record.tangents.iter().map(String::as_str).collect(),
            record.feeling.as_deref(),
        ),
        RenderMode::Auto => (Some(AUTO_INSIGHT), AUTO_TANGENTS.to_vec(), Some(AUTO_FEELING)),
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", header(record));
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "{}", record.content);

    if let Some(insight) = insight {
        let _ = writeln!(out, "\nInsight: {}", insight);
    }
    if !tangents.is_empty() {
        let _ = writeln!(out, "\nTangents:");
        for (i, t) in tangents.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, t);
        }
    }
    if let Some(feeling) = feeling {
        let _ = writeln!(out, "\nFeeling: {}", feeling);
    }

    let _ = writeln!(out, "{}", RULE);
    out.push_str(&footer(record));
    out
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thought::{ConnectionStyle, Tone};

    fn rich_record() -> ThoughtRecord {
        let mut r = ThoughtRecord::new("Maybe bridges are roads that got brave.", 2, 4);
        r.continuation_requested = true;
        r.joy_score = Some(8);
        r.insight = Some("Courage is infrastructure".to_string());
        r.tangents = vec!["tunnels are shy bridges".to_string(), "ferries commute".to_string()];
        r.tone = Some(Tone::Playful);
        r.connection_style = Some(ConnectionStyle::Metaphor);
        r.feeling = Some("bouncy".to_string());
        r.next_hint = Some("consider ladders".to_string());
        r
    }

    fn position(text: &str, needle: &str) -> usize {
        text.find(needle).unwrap_or_else(|| panic!("missing {:?} in:\n{}", needle, text))
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let text = render(&rich_record(), RenderMode::Full);
        let order = [
            position(&text, "Thought 2/4"),
            position(&text, "bridges are roads"),
            position(&text, "Insight: Courage"),
            position(&text, "  1. tunnels"),
            position(&text, "  2. ferries"),
            position(&text, "Feeling: bouncy"),
            position(&text, "Next: consider ladders"),
        ];
        assert!(order.windows(2).all(|w| w[0] < w[1]), "{}", text);
        assert!(text.contains("joy 8/10"));
        assert!(text.contains("tone: playful | connection: metaphor"));
    }

    #[test]
    fn missing_optionals_drop_sections() {
        let r = ThoughtRecord::new("plain", 1, 1);
        let text = render(&r, RenderMode::Full);
        assert!(!text.contains("Insight"));
        assert!(!text.contains("Tangents"));
        assert!(!text.contains("Feeling"));
        assert!(!text.contains("joy"));
        assert!(text.ends_with("Thinking complete."));
    }

    #[test]
    fn auto_mode_is_deterministic() {
        let r = ThoughtRecord::new("anything", 1, 2);
        let a = render(&r, RenderMode::Auto);
        let b = render(&r, RenderMode::Auto);
        assert_eq!(a, b);
        assert!(a.contains(AUTO_INSIGHT));
        assert!(a.contains(AUTO_FEELING));
        assert!(a.contains("  2. "));
    }

    #[test]
    fn header_marks_revision_branch_and_overflow() {
        let mut r = ThoughtRecord::new("again", 5, 3);
        r.allows_exceeding_total = true;
        r.is_revision = true;
        r.revises_index = Some(2);
        r.branch_id = Some("alt".to_string());
        r.branch_origin_index = Some(2);
        let text = render(&r, RenderMode::Full);
        let first = text.lines().next().unwrap();
        assert!(first.contains("(beyond plan)"));
        assert!(first.contains("[revising #2]"));
        assert!(first.contains("[branch 'alt' from #2]"));
    }

    #[test]
    fn continuation_without_hint() {
        let mut r = ThoughtRecord::new("on", 1, 2);
        r.continuation_requested = true;
        assert!(render(&r, RenderMode::Full).ends_with("More thoughts to come..."));
    }
}
