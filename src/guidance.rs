// Whimsy Server - Guidance Templates
// Copyright 2026 Joseph Stone - All Rights Reserved
//
// Static text tables behind get_guidance. Selection policy lives in
// session.rs; this file only maps a level or style to words.

use crate::session::{Style, WhimsyLevel};

/// Returned verbatim whenever the session level is OFF
pub const OFF_DIRECTIVE: &str =
    "Whimsy is OFF. Stay functional: answer clearly and directly, without playful asides.";

const SUBTLE_TEMPLATE: &str = "SUBTLE whimsy: allow one light touch, a small playful phrase or a \
gentle observation. Keep the substance front and center.";

const OVERT_TEMPLATE: &str = "OVERT whimsy: lean in. Vivid metaphors, playful asides and the \
occasional joyful tangent are welcome, as long as the answer stays correct and useful.";

/// Template for an effective level. OFF never reaches here in practice,
/// but maps to the directive so the table is total.
pub fn template(level: WhimsyLevel) -> &'static str {
    match level {
        WhimsyLevel::Off => OFF_DIRECTIVE,
        WhimsyLevel::Subtle => SUBTLE_TEMPLATE,
        WhimsyLevel::Overt => OVERT_TEMPLATE,
    }
}

pub fn style_hint(style: Style) -> &'static str {
    match style {
        Style::Playful => "light wordplay and a bouncy rhythm",
        Style::Wonder => "marvel at how things fit together",
        Style::Curiosity => "ask the question behind the question",
        Style::GentleHumor => "warm, understated jokes that never punch down",
    }
}

/// Full guidance block: template, resolved style, caller context verbatim
pub fn compose(level: WhimsyLevel, style: Style, context: &str) -> String {
    format!(
        "{}\n\nStyle: {} ({})\nContext: {}",
        template(level),
        style.as_str(),
        style_hint(style),
        context,
    )
}

// ============================================================================
// TESTS
// ============================================================================
