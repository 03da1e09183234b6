// Whimsy Server - Tool Schema Registry
// Copyright 2026 Joseph Stone - All Rights Reserved
//
// Declarative argument contracts for every tool. The same tables feed
// validate.rs (enforcement) and tools/list (advertisement), so what is
// advertised is exactly what is enforced.

use crate::session::{Seriousness, Style, WhimsyLevel};
use crate::thought::{ConnectionStyle, Tone};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub const SET_LEVEL: &str = "set_level";
pub const GET_GUIDANCE: &str = "get_guidance";
pub const OBLIQUE_STRATEGY: &str = "oblique_strategy";
pub const THINKING: &str = "thinking";

/// Which slice of the tool surface the server exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ToolProfile {
    /// All four tools, full thinking arguments
    Full,
    /// Only `thinking`, full arguments
    Thinking,
    /// Only `thinking`, required arguments, templated insight/tangents/feeling
    Auto,
}

impl ToolProfile {
    pub fn tools(&self) -> &'static [ToolSchema] {
        match self {
            ToolProfile::Full => FULL_TOOLS,
            ToolProfile::Thinking => THINKING_TOOLS,
            ToolProfile::Auto => AUTO_TOOLS,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&'static ToolSchema> {
        self.tools().iter().find(|t| t.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamKind {
    Str,
    /// String that must not be blank after trimming
    Text,
    Bool,
    /// Integer with inclusive optional bounds
    Int { min: Option<i64>, max: Option<i64> },
    IntChoice(&'static [i64]),
    Choice(&'static [&'static str]),
    StrList,
}

#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ParamKind,
    pub required: bool,
}

/// Which handler a schema decodes into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    SetLevel,
    GetGuidance,
    ObliqueStrategy,
    Thinking,
}

#[derive(Debug)]
pub struct ToolSchema {
    pub name: &'static str,
    pub kind: ToolKind,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
}

const fn required(name: &'static str, kind: ParamKind, description: &'static str) -> ParamSpec {
    ParamSpec { name, description, kind, required: true }
}

const fn optional(name: &'static str, kind: ParamKind, description: &'static str) -> ParamSpec {
    ParamSpec { name, description, kind, required: false }
}

const POSITIVE: ParamKind = ParamKind::Int { min: Some(1), max: None };

// ============================================================================
// TOOL TABLES
// ============================================================================

const SET_LEVEL_SCHEMA: ToolSchema = ToolSchema {
    name: SET_LEVEL,
    kind: ToolKind::SetLevel,
    description: "Set the session whimsy level (0 = off, 1 = subtle, 2 = overt) and optional style.",
    params: &[
        required("level", ParamKind::IntChoice(WhimsyLevel::CODES), "Whimsy level: 0, 1 or 2"),
        optional("style", ParamKind::Choice(Style::NAMES), "Whimsy flavor"),
    ],
};

const GET_GUIDANCE_SCHEMA: ToolSchema = ToolSchema {
    name: GET_GUIDANCE,
    kind: ToolKind::GetGuidance,
    description: "Get whimsy guidance for a context. High seriousness caps the level at subtle.",
    params: &[
        required("context", ParamKind::Str, "What the response is about"),
        optional("seriousness", ParamKind::Choice(Seriousness::NAMES), "How serious the topic is"),
    ],
};

const OBLIQUE_STRATEGY_SCHEMA: ToolSchema = ToolSchema {
    name: OBLIQUE_STRATEGY,
    kind: ToolKind::ObliqueStrategy,
    description: "Draw one random oblique strategy card to nudge thinking sideways.",
    params: &[],
};

const THINKING_REQUIRED: [ParamSpec; 4] = [
    required("content", ParamKind::Text, "The current thought"),
    required("continuationRequested", ParamKind::Bool, "Whether another thought should follow"),
    required("sequenceIndex", POSITIVE, "Position of this thought, starting at 1"),
    required("declaredTotal", POSITIVE, "Planned number of thoughts"),
];

const THINKING_FULL_SCHEMA: ToolSchema = ToolSchema {
    name: THINKING,
    kind: ToolKind::Thinking,
    description: "Record a step of playful, reflective thinking. Supports revisions and branches; \
                  returns the formatted thought.",
    params: &[
        THINKING_REQUIRED[0],
        THINKING_REQUIRED[1],
        THINKING_REQUIRED[2],
        THINKING_REQUIRED[3],
        optional("joyScore", ParamKind::Int { min: Some(1), max: Some(10) }, "How delightful this thought feels, 1-10"),
        optional("insightText", ParamKind::Str, "Insight gained"),
        optional("tangentList", ParamKind::StrList, "Side paths worth noting"),
        optional("tone", ParamKind::Choice(Tone::NAMES), "Tone of the thought"),
        optional("feelingText", ParamKind::Str, "How this step feels"),
        optional("connectionStyle", ParamKind::Choice(ConnectionStyle::NAMES), "How ideas are linked"),
        optional("nextHint", ParamKind::Str, "Hint for the next thought"),
        optional("isRevision", ParamKind::Bool, "Whether this revises an earlier thought"),
        optional("revisesIndex", POSITIVE, "Which thought is being revised"),
        optional("branchOriginIndex", POSITIVE, "Thought index the branch starts from"),
        optional("branchId", ParamKind::Str, "Branch identifier"),
        optional("allowsExceedingTotal", ParamKind::Bool, "Allow sequenceIndex past declaredTotal"),
    ],
};

const THINKING_AUTO_SCHEMA: ToolSchema = ToolSchema {
    name: THINKING,
    kind: ToolKind::Thinking,
    description: "Record a step of playful thinking. Insight, tangents and feeling are added automatically.",
    params: &THINKING_REQUIRED,
};

static FULL_TOOLS: &[ToolSchema] = &[
    SET_LEVEL_SCHEMA,
    GET_GUIDANCE_SCHEMA,
    OBLIQUE_STRATEGY_SCHEMA,
    THINKING_FULL_SCHEMA,
];
static THINKING_TOOLS: &[ToolSchema] = &[THINKING_FULL_SCHEMA];
static AUTO_TOOLS: &[ToolSchema] = &[THINKING_AUTO_SCHEMA];

// ============================================================================
// JSON SCHEMA (tools/list)
// ============================================================================

impl ParamSpec {
    fn property(&self) -> Value {
        let mut prop = match self.kind {
            ParamKind::Str => json!({"type": "string"}),
            ParamKind::Text => json!({"type": "string", "minLength": 1}),
            ParamKind::Bool => json!({"type": "boolean"}),
            ParamKind::Int { min, max } => {
                let mut p = json!({"type": "integer"});
                if let Some(min) = min {
                    p["minimum"] = json!(min);
                }
                if let Some(max) = max {
                    p["maximum"] = json!(max);
                }
                p
            }
            ParamKind::IntChoice(values) => json!({"type": "integer", "enum": values}),
            ParamKind::Choice(values) => json!({"type": "string", "enum": values}),
            ParamKind::StrList => json!({"type": "array", "items": {"type": "string"}}),
        };
        prop["description"] = json!(self.description);
        prop
    }
}

impl ToolSchema {
    pub fn required(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.params.iter().filter(|p| p.required).map(|p| p.name)
    }

    /// MCP tool definition: name, description, inputSchema
    pub fn to_json(&self) -> Value {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|p| (p.name.to_string(), p.property()))
            .collect();
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": {
                "type": "object",
                "properties": properties,
                "required": self.required().collect::<Vec<_>>(),
            }
        })
    }
}

/// Return all tool definitions for a profile
pub fn tool_definitions(profile: ToolProfile) -> Vec<Value> {
    profile.tools().iter().map(ToolSchema::to_json).collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_profile_lists_four_tools() {
        let names: Vec<_> = ToolProfile::Full.tools().iter().map(|t| t.name).collect();
        assert_eq!(names, vec![SET_LEVEL, GET_GUIDANCE, OBLIQUE_STRATEGY, THINKING]);
    }

    #[test]
    fn reduced_profiles_only_expose_thinking() {
        for profile in [ToolProfile::Thinking, ToolProfile::Auto] {
            assert!(profile.lookup(THINKING).is_some());
            assert!(profile.lookup(SET_LEVEL).is_none());
            assert!(profile.lookup(OBLIQUE_STRATEGY).is_none());
        }
        assert_eq!(ToolProfile::Auto.lookup(THINKING).unwrap().params.len(), 4);
        assert_eq!(ToolProfile::Thinking.lookup(THINKING).unwrap().params.len(), 16);
    }

    #[test]
    fn set_level_schema_json() {
        let def = ToolProfile::Full.lookup(SET_LEVEL).unwrap().to_json();
        assert_eq!(def["name"], "set_level");
        assert_eq!(def["inputSchema"]["type"], "object");
        assert_eq!(def["inputSchema"]["required"], json!(["level"]));
        assert_eq!(def["inputSchema"]["properties"]["level"]["enum"], json!([0, 1, 2]));
        assert_eq!(
            def["inputSchema"]["properties"]["style"]["enum"],
            json!(["playful", "wonder", "curiosity", "gentle-humor"])
        );
    }

    #[test]
    fn thinking_schema_bounds_are_advertised() {
        let def = ToolProfile::Full.lookup(THINKING).unwrap().to_json();
        let props = &def["inputSchema"]["properties"];
        assert_eq!(props["joyScore"]["minimum"], 1);
        assert_eq!(props["joyScore"]["maximum"], 10);
        assert_eq!(props["sequenceIndex"]["minimum"], 1);
        assert!(props["sequenceIndex"].get("maximum").is_none());
        assert_eq!(props["tangentList"]["items"]["type"], "string");
        assert_eq!(props["content"]["minLength"], 1);
        assert_eq!(
            def["inputSchema"]["required"],
            json!(["content", "continuationRequested", "sequenceIndex", "declaredTotal"])
        );
    }

    #[test]
    fn oblique_strategy_takes_no_arguments() {
        let def = ToolProfile::Full.lookup(OBLIQUE_STRATEGY).unwrap().to_json();
        assert_eq!(def["inputSchema"]["properties"], json!({}));
        assert_eq!(def["inputSchema"]["required"], json!([]));
    }

    #[test]
    fn every_param_has_a_description() {
        for def in tool_definitions(ToolProfile::Full) {
            for (name, prop) in def["inputSchema"]["properties"].as_object().unwrap() {
                assert!(prop["description"].is_string(), "{} lacks description", name);
            }
        }
    }
}
