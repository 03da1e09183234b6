// Whimsy Server - Argument Validator
// Copyright 2026 Joseph Stone - All Rights Reserved
//
// Checks a raw JSON argument object against a tool's schema, then decodes
// it into a typed call. Untyped payloads never get past this file.
// - Required keys present (null counts as absent)
// - JSON types match the declared kind
// - Integer bounds and enumerated sets
// - Non-blank content

use crate::config::ServerConfig;
use crate::error::ToolError;
use crate::schema::{ParamKind, ParamSpec, ToolKind, ToolSchema};
use crate::session::{Seriousness, Style, WhimsyLevel};
use crate::thought::{ConnectionStyle, ThoughtRecord, Tone};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A tool call whose arguments passed schema validation
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedCall {
    SetLevel { level: WhimsyLevel, style: Style },
    GetGuidance { context: String, seriousness: Option<Seriousness> },
    ObliqueStrategy,
    Thinking(ThoughtRecord),
}

/// One argument after its schema check
#[derive(Debug, Clone, PartialEq)]
enum Checked {
    Str(String),
    Bool(bool),
    Int(i64),
    StrList(Vec<String>),
}

/// Schema-checked arguments, keyed by wire name
#[derive(Debug, Default)]
struct CheckedArgs(HashMap<&'static str, Checked>);

impl CheckedArgs {
    fn str(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(Checked::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    fn string(&self, name: &str) -> Option<String> {
        self.str(name).map(str::to_string)
    }

    fn bool(&self, name: &str) -> Option<bool> {
        match self.0.get(name) {
            Some(Checked::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    fn int(&self, name: &str) -> Option<i64> {
        match self.0.get(name) {
            Some(Checked::Int(i)) => Some(*i),
            _ => None,
        }
    }

    fn index(&self, name: &str) -> Result<Option<u32>, ToolError> {
        self.int(name)
            .map(|i| {
                u32::try_from(i).map_err(|_| ToolError::out_of_range(name, format!("{} does not fit an index", i)))
            })
            .transpose()
    }

    fn required_str(&self, name: &str) -> Result<&str, ToolError> {
        self.str(name).ok_or_else(|| ToolError::missing(name))
    }

    fn required_bool(&self, name: &str) -> Result<bool, ToolError> {
        self.bool(name).ok_or_else(|| ToolError::missing(name))
    }

    fn required_index(&self, name: &str) -> Result<u32, ToolError> {
        self.index(name)?.ok_or_else(|| ToolError::missing(name))
    }

    fn string_list(&self, name: &str) -> Vec<String> {
        match self.0.get(name) {
            Some(Checked::StrList(items)) => items.clone(),
            _ => Vec::new(),
        }
    }
}

/// JSON type name for error messages
fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(field: &str, expected: &'static str, value: &Value) -> ToolError {
    ToolError::TypeMismatch {
        field: field.to_string(),
        expected,
        actual: json_type(value),
    }
}

fn check_int(param: &ParamSpec, value: &Value) -> Result<i64, ToolError> {
    match value.as_i64() {
        Some(i) => Ok(i),
        None if value.is_u64() => Err(ToolError::out_of_range(param.name, format!("{} is too large", value))),
        None => Err(mismatch(param.name, "integer", value)),
    }
}

fn check_str<'v>(param: &ParamSpec, value: &'v Value) -> Result<&'v str, ToolError> {
    value.as_str().ok_or_else(|| mismatch(param.name, "string", value))
}

/// Check a single present value against its declared kind
fn check_value(param: &ParamSpec, value: &Value) -> Result<Checked, ToolError> {
    match param.kind {
        ParamKind::Str => Ok(Checked::Str(check_str(param, value)?.to_string())),
        ParamKind::Text => {
            let s = check_str(param, value)?;
            if s.trim().is_empty() {
                return Err(ToolError::EmptyContent);
            }
            Ok(Checked::Str(s.to_string()))
        }
        ParamKind::Bool => value
            .as_bool()
            .map(Checked::Bool)
            .ok_or_else(|| mismatch(param.name, "boolean", value)),
        ParamKind::Int { min, max } => {
            let i = check_int(param, value)?;
            if let Some(min) = min.filter(|m| i < *m) {
                return Err(ToolError::out_of_range(param.name, format!("{} is below minimum {}", i, min)));
            }
            if let Some(max) = max.filter(|m| i > *m) {
                return Err(ToolError::out_of_range(param.name, format!("{} is above maximum {}", i, max)));
            }
            Ok(Checked::Int(i))
        }
        ParamKind::IntChoice(allowed) => {
            let i = check_int(param, value)?;
            if !allowed.contains(&i) {
                return Err(ToolError::out_of_range(param.name, format!("{} is not one of {:?}", i, allowed)));
            }
            Ok(Checked::Int(i))
        }
        ParamKind::Choice(allowed) => {
            let s = check_str(param, value)?;
            if !allowed.contains(&s) {
                return Err(ToolError::out_of_range(param.name, format!("'{}' is not one of {:?}", s, allowed)));
            }
            Ok(Checked::Str(s.to_string()))
        }
        ParamKind::StrList => {
            let items = value.as_array().ok_or_else(|| mismatch(param.name, "array of strings", value))?;
            items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| mismatch(param.name, "array of strings", item))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Checked::StrList)
        }
    }
}

/// Generic schema pass, in declaration order. Unknown keys are ignored.
fn check_args(tool: &ToolSchema, args: &Map<String, Value>) -> Result<CheckedArgs, ToolError> {
    let mut checked = CheckedArgs::default();
    for param in tool.params {
        match args.get(param.name).filter(|v| !v.is_null()) {
            Some(value) => {
                checked.0.insert(param.name, check_value(param, value)?);
            }
            None if param.required => return Err(ToolError::missing(param.name)),
            None => {}
        }
    }
    Ok(checked)
}

/// Validate a named tool call for the configured profile
pub fn validate(tool_name: &str, raw: &Value, config: &ServerConfig) -> Result<ValidatedCall, ToolError> {
    let tool = config
        .profile
        .lookup(tool_name)
        .ok_or_else(|| ToolError::UnknownTool(tool_name.to_string()))?;

    let empty = Map::new();
    let obj = match raw {
        Value::Object(map) => map,
        Value::Null => &empty,
        other => return Err(mismatch("arguments", "object", other)),
    };
    let args = check_args(tool, obj)?;

    match tool.kind {
        ToolKind::SetLevel => decode_set_level(&args, config),
        ToolKind::GetGuidance => decode_get_guidance(&args),
        ToolKind::ObliqueStrategy => Ok(ValidatedCall::ObliqueStrategy),
        ToolKind::Thinking => decode_thinking(&args).map(ValidatedCall::Thinking),
    }
}

fn decode_set_level(args: &CheckedArgs, config: &ServerConfig) -> Result<ValidatedCall, ToolError> {
    let code = args.int("level").ok_or_else(|| ToolError::missing("level"))?;
    let level = WhimsyLevel::from_code(code)
        .ok_or_else(|| ToolError::out_of_range("level", format!("{} is not a whimsy level", code)))?;
    let style = match args.str("style") {
        Some(s) => Style::from_wire(s).ok_or_else(|| ToolError::out_of_range("style", s))?,
        None => config.default_style,
    };
    Ok(ValidatedCall::SetLevel { level, style })
}

fn decode_get_guidance(args: &CheckedArgs) -> Result<ValidatedCall, ToolError> {
    let context = args.required_str("context")?.to_string();
    let seriousness = args
        .str("seriousness")
        .map(|s| Seriousness::from_wire(s).ok_or_else(|| ToolError::out_of_range("seriousness", s)))
        .transpose()?;
    Ok(ValidatedCall::GetGuidance { context, seriousness })
}

fn decode_thinking(args: &CheckedArgs) -> Result<ThoughtRecord, ToolError> {
    let mut record = ThoughtRecord::new(
        args.required_str("content")?,
        args.required_index("sequenceIndex")?,
        args.required_index("declaredTotal")?,
    );
    record.continuation_requested = args.required_bool("continuationRequested")?;
    record.joy_score = args.int("joyScore").map(|j| j as u8);
    record.insight = args.string("insightText");
    record.tangents = args.string_list("tangentList");
    record.tone = args
        .str("tone")
        .map(|s| Tone::from_wire(s).ok_or_else(|| ToolError::out_of_range("tone", s)))
        .transpose()?;
    record.feeling = args.string("feelingText");
    record.connection_style = args
        .str("connectionStyle")
        .map(|s| ConnectionStyle::from_wire(s).ok_or_else(|| ToolError::out_of_range("connectionStyle", s)))
        .transpose()?;
    record.next_hint = args.string("nextHint");
    record.is_revision = args.bool("isRevision").unwrap_or(false);
    record.revises_index = args.index("revisesIndex")?;
    record.branch_origin_index = args.index("branchOriginIndex")?;
    record.branch_id = args.string("branchId");
    record.allows_exceeding_total = args.bool("allowsExceedingTotal").unwrap_or(false);
    Ok(record)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::schema::ToolProfile;
    use serde_json::json;

    fn config() -> ServerConfig {
        ServerConfig::default()
    }

    fn thinking_args() -> Value {
        json!({
            "content": "What if clouds were filing cabinets?",
            "continuationRequested": true,
            "sequenceIndex": 1,
            "declaredTotal": 3,
        })
    }

    fn kind_of(tool: &str, args: Value) -> ErrorKind {
        validate(tool, &args, &config()).unwrap_err().kind()
    }

    #[test]
    fn set_level_applies_default_style() {
        let call = validate("set_level", &json!({"level": 2}), &config()).unwrap();
        assert_eq!(call, ValidatedCall::SetLevel { level: WhimsyLevel::Overt, style: Style::Playful });

        let call = validate("set_level", &json!({"level": 0, "style": "gentle-humor"}), &config()).unwrap();
        assert_eq!(call, ValidatedCall::SetLevel { level: WhimsyLevel::Off, style: Style::GentleHumor });
    }

    #[test]
    fn set_level_rejects_bad_values() {
        assert_eq!(kind_of("set_level", json!({})), ErrorKind::MissingField);
        assert_eq!(kind_of("set_level", json!({"level": null})), ErrorKind::MissingField);
        assert_eq!(kind_of("set_level", json!({"level": "high"})), ErrorKind::TypeMismatch);
        assert_eq!(kind_of("set_level", json!({"level": 1.5})), ErrorKind::TypeMismatch);
        assert_eq!(kind_of("set_level", json!({"level": 3})), ErrorKind::OutOfRange);
        assert_eq!(kind_of("set_level", json!({"level": 1, "style": "sarcasm"})), ErrorKind::OutOfRange);
    }

    #[test]
    fn get_guidance_decodes_seriousness() {
        let call = validate("get_guidance", &json!({"context": "tax forms", "seriousness": "high"}), &config()).unwrap();
        assert_eq!(
            call,
            ValidatedCall::GetGuidance { context: "tax forms".to_string(), seriousness: Some(Seriousness::High) }
        );
        assert_eq!(kind_of("get_guidance", json!({"seriousness": "low"})), ErrorKind::MissingField);
        assert_eq!(kind_of("get_guidance", json!({"context": "x", "seriousness": "grave"})), ErrorKind::OutOfRange);
    }

    #[test]
    fn oblique_strategy_ignores_extra_keys() {
        let call = validate("oblique_strategy", &json!({"whatever": 1}), &config()).unwrap();
        assert_eq!(call, ValidatedCall::ObliqueStrategy);
        assert_eq!(validate("oblique_strategy", &Value::Null, &config()).unwrap(), ValidatedCall::ObliqueStrategy);
    }

    #[test]
    fn thinking_minimal_record() {
        let call = validate("thinking", &thinking_args(), &config()).unwrap();
        let ValidatedCall::Thinking(record) = call else {
            panic!("expected thinking call");
        };
        assert_eq!(record.sequence_index, 1);
        assert_eq!(record.declared_total, 3);
        assert!(record.continuation_requested);
        assert!(record.tangents.is_empty());
        assert!(!record.allows_exceeding_total);
    }

    #[test]
    fn thinking_full_record() {
        let mut args = thinking_args();
        let extra = json!({
            "joyScore": 9,
            "insightText": "Storage is just weather that sat down",
            "tangentList": ["rain as deletion", "fog as compression"],
            "tone": "wonder",
            "feelingText": "fizzy",
            "connectionStyle": "metaphor",
            "nextHint": "look at thunder",
            "isRevision": true,
            "revisesIndex": 1,
            "branchOriginIndex": 1,
            "branchId": "weather",
            "allowsExceedingTotal": true,
        });
        args.as_object_mut().unwrap().extend(extra.as_object().unwrap().clone());

        let ValidatedCall::Thinking(r) = validate("thinking", &args, &config()).unwrap() else {
            panic!("expected thinking call");
        };
        assert_eq!(r.joy_score, Some(9));
        assert_eq!(r.tangents, vec!["rain as deletion", "fog as compression"]);
        assert_eq!(r.tone, Some(Tone::Wonder));
        assert_eq!(r.connection_style, Some(ConnectionStyle::Metaphor));
        assert_eq!(r.revises_index, Some(1));
        assert_eq!(r.branch_id.as_deref(), Some("weather"));
        assert!(r.is_revision && r.allows_exceeding_total);
    }

    #[test]
    fn thinking_rejects_blank_content() {
        for content in ["", "   ", "\n\t"] {
            let mut args = thinking_args();
            args["content"] = json!(content);
            assert_eq!(kind_of("thinking", args), ErrorKind::EmptyContent);
        }
    }

    #[test]
    fn thinking_type_and_range_checks() {
        let mut args = thinking_args();
        args["sequenceIndex"] = json!(0);
        assert_eq!(kind_of("thinking", args), ErrorKind::OutOfRange);

        let mut args = thinking_args();
        args["declaredTotal"] = json!("3");
        assert_eq!(kind_of("thinking", args), ErrorKind::TypeMismatch);

        let mut args = thinking_args();
        args["joyScore"] = json!(11);
        assert_eq!(kind_of("thinking", args), ErrorKind::OutOfRange);

        let mut args = thinking_args();
        args["tangentList"] = json!(["ok", 7]);
        assert_eq!(kind_of("thinking", args), ErrorKind::TypeMismatch);

        let mut args = thinking_args();
        args["sequenceIndex"] = json!(u64::MAX);
        assert_eq!(kind_of("thinking", args), ErrorKind::OutOfRange);

        let mut args = thinking_args();
        args.as_object_mut().unwrap().remove("continuationRequested");
        assert_eq!(kind_of("thinking", args), ErrorKind::MissingField);
    }

    #[test]
    fn overflow_is_not_a_schema_error() {
        let mut args = thinking_args();
        args["sequenceIndex"] = json!(5);
        assert!(validate("thinking", &args, &config()).is_ok());
    }

    #[test]
    fn non_object_arguments_are_type_mismatch() {
        assert_eq!(kind_of("thinking", json!([1, 2])), ErrorKind::TypeMismatch);
    }

    #[test]
    fn auto_profile_ignores_optional_fields() {
        let config = ServerConfig { profile: ToolProfile::Auto, ..ServerConfig::default() };
        let mut args = thinking_args();
        args["joyScore"] = json!(99);
        let ValidatedCall::Thinking(r) = validate("thinking", &args, &config).unwrap() else {
            panic!("expected thinking call");
        };
        assert_eq!(r.joy_score, None);
        assert_eq!(
            validate("set_level", &json!({"level": 1}), &config).unwrap_err().kind(),
            ErrorKind::UnknownTool
        );
    }

    #[test]
    fn unknown_tool_is_rejected_before_argument_checks() {
        // Missing arguments would fail validation for a real tool
        assert_eq!(kind_of("nope", json!({})), ErrorKind::UnknownTool);
        assert_eq!(kind_of("nope", json!([1, 2])), ErrorKind::UnknownTool);
        let err = validate("nope", &Value::Null, &config()).unwrap_err();
        assert_eq!(err.to_string(), "Unknown tool: nope");
    }

    #[test]
    fn every_listed_tool_decodes_to_its_own_call() {
        let calls = [
            validate("set_level", &json!({"level": 1}), &config()).unwrap(),
            validate("get_guidance", &json!({"context": "x"}), &config()).unwrap(),
            validate("oblique_strategy", &Value::Null, &config()).unwrap(),
            validate("thinking", &thinking_args(), &config()).unwrap(),
        ];
        assert!(matches!(calls[0], ValidatedCall::SetLevel { .. }));
        assert!(matches!(calls[1], ValidatedCall::GetGuidance { .. }));
        assert_eq!(calls[2], ValidatedCall::ObliqueStrategy);
        assert!(matches!(calls[3], ValidatedCall::Thinking(_)));
    }
}
