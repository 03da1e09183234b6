// Whimsy Server - Tool Dispatcher
// Copyright 2026 Joseph Stone - All Rights Reserved
//
// Every tool call passes through here. Validate (lookup + arguments) -> Handle -> Envelope.
// Failures of any kind become isError envelopes; nothing escapes to the transport.

use crate::config::ServerConfig;
use crate::error::ToolError;
use crate::format::{self, RenderMode};
use crate::schema::ToolProfile;
use crate::session::Session;
use crate::strategy::StrategyPicker;
use crate::validate::{self, ValidatedCall};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Decoded tools/call request
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolCallRequest {
    #[serde(rename = "name")]
    pub tool_name: String,
    #[serde(default)]
    pub arguments: Value,
}

impl ToolCallRequest {
    pub fn new(tool_name: impl Into<String>, arguments: Value) -> Self {
        Self { tool_name: tool_name.into(), arguments }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

/// Fixed-shape response envelope for every tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse {
    pub content: Vec<ContentBlock>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl ToolResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock { kind: "text".to_string(), text: text.into() }],
            is_error: false,
        }
    }

    pub fn error(err: &ToolError) -> Self {
        Self { is_error: true, ..Self::text(err.to_string()) }
    }

    /// Text of the single content block
    pub fn message(&self) -> &str {
        self.content.first().map(|c| c.text.as_str()).unwrap_or("")
    }
}

/// Owns the session; the only place it is mutated
pub struct Dispatcher {
    config: ServerConfig,
    session: Session,
    picker: StrategyPicker,
}

impl Dispatcher {
    pub fn new(config: ServerConfig, picker: StrategyPicker) -> Self {
        let session = Session::new(config.initial_level, config.default_style);
        Self { config, session, picker }
    }

    pub fn profile(&self) -> ToolProfile {
        self.config.profile
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Handle one call to completion. Never fails.
    pub fn handle(&mut self, request: &ToolCallRequest) -> ToolResponse {
        log::debug!("CALL {} | {}", request.tool_name, request.arguments);
        match self.try_handle(request) {
            Ok(text) => ToolResponse::text(text),
            Err(err) => {
                log::warn!("FAIL {} | {:?}: {}", request.tool_name, err.kind(), err);
                ToolResponse::error(&err)
            }
        }
    }

    fn try_handle(&mut self, request: &ToolCallRequest) -> Result<String, ToolError> {
        match validate::validate(&request.tool_name, &request.arguments, &self.config)? {
            ValidatedCall::SetLevel { level, style } => {
                self.session.set_level(level, Some(style));
                Ok(format!(
                    "Whimsy level set to {} ({}) with style {}.",
                    level.label(),
                    level.code(),
                    style.as_str()
                ))
            }
            ValidatedCall::GetGuidance { context, seriousness } => Ok(self.session.guidance(&context, seriousness)),
            ValidatedCall::ObliqueStrategy => self.picker.pick(),
            ValidatedCall::Thinking(record) => {
                if record.overflows() {
                    return Err(ToolError::SequenceOverflow {
                        index: record.sequence_index,
                        total: record.declared_total,
                    });
                }
                let mode = match self.config.profile {
                    ToolProfile::Auto => RenderMode::Auto,
                    ToolProfile::Full | ToolProfile::Thinking => RenderMode::Full,
                };
                let rendered = format::render(&record, mode);
                self.session.record_thought(record);
                Ok(format!("{}\n\n{}", rendered, self.session.status_summary()))
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
