// Whimsy Server - Error Taxonomy
// Copyright 2026 Joseph Stone - All Rights Reserved
//
// Every failure a tool call can hit. All of them are recoverable:
// the dispatcher turns each one into an isError envelope.

use thiserror::Error;

/// Stable tag for a `ToolError`, independent of its message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingField,
    TypeMismatch,
    OutOfRange,
    EmptyContent,
    SequenceOverflow,
    UnknownTool,
    SourceUnavailable,
    EmptyStrategySet,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    #[error("Missing required field '{field}'")]
    MissingField { field: String },

    #[error("Invalid type for '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Value out of range for '{field}': {detail}")]
    OutOfRange { field: String, detail: String },

    #[error("Field 'content' must not be empty")]
    EmptyContent,

    #[error(
        "Sequence overflow: sequenceIndex {index} exceeds declaredTotal {total} \
         (set allowsExceedingTotal to continue past the plan)"
    )]
    SequenceOverflow { index: u32, total: u32 },

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Oblique strategies file not found or unreadable: {path} ({reason})")]
    SourceUnavailable { path: String, reason: String },

    #[error("Oblique strategies file has no usable lines: {path}")]
    EmptyStrategySet { path: String },
}

impl ToolError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ToolError::MissingField { .. } => ErrorKind::MissingField,
            ToolError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            ToolError::OutOfRange { .. } => ErrorKind::OutOfRange,
            ToolError::EmptyContent => ErrorKind::EmptyContent,
            ToolError::SequenceOverflow { .. } => ErrorKind::SequenceOverflow,
            ToolError::UnknownTool(_) => ErrorKind::UnknownTool,
            ToolError::SourceUnavailable { .. } => ErrorKind::SourceUnavailable,
            ToolError::EmptyStrategySet { .. } => ErrorKind::EmptyStrategySet,
        }
    }

    pub(crate) fn missing(field: &str) -> Self {
        ToolError::MissingField { field: field.to_string() }
    }

    pub(crate) fn out_of_range(field: &str, detail: impl Into<String>) -> Self {
        ToolError::OutOfRange { field: field.to_string(), detail: detail.into() }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_field() {
        let err = ToolError::missing("content");
        assert_eq!(err.kind(), ErrorKind::MissingField);
        assert!(err.to_string().contains("'content'"));

        let err = ToolError::out_of_range("joyScore", "11 is above maximum 10");
        assert!(err.to_string().contains("joyScore"));
        assert!(err.to_string().contains("above maximum"));
    }

    #[test]
    fn overflow_message_mentions_sequence_overflow() {
        let err = ToolError::SequenceOverflow { index: 5, total: 3 };
        let msg = err.to_string();
        assert!(msg.contains("Sequence overflow"), "{}", msg);
        assert!(msg.contains('5') && msg.contains('3'));
    }

    #[test]
    fn unknown_tool_echoes_name() {
        let err = ToolError::UnknownTool("nope".to_string());
        assert_eq!(err.to_string(), "Unknown tool: nope");
    }
}
