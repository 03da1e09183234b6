// Whimsy Server - Library Root
// Copyright 2026 Joseph Stone - All Rights Reserved
//
// All modules exported here for use by the binary and tests.

pub mod config;
pub mod error;
pub mod paths;
pub mod schema;
pub mod session;
pub mod thought;
pub mod validate;

/// Static level/style text tables
pub mod guidance;

/// ThoughtRecord -> display text
pub mod format;

/// Random line from the external strategies file
pub mod strategy;

/// Lookup -> validate -> handle -> envelope
pub mod dispatch;

/// MCP stdio JSON-RPC transport
pub mod mcp;
