// Whimsy Server - MCP Server (JSON-RPC 2.0 over stdio)
// Copyright 2026 Joseph Stone - All Rights Reserved
//
// One JSON message per line. stdout carries JSON-RPC only; logs go to stderr.
// Exposes: set_level, get_guidance, oblique_strategy, thinking
// (or the subset selected by the tool profile).

use crate::dispatch::{Dispatcher, ToolCallRequest};
use crate::schema;
use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::future::Future;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "whimsy-server";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// JSON-RPC success response
fn response(id: &Value, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result,
    })
}

/// JSON-RPC error response
fn error_response(id: &Value, code: i64, message: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message },
    })
}

/// Why the serve loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    EndOfInput,
    Interrupted,
}

/// Handle one decoded message. Returns None for notifications.
/// A message without an id is a notification and never gets a reply.
pub fn handle_message(dispatcher: &mut Dispatcher, msg: &Value) -> Option<Value> {
    let method = msg["method"].as_str().unwrap_or("");
    let id = &msg["id"];
    let params = &msg["params"];

    log::debug!("Received: {}", method);

    if id.is_null() {
        if method != "notifications/initialized" {
            log::debug!("Ignoring notification: {}", method);
        }
        return None;
    }

    match method {
        "initialize" => Some(response(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": SERVER_VERSION,
                }
            }),
        )),

        "tools/list" => Some(response(
            id,
            json!({ "tools": schema::tool_definitions(dispatcher.profile()) }),
        )),

        "tools/call" => {
            let request = ToolCallRequest::new(
                params["name"].as_str().unwrap_or(""),
                params.get("arguments").cloned().unwrap_or(Value::Null),
            );
            let envelope = dispatcher.handle(&request);
            match serde_json::to_value(&envelope) {
                Ok(result) => Some(response(id, result)),
                Err(e) => Some(error_response(id, -32603, &format!("Failed to encode result: {}", e))),
            }
        }

        "ping" => Some(response(id, json!({}))),

        _ => Some(error_response(id, -32601, &format!("Unknown method: {}", method))),
    }
}

async fn write_message<W: AsyncWrite + Unpin>(out: &mut W, msg: &Value) -> Result<()> {
    let mut line = serde_json::to_vec(msg)?;
    line.push(b'\n');
    out.write_all(&line).await.context("Failed to write to stdout")?;
    out.flush().await.context("Failed to flush stdout")?;
    Ok(())
}

/// Serve newline-delimited JSON-RPC from `input` to `output` until the
/// input ends or `shutdown` resolves.
pub async fn serve<R, W, F>(dispatcher: &mut Dispatcher, input: R, output: &mut W, shutdown: F) -> Result<Shutdown>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    F: Future,
{
    let mut lines = input.lines();
    tokio::pin!(shutdown);

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line,
            _ = &mut shutdown => {
                log::info!("Interrupt received, shutting down");
                return Ok(Shutdown::Interrupted);
            }
        };

        let line = match line {
            Ok(Some(l)) => l,
            Ok(None) => {
                log::info!("stdin closed, shutting down");
                return Ok(Shutdown::EndOfInput);
            }
            Err(e) => {
                log::warn!("stdin read error: {}", e);
                continue;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let msg: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("JSON parse error: {}", e);
                continue;
            }
        };

        if let Some(reply) = handle_message(dispatcher, &msg) {
            write_message(output, &reply).await?;
        }
    }
}

/// Main MCP server loop on stdio: runs until stdin closes or Ctrl-C.
/// The caller must exit the process on `Shutdown::Interrupted`; the
/// blocking stdin read cannot be cancelled and would stall runtime teardown.
pub async fn run(mut dispatcher: Dispatcher) -> Result<Shutdown> {
    log::info!("Starting {} v{}", SERVER_NAME, SERVER_VERSION);
    log::info!("Profile: {:?}", dispatcher.profile());

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let reason = serve(&mut dispatcher, stdin, &mut stdout, tokio::signal::ctrl_c()).await?;

    log::info!("Session at exit: {}", dispatcher.session().status_summary());
    Ok(reason)
}

// ============================================================================
// TESTS
// ============================================================================
