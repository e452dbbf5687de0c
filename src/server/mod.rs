//! Model Context Protocol server over stdio.
//!
//! Each line on stdin is one JSON-RPC 2.0 message; each response is written as one
//! line on stdout. Logging must therefore go to stderr while the server runs.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::scribe::Scribe;

pub mod tools;

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "mcp-youtube";

const PARSE_ERROR: i64 = -32700;
const INVALID_REQUEST: i64 = -32600;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;
const INTERNAL_ERROR: i64 = -32603;

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: Option<String>,

    /// Absent for notifications
    #[serde(default)]
    pub id: Option<Value>,

    pub method: String,

    #[serde(default)]
    pub params: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

pub struct McpServer {
    scribe: Scribe,
}

impl McpServer {
    pub fn new(scribe: Scribe) -> Self {
        Self { scribe }
    }

    /// Handle one raw line; `None` when nothing should be written back
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ))
            }
        };

        // serde maps `"id": null` to `None`; only a missing id marks a notification
        let has_id = value.get("id").is_some();
        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(mut request) => {
                if has_id && request.id.is_none() {
                    request.id = Some(Value::Null);
                }
                self.dispatch(request).await
            }
            Err(e) => Some(JsonRpcResponse::failure(
                id,
                INVALID_REQUEST,
                format!("Invalid request: {}", e),
            )),
        }
    }

    pub async fn dispatch(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        tracing::debug!("Received {}", request.method);

        let Some(id) = request.id else {
            // Notifications (e.g. notifications/initialized) get no reply
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(
                id,
                json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": { "tools": {} },
                    "serverInfo": {
                        "name": SERVER_NAME,
                        "version": env!("CARGO_PKG_VERSION"),
                    }
                }),
            ),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(id, json!({ "tools": tools::list_tools() })),
            "tools/call" => {
                let params: CallToolParams =
                    match serde_json::from_value(request.params.unwrap_or(Value::Null)) {
                        Ok(params) => params,
                        Err(e) => {
                            return Some(JsonRpcResponse::failure(
                                id,
                                INVALID_PARAMS,
                                format!("Invalid params: {}", e),
                            ))
                        }
                    };

                let result = tools::call_tool(&self.scribe, &params.name, params.arguments).await;
                match serde_json::to_value(result) {
                    Ok(result) => JsonRpcResponse::success(id, result),
                    Err(e) => JsonRpcResponse::failure(id, INTERNAL_ERROR, e.to_string()),
                }
            }
            other => JsonRpcResponse::failure(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            ),
        };

        Some(response)
    }

    /// Serve requests from stdin until it closes
    pub async fn serve_stdio(&self) -> Result<()> {
        tracing::info!("MCP YouTube server running on stdio");

        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        let mut lines = stdin.lines();

        while let Some(line) = lines.next_line().await.context("Failed to read from stdin")? {
            if let Some(response) = self.handle_line(&line).await {
                write_message(&mut stdout, &response).await?;
            }
        }

        tracing::info!("stdin closed, shutting down");
        Ok(())
    }
}

async fn write_message<W>(writer: &mut W, response: &JsonRpcResponse) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut payload = serde_json::to_vec(response).context("Failed to serialize response")?;
    payload.push(b'\n');

    writer
        .write_all(&payload)
        .await
        .context("Failed to write response")?;
    writer.flush().await.context("Failed to flush response")?;

    Ok(())
}
