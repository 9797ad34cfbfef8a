/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! line delimited JSON-RPC 2.0 tool protocol
//!
//! Each request and response is a single JSON object on its own line. Requests without `id` are notifications
//! and are not answered. Stdout is reserved for protocol frames, all logging has to go to stderr

use serde::{Serialize,Deserialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug,info,warn};
use crate::{errors::{Result, JeoServerError}, tools::{ToolContext, TOOL_SPECS}};

pub const JSONRPC_VERSION: &str = "2.0";
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "jeo_common::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "jeo_common::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    pub fn result (id: Value, result: Value) -> Self {
        RpcResponse { jsonrpc: JSONRPC_VERSION.into(), id, result: Some(result), error: None }
    }

    pub fn error (id: Value, code: i64, message: impl ToString) -> Self {
        RpcResponse { jsonrpc: JSONRPC_VERSION.into(), id, result: None, error: Some( RpcError { code, message: message.to_string() }) }
    }
}

#[derive(Debug,Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

fn initialize_result (ctx: &ToolContext) -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": { "listChanged": false } },
        "serverInfo": { "name": ctx.config.name, "version": env!("CARGO_PKG_VERSION") }
    })
}

/// process a single request. Returns None for notifications
pub async fn handle_request (ctx: &ToolContext, req: RpcRequest) -> Option<RpcResponse> {
    let Some(id) = req.id else {
        debug!("notification {}", req.method);
        return None
    };

    let response = match req.method.as_str() {
        "initialize" => RpcResponse::result( id, initialize_result( ctx)),
        "ping" => RpcResponse::result( id, json!({})),
        "tools/list" => RpcResponse::result( id, json!({ "tools": TOOL_SPECS.as_slice() })),
        "tools/call" => match serde_json::from_value::<CallParams>( req.params) {
            Ok(params) => match ctx.call_tool( &params.name, params.arguments).await {
                Ok(v) => RpcResponse::result( id, tool_content( &v, false)),
                Err(JeoServerError::UnknownTool(name)) => RpcResponse::error( id, INVALID_PARAMS, format!("unknown tool: {name}")),
                Err(e) => {
                    warn!("tool {} failed: {e}", params.name);
                    RpcResponse::result( id, tool_content( &json!({ "error": e.to_string() }), true))
                }
            }
            Err(e) => RpcResponse::error( id, INVALID_PARAMS, e)
        }
        other => RpcResponse::error( id, METHOD_NOT_FOUND, format!("method not found: {other}"))
    };
    Some(response)
}

/// tool results are returned as a single text content item holding the JSON result
fn tool_content (v: &Value, is_error: bool) -> Value {
    json!({ "content": [ { "type": "text", "text": v.to_string() } ], "isError": is_error })
}

/// process one protocol line, returning the serialized response line if there is one
pub async fn handle_line (ctx: &ToolContext, line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() { return None }

    let response = match serde_json::from_str::<Value>( line) {
        Err(e) => Some( RpcResponse::error( Value::Null, PARSE_ERROR, format!("parse error: {e}"))),
        Ok(v) => match serde_json::from_value::<RpcRequest>( v.clone()) {
            Ok(req) => handle_request( ctx, req).await,
            Err(e) => Some( RpcResponse::error( v.get("id").cloned().unwrap_or(Value::Null), INVALID_REQUEST, format!("invalid request: {e}")))
        }
    };

    response.and_then(|r| serde_json::to_string( &r).ok())
}

/// serve requests from `reader` until EOF
pub async fn serve<R,W> (ctx: &ToolContext, reader: R, mut writer: W) -> Result<()> where R: AsyncBufRead + Unpin, W: AsyncWrite + Unpin {
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(response) = handle_line( ctx, &line).await {
            writer.write_all( response.as_bytes()).await?;
            writer.write_all( b"\n").await?;
            writer.flush().await?;
        }
    }
    info!("input closed, terminating");
    Ok(())
}

pub async fn serve_stdio (ctx: &ToolContext) -> Result<()> {
    info!("serving {} tools on stdio", TOOL_SPECS.len());
    serve( ctx, BufReader::new( tokio::io::stdin()), tokio::io::stdout()).await
}
