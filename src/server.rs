use crate::tools::Tool;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::{self, BufRead};
use tracing::{debug, error, info};

#[derive(Serialize, Deserialize, Debug)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: Option<Value>,
    id: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug)]
struct JsonRpcResponse {
    jsonrpc: String,
    result: Option<Value>,
    error: Option<JsonRpcError>,
    id: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug)]
struct JsonRpcError {
    code: i32,
    message: String,
    data: Option<Value>,
}

impl JsonRpcResponse {
    fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            result: Some(result),
            error: None,
            id,
        }
    }

    fn failure(id: Option<Value>, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
                data: None,
            }),
            id,
        }
    }
}

/// Serves the given tool set over line-delimited JSON-RPC on stdio.
/// Logging goes to stderr, so stdout stays a clean protocol channel.
pub async fn run<C>(client: C, tools: Vec<Box<dyn Tool<C>>>) -> Result<()> {
    let registry: HashMap<&'static str, Box<dyn Tool<C>>> =
        tools.into_iter().map(|tool| (tool.name(), tool)).collect();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    info!("MCP server ready. Waiting for JSON-RPC requests on stdin...");

    while let Some(Ok(line)) = lines.next() {
        if line.trim().is_empty() {
            continue;
        }

        debug!("Received request: {line}");

        let request: JsonRpcRequest = match serde_json::from_str(&line) {
            Ok(request) => request,
            Err(err) => {
                error!("Failed to parse JSON-RPC request: {err}");
                continue;
            }
        };

        let response = handle_request(&request, &client, &registry).await;
        println!("{}", serde_json::to_string(&response)?);
    }

    Ok(())
}

async fn handle_request<C>(
    request: &JsonRpcRequest,
    client: &C,
    tools: &HashMap<&'static str, Box<dyn Tool<C>>>,
) -> JsonRpcResponse {
    match request.method.as_str() {
        "tools/list" => {
            let tool_list: Vec<Value> = tools
                .values()
                .map(|tool| {
                    json!({
                        "name": tool.name(),
                        "description": tool.description(),
                        "inputSchema": tool.schema()
                    })
                })
                .collect();
            JsonRpcResponse::success(request.id.clone(), json!({ "tools": tool_list }))
        }
        "tools/call" => handle_tool_call(request, client, tools).await,
        _ => JsonRpcResponse::failure(request.id.clone(), -32601, "Method not found".into()),
    }
}

async fn handle_tool_call<C>(
    request: &JsonRpcRequest,
    client: &C,
    tools: &HashMap<&'static str, Box<dyn Tool<C>>>,
) -> JsonRpcResponse {
    let Some(params) = &request.params else {
        return JsonRpcResponse::failure(request.id.clone(), -32602, "Missing params".into());
    };
    let Some(name) = params.get("name").and_then(Value::as_str) else {
        return JsonRpcResponse::failure(
            request.id.clone(),
            -32602,
            "Missing 'name' parameter".into(),
        );
    };
    let Some(tool) = tools.get(name) else {
        return JsonRpcResponse::failure(
            request.id.clone(),
            -32601,
            format!("Tool not found: {name}"),
        );
    };

    let args = params.get("arguments").cloned().unwrap_or(json!({}));

    match tool.call(client, args).await {
        // Standard MCP 'content' for compatibility, plus 'data' for agents.
        Ok(result) => JsonRpcResponse::success(
            request.id.clone(),
            json!({
                "content": [{
                    "type": "text",
                    "text": serde_json::to_string_pretty(&result)
                        .unwrap_or_else(|_| result.to_string())
                }],
                "data": result
            }),
        ),
        Err(err) => JsonRpcResponse::failure(
            request.id.clone(),
            -32603,
            format!("Tool execution failed: {err}"),
        ),
    }
}
