mod cli;
mod sse;
mod stdio;
mod tools;

pub use cli::App;

use crate::client::ForemClient;
use crate::prelude::*;
use serde::{Deserialize, Serialize};

// JSON-RPC 2.0 types
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    id: Option<serde_json::Value>,
    method: String,
    params: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    jsonrpc: String,
    id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

// MCP Protocol types
#[derive(Debug, Serialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    // A missing credential should fail loudly here, before the transport
    // starts accepting requests.
    let client = ForemClient::from_env()?;

    match app.command {
        cli::Commands::Stdio => stdio::run_stdio(client, global).await,
        cli::Commands::Sse(options) => sse::run_sse(options, client, global).await,
    }
}

pub async fn handle_request(
    request_str: &str,
    client: &ForemClient,
    global: &crate::Global,
) -> JsonRpcResponse {
    let request: JsonRpcRequest = match serde_json::from_str(request_str) {
        Ok(req) => req,
        Err(e) => {
            return JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id: None,
                result: None,
                error: Some(JsonRpcError {
                    code: -32700,
                    message: format!("Parse error: {e}"),
                    data: None,
                }),
            };
        }
    };

    let result = match request.method.as_str() {
        "initialize" => tools::handle_initialize(),
        "tools/list" => tools::handle_tools_list(),
        "tools/call" => tools::handle_tools_call(request.params, client, global).await,
        method => Err(JsonRpcError {
            code: -32601,
            message: format!("Method not found: {method}"),
            data: None,
        }),
    };

    match result {
        Ok(value) => JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id,
            result: Some(value),
            error: None,
        },
        Err(error) => JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id,
            result: None,
            error: Some(error),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ForemConfig;
    use std::time::Duration;

    fn test_client() -> ForemClient {
        ForemClient::new(&ForemConfig {
            api_key: "test-api-key".to_string(),
            base_url: "http://127.0.0.1:1".to_string(),
            timeout: Duration::from_secs(1),
        })
        .expect("client")
    }

    fn test_global() -> crate::Global {
        crate::Global { verbose: false }
    }

    #[tokio::test]
    async fn test_handle_request_rejects_invalid_json() {
        let response = handle_request("not json", &test_client(), &test_global()).await;
        let error = response.error.expect("parse error");
        assert_eq!(error.code, -32700);
    }

    #[tokio::test]
    async fn test_handle_request_rejects_unknown_method() {
        let request = r#"{"jsonrpc":"2.0","id":1,"method":"resources/list"}"#;
        let response = handle_request(request, &test_client(), &test_global()).await;
        let error = response.error.expect("method error");
        assert_eq!(error.code, -32601);
        assert!(error.message.contains("resources/list"));
    }

    #[tokio::test]
    async fn test_handle_request_lists_tools() {
        let request = r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#;
        let response = handle_request(request, &test_client(), &test_global()).await;
        let result = response.result.expect("tools list");
        let tools = result.get("tools").and_then(|t| t.as_array()).expect("tools");
        assert_eq!(tools.len(), 17);
    }
}
