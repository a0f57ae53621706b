//! MCP Server implementation
//!
//! Transport-agnostic JSON-RPC dispatcher plus the stdio transport loop. The
//! HTTP binding drives the same dispatcher through [`McpServer::handle_request`].

use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::mcp::tools::ToolHandler;
use crate::mcp::types::*;
use crate::smtp::Mailer;

/// MCP Server info
const SERVER_NAME: &str = "email";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP Server for SMTP email
pub struct McpServer {
    /// Tool handler
    tool_handler: ToolHandler,

    /// Whether the client completed the initialize handshake
    initialized: AtomicBool,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self {
            tool_handler: ToolHandler::new(mailer),
            initialized: AtomicBool::new(false),
        }
    }

    /// Run the server on stdio
    pub async fn run_stdio(&self) -> Result<()> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();

        let reader = stdin.lock();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match self.handle_message(&line).await {
                Some(response) => {
                    let response_str = serde_json::to_string(&response)?;
                    writeln!(stdout, "{}", response_str)?;
                    stdout.flush()?;
                }
                None => {
                    // Notification, no response needed
                }
            }
        }

        Ok(())
    }

    /// Handle an incoming JSON-RPC message
    pub async fn handle_message(&self, message: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(message) {
            Ok(req) => req,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    RequestId::Number(0),
                    JsonRpcError::parse_error(e.to_string()),
                ));
            }
        };

        self.handle_request(request).await
    }

    /// Handle a parsed JSON-RPC request
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.method == methods::INITIALIZED {
            self.initialized.store(true, Ordering::Relaxed);
            return None; // Notification, no response
        }

        // Id-less messages are notifications and never get a response
        let id = match request.id {
            Some(id) => id,
            None => {
                tracing::debug!("ignoring notification: {}", request.method);
                return None;
            }
        };

        match request.method.as_str() {
            methods::INITIALIZE => {
                let result = self.handle_initialize();
                Some(JsonRpcResponse::success(id, result))
            }
            methods::PING => Some(JsonRpcResponse::success(id, serde_json::json!({}))),
            methods::LIST_TOOLS => {
                let result = self.handle_list_tools();
                Some(JsonRpcResponse::success(id, result))
            }
            methods::CALL_TOOL => {
                let result = self.handle_call_tool(request.params).await;
                Some(JsonRpcResponse::success(id, result))
            }
            _ => Some(JsonRpcResponse::error(
                id,
                JsonRpcError::method_not_found(&request.method),
            )),
        }
    }

    /// Handle initialize request
    fn handle_initialize(&self) -> Value {
        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {}),
            },
        };

        serde_json::to_value(result).unwrap_or_default()
    }

    /// Handle list tools request
    fn handle_list_tools(&self) -> Value {
        let result = ListToolsResult {
            tools: self.tool_handler.list_tools(),
        };

        serde_json::to_value(result).unwrap_or_default()
    }

    /// Handle call tool request
    ///
    /// Every invocation produces a JSON-RPC success carrying either the tool
    /// result or the error envelope; tool failures never become protocol
    /// faults and never terminate the serving loop.
    async fn handle_call_tool(&self, params: Option<Value>) -> Value {
        let params: CallToolParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return to_value(CallToolResult::error(format!(
                        "Invalid tool parameters: {}",
                        e
                    )));
                }
            },
            None => {
                return to_value(CallToolResult::error("Missing tool parameters"));
            }
        };

        let result = self
            .tool_handler
            .call_tool(&params.name, params.arguments)
            .await;
        to_value(result)
    }
}

fn to_value(result: CallToolResult) -> Value {
    serde_json::to_value(&result).unwrap_or_else(|e| {
        tracing::error!("failed to serialize tool result: {}", e);
        serde_json::json!({
            "content": [{ "type": "text", "text": format!("{{\"error\":\"{}\"}}", e) }]
        })
    })
}
