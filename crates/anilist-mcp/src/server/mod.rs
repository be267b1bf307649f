//! MCP server implementation.
//!
//! Provides a stdio transport (one long-lived server) and a stateless
//! HTTP transport (one server per request, built by [`create_server`]).

pub mod protocol;
pub mod stdio;
pub mod transport;

use std::net::SocketAddr;

use serde_json::{Value, json};

use crate::config::Config;
use crate::error::ToolError;
use crate::tools::{self, McpTool, ToolContext};

use protocol::{
    DEFAULT_PROTOCOL_VERSION, INTERNAL_ERROR, INVALID_PARAMS, JsonRpcRequest, JsonRpcResponse,
    METHOD_NOT_FOUND, McpToolInfo,
};

/// Name reported in `serverInfo` and by the health endpoint.
pub const SERVER_NAME: &str = "anilist-mcp";

/// MCP server for AniList.
pub struct McpServer {
    /// Tool execution context.
    ctx: ToolContext,

    /// Registered tools.
    tools: Vec<Box<dyn McpTool>>,
}

/// Build a server with its own client for `config`.
///
/// # Errors
///
/// Returns error if the HTTP client cannot be constructed.
pub fn create_server(config: Config) -> anyhow::Result<McpServer> {
    let ctx = ToolContext::from_config(&config)?;
    Ok(McpServer::new(ctx))
}

impl McpServer {
    /// Create a new MCP server over an existing context.
    #[must_use]
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx, tools: tools::register_all_tools() }
    }

    /// Run the server in stdio mode.
    ///
    /// # Errors
    ///
    /// Returns error on I/O failure.
    pub async fn run_stdio(self) -> anyhow::Result<()> {
        tracing::info!("Starting MCP server in stdio mode");
        tracing::info!("Registered {} tools", self.tools.len());

        stdio::run_stdio(&self).await
    }

    /// Run the stateless HTTP transport.
    ///
    /// `config` is the default every request starts from.
    ///
    /// # Errors
    ///
    /// Returns error on bind or server failure.
    pub async fn run_http(config: Config, port: u16, cors_origin: Option<&str>) -> anyhow::Result<()> {
        tracing::info!("Starting MCP server in HTTP mode on port {}", port);

        let router = transport::create_router(config, cors_origin);
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        tracing::info!("HTTP server listening on http://{}/mcp", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }

    /// Dispatch one JSON-RPC message.
    ///
    /// Returns `None` for notifications.
    pub async fn handle_request(&self, req: &JsonRpcRequest) -> Option<JsonRpcResponse> {
        if req.is_notification() {
            tracing::debug!(method = %req.method, "Received notification");
            return None;
        }

        let id = req.id.clone();
        let response = match req.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, initialize_result(&req.params)),
            "tools/list" => JsonRpcResponse::success(id, json!({ "tools": self.tool_infos() })),
            "tools/call" => self.call_tool(id, &req.params).await,
            "ping" | "notifications/initialized" | "initialized" => {
                JsonRpcResponse::success(id, json!({}))
            }
            _ => JsonRpcResponse::error(id, METHOD_NOT_FOUND, format!("Method not found: {}", req.method)),
        };
        Some(response)
    }

    async fn call_tool(&self, id: Option<Value>, params: &Value) -> JsonRpcResponse {
        let Some(tool_name) = params.get("name").and_then(Value::as_str) else {
            return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing 'name' parameter");
        };

        let Some(tool) = self.get_tool(tool_name) else {
            return JsonRpcResponse::error(id, INVALID_PARAMS, format!("Tool not found: {tool_name}"));
        };

        let arguments = match params.get("arguments") {
            None | Some(Value::Null) => json!({}),
            Some(args) => args.clone(),
        };

        tracing::info!(tool = %tool_name, "Executing tool");

        match tool.execute(&self.ctx, arguments).await {
            Ok(output) => match serde_json::to_value(&output) {
                Ok(result) => JsonRpcResponse::success(id, result),
                Err(e) => {
                    tracing::error!(tool = %tool_name, error = %e, "Failed to encode tool result");
                    JsonRpcResponse::error(id, INTERNAL_ERROR, "Internal error")
                }
            },
            Err(e @ ToolError::Validation { .. }) => {
                tracing::info!(tool = %tool_name, error = %e, "Rejected tool arguments");
                JsonRpcResponse::error(
                    id,
                    INVALID_PARAMS,
                    format!("Invalid arguments for tool {tool_name}: {}", e.to_user_message()),
                )
            }
            Err(e) => {
                tracing::error!(tool = %tool_name, error = %e, "Tool execution failed");
                JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_user_message())
            }
        }
    }

    fn tool_infos(&self) -> Vec<McpToolInfo> {
        self.tools
            .iter()
            .map(|t| McpToolInfo {
                name: t.name(),
                description: t.description(),
                input_schema: t.input_schema(),
                annotations: t.annotations(),
            })
            .collect()
    }

    /// Get tool by name.
    #[must_use]
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.tools.iter().find(|t| t.name() == name).map(|t| t.as_ref())
    }

    /// List all available tools.
    #[must_use]
    pub fn list_tools(&self) -> Vec<(&str, &str)> {
        self.tools.iter().map(|t| (t.name(), t.description())).collect()
    }

    /// Get tool context for execution.
    #[must_use]
    pub const fn context(&self) -> &ToolContext {
        &self.ctx
    }
}

impl std::fmt::Debug for McpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpServer").field("tools", &self.tools.len()).finish()
    }
}

fn initialize_result(params: &Value) -> Value {
    let protocol_version = params
        .get("protocolVersion")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PROTOCOL_VERSION);

    tracing::info!("MCP initialize: protocol version {}", protocol_version);

    json!({
        "protocolVersion": protocol_version,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
