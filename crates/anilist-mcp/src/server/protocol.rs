//! JSON-RPC 2.0 message types shared by both transports.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};

use crate::tools::ToolAnnotations;

/// Invalid JSON was received.
pub const PARSE_ERROR: i32 = -32700;
/// The method does not exist.
pub const METHOD_NOT_FOUND: i32 = -32601;
/// Unknown tool, missing tool name or invalid tool arguments.
pub const INVALID_PARAMS: i32 = -32602;
/// Server-side failure.
pub const INTERNAL_ERROR: i32 = -32603;
/// Transport-level rejection (e.g. unsupported HTTP method).
pub const SERVER_ERROR: i32 = -32000;

/// Protocol version assumed when the client does not send one.
pub const DEFAULT_PROTOCOL_VERSION: &str = "2025-03-26";

/// JSON-RPC 2.0 request or notification.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    /// Absent for notifications. An explicit `null` is kept as `Some(Value::Null)`.
    #[serde(default, deserialize_with = "present_id")]
    pub id: Option<serde_json::Value>,
}

fn present_id<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

impl JsonRpcRequest {
    /// Notifications carry no id and receive no response.
    #[must_use]
    pub const fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// JSON-RPC 2.0 response.
///
/// `id` is always serialized; it is `null` when the request id is unknown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: Cow<'static, str>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcResponse {
    const VERSION: &'static str = "2.0";

    #[must_use]
    pub fn success(id: Option<serde_json::Value>, result: serde_json::Value) -> Self {
        Self { jsonrpc: Cow::Borrowed(Self::VERSION), result: Some(result), error: None, id }
    }

    #[must_use]
    pub fn error(id: Option<serde_json::Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: Cow::Borrowed(Self::VERSION),
            result: None,
            error: Some(JsonRpcError { code, message: message.into(), data: None }),
            id,
        }
    }
}

/// Tool entry in a `tools/list` response.
#[derive(Debug, Serialize)]
pub struct McpToolInfo {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
    pub annotations: ToolAnnotations,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_without_id_serializes_null() {
        let body = serde_json::to_string(&JsonRpcResponse::error(
            None,
            INTERNAL_ERROR,
            "Internal server error",
        ))
        .unwrap();
        assert_eq!(
            body,
            r#"{"jsonrpc":"2.0","error":{"code":-32603,"message":"Internal server error"},"id":null}"#
        );
    }

    #[test]
    fn test_request_without_id_is_notification() {
        let req: JsonRpcRequest = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized"
        }))
        .unwrap();
        assert!(req.is_notification());
        assert!(req.params.is_null());
    }

    #[test]
    fn test_null_id_is_a_request() {
        let req: JsonRpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#).unwrap();
        assert!(!req.is_notification());
        assert_eq!(req.id, Some(serde_json::Value::Null));
    }

    #[test]
    fn test_success_omits_error() {
        let value = serde_json::to_value(JsonRpcResponse::success(Some(json!(7)), json!({}))).unwrap();
        assert_eq!(value, json!({"jsonrpc": "2.0", "result": {}, "id": 7}));
    }
}
