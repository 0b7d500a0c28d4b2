//! MCP wire protocol types
//!
//! Based on the Model Context Protocol specification (JSON-RPC 2.0).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC request to an MCP server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpRequest {
    pub jsonrpc: String,
    pub id: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl McpRequest {
    /// Create a new MCP request
    pub fn new(id: u64, method: impl Into<String>, params: Option<Value>) -> Self {
        McpRequest {
            jsonrpc: "2.0".to_string(),
            id,
            method: method.into(),
            params,
        }
    }

    /// Create an initialize request
    pub fn initialize(id: u64) -> Self {
        Self::new(
            id,
            "initialize",
            Some(serde_json::json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": {
                    "name": "chimera-skills",
                    "version": env!("CARGO_PKG_VERSION")
                }
            })),
        )
    }

    /// Create a tools/call request
    pub fn call_tool(id: u64, name: impl Into<String>, arguments: Value) -> Self {
        Self::new(
            id,
            "tools/call",
            Some(serde_json::json!({
                "name": name.into(),
                "arguments": arguments
            })),
        )
    }

    /// Create a resources/read request
    pub fn read_resource(id: u64, uri: impl Into<String>) -> Self {
        Self::new(
            id,
            "resources/read",
            Some(serde_json::json!({ "uri": uri.into() })),
        )
    }
}

/// JSON-RPC response from an MCP server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

/// MCP error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Content block returned by a tool call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub content_type: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(rename = "mimeType", default)]
    pub mime_type: Option<String>,
}

/// Result of a tools/call response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError", default)]
    pub is_error: bool,
}

impl ToolCallResult {
    /// Build a successful single-text-block result
    pub fn from_text(text: impl Into<String>) -> Self {
        ToolCallResult {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text: Some(text.into()),
                data: None,
                mime_type: None,
            }],
            is_error: false,
        }
    }

    /// Concatenated text of all text content blocks
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|c| c.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A single item in a resources/read response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceItem {
    pub uri: String,
    #[serde(rename = "mimeType", default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Result of a resources/read response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceContents {
    pub contents: Vec<ResourceItem>,
}

impl ResourceContents {
    /// Interpret the first content item as a JSON payload.
    ///
    /// Non-JSON text comes back as a JSON string; an empty contents list
    /// becomes an empty object.
    pub fn into_payload(self) -> Value {
        match self.contents.into_iter().find_map(|item| item.text) {
            Some(text) => serde_json::from_str(&text).unwrap_or(Value::String(text)),
            None => Value::Object(serde_json::Map::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let request = McpRequest::call_tool(7, "publish_post", serde_json::json!({"text": "hi"}));
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["id"], 7);
        assert_eq!(value["method"], "tools/call");
        assert_eq!(value["params"]["name"], "publish_post");
    }

    #[test]
    fn test_read_resource_request_carries_uri() {
        let request = McpRequest::read_resource(3, "news://latest");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["method"], "resources/read");
        assert_eq!(value["params"]["uri"], "news://latest");
    }

    #[test]
    fn test_tool_result_text_joins_blocks() {
        let raw = serde_json::json!({
            "content": [
                {"type": "text", "text": "line one"},
                {"type": "image", "data": "aaaa", "mimeType": "image/png"},
                {"type": "text", "text": "line two"}
            ],
            "isError": false
        });
        let result: ToolCallResult = serde_json::from_value(raw).unwrap();
        assert!(!result.is_error);
        assert_eq!(result.text(), "line one\nline two");
    }

    #[test]
    fn test_resource_payload_parses_json_text() {
        let contents = ResourceContents {
            contents: vec![ResourceItem {
                uri: "news://latest".to_string(),
                mime_type: Some("application/json".to_string()),
                text: Some(r#"{"articles": []}"#.to_string()),
            }],
        };
        let payload = contents.into_payload();
        assert!(payload["articles"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_resource_payload_keeps_plain_text() {
        let contents = ResourceContents {
            contents: vec![ResourceItem {
                uri: "news://latest".to_string(),
                mime_type: None,
                text: Some("not json".to_string()),
            }],
        };
        assert_eq!(contents.into_payload(), Value::String("not json".to_string()));
    }
}
