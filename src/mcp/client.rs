//! Stdio-transport MCP client
//!
//! Spawns the configured server command as a subprocess and exchanges
//! line-delimited JSON-RPC over its stdin/stdout. Every request is bounded
//! by the configured per-request timeout.

use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

use super::protocol::{McpRequest, McpResponse, ResourceContents, ToolCallResult};
use super::McpClient;
use crate::config::McpConfig;
use crate::error::{Error, Result};

/// MCP client communicating with a spawned server over stdio
#[derive(Debug)]
pub struct StdioMcpClient {
    /// Server process; kept so the child's lifetime matches the client's
    #[allow(dead_code)]
    child: Mutex<Child>,
    stdin: Mutex<tokio::process::ChildStdin>,
    stdout: Mutex<BufReader<tokio::process::ChildStdout>>,
    next_id: AtomicU64,
    name: String,
    request_timeout: Duration,
}

impl StdioMcpClient {
    /// Spawn and initialize the configured MCP server
    pub async fn connect(config: &McpConfig) -> Result<Self> {
        let command = config
            .command
            .as_deref()
            .ok_or_else(|| Error::Config("mcp.command is not set".to_string()))?;

        debug!("spawning mcp server: {} {:?}", command, config.args);

        let mut child = Command::new(command)
            .args(&config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::Connection(format!("failed to spawn mcp server '{}': {}", command, e)))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Connection("failed to capture mcp server stdin".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::Connection("failed to capture mcp server stdout".to_string()))?;

        let client = StdioMcpClient {
            child: Mutex::new(child),
            stdin: Mutex::new(stdin),
            stdout: Mutex::new(BufReader::new(stdout)),
            next_id: AtomicU64::new(1),
            name: command.to_string(),
            request_timeout: config.request_timeout,
        };

        client.request(McpRequest::initialize(client.next_id())).await?;
        debug!("mcp server {} initialized", client.name);

        Ok(client)
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Send one request and wait for its reply, bounded by the request timeout
    async fn request(&self, request: McpRequest) -> Result<Value> {
        let method = request.method.clone();
        let json = serde_json::to_string(&request)?;
        debug!("mcp request -> {}: {}", self.name, json);

        let line = tokio::time::timeout(self.request_timeout, self.exchange(&json))
            .await
            .map_err(|_| {
                Error::Timeout(format!(
                    "mcp {} request timed out after {}",
                    method,
                    humantime_serde::re::humantime::format_duration(self.request_timeout)
                ))
            })??;

        debug!("mcp response <- {}: {}", self.name, line.trim());

        let response: McpResponse = serde_json::from_str(line.trim()).map_err(|e| {
            Error::Resource(format!("malformed mcp response: {} (raw: {})", e, line.trim()))
        })?;

        if let Some(err) = response.error {
            return Err(Error::Resource(format!(
                "mcp error from {}: {} (code {})",
                self.name, err.message, err.code
            )));
        }

        Ok(response.result.unwrap_or_default())
    }

    /// Write one line and read one line back
    async fn exchange(&self, json: &str) -> Result<String> {
        {
            let mut stdin = self.stdin.lock().await;
            stdin
                .write_all(json.as_bytes())
                .await
                .map_err(|e| Error::Connection(format!("failed to write to mcp server: {}", e)))?;
            stdin
                .write_all(b"\n")
                .await
                .map_err(|e| Error::Connection(format!("failed to write to mcp server: {}", e)))?;
            stdin
                .flush()
                .await
                .map_err(|e| Error::Connection(format!("failed to flush mcp server stdin: {}", e)))?;
        }

        let mut line = String::new();
        let read = {
            let mut stdout = self.stdout.lock().await;
            stdout
                .read_line(&mut line)
                .await
                .map_err(|e| Error::Connection(format!("failed to read from mcp server: {}", e)))?
        };

        if read == 0 {
            return Err(Error::Connection(format!(
                "mcp server {} closed its stdout",
                self.name
            )));
        }

        Ok(line)
    }

    /// Get the server name
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl McpClient for StdioMcpClient {
    async fn call_tool(&self, name: &str, arguments: Value) -> Result<ToolCallResult> {
        let result = self
            .request(McpRequest::call_tool(self.next_id(), name, arguments))
            .await?;

        let tool_result: ToolCallResult = serde_json::from_value(result)
            .map_err(|e| Error::Resource(format!("malformed tool result: {}", e)))?;

        if tool_result.is_error {
            warn!("mcp tool {} returned an error result", name);
        }

        Ok(tool_result)
    }

    async fn get_resource(&self, uri: &str) -> Result<Value> {
        // Reject unparseable URIs before going over the wire
        Url::parse(uri).map_err(|e| Error::Resource(format!("invalid resource uri '{}': {}", uri, e)))?;

        let result = self
            .request(McpRequest::read_resource(self.next_id(), uri))
            .await?;

        let contents: ResourceContents = serde_json::from_value(result)
            .map_err(|e| Error::Resource(format!("malformed resource contents: {}", e)))?;

        Ok(contents.into_payload())
    }
}

impl Drop for StdioMcpClient {
    fn drop(&mut self) {
        // The child process is killed when dropped
        debug!("dropping mcp client for {}", self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_requires_command() {
        let err = StdioMcpClient::connect(&McpConfig::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("mcp.command"));
    }
}
