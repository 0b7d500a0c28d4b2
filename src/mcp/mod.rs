//! External tool and resource access
//!
//! Skills reach every outside system (news feeds, social platforms,
//! generation backends) through the `McpClient` capability. The production
//! implementation is `StdioMcpClient`, which speaks the Model Context
//! Protocol over a spawned subprocess; tests substitute a stub.

mod client;
mod protocol;

pub use client::StdioMcpClient;
pub use protocol::{
    McpError, McpRequest, McpResponse, ResourceContents, ResourceItem, ToolCallResult, ToolContent,
};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Capability for calling named external tools and fetching named resources.
///
/// Both operations suspend and may fail with a timeout or transport error;
/// the skill layer translates those failures into failed output records
/// rather than letting them propagate.
#[async_trait]
pub trait McpClient: Send + Sync {
    /// Call a named external tool with JSON arguments
    async fn call_tool(&self, name: &str, arguments: Value) -> Result<ToolCallResult>;

    /// Fetch a named resource by scheme-qualified URI (e.g. `news://latest`)
    async fn get_resource(&self, uri: &str) -> Result<Value>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-crate test double for the `McpClient` capability

    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::Value;

    use super::{McpClient, ToolCallResult};
    use crate::error::{Error, Result};

    /// How the stub should fail, if at all
    #[derive(Debug, Clone, Copy)]
    pub enum FailureMode {
        Timeout,
        Transport,
    }

    /// Scripted `McpClient` that records every call it receives
    #[derive(Default)]
    pub struct StubClient {
        /// Canned reply for `call_tool`; defaults to an empty success
        pub tool_result: Option<ToolCallResult>,
        /// Canned payloads keyed by resource URI
        pub resources: HashMap<String, Value>,
        /// When set, every call fails this way
        pub failure: Option<FailureMode>,
        /// Recorded (name, arguments) pairs
        pub tool_calls: Mutex<Vec<(String, Value)>>,
        /// Recorded resource URIs
        pub resource_requests: Mutex<Vec<String>>,
    }

    impl StubClient {
        pub fn new() -> Self {
            StubClient::default()
        }

        pub fn with_tool_result(result: ToolCallResult) -> Self {
            StubClient {
                tool_result: Some(result),
                ..StubClient::default()
            }
        }

        pub fn with_resource(uri: &str, payload: Value) -> Self {
            let mut resources = HashMap::new();
            resources.insert(uri.to_string(), payload);
            StubClient {
                resources,
                ..StubClient::default()
            }
        }

        pub fn failing(mode: FailureMode) -> Self {
            StubClient {
                failure: Some(mode),
                ..StubClient::default()
            }
        }

        fn fail(&self) -> Option<Error> {
            self.failure.map(|mode| match mode {
                FailureMode::Timeout => {
                    Error::Timeout("mcp request timed out after 30s".to_string())
                }
                FailureMode::Transport => {
                    Error::Connection("mcp server pipe closed".to_string())
                }
            })
        }
    }

    #[async_trait]
    impl McpClient for StubClient {
        async fn call_tool(&self, name: &str, arguments: Value) -> Result<ToolCallResult> {
            self.tool_calls
                .lock()
                .unwrap()
                .push((name.to_string(), arguments));

            if let Some(err) = self.fail() {
                return Err(err);
            }
            Ok(self
                .tool_result
                .clone()
                .unwrap_or_else(|| ToolCallResult::from_text("{}")))
        }

        async fn get_resource(&self, uri: &str) -> Result<Value> {
            self.resource_requests.lock().unwrap().push(uri.to_string());

            if let Some(err) = self.fail() {
                return Err(err);
            }
            Ok(self
                .resources
                .get(uri)
                .cloned()
                .unwrap_or_else(|| serde_json::json!({})))
        }
    }
}
