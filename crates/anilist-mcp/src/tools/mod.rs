//! MCP tool implementations.
//!
//! Every tool is a [`CatalogTool`]: static metadata plus a typed handler.
//! Execution runs in a fixed order:
//! 1. Deserialize the arguments into the tool's input type
//! 2. Run the auth gate for login-scoped tools
//! 3. Call the handler, which makes the upstream request(s)
//!
//! Handler failures become error envelopes; only invalid arguments escape
//! as a `ToolError::Validation`.

pub mod auth;
pub mod output;

mod activity;
mod lists;
mod media;
mod misc;
mod people;
mod recommendation;
mod search;
mod thread;
mod user;

use std::sync::Arc;

use futures::future::BoxFuture;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

pub use auth::{AuthCheck, require_auth};
pub use output::{Content, ToolOutput};

use crate::client::AniListClient;
use crate::config::Config;
use crate::error::{ToolError, ToolResult};

/// Tool execution context.
pub struct ToolContext {
    /// API client.
    pub client: Arc<AniListClient>,

    /// Token checked by the auth gate.
    credential: Option<String>,
}

impl ToolContext {
    /// Create a new tool context.
    #[must_use]
    pub fn new(client: Arc<AniListClient>, credential: Option<String>) -> Self {
        Self { client, credential }
    }

    /// Build the client and context for `config`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be constructed.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = AniListClient::new(config)?;
        Ok(Self::new(Arc::new(client), config.anilist_token.clone()))
    }

    /// Credential for login-scoped tools.
    #[must_use]
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }
}

/// Advisory capability hints advertised in `tools/list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolAnnotations {
    pub title: &'static str,
    pub read_only_hint: bool,
    pub destructive_hint: bool,
    pub idempotent_hint: bool,
    pub open_world_hint: bool,
}

impl ToolAnnotations {
    /// Query against AniList.
    #[must_use]
    pub const fn read_only(title: &'static str) -> Self {
        Self {
            title,
            read_only_hint: true,
            destructive_hint: false,
            idempotent_hint: true,
            open_world_hint: true,
        }
    }

    /// Non-destructive mutation, e.g. a toggle or a save.
    #[must_use]
    pub const fn mutation(title: &'static str) -> Self {
        Self {
            title,
            read_only_hint: false,
            destructive_hint: false,
            idempotent_hint: false,
            open_world_hint: true,
        }
    }

    #[must_use]
    pub const fn destructive(mut self) -> Self {
        self.destructive_hint = true;
        self
    }

    #[must_use]
    pub const fn idempotent(mut self) -> Self {
        self.idempotent_hint = true;
        self
    }
}

/// Authentication requirement of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Requires an AniList token; checked before any upstream call.
    Login,
}

/// Typed tool handler.
pub type Handler<I> = for<'a> fn(&'a ToolContext, I) -> BoxFuture<'a, ToolResult<ToolOutput>>;

/// Trait for MCP tools.
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Tool name (e.g., "get_anime").
    fn name(&self) -> &'static str;

    /// Tool description for LLM.
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters.
    fn input_schema(&self) -> Value;

    /// Capability hints.
    fn annotations(&self) -> ToolAnnotations;

    /// Authentication requirement.
    fn access(&self) -> Access;

    /// Execute the tool with given input.
    ///
    /// Upstream and auth failures are returned as error envelopes; `Err` is
    /// reserved for arguments that do not match the input schema.
    async fn execute(&self, ctx: &ToolContext, input: Value) -> ToolResult<ToolOutput>;
}

/// A tool defined by a static table row.
pub struct CatalogTool<I> {
    pub name: &'static str,
    pub description: &'static str,
    pub annotations: ToolAnnotations,
    pub access: Access,
    pub schema: fn() -> Value,
    pub handler: Handler<I>,
}

#[async_trait::async_trait]
impl<I> McpTool for CatalogTool<I>
where
    I: DeserializeOwned + Send + 'static,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn input_schema(&self) -> Value {
        (self.schema)()
    }

    fn annotations(&self) -> ToolAnnotations {
        self.annotations
    }

    fn access(&self) -> Access {
        self.access
    }

    async fn execute(&self, ctx: &ToolContext, input: Value) -> ToolResult<ToolOutput> {
        let params: I = serde_json::from_value(input)
            .map_err(|e| ToolError::validation("arguments", e.to_string()))?;

        if self.access == Access::Login {
            if let Some(denied) = require_auth(ctx.credential()).error_response() {
                tracing::info!(tool = self.name, "Rejected call without credential");
                return Ok(denied);
            }
        }

        match (self.handler)(ctx, params).await {
            Ok(output) => Ok(output),
            Err(e @ ToolError::Validation { .. }) => Err(e),
            Err(e) => {
                tracing::warn!(tool = self.name, kind = %e.kind(), error = %e, "Tool call failed");
                Ok(ToolOutput::from_error(&e))
            }
        }
    }
}

/// Object schema with the given properties and required keys.
fn object_schema(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

/// Schema for tools without arguments.
fn no_arguments() -> Value {
    object_schema(json!({}), &[])
}

/// Register all tools.
#[must_use]
pub fn register_all_tools() -> Vec<Box<dyn McpTool>> {
    let mut tools = Vec::new();
    tools.extend(misc::tools());
    tools.extend(activity::tools());
    tools.extend(lists::tools());
    tools.extend(media::tools());
    tools.extend(people::tools());
    tools.extend(recommendation::tools());
    tools.extend(search::tools());
    tools.extend(thread::tools());
    tools.extend(user::tools());
    tools
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tool_names_unique() {
        let tools = register_all_tools();
        let names: HashSet<_> = tools.iter().map(|t| t.name()).collect();
        assert_eq!(names.len(), tools.len());
        assert_eq!(tools.len(), 44);
    }

    #[test]
    fn test_schemas_are_objects() {
        for tool in register_all_tools() {
            let schema = tool.input_schema();
            assert_eq!(schema["type"], "object", "{}", tool.name());
            let props = schema["properties"].as_object().unwrap();
            for key in schema["required"].as_array().unwrap() {
                assert!(props.contains_key(key.as_str().unwrap()), "{}: {key}", tool.name());
            }
        }
    }

    #[test]
    fn test_login_tools_are_labelled() {
        for tool in register_all_tools() {
            let labelled = tool.description().starts_with("[Requires Login]");
            assert_eq!(labelled, tool.access() == Access::Login, "{}", tool.name());
        }
    }

    #[test]
    fn test_read_only_tools_are_not_destructive() {
        for tool in register_all_tools() {
            let hints = tool.annotations();
            assert!(hints.open_world_hint);
            if hints.read_only_hint {
                assert!(!hints.destructive_hint, "{}", tool.name());
            }
        }
    }

    #[test]
    fn test_annotation_serialization() {
        let hints = ToolAnnotations::mutation("Delete AniList Thread").destructive().idempotent();
        assert_eq!(
            serde_json::to_value(hints).unwrap(),
            json!({
                "title": "Delete AniList Thread",
                "readOnlyHint": false,
                "destructiveHint": true,
                "idempotentHint": true,
                "openWorldHint": true
            })
        );
    }
}
