//! Forum thread tools.

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::json;

use super::{Access, CatalogTool, McpTool, ToolAnnotations, ToolContext, ToolOutput, object_schema};
use crate::error::ToolResult;
use crate::models::{IdInput, ThreadCommentsInput};

pub(super) fn tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(CatalogTool {
            name: "delete_thread",
            description: "[Requires Login] Delete a thread by its ID",
            annotations: ToolAnnotations::mutation("Delete AniList Thread").destructive().idempotent(),
            access: Access::Login,
            schema: || {
                object_schema(
                    json!({"id": {"type": "number", "description": "The AniList thread ID to delete"}}),
                    &["id"],
                )
            },
            handler: delete_thread,
        }),
        Box::new(CatalogTool {
            name: "get_thread",
            description: "Get a specific thread by its AniList ID",
            annotations: ToolAnnotations::read_only("Get AniList Thread"),
            access: Access::Public,
            schema: || {
                object_schema(
                    json!({"id": {"type": "number", "description": "The AniList ID of the thread"}}),
                    &["id"],
                )
            },
            handler: get_thread,
        }),
        Box::new(CatalogTool {
            name: "get_thread_comments",
            description: "Get comments for a specific thread",
            annotations: ToolAnnotations::read_only("Get AniList Thread Comments"),
            access: Access::Public,
            schema: || {
                object_schema(
                    json!({
                        "id": {"type": "number", "description": "The AniList thread ID"},
                        "page": {"type": "number", "default": 1, "description": "The page number"},
                        "perPage": {
                            "type": "number",
                            "default": 25,
                            "description": "How many comments per page"
                        }
                    }),
                    &["id"],
                )
            },
            handler: get_thread_comments,
        }),
    ]
}

fn delete_thread(ctx: &ToolContext, input: IdInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move {
        let id = input.id;
        let text = if ctx.client.delete_thread(id).await? {
            format!("Successfully deleted thread with ID {id}.")
        } else {
            format!("Failed to delete thread with ID {id}.")
        };
        Ok(ToolOutput::text(text))
    }
    .boxed()
}

fn get_thread(ctx: &ToolContext, input: IdInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move { ToolOutput::json(&ctx.client.thread(input.id).await?) }.boxed()
}

fn get_thread_comments(
    ctx: &ToolContext,
    input: ThreadCommentsInput,
) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move {
        let page = ctx.client.thread_comments(input.id, input.page, input.per_page).await?;
        ToolOutput::json(&page)
    }
    .boxed()
}
