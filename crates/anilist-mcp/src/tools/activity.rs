//! Activity feed tools.

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::json;

use super::{Access, CatalogTool, McpTool, ToolAnnotations, ToolContext, ToolOutput, object_schema};
use crate::error::ToolResult;
use crate::models::{
    ActivityIdInput, IdInput, MessageActivityInput, TextActivityInput, UserActivityInput,
};

const ACTIVITY_ID_DESCRIPTION: &str = "AniList Activity ID (null to create new, number to update)";

pub(super) fn tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(CatalogTool {
            name: "delete_activity",
            description: "[Requires Login] Delete the current authorized user's activity post",
            annotations: ToolAnnotations::mutation("Delete Activity").destructive(),
            access: Access::Login,
            schema: || {
                object_schema(
                    json!({"id": {"type": "number", "description": "The AniList activity ID to delete"}}),
                    &["id"],
                )
            },
            handler: delete_activity,
        }),
        Box::new(CatalogTool {
            name: "get_activity",
            description: "Get a specific AniList activity by its ID",
            annotations: ToolAnnotations::read_only("Get Activity"),
            access: Access::Public,
            schema: || {
                object_schema(
                    json!({"activityID": {"type": "number", "description": "The AniList activity ID"}}),
                    &["activityID"],
                )
            },
            handler: get_activity,
        }),
        Box::new(CatalogTool {
            name: "get_user_activity",
            description: "Fetch activities from a user",
            annotations: ToolAnnotations::read_only("Get User Activity"),
            access: Access::Public,
            schema: || {
                object_schema(
                    json!({
                        "user": {"type": "number", "description": "The user's AniList ID"},
                        "page": {
                            "type": "number",
                            "default": 1,
                            "description": "The page number to display"
                        },
                        "perPage": {
                            "type": "number",
                            "default": 25,
                            "description": "How many entries to display on one page (max 25)"
                        }
                    }),
                    &["user"],
                )
            },
            handler: get_user_activity,
        }),
        Box::new(CatalogTool {
            name: "post_message_activity",
            description: "[Requires Login] Post a new message activity or update an existing one",
            annotations: ToolAnnotations::mutation("Post Message Activity"),
            access: Access::Login,
            schema: || {
                object_schema(
                    json!({
                        "text": {"type": "string", "description": "The activity message text"},
                        "recipientId": {
                            "type": "number",
                            "description": "The target user to send the message to"
                        },
                        "isPrivate": {
                            "type": "boolean",
                            "default": false,
                            "description": "Set to true if it is a private message"
                        },
                        "id": {"type": ["number", "null"], "description": ACTIVITY_ID_DESCRIPTION}
                    }),
                    &["text", "recipientId", "id"],
                )
            },
            handler: post_message_activity,
        }),
        Box::new(CatalogTool {
            name: "post_text_activity",
            description: "[Requires Login] Post a new text activity or update an existing one",
            annotations: ToolAnnotations::mutation("Post Text Activity"),
            access: Access::Login,
            schema: || {
                object_schema(
                    json!({
                        "text": {"type": "string", "description": "The content of the activity"},
                        "id": {"type": ["number", "null"], "description": ACTIVITY_ID_DESCRIPTION}
                    }),
                    &["text", "id"],
                )
            },
            handler: post_text_activity,
        }),
    ]
}

fn delete_activity(ctx: &ToolContext, input: IdInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move {
        let id = input.id;
        let text = if ctx.client.delete_activity(id).await? {
            format!("Successfully deleted activity with ID {id}.")
        } else {
            format!("Failed to delete activity with ID {id}.")
        };
        Ok(ToolOutput::text(text))
    }
    .boxed()
}

fn get_activity(ctx: &ToolContext, input: ActivityIdInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move { ToolOutput::json(&ctx.client.activity(input.activity_id).await?) }.boxed()
}

fn get_user_activity(
    ctx: &ToolContext,
    input: UserActivityInput,
) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move {
        let page = ctx.client.user_activities(input.user, input.page, input.per_page).await?;
        ToolOutput::json(&page)
    }
    .boxed()
}

fn post_message_activity(
    ctx: &ToolContext,
    input: MessageActivityInput,
) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move {
        let activity = ctx
            .client
            .save_message_activity(&input.text, input.recipient_id, input.is_private, input.id)
            .await?;
        ToolOutput::json(&activity)
    }
    .boxed()
}

fn post_text_activity(
    ctx: &ToolContext,
    input: TextActivityInput,
) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move { ToolOutput::json(&ctx.client.save_text_activity(&input.text, input.id).await?) }
        .boxed()
}
