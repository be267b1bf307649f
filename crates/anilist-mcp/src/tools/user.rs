//! User profile, statistics and account tools.

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::json;

use super::lists::user_schema;
use super::{
    Access, CatalogTool, McpTool, ToolAnnotations, ToolContext, ToolOutput, no_arguments,
    object_schema,
};
use crate::error::ToolResult;
use crate::models::schemas::user_options_input;
use crate::models::{EmptyInput, FollowInput, NumericUserInput, UpdateUserInput, UserInput};

/// `get_user_recent_activity` returns the latest page of this size.
const RECENT_ACTIVITY_COUNT: i32 = 25;

pub(super) fn tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(CatalogTool {
            name: "get_full_user_info",
            description: "Get a user's complete profile and stats information",
            annotations: ToolAnnotations::read_only("Get Full User Info"),
            access: Access::Public,
            schema: user_schema,
            handler: get_full_user_info,
        }),
        Box::new(CatalogTool {
            name: "follow_user",
            description: "[Requires Login] Follow or unfollow a user by their ID",
            annotations: ToolAnnotations::mutation("Follow User"),
            access: Access::Login,
            schema: || {
                object_schema(
                    json!({
                        "userID": {
                            "type": "number",
                            "description": "The user ID of the account to follow/unfollow"
                        }
                    }),
                    &["userID"],
                )
            },
            handler: follow_user,
        }),
        Box::new(CatalogTool {
            name: "get_authorized_user",
            description: "[Requires Login] Get profile information of the currently authorized user",
            annotations: ToolAnnotations::read_only("Get Authorized User"),
            access: Access::Login,
            schema: no_arguments,
            handler: get_authorized_user,
        }),
        Box::new(CatalogTool {
            name: "get_user_recent_activity",
            description: "Get recent activity from a user",
            annotations: ToolAnnotations::read_only("Get User Recent Activity"),
            access: Access::Public,
            schema: || {
                object_schema(
                    json!({
                        "user": {
                            "type": "number",
                            "description": "The user's AniList ID (Number ID only, DO NOT use username, any kind of string or other types except for numbers.)"
                        }
                    }),
                    &["user"],
                )
            },
            handler: get_user_recent_activity,
        }),
        Box::new(CatalogTool {
            name: "get_user_profile",
            description: "Get a user's AniList profile",
            annotations: ToolAnnotations::read_only("Get User Profile"),
            access: Access::Public,
            schema: user_schema,
            handler: get_user_profile,
        }),
        Box::new(CatalogTool {
            name: "get_user_stats",
            description: "Get a user's AniList statistics",
            annotations: ToolAnnotations::read_only("Get User Stats"),
            access: Access::Public,
            schema: user_schema,
            handler: get_user_stats,
        }),
        Box::new(CatalogTool {
            name: "update_user",
            description: "[Requires Login] Update user settings",
            annotations: ToolAnnotations::mutation("Update User Settings").idempotent(),
            access: Access::Login,
            schema: || {
                object_schema(
                    json!({"options": user_options_input("User options to update")}),
                    &["options"],
                )
            },
            handler: update_user,
        }),
    ]
}

fn get_full_user_info(ctx: &ToolContext, input: UserInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move { ToolOutput::json(&ctx.client.user_full(&input.user).await?) }.boxed()
}

fn follow_user(ctx: &ToolContext, input: FollowInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move {
        let id = input.user_id;
        let text = if ctx.client.toggle_follow(id).await? {
            format!("Successfully followed user with ID {id}.")
        } else {
            format!("User with ID {id} was unfollowed or operation failed.")
        };
        Ok(ToolOutput::text(text))
    }
    .boxed()
}

fn get_authorized_user(ctx: &ToolContext, _: EmptyInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move { ToolOutput::json(&ctx.client.viewer().await?) }.boxed()
}

fn get_user_recent_activity(
    ctx: &ToolContext,
    input: NumericUserInput,
) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move {
        let page = ctx.client.user_activities(input.user, 1, RECENT_ACTIVITY_COUNT).await?;
        ToolOutput::json(&page)
    }
    .boxed()
}

fn get_user_profile(ctx: &ToolContext, input: UserInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move { ToolOutput::json(&ctx.client.user_profile(&input.user).await?) }.boxed()
}

fn get_user_stats(ctx: &ToolContext, input: UserInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move { ToolOutput::json(&ctx.client.user_stats(&input.user).await?) }.boxed()
}

fn update_user(ctx: &ToolContext, input: UpdateUserInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move { ToolOutput::json(&ctx.client.update_user(&input.options).await?) }.boxed()
}
