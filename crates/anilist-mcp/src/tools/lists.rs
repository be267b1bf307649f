//! User list tools.

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::{Value, json};

use super::{Access, CatalogTool, McpTool, ToolAnnotations, ToolContext, ToolOutput, object_schema};
use crate::error::ToolResult;
use crate::models::schemas::update_entry_options;
use crate::models::{EntryTarget, IdInput, ListEntryInput, MediaType, UserInput};

pub(super) fn tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(CatalogTool {
            name: "add_list_entry",
            description: "[Requires Login] Add an entry to the authorized user's list",
            annotations: ToolAnnotations::mutation("Add List Entry"),
            access: Access::Login,
            schema: || entry_schema("The AniList ID of the media entry to add"),
            handler: add_list_entry,
        }),
        Box::new(CatalogTool {
            name: "get_user_anime_list",
            description: "Get a user's anime list",
            annotations: ToolAnnotations::read_only("Get User Anime List"),
            access: Access::Public,
            schema: user_schema,
            handler: get_user_anime_list,
        }),
        Box::new(CatalogTool {
            name: "get_user_manga_list",
            description: "Get a user's manga list",
            annotations: ToolAnnotations::read_only("Get User Manga List"),
            access: Access::Public,
            schema: user_schema,
            handler: get_user_manga_list,
        }),
        Box::new(CatalogTool {
            name: "remove_list_entry",
            description: "[Requires Login] Remove an entry from the authorized user's list",
            annotations: ToolAnnotations::mutation("Remove List Entry").destructive(),
            access: Access::Login,
            schema: || {
                object_schema(
                    json!({
                        "id": {"type": "number", "description": "The AniList list ID of the entry to remove"}
                    }),
                    &["id"],
                )
            },
            handler: remove_list_entry,
        }),
        Box::new(CatalogTool {
            name: "update_list_entry",
            description: "[Requires Login] Update an entry on the authorized user's list",
            annotations: ToolAnnotations::mutation("Update List Entry").idempotent(),
            access: Access::Login,
            schema: || entry_schema("The AniList list ID of the entry to edit"),
            handler: update_list_entry,
        }),
    ]
}

fn entry_schema(id_description: &str) -> Value {
    object_schema(
        json!({
            "id": {"type": "number", "description": id_description},
            "options": update_entry_options()
        }),
        &["id", "options"],
    )
}

/// Schema for tools keyed by a user ID or username; shared with the user group.
pub(super) fn user_schema() -> Value {
    object_schema(
        json!({
            "user": {
                "anyOf": [{"type": "number"}, {"type": "string"}],
                "description": "Username or user ID"
            }
        }),
        &["user"],
    )
}

fn add_list_entry(ctx: &ToolContext, input: ListEntryInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move {
        let variables = input.options.to_variables(EntryTarget::Media(input.id))?;
        ToolOutput::json(&ctx.client.save_list_entry(variables).await?)
    }
    .boxed()
}

fn update_list_entry(
    ctx: &ToolContext,
    input: ListEntryInput,
) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move {
        let variables = input.options.to_variables(EntryTarget::Entry(input.id))?;
        ToolOutput::json(&ctx.client.save_list_entry(variables).await?)
    }
    .boxed()
}

fn get_user_anime_list(ctx: &ToolContext, input: UserInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move { ToolOutput::json(&ctx.client.list_collection(&input.user, MediaType::Anime).await?) }
        .boxed()
}

fn get_user_manga_list(ctx: &ToolContext, input: UserInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move { ToolOutput::json(&ctx.client.list_collection(&input.user, MediaType::Manga).await?) }
        .boxed()
}

fn remove_list_entry(ctx: &ToolContext, input: IdInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move {
        let id = input.id;
        let text = if ctx.client.delete_list_entry(id).await? {
            format!("Successfully removed list entry with ID {id}.")
        } else {
            format!("Failed to remove list entry with ID {id}.")
        };
        Ok(ToolOutput::text(text))
    }
    .boxed()
}
