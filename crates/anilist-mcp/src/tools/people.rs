//! Character and staff tools.

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::{Value, json};

use super::media::{favourite, favourite_schema};
use super::{Access, CatalogTool, McpTool, ToolAnnotations, ToolContext, ToolOutput, object_schema};
use crate::client::FavouriteKind;
use crate::error::ToolResult;
use crate::models::{IdInput, IdOrNameInput, PageInput};

pub(super) fn tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(CatalogTool {
            name: "get_character",
            description: "Get information about a character by their AniList ID",
            annotations: ToolAnnotations::read_only("Get Character Details"),
            access: Access::Public,
            schema: || lookup_schema("The AniList ID of the character"),
            handler: get_character,
        }),
        Box::new(CatalogTool {
            name: "favourite_character",
            description: "[Requires Login] Favourite or unfavourite a character by its ID",
            annotations: ToolAnnotations::mutation("Favourite Character"),
            access: Access::Login,
            schema: || favourite_schema("The AniList ID of the character to favourite/unfavourite"),
            handler: favourite_character,
        }),
        Box::new(CatalogTool {
            name: "favourite_staff",
            description: "[Requires Login] Favourite or unfavourite a staff member by their ID",
            annotations: ToolAnnotations::mutation("Favourite Staff"),
            access: Access::Login,
            schema: || {
                favourite_schema("The AniList ID of the staff member to favourite/unfavourite")
            },
            handler: favourite_staff,
        }),
        Box::new(CatalogTool {
            name: "get_todays_birthday_characters",
            description: "Get all characters whose birthday is today",
            annotations: ToolAnnotations::read_only("Get Today's Birthday Characters"),
            access: Access::Public,
            schema: page_schema,
            handler: get_todays_birthday_characters,
        }),
        Box::new(CatalogTool {
            name: "get_todays_birthday_staff",
            description: "Get all staff members whose birthday is today",
            annotations: ToolAnnotations::read_only("Get Today's Birthday Staff"),
            access: Access::Public,
            schema: page_schema,
            handler: get_todays_birthday_staff,
        }),
        Box::new(CatalogTool {
            name: "get_staff",
            description: "Get information about staff member by their AniList ID or name",
            annotations: ToolAnnotations::read_only("Get Staff Details"),
            access: Access::Public,
            schema: || lookup_schema("The AniList ID or name of the staff member"),
            handler: get_staff,
        }),
    ]
}

fn lookup_schema(description: &str) -> Value {
    object_schema(
        json!({
            "id": {
                "anyOf": [{"type": "number"}, {"type": "string"}],
                "description": description
            }
        }),
        &["id"],
    )
}

fn page_schema() -> Value {
    object_schema(
        json!({
            "page": {
                "type": "number",
                "default": 1,
                "description": "What page in the search to target"
            }
        }),
        &[],
    )
}

fn get_character(ctx: &ToolContext, input: IdOrNameInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move { ToolOutput::json(&ctx.client.character(&input.id).await?) }.boxed()
}

fn get_staff(ctx: &ToolContext, input: IdOrNameInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move { ToolOutput::json(&ctx.client.staff(&input.id).await?) }.boxed()
}

fn favourite_character(ctx: &ToolContext, input: IdInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    favourite(ctx, FavouriteKind::Character, input.id).boxed()
}

fn favourite_staff(ctx: &ToolContext, input: IdInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    favourite(ctx, FavouriteKind::Staff, input.id).boxed()
}

fn get_todays_birthday_characters(
    ctx: &ToolContext,
    input: PageInput,
) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move { ToolOutput::json(&ctx.client.birthday_characters(input.page).await?) }.boxed()
}

fn get_todays_birthday_staff(
    ctx: &ToolContext,
    input: PageInput,
) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move { ToolOutput::json(&ctx.client.birthday_staff(input.page).await?) }.boxed()
}
