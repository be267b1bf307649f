//! Site-wide collections, studios and studio favourites.

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::json;

use super::media::{favourite, favourite_schema};
use super::{
    Access, CatalogTool, McpTool, ToolAnnotations, ToolContext, ToolOutput, no_arguments,
    object_schema,
};
use crate::client::FavouriteKind;
use crate::error::ToolResult;
use crate::models::{EmptyInput, IdInput, StudioInput};

pub(super) fn tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(CatalogTool {
            name: "favourite_studio",
            description: "[Requires Login] Favourite or unfavourite a studio by its ID",
            annotations: ToolAnnotations::mutation("Favourite Studio"),
            access: Access::Login,
            schema: || favourite_schema("The AniList ID of the studio to favourite/unfavourite"),
            handler: favourite_studio,
        }),
        Box::new(CatalogTool {
            name: "get_genres",
            description: "Get all available genres on AniList",
            annotations: ToolAnnotations::read_only("Get AniList Genres"),
            access: Access::Public,
            schema: no_arguments,
            handler: get_genres,
        }),
        Box::new(CatalogTool {
            name: "get_media_tags",
            description: "Get all available media tags on AniList",
            annotations: ToolAnnotations::read_only("Get AniList Media Tags"),
            access: Access::Public,
            schema: no_arguments,
            handler: get_media_tags,
        }),
        Box::new(CatalogTool {
            name: "get_site_statistics",
            description: "Get AniList site statistics over the last seven days",
            annotations: ToolAnnotations::read_only("Get AniList Site Statistics"),
            access: Access::Public,
            schema: no_arguments,
            handler: get_site_statistics,
        }),
        Box::new(CatalogTool {
            name: "get_studio",
            description: "Get information about a studio by its AniList ID or name",
            annotations: ToolAnnotations::read_only("Get Studio Details"),
            access: Access::Public,
            schema: || {
                object_schema(
                    json!({
                        "studio": {
                            "anyOf": [{"type": "string"}, {"type": "number"}],
                            "description": "The studio ID or name"
                        }
                    }),
                    &["studio"],
                )
            },
            handler: get_studio,
        }),
    ]
}

fn favourite_studio(ctx: &ToolContext, input: IdInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    favourite(ctx, FavouriteKind::Studio, input.id).boxed()
}

fn get_genres(ctx: &ToolContext, _: EmptyInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move { ToolOutput::json(&ctx.client.genres().await?) }.boxed()
}

fn get_media_tags(ctx: &ToolContext, _: EmptyInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move { ToolOutput::json(&ctx.client.media_tags().await?) }.boxed()
}

fn get_site_statistics(ctx: &ToolContext, _: EmptyInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move { ToolOutput::json(&ctx.client.site_statistics().await?) }.boxed()
}

fn get_studio(ctx: &ToolContext, input: StudioInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move { ToolOutput::json(&ctx.client.studio(&input.studio).await?) }.boxed()
}
