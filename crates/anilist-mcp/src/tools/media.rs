//! Anime and manga lookup and favourite tools.

use futures::FutureExt;
use futures::future::{BoxFuture, try_join_all};
use serde_json::{Value, json};

use super::{Access, CatalogTool, McpTool, ToolAnnotations, ToolContext, ToolOutput, object_schema};
use crate::client::FavouriteKind;
use crate::error::ToolResult;
use crate::formatters::filter_media;
use crate::models::{IdInput, MediaLookupInput, MediaType, OneOrMany};

pub(super) fn tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(CatalogTool {
            name: "get_anime",
            description: "Get detailed information about one or more anime by their AniList IDs",
            annotations: ToolAnnotations::read_only("Get Anime Details"),
            access: Access::Public,
            schema: || lookup_schema("anime"),
            handler: get_anime,
        }),
        Box::new(CatalogTool {
            name: "get_manga",
            description: "Get detailed information about one or more manga by their AniList IDs",
            annotations: ToolAnnotations::read_only("Get Manga Details"),
            access: Access::Public,
            schema: || lookup_schema("manga"),
            handler: get_manga,
        }),
        Box::new(CatalogTool {
            name: "favourite_anime",
            description: "[Requires Login] Favourite or unfavourite an anime by its ID",
            annotations: ToolAnnotations::mutation("Favourite Anime"),
            access: Access::Login,
            schema: || favourite_schema("The AniList ID of the anime to favourite/unfavourite"),
            handler: favourite_anime,
        }),
        Box::new(CatalogTool {
            name: "favourite_manga",
            description: "[Requires Login] Favourite or unfavourite a manga by its ID",
            annotations: ToolAnnotations::mutation("Favourite Manga"),
            access: Access::Login,
            schema: || favourite_schema("The AniList ID of the manga to favourite/unfavourite"),
            handler: favourite_manga,
        }),
    ]
}

fn lookup_schema(noun: &str) -> Value {
    object_schema(
        json!({
            "ids": {
                "anyOf": [
                    {"type": "number"},
                    {"type": "array", "items": {"type": "number"}}
                ],
                "description": format!("The AniList ID of the {noun}, or an array of IDs")
            },
            "fullData": {
                "type": "boolean",
                "default": false,
                "description": "Return the complete record instead of the filtered summary"
            }
        }),
        &["ids"],
    )
}

/// Schema for the `favourite_*` tools, shared with the people and studio groups.
pub(super) fn favourite_schema(description: &str) -> Value {
    object_schema(json!({"id": {"type": "number", "description": description}}), &["id"])
}

fn get_anime(ctx: &ToolContext, input: MediaLookupInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    lookup(ctx, MediaType::Anime, input).boxed()
}

fn get_manga(ctx: &ToolContext, input: MediaLookupInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    lookup(ctx, MediaType::Manga, input).boxed()
}

/// Fetch every requested ID concurrently.
///
/// Results keep input order. A single ID yields an object, a list yields an
/// array. Any failed lookup fails the whole call.
async fn lookup(ctx: &ToolContext, kind: MediaType, input: MediaLookupInput) -> ToolResult<ToolOutput> {
    let result = match input.ids {
        OneOrMany::One(id) => ctx.client.media(kind, id).await?,
        OneOrMany::Many(ids) => {
            tracing::debug!(kind = kind.noun(), count = ids.len(), "Batch media lookup");
            let records = try_join_all(ids.iter().map(|&id| ctx.client.media(kind, id))).await?;
            Value::Array(records)
        }
    };

    if input.full_data {
        ToolOutput::json(&result)
    } else {
        ToolOutput::json(&filter_media(&result))
    }
}

fn favourite_anime(ctx: &ToolContext, input: IdInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    favourite(ctx, FavouriteKind::Anime, input.id).boxed()
}

fn favourite_manga(ctx: &ToolContext, input: IdInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    favourite(ctx, FavouriteKind::Manga, input.id).boxed()
}

/// Toggle a favourite and describe the new state.
pub(super) async fn favourite(ctx: &ToolContext, kind: FavouriteKind, id: i64) -> ToolResult<ToolOutput> {
    let added = ctx.client.toggle_favourite(kind, id).await?;
    Ok(ToolOutput::text(favourite_sentence(kind, id, added)))
}

fn favourite_sentence(kind: FavouriteKind, id: i64, added: bool) -> String {
    let noun = kind.noun();
    if added {
        format!("Successfully added {noun} with ID {id} to favourites.")
    } else {
        let mut chars = noun.chars();
        let capitalized: String =
            chars.next().map(|c| c.to_ascii_uppercase()).into_iter().chain(chars).collect();
        format!("{capitalized} with ID {id} was removed from favourites or operation failed.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favourite_sentences() {
        assert_eq!(
            favourite_sentence(FavouriteKind::Anime, 1, true),
            "Successfully added anime with ID 1 to favourites."
        );
        assert_eq!(
            favourite_sentence(FavouriteKind::Staff, 2, false),
            "Staff member with ID 2 was removed from favourites or operation failed."
        );
    }

    #[test]
    fn test_lookup_schema_accepts_both_shapes() {
        let schema = lookup_schema("anime");
        assert_eq!(schema["required"], json!(["ids"]));
        assert_eq!(schema["properties"]["fullData"]["default"], false);
        assert_eq!(schema["properties"]["ids"]["anyOf"].as_array().unwrap().len(), 2);
    }
}
