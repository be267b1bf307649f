//! Search tools.

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::{Value, json};

use super::{Access, CatalogTool, McpTool, ToolAnnotations, ToolContext, ToolOutput, object_schema};
use crate::error::ToolResult;
use crate::models::filters::{ACTIVITY_FILTERS, MEDIA_FILTERS};
use crate::models::schemas::{activity_filter, media_filter};
use crate::models::{
    ActivitySearchInput, FieldKind, FilterArgs, MediaSearchInput, MediaType, SearchInput,
};

/// Media filter keys bound by the tool itself.
const MEDIA_RESERVED: &[&str] = &["type", "search"];

pub(super) fn tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(CatalogTool {
            name: "search_activity",
            description: "Search for activities on AniList",
            annotations: ToolAnnotations::read_only("Search Activities"),
            access: Access::Public,
            schema: activity_search_schema,
            handler: search_activity,
        }),
        Box::new(CatalogTool {
            name: "search_anime",
            description: "Search for anime with query term and filters",
            annotations: ToolAnnotations::read_only("Search Anime"),
            access: Access::Public,
            schema: || media_search_schema("anime"),
            handler: search_anime,
        }),
        Box::new(CatalogTool {
            name: "search_character",
            description: "Search for characters based on a query term",
            annotations: ToolAnnotations::read_only("Search Characters"),
            access: Access::Public,
            schema: || term_search_schema("Search term for finding characters"),
            handler: search_character,
        }),
        Box::new(CatalogTool {
            name: "search_manga",
            description: "Search for manga with query term and filters",
            annotations: ToolAnnotations::read_only("Search Manga"),
            access: Access::Public,
            schema: || media_search_schema("manga"),
            handler: search_manga,
        }),
        Box::new(CatalogTool {
            name: "search_staff",
            description: "Search for staff members based on a query term",
            annotations: ToolAnnotations::read_only("Search Staff"),
            access: Access::Public,
            schema: || term_search_schema("Search term for finding staff members"),
            handler: search_staff,
        }),
        Box::new(CatalogTool {
            name: "search_studio",
            description: "Search for studios based on a query term",
            annotations: ToolAnnotations::read_only("Search Studios"),
            access: Access::Public,
            schema: || term_search_schema("Search term for finding studios"),
            handler: search_studio,
        }),
        Box::new(CatalogTool {
            name: "search_user",
            description: "Search for users on AniList",
            annotations: ToolAnnotations::read_only("Search Users"),
            access: Access::Public,
            schema: || term_search_schema("Search term for finding users"),
            handler: search_user,
        }),
    ]
}

fn paging(size_key: &str) -> serde_json::Map<String, Value> {
    let mut props = serde_json::Map::new();
    props.insert(
        "page".to_string(),
        json!({"type": "number", "default": 1, "description": "Page number for results"}),
    );
    props.insert(
        size_key.to_string(),
        json!({"type": "number", "default": 5, "description": "Results per page (max 25)"}),
    );
    props
}

fn activity_search_schema() -> Value {
    let mut props = paging("perPage");
    props.insert(
        "activityID".to_string(),
        json!({
            "type": "number",
            "description": "The activity ID to lookup (leave empty for no specific ID)"
        }),
    );
    props.insert(
        "filter".to_string(),
        activity_filter(
            "Filter object for searching activities (leave empty for no specific filter)",
        ),
    );
    object_schema(Value::Object(props), &[])
}

fn media_search_schema(noun: &str) -> Value {
    let mut props = paging("amount");
    props.insert(
        "term".to_string(),
        json!({"type": "string", "description": format!("Search term for finding {noun}")}),
    );
    props.insert(
        "filter".to_string(),
        media_filter(&format!(
            "Filter object for searching {noun} (leave empty for no specific filter)"
        )),
    );
    object_schema(Value::Object(props), &["term"])
}

fn term_search_schema(term_description: &str) -> Value {
    let mut props = paging("amount");
    props.insert(
        "term".to_string(),
        json!({"type": "string", "description": term_description}),
    );
    object_schema(Value::Object(props), &["term"])
}

fn search_activity(
    ctx: &ToolContext,
    input: ActivitySearchInput,
) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move {
        let mut filter = FilterArgs::parse(input.filter.as_ref(), ACTIVITY_FILTERS, &[])?;
        if let Some(id) = input.activity_id {
            filter = filter.with("id", FieldKind::Int, id.into());
        }

        let page = ctx.client.search_activities(&filter, input.page, input.per_page).await?;
        ToolOutput::json(&page)
    }
    .boxed()
}

fn search_anime(ctx: &ToolContext, input: MediaSearchInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    search_media(ctx, MediaType::Anime, input).boxed()
}

fn search_manga(ctx: &ToolContext, input: MediaSearchInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    search_media(ctx, MediaType::Manga, input).boxed()
}

async fn search_media(
    ctx: &ToolContext,
    kind: MediaType,
    input: MediaSearchInput,
) -> ToolResult<ToolOutput> {
    let filter = FilterArgs::parse(input.filter.as_ref(), MEDIA_FILTERS, MEDIA_RESERVED)?;
    let page = ctx.client.search_media(kind, &input.term, &filter, input.page, input.amount).await?;
    ToolOutput::json(&page)
}

fn search_character(ctx: &ToolContext, input: SearchInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move {
        ToolOutput::json(&ctx.client.search_characters(&input.term, input.page, input.amount).await?)
    }
    .boxed()
}

fn search_staff(ctx: &ToolContext, input: SearchInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move {
        ToolOutput::json(&ctx.client.search_staff(&input.term, input.page, input.amount).await?)
    }
    .boxed()
}

fn search_studio(ctx: &ToolContext, input: SearchInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move {
        ToolOutput::json(&ctx.client.search_studios(&input.term, input.page, input.amount).await?)
    }
    .boxed()
}

fn search_user(ctx: &ToolContext, input: SearchInput) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move {
        ToolOutput::json(&ctx.client.search_users(&input.term, input.page, input.amount).await?)
    }
    .boxed()
}
