//! Recommendation tools.

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::json;

use super::{Access, CatalogTool, McpTool, ToolAnnotations, ToolContext, ToolOutput, object_schema};
use crate::error::ToolResult;
use crate::models::{MediaRecommendationsInput, RecommendationInput};

pub(super) fn tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(CatalogTool {
            name: "get_recommendation",
            description: "Get an AniList recommendation by its ID",
            annotations: ToolAnnotations::read_only("Get Recommendation"),
            access: Access::Public,
            schema: || {
                object_schema(
                    json!({
                        "recommendID": {"type": "number", "description": "The AniList recommendation ID"}
                    }),
                    &["recommendID"],
                )
            },
            handler: get_recommendation,
        }),
        Box::new(CatalogTool {
            name: "get_recommendations_for_media",
            description: "Get AniList recommendations for a specific media",
            annotations: ToolAnnotations::read_only("Get Recommendations for Media"),
            access: Access::Public,
            schema: || {
                object_schema(
                    json!({
                        "mediaID": {"type": "number", "description": "The AniList media ID"},
                        "page": {
                            "type": "number",
                            "default": 1,
                            "description": "Target a specific page number for recommendations"
                        },
                        "perPage": {
                            "type": "number",
                            "default": 25,
                            "description": "Limit the page amount (max 25 per AniList limits)"
                        }
                    }),
                    &["mediaID"],
                )
            },
            handler: get_recommendations_for_media,
        }),
    ]
}

fn get_recommendation(
    ctx: &ToolContext,
    input: RecommendationInput,
) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move { ToolOutput::json(&ctx.client.recommendation(input.recommend_id).await?) }.boxed()
}

fn get_recommendations_for_media(
    ctx: &ToolContext,
    input: MediaRecommendationsInput,
) -> BoxFuture<'_, ToolResult<ToolOutput>> {
    async move {
        let media =
            ctx.client.media_recommendations(input.media_id, input.page, input.per_page).await?;
        ToolOutput::json(&media)
    }
    .boxed()
}
