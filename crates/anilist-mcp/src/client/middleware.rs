//! Request logging middleware for the AniList HTTP client.

use std::time::Instant;

use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result};

/// Emits one `tracing` event per upstream request with status and latency.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLogging;

#[async_trait::async_trait]
impl Middleware for RequestLogging {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        let method = req.method().clone();
        let url = req.url().clone();
        let started = Instant::now();

        let result = next.run(req, extensions).await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match &result {
            Ok(response) => tracing::debug!(
                %method,
                %url,
                status = response.status().as_u16(),
                elapsed_ms,
                "AniList request"
            ),
            Err(e) => tracing::warn!(%method, %url, elapsed_ms, error = %e, "AniList request failed"),
        }

        result
    }
}
