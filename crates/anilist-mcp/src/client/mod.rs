//! AniList GraphQL client.
//!
//! Provides an async HTTP client with:
//! - Connection pooling via reqwest
//! - Request logging middleware
//! - Status and GraphQL `errors` mapping to [`ClientError`]
//!
//! Every method issues exactly one POST. There is no retry and no cache.

mod middleware;
mod queries;

use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{FilterArgs, IdOrName, MediaType, UserOptionsInput};

pub use middleware::RequestLogging;

/// Entity kinds accepted by `ToggleFavourite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavouriteKind {
    Anime,
    Manga,
    Character,
    Staff,
    Studio,
}

impl FavouriteKind {
    const fn variable(self) -> &'static str {
        match self {
            Self::Anime => "animeId",
            Self::Manga => "mangaId",
            Self::Character => "characterId",
            Self::Staff => "staffId",
            Self::Studio => "studioId",
        }
    }

    const fn connection(self) -> &'static str {
        match self {
            Self::Anime => "anime",
            Self::Manga => "manga",
            Self::Character => "characters",
            Self::Staff => "staff",
            Self::Studio => "studios",
        }
    }

    /// Noun used in result sentences.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Anime => "anime",
            Self::Manga => "manga",
            Self::Character => "character",
            Self::Staff => "staff member",
            Self::Studio => "studio",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,

    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// AniList API client.
#[derive(Clone)]
pub struct AniListClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// GraphQL endpoint.
    api_url: String,

    /// Whether requests carry a bearer token.
    has_token: bool,
}

impl AniListClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the token is not a valid header value or HTTP client
    /// initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = config.credential() {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let client = ClientBuilder::new(client).with(RequestLogging).build();

        Ok(Self { client, api_url: config.api_url.clone(), has_token: config.has_token() })
    }

    /// Check if requests are authenticated.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.has_token
    }

    // ==================== Media ====================

    /// Fetch one anime or manga record.
    pub async fn media(&self, kind: MediaType, id: i64) -> ClientResult<Value> {
        let operation = match kind {
            MediaType::Anime => queries::ANIME,
            MediaType::Manga => queries::MANGA,
        };
        let document = queries::with_fragments(operation, &[queries::MEDIA_FRAGMENT]);
        self.query_root(&document, json!({ "id": id }), "Media").await
    }

    /// Search anime or manga by term with an optional filter.
    pub async fn search_media(
        &self,
        kind: MediaType,
        term: &str,
        filter: &FilterArgs,
        page: i32,
        per_page: i32,
    ) -> ClientResult<Value> {
        let document =
            queries::render(queries::MEDIA_SEARCH, &filter.declarations(), &filter.arguments());

        let mut variables = Map::new();
        variables.insert("search".to_string(), term.into());
        variables.insert("type".to_string(), kind.as_str().into());
        variables.insert("page".to_string(), page.into());
        variables.insert("perPage".to_string(), per_page.into());
        filter.extend_variables(&mut variables);

        self.query_root(&document, Value::Object(variables), "Page").await
    }

    /// Toggle a favourite. Returns `true` when the entity is now favourited.
    pub async fn toggle_favourite(&self, kind: FavouriteKind, id: i64) -> ClientResult<bool> {
        let mut variables = Map::new();
        variables.insert(kind.variable().to_string(), id.into());

        let favourites =
            self.query_root(queries::TOGGLE_FAVOURITE, Value::Object(variables), "ToggleFavourite").await?;

        let added = favourites
            .get(kind.connection())
            .and_then(|c| c.get("nodes"))
            .and_then(Value::as_array)
            .is_some_and(|nodes| nodes.iter().any(|n| n.get("id").and_then(Value::as_i64) == Some(id)));

        Ok(added)
    }

    // ==================== Activity ====================

    /// Fetch one activity.
    pub async fn activity(&self, id: i64) -> ClientResult<Value> {
        let document = queries::with_fragments(queries::ACTIVITY, &[queries::ACTIVITY_FRAGMENT]);
        self.query_root(&document, json!({ "id": id }), "Activity").await
    }

    /// Page through a user's activities, newest first.
    pub async fn user_activities(&self, user_id: i64, page: i32, per_page: i32) -> ClientResult<Value> {
        let document = queries::with_fragments(
            &queries::render(queries::USER_ACTIVITIES, "", ""),
            &[queries::ACTIVITY_FRAGMENT],
        );
        let variables = json!({ "userId": user_id, "page": page, "perPage": per_page });
        self.query_root(&document, variables, "Page").await
    }

    /// Search activities with a validated filter.
    pub async fn search_activities(
        &self,
        filter: &FilterArgs,
        page: i32,
        per_page: i32,
    ) -> ClientResult<Value> {
        let document = queries::with_fragments(
            &queries::render(queries::ACTIVITY_SEARCH, &filter.declarations(), &filter.arguments()),
            &[queries::ACTIVITY_FRAGMENT],
        );

        let mut variables = Map::new();
        variables.insert("page".to_string(), page.into());
        variables.insert("perPage".to_string(), per_page.into());
        filter.extend_variables(&mut variables);

        self.query_root(&document, Value::Object(variables), "Page").await
    }

    /// Delete one of the viewer's activities.
    pub async fn delete_activity(&self, id: i64) -> ClientResult<bool> {
        self.deleted(queries::DELETE_ACTIVITY, id, "DeleteActivity").await
    }

    /// Create (`id: None`) or update a text activity.
    pub async fn save_text_activity(&self, text: &str, id: Option<i64>) -> ClientResult<Value> {
        let variables = json!({ "id": id, "text": text });
        self.query_root(queries::SAVE_TEXT_ACTIVITY, variables, "SaveTextActivity").await
    }

    /// Create (`id: None`) or update a message activity.
    pub async fn save_message_activity(
        &self,
        text: &str,
        recipient_id: i64,
        private: bool,
        id: Option<i64>,
    ) -> ClientResult<Value> {
        let variables = json!({
            "id": id,
            "message": text,
            "recipientId": recipient_id,
            "private": private,
        });
        self.query_root(queries::SAVE_MESSAGE_ACTIVITY, variables, "SaveMessageActivity").await
    }

    // ==================== Lists ====================

    /// Fetch a user's full anime or manga list.
    pub async fn list_collection(&self, user: &IdOrName, kind: MediaType) -> ClientResult<Value> {
        let mut variables = match user {
            IdOrName::Id(id) => json!({ "userId": id }),
            IdOrName::Name(name) => json!({ "userName": name }),
        };
        variables["type"] = kind.as_str().into();
        self.query_root(queries::LIST_COLLECTION, variables, "MediaListCollection").await
    }

    /// Create or update a list entry. `variables` come from
    /// [`UpdateEntryOptions::to_variables`](crate::models::UpdateEntryOptions::to_variables).
    pub async fn save_list_entry(&self, variables: Map<String, Value>) -> ClientResult<Value> {
        self.query_root(queries::SAVE_LIST_ENTRY, Value::Object(variables), "SaveMediaListEntry")
            .await
    }

    /// Delete a list entry by its list ID.
    pub async fn delete_list_entry(&self, id: i64) -> ClientResult<bool> {
        self.deleted(queries::DELETE_LIST_ENTRY, id, "DeleteMediaListEntry").await
    }

    // ==================== People ====================

    /// Fetch a character by ID or name search.
    pub async fn character(&self, character: &IdOrName) -> ClientResult<Value> {
        self.query_root(queries::CHARACTER, lookup_variables(character), "Character").await
    }

    /// Fetch a staff member by ID or name search.
    pub async fn staff(&self, staff: &IdOrName) -> ClientResult<Value> {
        self.query_root(queries::STAFF, lookup_variables(staff), "Staff").await
    }

    /// Characters whose birthday is today.
    pub async fn birthday_characters(&self, page: i32) -> ClientResult<Value> {
        let document = queries::render(queries::BIRTHDAY_CHARACTERS, "", "");
        self.query_root(&document, json!({ "page": page }), "Page").await
    }

    /// Staff whose birthday is today.
    pub async fn birthday_staff(&self, page: i32) -> ClientResult<Value> {
        let document = queries::render(queries::BIRTHDAY_STAFF, "", "");
        self.query_root(&document, json!({ "page": page }), "Page").await
    }

    // ==================== Recommendations ====================

    pub async fn recommendation(&self, id: i64) -> ClientResult<Value> {
        self.query_root(queries::RECOMMENDATION, json!({ "id": id }), "Recommendation").await
    }

    /// Recommendations attached to a media record, best rated first.
    pub async fn media_recommendations(
        &self,
        media_id: i64,
        page: i32,
        per_page: i32,
    ) -> ClientResult<Value> {
        let document = queries::render(queries::MEDIA_RECOMMENDATIONS, "", "");
        let variables = json!({ "mediaId": media_id, "page": page, "perPage": per_page });
        self.query_root(&document, variables, "Media").await
    }

    // ==================== Search ====================

    pub async fn search_characters(&self, term: &str, page: i32, per_page: i32) -> ClientResult<Value> {
        self.page_search(queries::CHARACTER_SEARCH, term, page, per_page).await
    }

    pub async fn search_staff(&self, term: &str, page: i32, per_page: i32) -> ClientResult<Value> {
        self.page_search(queries::STAFF_SEARCH, term, page, per_page).await
    }

    pub async fn search_studios(&self, term: &str, page: i32, per_page: i32) -> ClientResult<Value> {
        self.page_search(queries::STUDIO_SEARCH, term, page, per_page).await
    }

    pub async fn search_users(&self, term: &str, page: i32, per_page: i32) -> ClientResult<Value> {
        self.page_search(queries::USER_SEARCH, term, page, per_page).await
    }

    // ==================== Threads ====================

    pub async fn thread(&self, id: i64) -> ClientResult<Value> {
        self.query_root(queries::THREAD, json!({ "id": id }), "Thread").await
    }

    pub async fn thread_comments(&self, thread_id: i64, page: i32, per_page: i32) -> ClientResult<Value> {
        let document = queries::render(queries::THREAD_COMMENTS, "", "");
        let variables = json!({ "threadId": thread_id, "page": page, "perPage": per_page });
        self.query_root(&document, variables, "Page").await
    }

    pub async fn delete_thread(&self, id: i64) -> ClientResult<bool> {
        self.deleted(queries::DELETE_THREAD, id, "DeleteThread").await
    }

    // ==================== Users ====================

    pub async fn user_profile(&self, user: &IdOrName) -> ClientResult<Value> {
        let document = queries::with_fragments(queries::USER_PROFILE, &[queries::PROFILE_FRAGMENT]);
        self.query_root(&document, user_variables(user), "User").await
    }

    pub async fn user_stats(&self, user: &IdOrName) -> ClientResult<Value> {
        let document = queries::with_fragments(queries::USER_STATS, &[queries::STATS_FRAGMENT]);
        self.query_root(&document, user_variables(user), "User").await
    }

    /// Profile, statistics and favourites in one request.
    pub async fn user_full(&self, user: &IdOrName) -> ClientResult<Value> {
        let document = queries::with_fragments(
            queries::USER_FULL,
            &[queries::PROFILE_FRAGMENT, queries::STATS_FRAGMENT],
        );
        self.query_root(&document, user_variables(user), "User").await
    }

    /// The user the token belongs to.
    pub async fn viewer(&self) -> ClientResult<Value> {
        let document = queries::with_fragments(queries::VIEWER, &[queries::PROFILE_FRAGMENT]);
        self.query_root(&document, json!({}), "Viewer").await
    }

    /// Toggle following. Returns `true` when the viewer now follows the user.
    pub async fn toggle_follow(&self, user_id: i64) -> ClientResult<bool> {
        let user =
            self.query_root(queries::TOGGLE_FOLLOW, json!({ "userId": user_id }), "ToggleFollow").await?;
        Ok(user.get("isFollowing").and_then(Value::as_bool).unwrap_or(false))
    }

    pub async fn update_user(&self, options: &UserOptionsInput) -> ClientResult<Value> {
        let variables = serde_json::to_value(options)?;
        self.query_root(queries::UPDATE_USER, variables, "UpdateUser").await
    }

    // ==================== Misc ====================

    pub async fn genres(&self) -> ClientResult<Value> {
        self.query_root(queries::GENRES, json!({}), "GenreCollection").await
    }

    pub async fn media_tags(&self) -> ClientResult<Value> {
        self.query_root(queries::MEDIA_TAGS, json!({}), "MediaTagCollection").await
    }

    /// Site statistics over the last seven days.
    pub async fn site_statistics(&self) -> ClientResult<Value> {
        self.query_root(queries::SITE_STATISTICS, json!({}), "SiteStatistics").await
    }

    /// Fetch a studio by ID or name search.
    pub async fn studio(&self, studio: &IdOrName) -> ClientResult<Value> {
        let document = queries::render(queries::STUDIO, "", "");
        self.query_root(&document, lookup_variables(studio), "Studio").await
    }

    // ==================== Internal ====================

    async fn page_search(
        &self,
        template: &str,
        term: &str,
        page: i32,
        per_page: i32,
    ) -> ClientResult<Value> {
        let document = queries::render(template, "", "");
        let variables = json!({ "search": term, "page": page, "perPage": per_page });
        self.query_root(&document, variables, "Page").await
    }

    /// Run a `Delete*` mutation and read its `deleted` flag.
    async fn deleted(&self, document: &str, id: i64, root: &str) -> ClientResult<bool> {
        let result = self.query_root(document, json!({ "id": id }), root).await?;
        Ok(result.get("deleted").and_then(Value::as_bool).unwrap_or(false))
    }

    /// Execute `document` and return `data[root]`.
    async fn query_root(&self, document: &str, variables: Value, root: &str) -> ClientResult<Value> {
        let mut data = self.post(document, variables).await?;
        match data.remove(root) {
            Some(Value::Null) | None => Err(ClientError::missing_data(root)),
            Some(value) => Ok(value),
        }
    }

    /// POST one GraphQL operation and return its `data` object.
    async fn post(&self, document: &str, variables: Value) -> ClientResult<Map<String, Value>> {
        let body = serde_json::to_string(&json!({ "query": document, "variables": variables }))?;

        let response = self.client.post(self.api_url.as_str()).body(body).send().await?;

        let body = Self::handle_response(response).await?;
        match body.data {
            Some(Value::Object(data)) => Ok(data),
            _ => Err(ClientError::missing_data("data")),
        }
    }

    /// Map HTTP status and GraphQL `errors` to [`ClientError`].
    async fn handle_response(response: reqwest::Response) -> ClientResult<GraphQlResponse> {
        let status = response.status();

        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);

            return Err(ClientError::rate_limited(retry_after));
        }

        let text = response.text().await?;

        if status.is_success() {
            let body: GraphQlResponse = serde_json::from_str(&text)?;
            if !body.errors.is_empty() {
                return Err(ClientError::graphql(join_errors(&body.errors)));
            }
            return Ok(body);
        }

        let message = serde_json::from_str::<GraphQlResponse>(&text)
            .ok()
            .filter(|b| !b.errors.is_empty())
            .map(|b| join_errors(&b.errors))
            .unwrap_or(text);

        tracing::debug!(status = status.as_u16(), %message, "AniList returned an error status");

        Err(match status.as_u16() {
            404 => ClientError::not_found(message),
            400 => ClientError::bad_request(message),
            401 | 403 => ClientError::unauthorized(message),
            500..=599 => ClientError::server(status.as_u16(), message),
            code => ClientError::UnexpectedStatus { status: code, message },
        })
    }
}

impl std::fmt::Debug for AniListClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AniListClient")
            .field("api_url", &self.api_url)
            .field("has_token", &self.has_token)
            .finish()
    }
}

fn join_errors(errors: &[GraphQlError]) -> String {
    errors.iter().map(|e| e.message.as_str()).collect::<Vec<_>>().join("; ")
}

/// `User(id|name)` variables.
fn user_variables(user: &IdOrName) -> Value {
    match user {
        IdOrName::Id(id) => json!({ "id": id }),
        IdOrName::Name(name) => json!({ "name": name }),
    }
}

/// `Character|Staff|Studio(id|search)` variables.
fn lookup_variables(key: &IdOrName) -> Value {
    match key {
        IdOrName::Id(id) => json!({ "id": id }),
        IdOrName::Name(name) => json!({ "search": name }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_token() {
        let config = Config::new(Some("secret-token".to_string()));
        let client = AniListClient::new(&config).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("has_token: true"));
    }

    #[test]
    fn test_lookup_variables() {
        assert_eq!(lookup_variables(&IdOrName::Id(7)), json!({"id": 7}));
        assert_eq!(
            lookup_variables(&IdOrName::Name("Mappa".to_string())),
            json!({"search": "Mappa"})
        );
        assert_eq!(
            user_variables(&IdOrName::Name("Josh".to_string())),
            json!({"name": "Josh"})
        );
    }

    #[test]
    fn test_favourite_nouns() {
        assert_eq!(FavouriteKind::Staff.noun(), "staff member");
        assert_eq!(FavouriteKind::Studio.connection(), "studios");
        assert_eq!(FavouriteKind::Anime.variable(), "animeId");
    }
}
