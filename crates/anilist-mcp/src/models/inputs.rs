//! Input models for MCP tool parameters.
//!
//! Field names follow the advertised schemas (`activityID`, `perPage`, ...).
//! Defaults declared in the schemas are applied by serde.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::enums::{
    MediaListStatus, NotificationType, ScoreFormat, UserStaffNameLanguage, UserTitleLanguage,
};

fn default_page() -> i32 {
    1
}

fn default_per_page() -> i32 {
    25
}

fn default_amount() -> i32 {
    5
}

/// A numeric AniList ID or a name/search string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdOrName {
    Id(i64),
    Name(String),
}

impl std::fmt::Display for IdOrName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// A single value or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

/// Tools without arguments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmptyInput {}

/// Input keyed by a numeric `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdInput {
    pub id: i64,
}

/// Input keyed by an `id` that may be numeric or a name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdOrNameInput {
    pub id: IdOrName,
}

/// Input for `get_studio`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioInput {
    pub studio: IdOrName,
}

/// Input keyed by a user ID or username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInput {
    pub user: IdOrName,
}

/// Input keyed by a numeric user ID only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericUserInput {
    pub user: i64,
}

/// Input for `follow_user`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowInput {
    #[serde(rename = "userID")]
    pub user_id: i64,
}

/// Input for `get_anime` / `get_manga`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaLookupInput {
    pub ids: OneOrMany<i64>,

    /// Skip the media filter and return the raw record.
    #[serde(default)]
    pub full_data: bool,
}

/// Input for `get_activity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityIdInput {
    #[serde(rename = "activityID")]
    pub activity_id: i64,
}

/// Input for `get_user_activity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserActivityInput {
    pub user: i64,

    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_per_page")]
    pub per_page: i32,
}

/// Input for `post_text_activity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextActivityInput {
    pub text: String,

    /// Existing activity to update; `None` creates a new one.
    #[serde(default)]
    pub id: Option<i64>,
}

/// Input for `post_message_activity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageActivityInput {
    pub text: String,

    pub recipient_id: i64,

    #[serde(default)]
    pub is_private: bool,

    #[serde(default)]
    pub id: Option<i64>,
}

/// Input for `get_todays_birthday_*`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInput {
    #[serde(default = "default_page")]
    pub page: i32,
}

/// Input for `get_recommendation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationInput {
    #[serde(rename = "recommendID")]
    pub recommend_id: i64,
}

/// Input for `get_recommendations_for_media`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRecommendationsInput {
    #[serde(rename = "mediaID")]
    pub media_id: i64,

    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_per_page")]
    pub per_page: i32,
}

/// Input for `get_thread_comments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadCommentsInput {
    pub id: i64,

    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_per_page")]
    pub per_page: i32,
}

/// Input for `search_activity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySearchInput {
    #[serde(rename = "activityID", default)]
    pub activity_id: Option<i64>,

    /// Raw filter object, validated against the activity filter table.
    #[serde(default)]
    pub filter: Option<Map<String, Value>>,

    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_amount")]
    pub per_page: i32,
}

/// Input for `search_anime` / `search_manga`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaSearchInput {
    pub term: String,

    /// Raw filter object, validated against the media filter table.
    #[serde(default)]
    pub filter: Option<Map<String, Value>>,

    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_amount")]
    pub amount: i32,
}

/// Input for the plain term searches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchInput {
    pub term: String,

    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_amount")]
    pub amount: i32,
}

/// Calendar date with every part set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzyDateInput {
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

/// Values saved with a list entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntryOptions {
    pub id: i64,
    pub media_id: i64,
    pub status: MediaListStatus,
    pub score: f64,
    pub score_raw: i64,
    pub progress: i64,
    pub progress_volumes: i64,
    pub repeat: i64,
    pub priority: i64,
    pub private: bool,
    pub notes: String,
    pub hidden_from_status_lists: bool,
    pub custom_lists: Vec<String>,
    pub advanced_scores: Vec<f64>,
    pub started_at: FuzzyDateInput,
    pub completed_at: FuzzyDateInput,
}

/// Which list entry a save targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryTarget {
    /// Create (or overwrite) the entry for this media ID.
    Media(i64),
    /// Edit the existing entry with this list ID.
    Entry(i64),
}

impl UpdateEntryOptions {
    /// GraphQL variables for `SaveMediaListEntry`.
    ///
    /// The target ID replaces whichever of `id` / `mediaId` the options carried.
    pub fn to_variables(&self, target: EntryTarget) -> serde_json::Result<Map<String, Value>> {
        let Value::Object(mut vars) = serde_json::to_value(self)? else {
            return Ok(Map::new());
        };

        vars.remove("id");
        vars.remove("mediaId");
        match target {
            EntryTarget::Media(id) => vars.insert("mediaId".to_string(), id.into()),
            EntryTarget::Entry(id) => vars.insert("id".to_string(), id.into()),
        };
        Ok(vars)
    }
}

/// Input for `add_list_entry` / `update_list_entry`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEntryInput {
    pub id: i64,
    pub options: UpdateEntryOptions,
}

/// One notification toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationOption {
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub enabled: bool,
}

/// Anime or manga list settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaListOptionsInput {
    pub section_order: Vec<String>,
    pub split_completed_section_by_format: bool,
    pub custom_lists: Vec<String>,
    pub advanced_scoring: Vec<String>,
    pub advanced_scoring_enabled: bool,
    pub theme: String,
}

/// Account settings for `update_user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOptionsInput {
    pub about: String,
    pub title_language: UserTitleLanguage,
    pub display_adult_content: bool,
    pub airing_notifications: bool,
    pub profile_color: String,
    pub activity_merge_time: i64,
    pub staff_name_language: UserStaffNameLanguage,
    pub notification_options: Vec<NotificationOption>,
    pub timezone: String,
    pub score_format: ScoreFormat,
    pub row_order: String,
    pub anime_list_options: MediaListOptionsInput,
    pub manga_list_options: MediaListOptionsInput,
}

/// Input for `update_user`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserInput {
    pub options: UserOptionsInput,
}
