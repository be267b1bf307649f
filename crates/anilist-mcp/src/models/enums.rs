//! AniList enum value sets.
//!
//! The `&[&str]` tables feed the advertised JSON schemas. The Rust enums
//! are used where a typed input carries the value and must reject anything
//! outside the set at deserialization time.

use serde::{Deserialize, Serialize};

pub const MEDIA_TYPE: &[&str] = &["ANIME", "MANGA"];

pub const MEDIA_FORMAT: &[&str] =
    &["TV", "TV_SHORT", "MOVIE", "SPECIAL", "OVA", "ONA", "MUSIC", "MANGA", "NOVEL", "ONE_SHOT"];

pub const MEDIA_STATUS: &[&str] =
    &["FINISHED", "RELEASING", "NOT_YET_RELEASED", "CANCELLED", "HIATUS"];

pub const MEDIA_SEASON: &[&str] = &["WINTER", "SPRING", "SUMMER", "FALL"];

pub const MEDIA_SOURCE: &[&str] = &[
    "ORIGINAL",
    "MANGA",
    "LIGHT_NOVEL",
    "VISUAL_NOVEL",
    "VIDEO_GAME",
    "OTHER",
    "NOVEL",
    "DOUJINSHI",
    "ANIME",
];

pub const MEDIA_SORT: &[&str] = &[
    "ID",
    "ID_DESC",
    "TITLE_ROMAJI",
    "TITLE_ROMAJI_DESC",
    "TITLE_ENGLISH",
    "TITLE_ENGLISH_DESC",
    "TITLE_NATIVE",
    "TITLE_NATIVE_DESC",
    "TYPE",
    "TYPE_DESC",
    "FORMAT",
    "FORMAT_DESC",
    "START_DATE",
    "START_DATE_DESC",
    "END_DATE",
    "END_DATE_DESC",
    "SCORE",
    "SCORE_DESC",
    "POPULARITY",
    "POPULARITY_DESC",
    "TRENDING",
    "TRENDING_DESC",
    "EPISODES",
    "EPISODES_DESC",
    "DURATION",
    "DURATION_DESC",
    "STATUS",
    "STATUS_DESC",
    "CHAPTERS",
    "CHAPTERS_DESC",
    "VOLUMES",
    "VOLUMES_DESC",
    "UPDATED_AT",
    "UPDATED_AT_DESC",
    "SEARCH_MATCH",
    "FAVOURITES",
    "FAVOURITES_DESC",
];

pub const ACTIVITY_SORT: &[&str] = &["ID", "ID_DESC"];

pub const ACTIVITY_TYPE: &[&str] = &["TEXT", "ANIME_LIST", "MANGA_LIST", "MESSAGE", "MEDIA_LIST"];

pub const MEDIA_LIST_STATUS: &[&str] =
    &["CURRENT", "PLANNING", "COMPLETED", "PAUSED", "DROPPED", "REPEATING"];

pub const USER_TITLE_LANGUAGE: &[&str] = &[
    "ROMAJI",
    "ENGLISH",
    "NATIVE",
    "ROMAJI_STYLISED",
    "ENGLISH_STYLISED",
    "NATIVE_STYLISED",
];

pub const USER_STAFF_NAME_LANGUAGE: &[&str] = &["ROMAJI", "NATIVE", "ROMAJI_WESTERN"];

pub const SCORE_FORMAT: &[&str] = &["POINT_100", "POINT_10_DECIMAL", "POINT_10", "POINT_5", "POINT_3"];

pub const NOTIFICATION_TYPE: &[&str] = &[
    "ACTIVITY_MESSAGE",
    "ACTIVITY_REPLY",
    "FOLLOWING",
    "ACTIVITY_MENTION",
    "THREAD_COMMENT_MENTION",
    "THREAD_SUBSCRIBED",
    "THREAD_COMMENT_REPLY",
    "AIRING",
    "ACTIVITY_LIKE",
    "ACTIVITY_REPLY_LIKE",
    "THREAD_LIKE",
    "THREAD_COMMENT_LIKE",
    "ACTIVITY_REPLY_SUBSCRIBED",
    "RELATED_MEDIA_ADDITION",
    "MEDIA_DATA_CHANGE",
    "MEDIA_MERGE",
    "MEDIA_DELETION",
];

/// Media kind for lookups and list collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    Anime,
    Manga,
}

impl MediaType {
    /// GraphQL enum literal.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Anime => "ANIME",
            Self::Manga => "MANGA",
        }
    }

    /// Lowercase noun for messages.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Anime => "anime",
            Self::Manga => "manga",
        }
    }
}

/// Status of a list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaListStatus {
    Current,
    Planning,
    Completed,
    Paused,
    Dropped,
    Repeating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserTitleLanguage {
    Romaji,
    English,
    Native,
    RomajiStylised,
    EnglishStylised,
    NativeStylised,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStaffNameLanguage {
    Romaji,
    Native,
    RomajiWestern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreFormat {
    #[serde(rename = "POINT_100")]
    Point100,
    #[serde(rename = "POINT_10_DECIMAL")]
    Point10Decimal,
    #[serde(rename = "POINT_10")]
    Point10,
    #[serde(rename = "POINT_5")]
    Point5,
    #[serde(rename = "POINT_3")]
    Point3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    ActivityMessage,
    ActivityReply,
    Following,
    ActivityMention,
    ThreadCommentMention,
    ThreadSubscribed,
    ThreadCommentReply,
    Airing,
    ActivityLike,
    ActivityReplyLike,
    ThreadLike,
    ThreadCommentLike,
    ActivityReplySubscribed,
    RelatedMediaAddition,
    MediaDataChange,
    MediaMerge,
    MediaDeletion,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::DeserializeOwned;

    fn accepts_all<T: DeserializeOwned + Serialize>(values: &[&str]) {
        for value in values {
            let parsed: T = serde_json::from_value(serde_json::json!(value))
                .unwrap_or_else(|e| panic!("{value} rejected: {e}"));
            assert_eq!(serde_json::to_value(&parsed).unwrap(), serde_json::json!(value));
        }
    }

    #[test]
    fn test_typed_enums_match_tables() {
        accepts_all::<MediaType>(MEDIA_TYPE);
        accepts_all::<MediaListStatus>(MEDIA_LIST_STATUS);
        accepts_all::<UserTitleLanguage>(USER_TITLE_LANGUAGE);
        accepts_all::<UserStaffNameLanguage>(USER_STAFF_NAME_LANGUAGE);
        accepts_all::<ScoreFormat>(SCORE_FORMAT);
        accepts_all::<NotificationType>(NOTIFICATION_TYPE);
    }

    #[test]
    fn test_rejects_unknown_status() {
        assert!(serde_json::from_str::<MediaListStatus>("\"WATCHING\"").is_err());
    }

    #[test]
    fn test_media_type_literals() {
        assert_eq!(MediaType::Anime.as_str(), "ANIME");
        assert_eq!(MediaType::Manga.noun(), "manga");
    }
}
