//! Bounded projection of AniList media records.
//!
//! Full `Media` objects carry character, staff and relation connections that
//! easily run to hundreds of kilobytes. [`filter_media`] keeps the fields an
//! agent needs to reason about a title and truncates every list to a short,
//! fixed prefix.

use serde_json::{Map, Value};

/// Fields copied verbatim from every record.
pub const BASE_FIELDS: &[&str] = &[
    "id",
    "idMal",
    "title",
    "type",
    "format",
    "status",
    "description",
    "startDate",
    "endDate",
    "countryOfOrigin",
    "isLicensed",
    "hashtag",
    "updatedAt",
    "coverImage",
    "bannerImage",
    "genres",
    "synonyms",
    "averageScore",
    "meanScore",
    "popularity",
    "favourites",
    "isAdult",
    "siteUrl",
];

/// Fields copied when the record has an `episodes` key.
pub const ANIME_FIELDS: &[&str] = &["episodes", "season", "seasonYear", "duration", "source"];

/// Fields copied when the record has a `chapters` key (and no `episodes`).
pub const MANGA_FIELDS: &[&str] = &["chapters", "volumes"];

/// Maximum tags kept.
pub const MAX_TAGS: usize = 5;
/// Maximum studios kept.
pub const MAX_STUDIOS: usize = 3;
/// Maximum external links kept.
pub const MAX_EXTERNAL_LINKS: usize = 5;
/// Maximum streaming episodes kept.
pub const MAX_STREAMING_EPISODES: usize = 3;
/// Maximum rankings kept.
pub const MAX_RANKINGS: usize = 3;
/// Maximum next-airing entries kept when the field is a list.
pub const MAX_NEXT_AIRING: usize = 1;

const TAG_FIELDS: &[&str] = &["id", "name", "isMediaSpoiler"];
const STUDIO_FIELDS: &[&str] = &["id", "name", "isAnimationStudio"];
const LINK_FIELDS: &[&str] = &["site", "url"];
const STREAMING_FIELDS: &[&str] = &["title", "url"];
const RANKING_FIELDS: &[&str] = &["rank", "type", "context", "year", "season"];
const AIRING_FIELDS: &[&str] = &["airingAt", "timeUntilAiring", "episode"];

/// Filter one record or an array of records.
///
/// Arrays are filtered element-wise and keep their order. Values that are
/// not objects pass through untouched.
#[must_use]
pub fn filter_media(media: &Value) -> Value {
    match media {
        Value::Array(items) => Value::Array(items.iter().map(filter_single).collect()),
        other => filter_single(other),
    }
}

fn filter_single(media: &Value) -> Value {
    match media {
        Value::Object(record) => Value::Object(filter_record(record)),
        other => other.clone(),
    }
}

/// Project a single media object.
///
/// The result never holds a top-level `null`; empty lists are kept.
#[must_use]
pub fn filter_record(media: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();

    copy_fields(media, &mut out, BASE_FIELDS);

    if media.contains_key("episodes") {
        copy_fields(media, &mut out, ANIME_FIELDS);
    } else if media.contains_key("chapters") {
        copy_fields(media, &mut out, MANGA_FIELDS);
    }

    if let Some(tags) = media.get("tags").and_then(Value::as_array) {
        out.insert("tags".into(), project_list(tags, MAX_TAGS, TAG_FIELDS));
    }

    if let Some(studios) = media.get("studios") {
        if let Some(projected) = project_connection(studios, MAX_STUDIOS, STUDIO_FIELDS) {
            out.insert("studios".into(), projected);
        }
    }

    if let Some(links) = media.get("externalLinks").and_then(Value::as_array) {
        let links = links.iter().take(MAX_EXTERNAL_LINKS).map(project_link).collect();
        out.insert("externalLinks".into(), Value::Array(links));
    }

    if let Some(episodes) = media.get("streamingEpisodes").and_then(Value::as_array) {
        out.insert(
            "streamingEpisodes".into(),
            project_list(episodes, MAX_STREAMING_EPISODES, STREAMING_FIELDS),
        );
    }

    if let Some(rankings) = media.get("rankings").and_then(Value::as_array) {
        out.insert("rankings".into(), project_list(rankings, MAX_RANKINGS, RANKING_FIELDS));
    }

    if let Some(next) = media.get("nextAiringEpisode") {
        let projected = match next {
            Value::Object(obj) if !obj.contains_key("nodes") => {
                Some(project_element(next, AIRING_FIELDS))
            }
            _ => project_connection(next, MAX_NEXT_AIRING, AIRING_FIELDS),
        };
        if let Some(projected) = projected {
            out.insert("nextAiringEpisode".into(), projected);
        }
    }

    out.retain(|_, value| !value.is_null());
    out
}

fn copy_fields(from: &Map<String, Value>, to: &mut Map<String, Value>, fields: &[&str]) {
    for &field in fields {
        if let Some(value) = from.get(field) {
            to.insert(field.to_string(), value.clone());
        }
    }
}

/// First `limit` elements, each narrowed to `fields`.
fn project_list(items: &[Value], limit: usize, fields: &[&str]) -> Value {
    Value::Array(items.iter().take(limit).map(|item| project_element(item, fields)).collect())
}

/// Handles both a bare list and a GraphQL connection `{nodes: [...]}`.
/// The outer shape of the input is kept.
fn project_connection(value: &Value, limit: usize, fields: &[&str]) -> Option<Value> {
    match value {
        Value::Array(items) => Some(project_list(items, limit, fields)),
        Value::Object(conn) => {
            let nodes = conn.get("nodes")?.as_array()?;
            let mut wrapped = Map::new();
            wrapped.insert("nodes".into(), project_list(nodes, limit, fields));
            Some(Value::Object(wrapped))
        }
        _ => None,
    }
}

/// Members missing on the source element are left out rather than nulled.
fn project_element(item: &Value, fields: &[&str]) -> Value {
    let mut narrowed = Map::new();
    if let Value::Object(source) = item {
        copy_fields(source, &mut narrowed, fields);
    }
    Value::Object(narrowed)
}

/// External links arrive either as plain URL strings or as `{site, url}` objects.
fn project_link(link: &Value) -> Value {
    match link {
        Value::String(_) => link.clone(),
        other => project_element(other, LINK_FIELDS),
    }
}
