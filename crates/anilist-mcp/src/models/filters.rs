//! Search filter tables.
//!
//! Each filter key carries its GraphQL type, so a caller-supplied filter
//! object can be forwarded as typed query variables. The same tables
//! generate the JSON schema advertised for the `filter` argument.

use serde_json::{Map, Value, json};

use super::enums;
use crate::error::{ToolError, ToolResult};

/// Value shape of one filter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int,
    Boolean,
    Text,
    /// ISO 3166-1 alpha-2 code, sent as `CountryCode`.
    Country,
    /// `{year, month, day}` object, sent as a `FuzzyDateInt`.
    FuzzyDate,
    /// `YYYYMMDD` integer.
    FuzzyDateInt,
    IntList,
    TextList,
    Enum { graphql: &'static str, values: &'static [&'static str] },
    EnumList { graphql: &'static str, values: &'static [&'static str] },
}

impl FieldKind {
    /// GraphQL variable type.
    #[must_use]
    pub fn graphql_type(self) -> String {
        match self {
            Self::Int => "Int".to_string(),
            Self::Boolean => "Boolean".to_string(),
            Self::Text => "String".to_string(),
            Self::Country => "CountryCode".to_string(),
            Self::FuzzyDate | Self::FuzzyDateInt => "FuzzyDateInt".to_string(),
            Self::IntList => "[Int]".to_string(),
            Self::TextList => "[String]".to_string(),
            Self::Enum { graphql, .. } => graphql.to_string(),
            Self::EnumList { graphql, .. } => format!("[{graphql}]"),
        }
    }

    /// JSON schema fragment for this kind.
    #[must_use]
    pub fn json_schema(self, description: &str) -> Value {
        match self {
            Self::Int | Self::FuzzyDateInt => json!({"type": "number", "description": description}),
            Self::Boolean => json!({"type": "boolean", "description": description}),
            Self::Text | Self::Country => json!({"type": "string", "description": description}),
            Self::FuzzyDate => json!({
                "type": "object",
                "properties": {
                    "year": {"type": ["number", "null"]},
                    "month": {"type": ["number", "null"]},
                    "day": {"type": ["number", "null"]}
                },
                "required": ["year", "month", "day"],
                "description": description
            }),
            Self::IntList => {
                json!({"type": "array", "items": {"type": "number"}, "description": description})
            }
            Self::TextList => {
                json!({"type": "array", "items": {"type": "string"}, "description": description})
            }
            Self::Enum { values, .. } => {
                json!({"type": "string", "enum": values, "description": description})
            }
            Self::EnumList { values, .. } => json!({
                "type": "array",
                "items": {"type": "string", "enum": values},
                "description": description
            }),
        }
    }

    /// Check `value` and convert it to the variable value sent upstream.
    ///
    /// Returns `None` when the value carries no constraint (a date with no parts).
    fn coerce(self, key: &str, value: &Value) -> ToolResult<Option<Value>> {
        let ok = match self {
            Self::Int | Self::FuzzyDateInt => is_integer(value),
            Self::Boolean => value.is_boolean(),
            Self::Text | Self::Country => value.is_string(),
            Self::FuzzyDate => return fuzzy_date_int(key, value).map(|v| v.map(Value::from)),
            Self::IntList => value.as_array().is_some_and(|a| a.iter().all(is_integer)),
            Self::TextList => value.as_array().is_some_and(|a| a.iter().all(Value::is_string)),
            Self::Enum { values, .. } => is_member(value, values),
            Self::EnumList { values, .. } => {
                value.as_array().is_some_and(|a| a.iter().all(|v| is_member(v, values)))
            }
        };

        if ok {
            Ok(Some(value.clone()))
        } else {
            Err(ToolError::validation(key, format!("expected {}", self.graphql_type())))
        }
    }
}

fn is_integer(value: &Value) -> bool {
    value.is_i64() || value.is_u64() || value.as_f64().is_some_and(|f| f.fract() == 0.0)
}

/// Integer value, including integral floats such as `2020.0`.
fn integral_i64(value: &Value) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && (-LIMIT..LIMIT).contains(f))
            .map(|f| f as i64)
    })
}

fn is_member(value: &Value, values: &[&str]) -> bool {
    value.as_str().is_some_and(|s| values.contains(&s))
}

/// Convert a `{year, month, day}` object (members nullable) to `YYYYMMDD`.
///
/// Integers are accepted as already converted. Missing parts count as zero.
fn fuzzy_date_int(key: &str, value: &Value) -> ToolResult<Option<i64>> {
    if let Some(int) = integral_i64(value) {
        return Ok(Some(int));
    }

    let Some(date) = value.as_object() else {
        return Err(ToolError::validation(key, "expected {year, month, day}"));
    };

    let mut parts = [0_i64; 3];
    let mut any = false;
    for (slot, name) in parts.iter_mut().zip(["year", "month", "day"]) {
        match date.get(name) {
            None | Some(Value::Null) => {}
            Some(v) => {
                *slot = integral_i64(v)
                    .ok_or_else(|| ToolError::validation(key, format!("{name} must be a number")))?;
                any = true;
            }
        }
    }

    if !any {
        return Ok(None);
    }

    parts[0]
        .checked_mul(10_000)
        .and_then(|y| parts[1].checked_mul(100).and_then(|m| y.checked_add(m)))
        .and_then(|ym| ym.checked_add(parts[2]))
        .map(Some)
        .ok_or_else(|| ToolError::validation(key, "date out of range"))
}

/// One filter key.
#[derive(Debug, Clone, Copy)]
pub struct FilterField {
    pub key: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
}

const fn field(key: &'static str, kind: FieldKind, description: &'static str) -> FilterField {
    FilterField { key, kind, description }
}

const ACTIVITY_TYPE: FieldKind =
    FieldKind::Enum { graphql: "ActivityType", values: enums::ACTIVITY_TYPE };
const ACTIVITY_TYPES: FieldKind =
    FieldKind::EnumList { graphql: "ActivityType", values: enums::ACTIVITY_TYPE };
const MEDIA_FORMAT: FieldKind =
    FieldKind::Enum { graphql: "MediaFormat", values: enums::MEDIA_FORMAT };
const MEDIA_FORMATS: FieldKind =
    FieldKind::EnumList { graphql: "MediaFormat", values: enums::MEDIA_FORMAT };
const MEDIA_STATUS: FieldKind =
    FieldKind::Enum { graphql: "MediaStatus", values: enums::MEDIA_STATUS };
const MEDIA_STATUSES: FieldKind =
    FieldKind::EnumList { graphql: "MediaStatus", values: enums::MEDIA_STATUS };

/// Keys accepted by `search_activity`'s `filter`.
pub const ACTIVITY_FILTERS: &[FilterField] = &[
    field("id", FieldKind::Int, "The id of the activity"),
    field("userId", FieldKind::Int, "The userID of the account with the activity"),
    field("messengerId", FieldKind::Int, "The ID of who sent the message"),
    field("mediaId", FieldKind::Int, "The ID of the media"),
    field("type", ACTIVITY_TYPE, "The type of activity"),
    field(
        "isFollowing",
        FieldKind::Boolean,
        "[Requires Login] Filter users by who is following the authorized user",
    ),
    field("hasReplies", FieldKind::Boolean, "Filter by which activities have replies"),
    field(
        "hasRepliesOrTypeText",
        FieldKind::Boolean,
        "Filter by which activities have replies or text",
    ),
    field("createdAt", FieldKind::Int, "The time at which the activity was created"),
    field("id_not", FieldKind::Int, "Exclude an activity with the given ID"),
    field("id_in", FieldKind::IntList, "Include any activities with the given IDs"),
    field("id_not_in", FieldKind::IntList, "Excludes any activities with the given IDs"),
    field("userId_not", FieldKind::Int, "Exclude any activity with the given userID"),
    field("userId_in", FieldKind::IntList, "Includes any activity with the given userIDs"),
    field("userId_not_in", FieldKind::IntList, "Exclude any activity with the given userIDs"),
    field(
        "messengerId_not",
        FieldKind::Int,
        "Exclude any activity with the given message sender ID",
    ),
    field(
        "messengerId_in",
        FieldKind::IntList,
        "Include any activity with the given message sender IDs",
    ),
    field(
        "messengerId_not_in",
        FieldKind::IntList,
        "Exclude any activity with the given message sender IDs",
    ),
    field("mediaId_not", FieldKind::Int, "Exclude any activity with the given media ID"),
    field("mediaId_in", FieldKind::IntList, "Include any activity with the given media IDs"),
    field("mediaId_not_in", FieldKind::IntList, "Exclude any activity with the given media IDs"),
    field("type_not", ACTIVITY_TYPE, "Exclude any activity with the same ActivityType"),
    field("type_in", ACTIVITY_TYPES, "Include any activity with the given ActivityTypes"),
    field("type_not_in", ACTIVITY_TYPES, "Exclude any activity with the given ActivityTypes"),
    field(
        "createdAt_greater",
        FieldKind::Int,
        "Include any activity created at the given date or more recent",
    ),
    field(
        "createdAt_lesser",
        FieldKind::Int,
        "Include any activity created at the given date or less recent",
    ),
    field(
        "sort",
        FieldKind::EnumList { graphql: "ActivitySort", values: enums::ACTIVITY_SORT },
        "Sort the query by the parameters given.",
    ),
];

/// Keys accepted by `search_anime` / `search_manga`'s `filter`.
pub const MEDIA_FILTERS: &[FilterField] = &[
    field("id", FieldKind::Int, "The AniList ID"),
    field("idMal", FieldKind::Int, "The MyAnimeList ID"),
    field("startDate", FieldKind::FuzzyDate, "The start date of the media"),
    field("endDate", FieldKind::FuzzyDate, "The end date of the media"),
    field(
        "season",
        FieldKind::Enum { graphql: "MediaSeason", values: enums::MEDIA_SEASON },
        "The season the media aired",
    ),
    field("seasonYear", FieldKind::Int, "The year of the season"),
    field(
        "type",
        FieldKind::Enum { graphql: "MediaType", values: enums::MEDIA_TYPE },
        "The type of the media (ANIME or MANGA)",
    ),
    field("format", MEDIA_FORMAT, "The format of the media"),
    field("status", MEDIA_STATUS, "The current status of the media"),
    field("episodes", FieldKind::Int, "The number of episodes in the media"),
    field("duration", FieldKind::Int, "The duration of episodes in minutes"),
    field("chapters", FieldKind::Int, "The number of chapters in the media"),
    field("volumes", FieldKind::Int, "The number of volumes in the media"),
    field("isAdult", FieldKind::Boolean, "If the media is intended for adult audiences"),
    field("genre", FieldKind::Text, "Filter by a specific genre"),
    field("tag", FieldKind::Text, "Filter by a specific tag"),
    field("minimumTagRank", FieldKind::Int, "The minimum tag rank to filter by"),
    field("tagCategory", FieldKind::Text, "Filter by tag category"),
    field(
        "onList",
        FieldKind::Boolean,
        "[Requires Login] Filter by if the media is on the authenticated user's list",
    ),
    field("licensedBy", FieldKind::Text, "Filter by media licensed by a specific company"),
    field("averageScore", FieldKind::Int, "Filter by the media's average score"),
    field("popularity", FieldKind::Int, "Filter by the media's popularity"),
    field(
        "source",
        FieldKind::Enum { graphql: "MediaSource", values: enums::MEDIA_SOURCE },
        "Filter by the media's source type",
    ),
    field(
        "countryOfOrigin",
        FieldKind::Country,
        "Filter by the country where the media was created (ISO 3166-1 alpha-2 country code)",
    ),
    field("search", FieldKind::Text, "Filter by search query"),
    field("id_not", FieldKind::Int, "Filter by media ID not equal to value"),
    field("id_in", FieldKind::IntList, "Filter by media ID in array"),
    field("id_not_in", FieldKind::IntList, "Filter by media ID not in array"),
    field("idMal_not", FieldKind::Int, "Filter by MyAnimeList ID not equal to value"),
    field("idMal_in", FieldKind::IntList, "Filter by MyAnimeList ID in array"),
    field("idMal_not_in", FieldKind::IntList, "Filter by MyAnimeList ID not in array"),
    field(
        "startDate_greater",
        FieldKind::FuzzyDateInt,
        "Filter by start date greater than value (FuzzyDateInt format)",
    ),
    field(
        "startDate_lesser",
        FieldKind::FuzzyDateInt,
        "Filter by start date less than value (FuzzyDateInt format)",
    ),
    field("startDate_like", FieldKind::Text, "Filter by start date that matches pattern"),
    field(
        "endDate_greater",
        FieldKind::FuzzyDateInt,
        "Filter by end date greater than value (FuzzyDateInt format)",
    ),
    field(
        "endDate_lesser",
        FieldKind::FuzzyDateInt,
        "Filter by end date less than value (FuzzyDateInt format)",
    ),
    field("endDate_like", FieldKind::Text, "Filter by end date that matches pattern"),
    field("format_in", MEDIA_FORMATS, "Filter by media format in array"),
    field("format_not", MEDIA_FORMAT, "Filter by media format not equal to value"),
    field("format_not_in", MEDIA_FORMATS, "Filter by media format not in array"),
    field("status_in", MEDIA_STATUSES, "Filter by media status in array"),
    field("status_not", MEDIA_STATUS, "Filter by media status not equal to value"),
    field("status_not_in", MEDIA_STATUSES, "Filter by media status not in array"),
    field("episodes_greater", FieldKind::Int, "Filter by episode count greater than value"),
    field("episodes_lesser", FieldKind::Int, "Filter by episode count less than value"),
    field("duration_greater", FieldKind::Int, "Filter by episode duration greater than value"),
    field("duration_lesser", FieldKind::Int, "Filter by episode duration less than value"),
    field("chapters_greater", FieldKind::Int, "Filter by chapter count greater than value"),
    field("chapters_lesser", FieldKind::Int, "Filter by chapter count less than value"),
    field("volumes_greater", FieldKind::Int, "Filter by volume count greater than value"),
    field("volumes_lesser", FieldKind::Int, "Filter by volume count less than value"),
    field("genre_in", FieldKind::TextList, "Filter by genres in array"),
    field("genre_not_in", FieldKind::TextList, "Filter by genres not in array"),
    field("tag_in", FieldKind::TextList, "Filter by tags in array"),
    field("tag_not_in", FieldKind::TextList, "Filter by tags not in array"),
    field("tagCategory_in", FieldKind::TextList, "Filter by tag categories in array"),
    field("tagCategory_not_in", FieldKind::TextList, "Filter by tag categories not in array"),
    field("licensedBy_in", FieldKind::TextList, "Filter by media licensed by companies in array"),
    field("averageScore_not", FieldKind::Int, "Filter by average score not equal to value"),
    field(
        "averageScore_greater",
        FieldKind::Int,
        "Filter by average score greater than value",
    ),
    field("averageScore_lesser", FieldKind::Int, "Filter by average score less than value"),
    field("popularity_not", FieldKind::Int, "Filter by popularity not equal to value"),
    field("popularity_greater", FieldKind::Int, "Filter by popularity greater than value"),
    field("popularity_lesser", FieldKind::Int, "Filter by popularity less than value"),
    field(
        "source_in",
        FieldKind::EnumList { graphql: "MediaSource", values: enums::MEDIA_SOURCE },
        "Filter by source types in array",
    ),
    field(
        "sort",
        FieldKind::EnumList { graphql: "MediaSort", values: enums::MEDIA_SORT },
        "Sort the results by the provided sort options",
    ),
];

/// JSON schema for a filter object built from `fields`. Every key is optional.
#[must_use]
pub fn filter_schema(fields: &[FilterField], description: &str) -> Value {
    let properties: Map<String, Value> = fields
        .iter()
        .map(|f| (f.key.to_string(), f.kind.json_schema(f.description)))
        .collect();

    json!({
        "type": "object",
        "properties": properties,
        "additionalProperties": false,
        "description": description
    })
}

/// A validated filter, ready to splice into a GraphQL document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterArgs {
    entries: Vec<(&'static str, String, Value)>,
}

impl FilterArgs {
    /// Validate `filter` against `fields`.
    ///
    /// Keys listed in `reserved` are bound by the calling tool and are dropped.
    /// Null values count as absent. Unknown keys and mistyped values fail.
    pub fn parse(
        filter: Option<&Map<String, Value>>,
        fields: &'static [FilterField],
        reserved: &[&str],
    ) -> ToolResult<Self> {
        let Some(filter) = filter else {
            return Ok(Self::default());
        };

        let mut entries = Vec::with_capacity(filter.len());
        for (key, value) in filter {
            let field = fields
                .iter()
                .find(|f| f.key == key)
                .ok_or_else(|| ToolError::validation(key, "unknown filter key"))?;

            if value.is_null() || reserved.contains(&field.key) {
                continue;
            }

            if let Some(value) = field.kind.coerce(key, value)? {
                entries.push((field.key, field.kind.graphql_type(), value));
            }
        }

        Ok(Self { entries })
    }

    /// Bind `key` to `value`, replacing whatever the caller's filter supplied.
    #[must_use]
    pub fn with(mut self, key: &'static str, kind: FieldKind, value: Value) -> Self {
        self.entries.retain(|(k, _, _)| *k != key);
        self.entries.push((key, kind.graphql_type(), value));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Variable declarations, e.g. `, $format_in: [MediaFormat]`.
    #[must_use]
    pub fn declarations(&self) -> String {
        self.entries.iter().map(|(key, ty, _)| format!(", ${key}: {ty}")).collect()
    }

    /// Field arguments, e.g. `, format_in: $format_in`.
    #[must_use]
    pub fn arguments(&self) -> String {
        self.entries.iter().map(|(key, _, _)| format!(", {key}: ${key}")).collect()
    }

    /// Add the filter's variable values to `variables`.
    pub fn extend_variables(&self, variables: &mut Map<String, Value>) {
        for (key, _, value) in &self.entries {
            variables.insert((*key).to_string(), value.clone());
        }
    }
}
