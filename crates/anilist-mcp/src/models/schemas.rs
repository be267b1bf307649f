//! JSON schemas for the shared input objects.

use serde_json::{Value, json};

use super::enums;
use super::filters::{ACTIVITY_FILTERS, MEDIA_FILTERS, filter_schema};

fn fuzzy_date(description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "year": {"type": "number"},
            "month": {"type": "number"},
            "day": {"type": "number"}
        },
        "required": ["year", "month", "day"],
        "description": description
    })
}

/// `UpdateEntryOptions`: values saved with a list entry. All fields required.
#[must_use]
pub fn update_entry_options() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": {"type": "number", "description": "The ID of the list entry"},
            "mediaId": {"type": "number", "description": "The ID of the media to add"},
            "status": {
                "type": "string",
                "enum": enums::MEDIA_LIST_STATUS,
                "description": "The status of the media on the list"
            },
            "score": {"type": "number", "description": "The score given to the media"},
            "scoreRaw": {"type": "number", "description": "The raw score in 100 point format"},
            "progress": {"type": "number", "description": "The amount of episodes/chapters consumed"},
            "progressVolumes": {
                "type": "number",
                "description": "The amount of volumes read (manga only)"
            },
            "repeat": {"type": "number", "description": "Amount of times the media has been repeated"},
            "priority": {"type": "number", "description": "Priority level of the media"},
            "private": {"type": "boolean", "description": "Whether the entry should be private"},
            "notes": {"type": "string", "description": "Text notes about the media"},
            "hiddenFromStatusLists": {
                "type": "boolean",
                "description": "Whether the entry should be hidden from non-custom lists"
            },
            "customLists": {
                "type": "array",
                "items": {"type": "string"},
                "description": "Array of custom list names for the media"
            },
            "advancedScores": {
                "type": "array",
                "items": {"type": "number"},
                "description": "Advanced scores as an object"
            },
            "startedAt": fuzzy_date("When the user started the media"),
            "completedAt": fuzzy_date("When the user completed the media")
        },
        "required": [
            "id", "mediaId", "status", "score", "scoreRaw", "progress", "progressVolumes",
            "repeat", "priority", "private", "notes", "hiddenFromStatusLists", "customLists",
            "advancedScores", "startedAt", "completedAt"
        ],
        "description": "Values to save with the entry"
    })
}

fn media_list_options(description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "sectionOrder": {"type": "array", "items": {"type": "string"}},
            "splitCompletedSectionByFormat": {"type": "boolean"},
            "customLists": {"type": "array", "items": {"type": "string"}},
            "advancedScoring": {"type": "array", "items": {"type": "string"}},
            "advancedScoringEnabled": {"type": "boolean"},
            "theme": {"type": "string"}
        },
        "required": [
            "sectionOrder", "splitCompletedSectionByFormat", "customLists",
            "advancedScoring", "advancedScoringEnabled", "theme"
        ],
        "description": description
    })
}

/// `UserOptionsInput`: account settings for `update_user`. All fields required.
#[must_use]
pub fn user_options_input(description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "about": {"type": "string", "description": "The user's description"},
            "titleLanguage": {
                "type": "string",
                "enum": enums::USER_TITLE_LANGUAGE,
                "description": "The user's preferred title language"
            },
            "displayAdultContent": {
                "type": "boolean",
                "description": "True if the user wants to display adult content"
            },
            "airingNotifications": {
                "type": "boolean",
                "description": "True if the user wants airing notifications"
            },
            "profileColor": {"type": "string", "description": "The user's profile highlight color"},
            "activityMergeTime": {
                "type": "number",
                "description": "The minutes between activity for them to be merged together. 0 is Never, Above 2 weeks (20160 mins) is always."
            },
            "staffNameLanguage": {
                "type": "string",
                "enum": enums::USER_STAFF_NAME_LANGUAGE,
                "description": "The user's preferred way to see staff and characters"
            },
            "notificationOptions": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "type": {"type": "string", "enum": enums::NOTIFICATION_TYPE},
                        "enabled": {"type": "boolean"}
                    },
                    "required": ["type", "enabled"]
                },
                "description": "The user's notification options"
            },
            "timezone": {"type": "string", "description": "The user's timezone offset format"},
            "scoreFormat": {
                "type": "string",
                "enum": enums::SCORE_FORMAT,
                "description": "The user's score format"
            },
            "rowOrder": {"type": "string", "description": "The user's default list order"},
            "animeListOptions": media_list_options("The user's options for anime lists"),
            "mangaListOptions": media_list_options("The user's options for manga lists")
        },
        "required": [
            "about", "titleLanguage", "displayAdultContent", "airingNotifications",
            "profileColor", "activityMergeTime", "staffNameLanguage", "notificationOptions",
            "timezone", "scoreFormat", "rowOrder", "animeListOptions", "mangaListOptions"
        ],
        "description": description
    })
}

/// `ActivityFilterTypes`.
#[must_use]
pub fn activity_filter(description: &str) -> Value {
    filter_schema(ACTIVITY_FILTERS, description)
}

/// `MediaFilterTypes`.
#[must_use]
pub fn media_filter(description: &str) -> Value {
    filter_schema(MEDIA_FILTERS, description)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required_matches_properties(schema: &Value) {
        let props = schema["properties"].as_object().unwrap();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(props.len(), required.len());
        for key in required {
            assert!(props.contains_key(key.as_str().unwrap()), "{key} not declared");
        }
    }

    #[test]
    fn test_entry_options_all_required() {
        let schema = update_entry_options();
        required_matches_properties(&schema);
        assert_eq!(schema["properties"]["status"]["enum"][5], "REPEATING");
    }

    #[test]
    fn test_user_options_all_required() {
        let schema = user_options_input("User options to update");
        required_matches_properties(&schema);
        required_matches_properties(&schema["properties"]["animeListOptions"]);
        assert_eq!(schema["description"], "User options to update");
    }
}
