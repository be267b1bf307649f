//! Property-based tests for the media filter.

use proptest::prelude::*;
use serde_json::{Value, json};

use anilist_mcp::formatters::filter_media;
use anilist_mcp::formatters::media::MAX_TAGS;

fn arb_tag() -> impl Strategy<Value = Value> {
    (0i64..100_000, "[A-Za-z ]{1,20}", any::<bool>(), 0i64..100).prop_map(
        |(id, name, spoiler, rank)| {
            json!({
                "id": id,
                "name": name,
                "isMediaSpoiler": spoiler,
                "rank": rank,
                "category": "Theme"
            })
        },
    )
}

/// Anime-or-manga record with optional nulls and a variable tag list.
fn arb_media() -> impl Strategy<Value = Value> {
    (
        1i64..200_000,
        proptest::option::of("[A-Za-z0-9 ]{1,40}"),
        proptest::collection::vec(arb_tag(), 0..12),
        any::<bool>(),
        proptest::option::of(1i64..2000),
        proptest::option::of(0i64..100),
    )
        .prop_map(|(id, title, tags, is_anime, count, score)| {
            let mut media = json!({
                "id": id,
                "title": {"romaji": title},
                "description": null,
                "averageScore": score,
                "tags": tags,
                "genres": [],
                "characters": {"edges": [{"node": {"id": 1}}]},
                "relations": {"edges": []}
            });
            if is_anime {
                media["episodes"] = json!(count);
                media["season"] = json!("FALL");
            } else {
                media["chapters"] = json!(count);
                media["volumes"] = json!(count);
            }
            media
        })
}

proptest! {
    /// Tags are cut to the first five and narrowed to three members.
    #[test]
    fn tags_truncated_in_order(media in arb_media()) {
        let filtered = filter_media(&media);
        let source = media["tags"].as_array().unwrap();
        let tags = filtered["tags"].as_array().unwrap();

        prop_assert_eq!(tags.len(), source.len().min(MAX_TAGS));
        for (kept, original) in tags.iter().zip(source) {
            prop_assert_eq!(&kept["id"], &original["id"]);
            prop_assert_eq!(&kept["name"], &original["name"]);
            prop_assert_eq!(&kept["isMediaSpoiler"], &original["isMediaSpoiler"]);
            prop_assert_eq!(kept.as_object().unwrap().len(), 3);
        }
    }

    /// Output is sparse: no top-level nulls, no connections outside the allow-list.
    #[test]
    fn output_is_sparse(media in arb_media()) {
        let filtered = filter_media(&media);
        let record = filtered.as_object().unwrap();

        prop_assert!(record.values().all(|v| !v.is_null()));
        prop_assert!(!record.contains_key("characters"));
        prop_assert!(!record.contains_key("relations"));
        prop_assert_eq!(&filtered["genres"], &json!([]));
    }

    /// Anime-only and manga-only fields never cross over.
    #[test]
    fn conditional_groups(media in arb_media()) {
        let filtered = filter_media(&media);
        if media.get("episodes").is_some() {
            prop_assert!(filtered.get("chapters").is_none());
            prop_assert!(filtered.get("volumes").is_none());
            prop_assert_eq!(&filtered["season"], &json!("FALL"));
        } else {
            prop_assert!(filtered.get("season").is_none());
        }
    }

    /// Same raw input, same output; the input is untouched.
    #[test]
    fn filter_is_pure(media in arb_media()) {
        let before = media.clone();
        let first = filter_media(&media);
        let second = filter_media(&media);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&media, &before);
    }

    /// Arrays are filtered element-wise and keep their order.
    #[test]
    fn arrays_keep_order(records in proptest::collection::vec(arb_media(), 0..6)) {
        let filtered = filter_media(&Value::Array(records.clone()));
        let items = filtered.as_array().unwrap();

        prop_assert_eq!(items.len(), records.len());
        for (item, record) in items.iter().zip(&records) {
            prop_assert_eq!(item, &filter_media(record));
        }
    }

    /// Scalars pass through unchanged.
    #[test]
    fn scalars_pass_through(n in any::<i64>(), s in ".{0,20}") {
        prop_assert_eq!(filter_media(&json!(n)), json!(n));
        prop_assert_eq!(filter_media(&json!(s)), json!(s));
    }
}
