#![no_main]

use anilist_mcp::models::FilterArgs;
use anilist_mcp::models::filters::{ACTIVITY_FILTERS, MEDIA_FILTERS};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(serde_json::Value::Object(filter)) = serde_json::from_slice(data) {
        if let Ok(args) = FilterArgs::parse(Some(&filter), MEDIA_FILTERS, &["type", "search"]) {
            let _ = args.declarations();
            let _ = args.arguments();
        }
        let _ = FilterArgs::parse(Some(&filter), ACTIVITY_FILTERS, &[]);
    }
});
