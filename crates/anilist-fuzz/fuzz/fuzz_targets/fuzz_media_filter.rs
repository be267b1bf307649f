#![no_main]

use anilist_mcp::formatters::filter_media;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) {
        let filtered = filter_media(&json);
        // Deterministic for the same input
        assert_eq!(filtered, filter_media(&json));
    }
});
