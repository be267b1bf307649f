#![no_main]

use anilist_mcp::models::{
    ActivitySearchInput, ListEntryInput, MediaLookupInput, MediaSearchInput, UpdateUserInput,
    UserInput,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) {
        let _ = serde_json::from_value::<MediaLookupInput>(json.clone());
        let _ = serde_json::from_value::<MediaSearchInput>(json.clone());
        let _ = serde_json::from_value::<ActivitySearchInput>(json.clone());
        let _ = serde_json::from_value::<UserInput>(json.clone());
        let _ = serde_json::from_value::<UpdateUserInput>(json.clone());
        if let Ok(entry) = serde_json::from_value::<ListEntryInput>(json) {
            let _ = entry.options.to_variables(anilist_mcp::models::EntryTarget::Media(entry.id));
        }
    }
});
