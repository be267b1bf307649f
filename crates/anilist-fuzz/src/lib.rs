//! Fuzzing library for anilist-mcp.
//!
//! Targets cover the media filter, search filter validation and tool input
//! deserialization. None of them may panic on arbitrary input.
//!
//! # Usage
//!
//! ```bash
//! cd crates/anilist-fuzz
//! cargo +nightly fuzz run fuzz_media_filter -- -max_total_time=60
//! ```

pub use anilist_mcp::{formatters, models};
