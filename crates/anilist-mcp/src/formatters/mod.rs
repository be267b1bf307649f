//! Response shaping for tool output.

pub mod media;

pub use media::filter_media;
