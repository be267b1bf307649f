//! Tool input models, AniList enum sets and shared schemas.

pub mod enums;
pub mod filters;
mod inputs;
pub mod schemas;

pub use enums::{MediaListStatus, MediaType};
pub use filters::{FieldKind, FilterArgs};
pub use inputs::*;
