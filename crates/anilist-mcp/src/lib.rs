//! AniList MCP Server
//!
//! A Model Context Protocol (MCP) server for the AniList GraphQL API.
//! Lets LLM agents look up and search anime, manga, characters, staff and
//! studios, read user profiles and lists, and, with a token, manage list
//! entries, favourites, activities and forum threads.
//!
//! # Features
//!
//! - **44 MCP Tools**: Media, search, people, lists, activity, threads, users
//! - **Two transports**: newline-delimited stdio and stateless HTTP
//! - **Per-request credentials**: `AniList-Token` header or `config` parameter
//! - **Compact media records**: noisy fields dropped unless `fullData` is set
//!
//! # Example
//!
//! ```no_run
//! use anilist_mcp::{client::AniListClient, config::Config, models::MediaType};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = AniListClient::new(&config)?;
//!
//!     let cowboy_bebop = client.media(MediaType::Anime, 1).await?;
//!     println!("{cowboy_bebop}");
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod server;
pub mod tools;

pub use client::AniListClient;
pub use config::Config;
pub use error::{ClientError, ToolError};
