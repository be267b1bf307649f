//! Configuration for the AniList MCP server.

use std::time::Duration;

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::Deserialize;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// AniList GraphQL endpoint.
    pub const GRAPHQL_API: &str = "https://graphql.anilist.co";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);

    /// Request header carrying a per-request AniList token in HTTP mode.
    pub const ANILIST_TOKEN_HEADER: &str = "AniList-Token";

    /// Environment variable holding the process-wide default token.
    pub const ANILIST_TOKEN_ENV: &str = "ANILIST_TOKEN";

    /// Environment variable overriding the GraphQL endpoint.
    pub const ANILIST_API_URL_ENV: &str = "ANILIST_API_URL";
}

/// Server configuration.
///
/// One value is built per server instance: once at startup in stdio mode,
/// once per request in HTTP mode.
#[derive(Clone)]
pub struct Config {
    /// AniList OAuth access token (optional; required by login tools).
    pub anilist_token: Option<String>,

    /// GraphQL endpoint (overridable for mock servers).
    pub api_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,
}

impl Config {
    /// Create a new configuration with an optional AniList token.
    ///
    /// Blank tokens are treated as absent.
    #[must_use]
    pub fn new(anilist_token: Option<String>) -> Self {
        Self {
            anilist_token: normalize_token(anilist_token),
            api_url: api::GRAPHQL_API.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            anilist_token: None,
            api_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Loads a `.env` file first if one is present.
    ///
    /// # Errors
    ///
    /// Returns error if `ANILIST_API_URL` is not a valid URL.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let mut config = Self::new(std::env::var(api::ANILIST_TOKEN_ENV).ok());
        if let Ok(api_url) = std::env::var(api::ANILIST_API_URL_ENV) {
            config = config.with_api_url(&api_url)?;
        }
        Ok(config)
    }

    /// Replace the GraphQL endpoint.
    ///
    /// # Errors
    ///
    /// Returns error if `api_url` does not parse as an absolute URL.
    pub fn with_api_url(mut self, api_url: &str) -> anyhow::Result<Self> {
        let parsed = url::Url::parse(api_url)?;
        self.api_url = parsed.as_str().trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Replace the token, keeping every other setting.
    #[must_use]
    pub fn with_token(mut self, anilist_token: Option<String>) -> Self {
        self.anilist_token = normalize_token(anilist_token);
        self
    }

    /// Check if a token is configured.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.anilist_token.is_some()
    }

    /// Token for the auth gate.
    #[must_use]
    pub fn credential(&self) -> Option<&str> {
        self.anilist_token.as_deref()
    }

    /// Derive the configuration for one HTTP request.
    ///
    /// Precedence: `AniList-Token` header, then the base64 JSON `config`
    /// query parameter, then the token already held by `self`.
    ///
    /// # Errors
    ///
    /// Returns error if the `config` parameter is not base64-encoded JSON.
    pub fn resolve_request(
        &self,
        header_token: Option<&str>,
        config_param: Option<&str>,
    ) -> anyhow::Result<Self> {
        if let Some(token) = header_token.filter(|t| !t.trim().is_empty()) {
            return Ok(self.clone().with_token(Some(token.to_string())));
        }

        if let Some(param) = config_param.filter(|p| !p.trim().is_empty()) {
            let overrides = ConfigOverride::decode(param)?;
            if overrides.anilist_token.as_deref().is_some_and(|t| !t.trim().is_empty()) {
                return Ok(self.clone().with_token(overrides.anilist_token));
            }
        }

        Ok(self.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("has_token", &self.has_token())
            .field("api_url", &self.api_url)
            .finish()
    }
}

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

/// Standard alphabet, padding optional.
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

/// URL-safe alphabet, padding optional.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Per-request overrides passed by hosting integrations as base64 JSON.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverride {
    /// AniList token.
    #[serde(default)]
    pub anilist_token: Option<String>,
}

impl ConfigOverride {
    /// Decode a base64-encoded JSON object.
    ///
    /// Padding is optional and both the standard and URL-safe alphabets are accepted.
    ///
    /// # Errors
    ///
    /// Returns error on invalid base64 or JSON.
    pub fn decode(param: &str) -> anyhow::Result<Self> {
        let param = param.trim();
        let bytes = match STANDARD_LENIENT.decode(param) {
            Ok(bytes) => bytes,
            Err(_) => URL_SAFE_LENIENT.decode(param)?,
        };
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn normalize_token(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.trim().is_empty())
}
