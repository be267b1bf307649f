//! Authentication gate for login-scoped tools.

use super::output::ToolOutput;
use crate::config::api::{ANILIST_TOKEN_ENV, ANILIST_TOKEN_HEADER};
use crate::error::ErrorKind;

/// Outcome of [`require_auth`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCheck {
    /// A usable credential is present.
    Authorized,
    /// No credential; callers return the envelope verbatim.
    Unauthorized(ToolOutput),
}

impl AuthCheck {
    /// True when the caller may proceed with the upstream call.
    #[must_use]
    pub const fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized)
    }

    /// The canned error envelope, if unauthorized.
    #[must_use]
    pub fn error_response(self) -> Option<ToolOutput> {
        match self {
            Self::Authorized => None,
            Self::Unauthorized(output) => Some(output),
        }
    }
}

/// Check that `credential` is a non-blank token.
#[must_use]
pub fn require_auth(credential: Option<&str>) -> AuthCheck {
    match credential {
        Some(token) if !token.trim().is_empty() => AuthCheck::Authorized,
        _ => AuthCheck::Unauthorized(ToolOutput::failure(ErrorKind::Auth, unauthorized_message())),
    }
}

fn unauthorized_message() -> String {
    format!(
        "Error: This operation requires authentication. Please provide an AniList API token \
         via the {ANILIST_TOKEN_HEADER} header (HTTP mode) or the {ANILIST_TOKEN_ENV} \
         environment variable (stdio mode)."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_or_blank_is_unauthorized() {
        assert!(!require_auth(None).is_authorized());
        assert!(!require_auth(Some("")).is_authorized());
        assert!(!require_auth(Some("   ")).is_authorized());
    }

    #[test]
    fn test_token_is_authorized() {
        assert!(require_auth(Some("token123")).is_authorized());
        assert!(require_auth(Some("token123")).error_response().is_none());
    }

    #[test]
    fn test_error_names_both_remediations() {
        let output = require_auth(None).error_response().unwrap();
        assert!(output.is_error);
        let text = output.text_content();
        assert!(text.contains("AniList-Token"));
        assert!(text.contains("ANILIST_TOKEN"));
        assert!(text.starts_with("Error: "));
    }
}
