//! Error taxonomy for heading generation
//!
//! Four failure classes: validation (caught before any network call),
//! remote (non-2xx from the API), format (response body not recoverable
//! as the expected JSON shape), and transport (no HTTP response at all).
//! Every variant is terminal for its request only; previously displayed
//! headings are never touched by a failure.

/// Generic message when the server gives no usable error detail.
pub const GENERIC_REMOTE_ERROR: &str = "Failed to generate headings";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeadingError {
    #[error("Please enter some text to analyze")]
    EmptyText,

    #[error("Please enter your DeepSeek API key")]
    EmptyApiKey,

    /// Non-2xx HTTP response; carries the server's `error.message`
    /// verbatim when it supplied one.
    #[error("{0}")]
    Remote(String),

    /// Body parsed but does not match the expected shape, or no JSON
    /// object could be recovered from it.
    #[error("{0}")]
    Format(&'static str),

    /// Network failure before any HTTP response was obtained.
    #[error("Request failed: {0}")]
    Transport(String),
}

impl HeadingError {
    /// Validation errors are raised before any network activity.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyText | Self::EmptyApiKey)
    }
}
