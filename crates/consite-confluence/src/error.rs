//! Error types for the Confluence integration.

/// Error from Confluence API operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfluenceError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    Transport(#[from] reqwest::Error),

    /// Server returned an error status.
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// A lookup that must succeed found no page.
    #[error("page '{title}' not found in space '{space_key}'")]
    PageNotFound {
        /// Space the lookup ran against.
        space_key: String,
        /// Title that was looked up.
        title: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// An operation needed a page that has not been created yet.
    #[error("page '{title}' has no identifier")]
    MissingPageId {
        /// Title of the transient page.
        title: String,
    },

    /// Response shape did not match the API contract.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
