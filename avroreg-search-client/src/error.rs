//! Transport error types.

use thiserror::Error;

/// Errors raised by search clients.
///
/// These are transport-level failures only; "no matching document" is not an
/// error at this layer — an empty hit set is a successful response.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Could not reach the search endpoint.
    #[error("failed to connect to search endpoint: {message}")]
    Connect { message: String },

    /// The request exceeded the configured timeout.
    #[error("search request timed out: {message}")]
    Timeout { message: String },

    /// Any other transport failure.
    #[error("search transport error: {message}")]
    Transport { message: String },

    /// The endpoint answered with a non-success status.
    #[error("search endpoint returned {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be decoded as a search response.
    #[error("failed to decode search response: {message}")]
    InvalidResponse { message: String },

    /// The client configuration is unusable.
    #[error("invalid search client configuration: {message}")]
    InvalidConfig { message: String },
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
