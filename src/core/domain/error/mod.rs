use thiserror::Error;

/// The main error type for Proxmox VE operations.
///
/// This enum covers everything that can go wrong while talking to the
/// management API: session establishment, individual requests after a live
/// session, and local validation of configuration values.
#[derive(Error, Debug)]
pub enum PveError {
    /// Transport-level failure: the host is unreachable, the request timed
    /// out, or the response could not be read.
    #[error("connection error: {0}")]
    Connection(String),

    /// The server rejected the credentials or the session ticket.
    #[error("authentication error: {0}")]
    Authentication(String),

    /// A single request completed but the server answered with a non-success
    /// status. Recovered locally: polls log and skip, actions surface the
    /// detail to the operator.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A configuration value failed local validation before any request
    /// was made.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Validation failures for configuration values.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A specific field failed validation.
    #[error("field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// A value was syntactically malformed.
    #[error("format error: {0}")]
    Format(String),
}

/// Type alias for Results that may fail with a PveError.
pub type PveResult<T> = Result<T, PveError>;
