use thiserror::Error;

/// Errors raised while resolving the device location.
///
/// Every variant maps to a user-facing message; resolution itself never
/// fails, it falls back to the default city and carries the message along.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("Geolocation is not supported on this device")]
    Unsupported,

    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location information is unavailable")]
    PositionUnavailable,

    #[error("Location request timed out")]
    Timeout,

    #[error("Location error: {0}")]
    Other(String),
}

/// Errors raised while fetching or decoding upstream weather payloads.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, read failures).
    #[error("weather request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream answered with a non-success status.
    #[error("weather request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The payload decoded but did not match the expected schema.
    #[error("malformed weather response: {0}")]
    Malformed(String),
}
