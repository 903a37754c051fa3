use thiserror::Error;

/// Errors from talking to the judge service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network-level failure (connect, timeout, TLS).
    #[error("judge service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("judge service returned HTTP {status}")]
    Status { status: u16 },

    /// The response body was not a valid snapshot.
    #[error("failed to decode judge service response: {0}")]
    Decode(String),
}
