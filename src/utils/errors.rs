use thiserror::Error;

/// Failures surfaced by the request gateway.
///
/// Every network exchange is normalized into one of these shapes. The
/// gateway never swallows an error and never retries on its own; the only
/// place a failure is converted rather than propagated is the session
/// manager's startup restoration.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The backend could not be reached or no response was obtained.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The backend answered with a failure status. The message is the
    /// backend-supplied `error` field, or a synthesized one when the body
    /// has no usable message.
    #[error("{message}")]
    Request { status: u16, message: String },

    /// The response body was not valid JSON for the expected type.
    #[error("invalid response body: {0}")]
    Decode(#[source] serde_json::Error),
}
