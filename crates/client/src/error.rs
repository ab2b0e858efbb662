/// Outcome classification for backend calls.
///
/// `Rejected` is the only variant that carries backend-supplied text; its
/// reason is shown to the user verbatim.  `Unavailable` deliberately carries
/// nothing: internals are logged here, never surfaced.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The backend answered 4xx with a structured `{"error": ...}` body.
    #[error("{0}")]
    Rejected(String),

    /// Connection failure, timeout, unexpected status, or a response body
    /// that did not match the endpoint's schema.
    #[error("commission backend unavailable")]
    Unavailable,
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        tracing::warn!(error = %err, "Backend request failed");
        BackendError::Unavailable
    }
}
