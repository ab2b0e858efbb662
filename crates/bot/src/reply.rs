//! The fixed vocabulary of user-visible outcomes.
//!
//! Every dispatched command reduces to exactly one of these; nothing else
//! reaches the user.  `Unavailable` deliberately renders a generic notice
//! so backend internals never leak into chat.

use mercboard_client::BackendError;
use mercboard_core::CoreError;

/// User-visible outcome of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A mutation went through.
    Success(String),
    /// A read went through; carries the rendered content.
    Info(String),
    /// The command's arguments were malformed; nothing was sent.
    ValidationError(String),
    /// The acting user lacks the required role; nothing was sent.
    AuthorizationError(String),
    /// A domain rejection, local (illegal transition) or backend-supplied.
    Rejected(String),
    /// The backend could not be reached or answered nonsense.
    Unavailable,
}

impl Reply {
    /// The text delivered to the user.
    pub fn message(&self) -> String {
        match self {
            Reply::Success(text) | Reply::Info(text) => text.clone(),
            Reply::ValidationError(text)
            | Reply::AuthorizationError(text)
            | Reply::Rejected(text) => text.clone(),
            Reply::Unavailable => {
                "Commission system is currently offline. Please try again later.".to_string()
            }
        }
    }
}

impl From<CoreError> for Reply {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Reply::ValidationError(msg),
            CoreError::Forbidden(msg) => Reply::AuthorizationError(msg),
            CoreError::InvalidTransition { .. } => Reply::Rejected(err.to_string()),
        }
    }
}

impl From<BackendError> for Reply {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Rejected(reason) => Reply::Rejected(reason),
            BackendError::Unavailable => Reply::Unavailable,
        }
    }
}
