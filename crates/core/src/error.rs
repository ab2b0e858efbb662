use crate::commission::CommissionStatus;
use crate::lifecycle::CommissionAction;

/// Domain-level error taxonomy.
///
/// All three variants describe *expected* outcomes that the dispatcher
/// reduces to user-visible replies.  Unexpected faults (malformed
/// configuration, programmer error) are not represented here.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The requested lifecycle action is not legal for the commission's
    /// current status.  Carries both so the rejection message can name them.
    #[error("Cannot {action} a commission that is {current}")]
    InvalidTransition {
        current: CommissionStatus,
        action: CommissionAction,
    },
}
