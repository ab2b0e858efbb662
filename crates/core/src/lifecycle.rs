//! The commission state machine.
//!
//! A commission starts `pending` and moves only along the edges below.
//! `expire` is driven by the backend when `expires_at` passes, never by a
//! user command.  `report` does not move the status; listing it as the one
//! legal action on a completed commission lets the same transition check
//! gate karma reports.
//!
//! ```text
//! pending  -> approved | rejected
//! approved -> accepted | expired
//! accepted -> completed
//! completed -> completed (report)
//! rejected, expired: terminal
//! ```

use serde::{Deserialize, Serialize};

use crate::commission::CommissionStatus;
use crate::error::CoreError;

/// Status assigned to a freshly submitted commission.
pub const INITIAL_STATUS: CommissionStatus = CommissionStatus::Pending;

/// Every action that reads a commission's status as its precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommissionAction {
    Approve,
    Reject,
    Accept,
    Complete,
    Expire,
    Report,
}

impl CommissionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Accept => "accept",
            Self::Complete => "complete",
            Self::Expire => "expire",
            Self::Report => "report",
        }
    }
}

impl std::fmt::Display for CommissionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The actions legal for a commission currently in `status`.
pub fn legal_actions(status: CommissionStatus) -> &'static [CommissionAction] {
    match status {
        CommissionStatus::Pending => &[CommissionAction::Approve, CommissionAction::Reject],
        CommissionStatus::Approved => &[CommissionAction::Accept, CommissionAction::Expire],
        CommissionStatus::Accepted => &[CommissionAction::Complete],
        CommissionStatus::Completed => &[CommissionAction::Report],
        CommissionStatus::Rejected | CommissionStatus::Expired => &[],
    }
}

/// Compute the status after applying `action` to a commission in `status`.
///
/// The single source of truth for transitions: any (status, action) pair
/// outside the table yields [`CoreError::InvalidTransition`] carrying both,
/// and nothing is mutated anywhere.
pub fn apply(
    status: CommissionStatus,
    action: CommissionAction,
) -> Result<CommissionStatus, CoreError> {
    let next = match (status, action) {
        (CommissionStatus::Pending, CommissionAction::Approve) => CommissionStatus::Approved,
        (CommissionStatus::Pending, CommissionAction::Reject) => CommissionStatus::Rejected,
        (CommissionStatus::Approved, CommissionAction::Accept) => CommissionStatus::Accepted,
        (CommissionStatus::Approved, CommissionAction::Expire) => CommissionStatus::Expired,
        (CommissionStatus::Accepted, CommissionAction::Complete) => CommissionStatus::Completed,
        (CommissionStatus::Completed, CommissionAction::Report) => CommissionStatus::Completed,
        (current, action) => return Err(CoreError::InvalidTransition { current, action }),
    };
    Ok(next)
}

/// Shorthand precheck used by the dispatcher before issuing a mutation.
pub fn ensure_legal(status: CommissionStatus, action: CommissionAction) -> Result<(), CoreError> {
    apply(status, action).map(|_| ())
}

/// Whether the status field can never change again.
pub fn is_terminal(status: CommissionStatus) -> bool {
    matches!(
        status,
        CommissionStatus::Rejected | CommissionStatus::Completed | CommissionStatus::Expired
    )
}
