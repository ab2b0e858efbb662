//! Inbound command shapes.
//!
//! Fields arrive string-typed from the chat adapter; the dispatcher owns
//! integer parsing, enum membership, and emptiness checks so that every
//! malformed invocation is caught before a network call.

/// One user-issued command.
#[derive(Debug, Clone)]
pub enum Command {
    /// Submit a new commission for admin approval.
    Submit {
        commission_type: String,
        skills: String,
    },
    /// Accept an approved commission.
    Accept { commission_id: String },
    /// View one commission in detail.
    View { commission_id: String },
    /// List the acting user's own commissions.
    MyCommissions,
    /// The acting user's stats projection.
    MyStats,
    /// The karma leaderboard.
    Leaderboard,
    /// Mark an accepted commission completed.
    Complete {
        commission_id: String,
        documentation: Option<String>,
    },
    /// File a karma report against a completed commission.
    Report {
        commission_id: String,
        report_type: String,
        reason: String,
    },
    /// Admin: list commissions awaiting approval.
    Pending,
    /// Admin: list karma reports awaiting resolution.
    Reports,
    /// Admin: approve a pending commission.
    Approve { commission_id: String },
    /// Admin: reject a pending commission.
    Reject {
        commission_id: String,
        reason: Option<String>,
    },
    /// Admin: set the admin approval channel.
    SetAdminChannel { channel_id: String },
    /// Admin: set the public commission channel.
    SetPublicChannel { channel_id: String },
    /// Command summary.
    Help,
}

impl Command {
    /// Whether this command requires the configured admin role.
    pub fn is_privileged(&self) -> bool {
        matches!(
            self,
            Command::Pending
                | Command::Reports
                | Command::Approve { .. }
                | Command::Reject { .. }
                | Command::SetAdminChannel { .. }
                | Command::SetPublicChannel { .. }
        )
    }
}
