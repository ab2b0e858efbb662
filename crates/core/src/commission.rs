//! Commission types, statuses, and validation helpers.
//!
//! Wire names must match what the commission backend stores: commission
//! types travel as their long display names (`"Merc for Hire"`), statuses
//! as lowercase words (`"pending"`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Command tokens accepted by `submit`, in display order.
pub const VALID_TYPE_TOKENS: &[&str] = &["merc", "team", "task"];

/// The three commission categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommissionType {
    #[serde(rename = "Merc for Hire")]
    MercForHire,
    #[serde(rename = "Merc Team for Hire")]
    MercTeamForHire,
    #[serde(rename = "Task for a Merc Team")]
    TaskForTeam,
}

impl CommissionType {
    /// Parse a submit-command token (`merc` / `team` / `task`),
    /// ASCII case-insensitively.
    pub fn from_token(token: &str) -> Result<Self, CoreError> {
        match token.to_ascii_lowercase().as_str() {
            "merc" => Ok(Self::MercForHire),
            "team" => Ok(Self::MercTeamForHire),
            "task" => Ok(Self::TaskForTeam),
            _ => Err(CoreError::Validation(format!(
                "Invalid commission type '{token}'. Use one of: {}",
                VALID_TYPE_TOKENS.join(", ")
            ))),
        }
    }

    /// The long name stored by the backend and shown to users.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MercForHire => "Merc for Hire",
            Self::MercTeamForHire => "Merc Team for Hire",
            Self::TaskForTeam => "Task for a Merc Team",
        }
    }
}

impl std::fmt::Display for CommissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Commission lifecycle status.  See [`crate::lifecycle`] for the legal
/// transitions between these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommissionStatus {
    Pending,
    Approved,
    Rejected,
    Accepted,
    Completed,
    Expired,
}

impl CommissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Accepted => "accepted",
            Self::Completed => "completed",
            Self::Expired => "expired",
        }
    }
}

impl std::fmt::Display for CommissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A platform user as the backend records it on a commission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub discord_id: String,
    pub username: String,
    pub display_name: String,
}

/// A commission as returned by the backend read endpoints.
///
/// `accepter` is present exactly when the status is `accepted` or later;
/// the backend owns that invariant, this type merely carries it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commission {
    pub id: i64,
    pub commission_type: CommissionType,
    pub skills: String,
    #[serde(rename = "user")]
    pub creator: UserRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepter: Option<UserRef>,
    pub status: CommissionStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Validate the free-text skills field of a submit command.
pub fn validate_skills(skills: &str) -> Result<(), CoreError> {
    if skills.trim().is_empty() {
        return Err(CoreError::Validation(
            "Skills must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Parse a user-supplied commission id.  Ids are backend-assigned positive
/// integers; everything else is a validation error, not a lookup miss.
pub fn parse_commission_id(raw: &str) -> Result<i64, CoreError> {
    let id: i64 = raw
        .trim()
        .trim_start_matches('#')
        .parse()
        .map_err(|_| CoreError::Validation(format!("'{raw}' is not a valid commission id")))?;
    if id < 1 {
        return Err(CoreError::Validation(format!(
            "'{raw}' is not a valid commission id"
        )));
    }
    Ok(id)
}
