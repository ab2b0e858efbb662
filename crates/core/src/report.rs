//! Karma report types and input normalization.
//!
//! Reports are filed against completed commissions and resolved by an admin
//! outside this front end; here they are only created and listed.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Endorsement or complaint.  Lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Positive,
    Negative,
}

impl ReportType {
    /// Normalize user input: `"POSITIVE"`, `"positive"`, and `"Positive"`
    /// all yield the same value.  Anything else is a validation error.
    pub fn from_input(raw: &str) -> Result<Self, CoreError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            _ => Err(CoreError::Validation(
                "Report type must be 'positive' or 'negative'".to_string(),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A report is pending until an admin resolves it backend-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Resolved,
}

/// A karma report as returned by `GET /api/reports/pending`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KarmaReport {
    pub id: i64,
    pub commission_id: i64,
    pub reporter_id: String,
    pub reporter_name: String,
    pub report_type: ReportType,
    pub reason: String,
    pub status: ReportStatus,
}

/// Validate the free-text reason attached to a report.
pub fn validate_reason(reason: &str) -> Result<(), CoreError> {
    if reason.trim().is_empty() {
        return Err(CoreError::Validation(
            "Report reason must not be empty".to_string(),
        ));
    }
    Ok(())
}
