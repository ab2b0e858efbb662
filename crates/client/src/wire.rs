//! Request and response schemas for the backend REST API.
//!
//! One struct per endpoint body, field names matching the backend exactly.
//! Responses are deserialized strictly into these shapes; a body that does
//! not fit fails closed as `Unavailable` rather than being poked at
//! dynamically.

use serde::{Deserialize, Serialize};

use mercboard_core::{Commission, CommissionType, KarmaReport, ReportType};
use mercboard_core::stats::{LeaderboardEntry, UserStats};

// ---- request bodies ----

/// `POST /api/commissions`
#[derive(Debug, Serialize)]
pub struct CreateCommissionRequest<'a> {
    pub discord_id: &'a str,
    pub username: &'a str,
    pub display_name: &'a str,
    pub commission_type: CommissionType,
    pub skills: &'a str,
}

/// `POST /api/commissions/{id}/accept`
#[derive(Debug, Serialize)]
pub struct AcceptRequest<'a> {
    pub discord_id: &'a str,
    pub username: &'a str,
    pub display_name: &'a str,
}

/// `POST /api/commissions/{id}/approve`
#[derive(Debug, Serialize)]
pub struct ApproveRequest<'a> {
    pub admin_id: &'a str,
    pub admin_name: &'a str,
}

/// `POST /api/commissions/{id}/reject`
#[derive(Debug, Serialize)]
pub struct RejectRequest<'a> {
    pub admin_id: &'a str,
    pub reason: &'a str,
}

/// `POST /api/commissions/{id}/complete`
#[derive(Debug, Serialize)]
pub struct CompleteRequest<'a> {
    pub discord_id: &'a str,
    pub username: &'a str,
    pub documentation: &'a str,
}

/// `POST /api/commissions/{id}/report`
#[derive(Debug, Serialize)]
pub struct ReportRequest<'a> {
    pub reporter_id: &'a str,
    pub reporter_name: &'a str,
    pub report_type: ReportType,
    pub reason: &'a str,
}

/// `POST /api/settings/{admin_channel,public_channel}`
#[derive(Debug, Serialize)]
pub struct ChannelRequest<'a> {
    pub channel_id: &'a str,
    pub admin_id: &'a str,
}

// ---- response bodies ----

/// 201 body of `POST /api/commissions`.
#[derive(Debug, Deserialize)]
pub struct CreatedResponse {
    pub commission_id: i64,
}

/// Success body of the transition endpoints.
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Structured 4xx error body.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// `GET /api/commissions/{id}`
#[derive(Debug, Deserialize)]
pub struct CommissionEnvelope {
    pub commission: Commission,
}

/// `GET /api/commissions/pending` and `GET /api/users/{id}/commissions`
#[derive(Debug, Deserialize)]
pub struct CommissionListEnvelope {
    #[serde(default)]
    pub commissions: Vec<Commission>,
}

/// `GET /api/users/{id}/stats`
#[derive(Debug, Deserialize)]
pub struct StatsEnvelope {
    pub stats: UserStats,
}

/// `GET /api/leaderboard`
#[derive(Debug, Deserialize)]
pub struct LeaderboardEnvelope {
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// `GET /api/reports/pending`
#[derive(Debug, Deserialize)]
pub struct ReportListEnvelope {
    #[serde(default)]
    pub reports: Vec<KarmaReport>,
}
