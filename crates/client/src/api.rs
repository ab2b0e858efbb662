//! The backend contract: one trait method per lifecycle operation, plus the
//! [`reqwest`] implementation used in production.
//!
//! Mutating calls are preceded by a liveness probe against the backend root;
//! if the probe fails the mutation is never attempted and the call fails
//! fast as [`BackendError::Unavailable`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use mercboard_core::stats::{LeaderboardEntry, UserStats};
use mercboard_core::{Commission, CommissionType, KarmaReport, ReportType, UserRef};

use crate::error::BackendError;
use crate::wire::{
    AcceptRequest, ApproveRequest, ChannelRequest, CommissionEnvelope, CommissionListEnvelope,
    CompleteRequest, CreateCommissionRequest, CreatedResponse, ErrorResponse, LeaderboardEnvelope,
    MessageResponse, RejectRequest, ReportListEnvelope, ReportRequest, StatsEnvelope,
};

/// Upper bound on every backend call, probe included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything the dispatcher needs from the commission backend.
///
/// Implemented by [`HttpBackend`] in production and by in-memory mocks in
/// dispatcher tests.
#[async_trait]
pub trait CommissionBackend: Send + Sync {
    /// Create a commission in the initial pending state; returns the
    /// backend-assigned id.
    async fn create_commission(
        &self,
        creator: &UserRef,
        commission_type: CommissionType,
        skills: &str,
    ) -> Result<i64, BackendError>;

    async fn accept_commission(&self, id: i64, user: &UserRef) -> Result<String, BackendError>;

    async fn approve_commission(
        &self,
        id: i64,
        admin_id: &str,
        admin_name: &str,
    ) -> Result<String, BackendError>;

    async fn reject_commission(
        &self,
        id: i64,
        admin_id: &str,
        reason: &str,
    ) -> Result<String, BackendError>;

    async fn complete_commission(
        &self,
        id: i64,
        discord_id: &str,
        username: &str,
        documentation: &str,
    ) -> Result<String, BackendError>;

    async fn submit_report(
        &self,
        id: i64,
        reporter_id: &str,
        reporter_name: &str,
        report_type: ReportType,
        reason: &str,
    ) -> Result<String, BackendError>;

    async fn get_commission(&self, id: i64) -> Result<Commission, BackendError>;

    async fn list_pending(&self) -> Result<Vec<Commission>, BackendError>;

    async fn list_user_commissions(&self, user_id: &str) -> Result<Vec<Commission>, BackendError>;

    async fn user_stats(&self, user_id: &str) -> Result<UserStats, BackendError>;

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, BackendError>;

    async fn pending_reports(&self) -> Result<Vec<KarmaReport>, BackendError>;

    async fn set_admin_channel(&self, channel_id: &str, admin_id: &str)
        -> Result<(), BackendError>;

    async fn set_public_channel(
        &self,
        channel_id: &str,
        admin_id: &str,
    ) -> Result<(), BackendError>;
}

/// HTTP client for a single commission backend instance.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a client for the backend at `base_url`
    /// (e.g. `http://localhost:5000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Reuse an existing [`reqwest::Client`] (connection pooling across
    /// clients pointed at different backends).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Liveness probe: `GET {base}/` must answer 200.
    pub async fn probe(&self) -> Result<(), BackendError> {
        let response = self
            .client
            .get(format!("{}/", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        if response.status() != StatusCode::OK {
            tracing::warn!(status = %response.status(), "Backend liveness probe failed");
            return Err(BackendError::Unavailable);
        }
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, BackendError> {
        let response = self
            .client
            .get(self.url(path))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        Self::expect_json(response, StatusCode::OK).await
    }

    async fn post_json<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, BackendError> {
        // All POSTs mutate backend state, so they all probe first.
        self.probe().await?;
        Ok(self
            .client
            .post(self.url(path))
            .timeout(REQUEST_TIMEOUT)
            .json(body)
            .send()
            .await?)
    }

    /// Parse the body of a response whose status must be exactly `expected`.
    ///
    /// Anything else becomes `Rejected` (structured 4xx) or `Unavailable`
    /// (everything the caller cannot act on, shape mismatches included).
    async fn expect_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        expected: StatusCode,
    ) -> Result<T, BackendError> {
        let status = response.status();
        if status != expected {
            return Err(Self::classify_failure(response).await);
        }
        Ok(response.json::<T>().await?)
    }

    /// Assert the status is exactly `expected`, discarding the body.
    async fn expect_status(
        response: reqwest::Response,
        expected: StatusCode,
    ) -> Result<(), BackendError> {
        if response.status() != expected {
            return Err(Self::classify_failure(response).await);
        }
        Ok(())
    }

    /// Map a non-success response to the error taxonomy: a 4xx carrying a
    /// parseable `{"error": ...}` body is a rejection to surface verbatim;
    /// anything else is `Unavailable`.
    async fn classify_failure(response: reqwest::Response) -> BackendError {
        let status = response.status();
        if status.is_client_error() {
            match response.json::<ErrorResponse>().await {
                Ok(body) => return BackendError::Rejected(body.error),
                Err(err) => {
                    tracing::warn!(status = %status, error = %err, "Unstructured 4xx from backend");
                }
            }
        } else {
            tracing::warn!(status = %status, "Unexpected status from backend");
        }
        BackendError::Unavailable
    }
}

#[async_trait]
impl CommissionBackend for HttpBackend {
    async fn create_commission(
        &self,
        creator: &UserRef,
        commission_type: CommissionType,
        skills: &str,
    ) -> Result<i64, BackendError> {
        let body = CreateCommissionRequest {
            discord_id: &creator.discord_id,
            username: &creator.username,
            display_name: &creator.display_name,
            commission_type,
            skills,
        };
        let response = self.post_json("/api/commissions", &body).await?;
        let created: CreatedResponse =
            Self::expect_json(response, StatusCode::CREATED).await?;
        Ok(created.commission_id)
    }

    async fn accept_commission(&self, id: i64, user: &UserRef) -> Result<String, BackendError> {
        let body = AcceptRequest {
            discord_id: &user.discord_id,
            username: &user.username,
            display_name: &user.display_name,
        };
        let response = self
            .post_json(&format!("/api/commissions/{id}/accept"), &body)
            .await?;
        let msg: MessageResponse = Self::expect_json(response, StatusCode::OK).await?;
        Ok(msg.message)
    }

    async fn approve_commission(
        &self,
        id: i64,
        admin_id: &str,
        admin_name: &str,
    ) -> Result<String, BackendError> {
        let body = ApproveRequest {
            admin_id,
            admin_name,
        };
        let response = self
            .post_json(&format!("/api/commissions/{id}/approve"), &body)
            .await?;
        let msg: MessageResponse = Self::expect_json(response, StatusCode::OK).await?;
        Ok(msg.message)
    }

    async fn reject_commission(
        &self,
        id: i64,
        admin_id: &str,
        reason: &str,
    ) -> Result<String, BackendError> {
        let body = RejectRequest { admin_id, reason };
        let response = self
            .post_json(&format!("/api/commissions/{id}/reject"), &body)
            .await?;
        let msg: MessageResponse = Self::expect_json(response, StatusCode::OK).await?;
        Ok(msg.message)
    }

    async fn complete_commission(
        &self,
        id: i64,
        discord_id: &str,
        username: &str,
        documentation: &str,
    ) -> Result<String, BackendError> {
        let body = CompleteRequest {
            discord_id,
            username,
            documentation,
        };
        let response = self
            .post_json(&format!("/api/commissions/{id}/complete"), &body)
            .await?;
        let msg: MessageResponse = Self::expect_json(response, StatusCode::OK).await?;
        Ok(msg.message)
    }

    async fn submit_report(
        &self,
        id: i64,
        reporter_id: &str,
        reporter_name: &str,
        report_type: ReportType,
        reason: &str,
    ) -> Result<String, BackendError> {
        let body = ReportRequest {
            reporter_id,
            reporter_name,
            report_type,
            reason,
        };
        let response = self
            .post_json(&format!("/api/commissions/{id}/report"), &body)
            .await?;
        let msg: MessageResponse = Self::expect_json(response, StatusCode::CREATED).await?;
        Ok(msg.message)
    }

    async fn get_commission(&self, id: i64) -> Result<Commission, BackendError> {
        let envelope: CommissionEnvelope =
            self.get_json(&format!("/api/commissions/{id}")).await?;
        Ok(envelope.commission)
    }

    async fn list_pending(&self) -> Result<Vec<Commission>, BackendError> {
        let envelope: CommissionListEnvelope = self.get_json("/api/commissions/pending").await?;
        Ok(envelope.commissions)
    }

    async fn list_user_commissions(&self, user_id: &str) -> Result<Vec<Commission>, BackendError> {
        let envelope: CommissionListEnvelope = self
            .get_json(&format!("/api/users/{user_id}/commissions"))
            .await?;
        Ok(envelope.commissions)
    }

    async fn user_stats(&self, user_id: &str) -> Result<UserStats, BackendError> {
        let envelope: StatsEnvelope = self.get_json(&format!("/api/users/{user_id}/stats")).await?;
        Ok(envelope.stats)
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, BackendError> {
        let envelope: LeaderboardEnvelope = self.get_json("/api/leaderboard").await?;
        Ok(envelope.leaderboard)
    }

    async fn pending_reports(&self) -> Result<Vec<KarmaReport>, BackendError> {
        let envelope: ReportListEnvelope = self.get_json("/api/reports/pending").await?;
        Ok(envelope.reports)
    }

    async fn set_admin_channel(
        &self,
        channel_id: &str,
        admin_id: &str,
    ) -> Result<(), BackendError> {
        let body = ChannelRequest {
            channel_id,
            admin_id,
        };
        let response = self.post_json("/api/settings/admin_channel", &body).await?;
        Self::expect_status(response, StatusCode::OK).await
    }

    async fn set_public_channel(
        &self,
        channel_id: &str,
        admin_id: &str,
    ) -> Result<(), BackendError> {
        let body = ChannelRequest {
            channel_id,
            admin_id,
        };
        let response = self.post_json("/api/settings/public_channel", &body).await?;
        Self::expect_status(response, StatusCode::OK).await
    }
}
