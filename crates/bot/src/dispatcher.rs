//! Maps inbound commands to lifecycle actions.
//!
//! Order of checks per command: argument shape first, then the
//! authorization guard for privileged commands, then the lifecycle
//! precheck, and only then the backend call.  The first two happen with
//! zero network traffic.  No error escapes: every path reduces to a
//! [`Reply`].

use mercboard_client::{BackendError, CommissionBackend};
use mercboard_core::lifecycle::{self, CommissionAction};
use mercboard_core::stats::LeaderboardEntry;
use mercboard_core::{
    commission, identity, report, ActingIdentity, Commission, CommissionType, CoreError,
    KarmaReport, ReportType,
};

use crate::command::Command;
use crate::reply::Reply;

/// Fallback reason recorded when an admin rejects without giving one.
const DEFAULT_REJECT_REASON: &str = "No reason provided";

/// Fallback documentation recorded when a commission is completed bare.
const DEFAULT_DOCUMENTATION: &str = "No documentation provided";

/// List commands render at most this many entries.
const LIST_LIMIT: usize = 10;

/// Internal error funnel; both sides convert into a [`Reply`] at the
/// dispatch boundary.
enum DispatchError {
    Core(CoreError),
    Backend(BackendError),
}

impl From<CoreError> for DispatchError {
    fn from(err: CoreError) -> Self {
        DispatchError::Core(err)
    }
}

impl From<BackendError> for DispatchError {
    fn from(err: BackendError) -> Self {
        DispatchError::Backend(err)
    }
}

impl From<DispatchError> for Reply {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Core(e) => Reply::from(e),
            DispatchError::Backend(e) => Reply::from(e),
        }
    }
}

/// The command dispatcher, generic over the backend contract so tests can
/// substitute an in-memory implementation.
pub struct Dispatcher<B> {
    backend: B,
    admin_role: String,
}

impl<B: CommissionBackend> Dispatcher<B> {
    pub fn new(backend: B, admin_role: impl Into<String>) -> Self {
        Self {
            backend,
            admin_role: admin_role.into(),
        }
    }

    /// The underlying backend contract (used by tests to inspect mocks).
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run one command to completion.  Infallible by construction.
    pub async fn dispatch(&self, identity: &ActingIdentity, command: Command) -> Reply {
        if command.is_privileged() {
            if let Err(err) = identity::ensure_admin(identity, &self.admin_role) {
                tracing::debug!(
                    user = %identity.username,
                    role = %self.admin_role,
                    "Privileged command refused"
                );
                return Reply::from(err);
            }
        }

        let result = match command {
            Command::Submit {
                commission_type,
                skills,
            } => self.submit(identity, &commission_type, &skills).await,
            Command::Accept { commission_id } => self.accept(identity, &commission_id).await,
            Command::View { commission_id } => self.view(&commission_id).await,
            Command::MyCommissions => self.my_commissions(identity).await,
            Command::MyStats => self.my_stats(identity).await,
            Command::Leaderboard => self.leaderboard().await,
            Command::Complete {
                commission_id,
                documentation,
            } => {
                self.complete(identity, &commission_id, documentation.as_deref())
                    .await
            }
            Command::Report {
                commission_id,
                report_type,
                reason,
            } => {
                self.report(identity, &commission_id, &report_type, &reason)
                    .await
            }
            Command::Pending => self.pending().await,
            Command::Reports => self.reports().await,
            Command::Approve { commission_id } => self.approve(identity, &commission_id).await,
            Command::Reject {
                commission_id,
                reason,
            } => {
                self.reject(identity, &commission_id, reason.as_deref())
                    .await
            }
            Command::SetAdminChannel { channel_id } => {
                self.set_channel(identity, &channel_id, true).await
            }
            Command::SetPublicChannel { channel_id } => {
                self.set_channel(identity, &channel_id, false).await
            }
            Command::Help => Ok(Reply::Info(help_text())),
        };

        result.unwrap_or_else(Reply::from)
    }

    /// Fetch a commission and require `action` to be legal for its current
    /// status.  The illegal case reports the current state and the
    /// requested action without issuing the mutation.
    async fn precheck(
        &self,
        id: i64,
        action: CommissionAction,
    ) -> Result<Commission, DispatchError> {
        let commission = self.backend.get_commission(id).await?;
        lifecycle::ensure_legal(commission.status, action)?;
        Ok(commission)
    }

    async fn submit(
        &self,
        identity: &ActingIdentity,
        commission_type: &str,
        skills: &str,
    ) -> Result<Reply, DispatchError> {
        let commission_type = CommissionType::from_token(commission_type)?;
        commission::validate_skills(skills)?;

        let creator = user_ref(identity);
        let id = self
            .backend
            .create_commission(&creator, commission_type, skills.trim())
            .await?;

        tracing::info!(
            commission_id = id,
            commission_type = %commission_type,
            user = %identity.username,
            "Commission submitted"
        );
        Ok(Reply::Success(format!(
            "Your {commission_type} request has been submitted for admin approval. \
             Commission ID: #{id}"
        )))
    }

    async fn accept(
        &self,
        identity: &ActingIdentity,
        commission_id: &str,
    ) -> Result<Reply, DispatchError> {
        let id = commission::parse_commission_id(commission_id)?;
        self.precheck(id, CommissionAction::Accept).await?;

        let message = self
            .backend
            .accept_commission(id, &user_ref(identity))
            .await?;
        tracing::info!(commission_id = id, user = %identity.username, "Commission accepted");
        Ok(Reply::Success(message))
    }

    async fn approve(
        &self,
        identity: &ActingIdentity,
        commission_id: &str,
    ) -> Result<Reply, DispatchError> {
        let id = commission::parse_commission_id(commission_id)?;
        self.precheck(id, CommissionAction::Approve).await?;

        let message = self
            .backend
            .approve_commission(id, &identity.discord_id, &identity.display_name)
            .await?;
        tracing::info!(commission_id = id, admin = %identity.username, "Commission approved");
        Ok(Reply::Success(message))
    }

    async fn reject(
        &self,
        identity: &ActingIdentity,
        commission_id: &str,
        reason: Option<&str>,
    ) -> Result<Reply, DispatchError> {
        let id = commission::parse_commission_id(commission_id)?;
        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_REJECT_REASON);
        self.precheck(id, CommissionAction::Reject).await?;

        let message = self
            .backend
            .reject_commission(id, &identity.discord_id, reason)
            .await?;
        tracing::info!(commission_id = id, admin = %identity.username, "Commission rejected");
        Ok(Reply::Success(message))
    }

    async fn complete(
        &self,
        identity: &ActingIdentity,
        commission_id: &str,
        documentation: Option<&str>,
    ) -> Result<Reply, DispatchError> {
        let id = commission::parse_commission_id(commission_id)?;
        let commission = self.precheck(id, CommissionAction::Complete).await?;

        // Only the two parties to an accepted commission may close it.
        let caller = identity.discord_id.as_str();
        let is_party = commission.creator.discord_id == caller
            || commission
                .accepter
                .as_ref()
                .is_some_and(|a| a.discord_id == caller);
        if !is_party {
            return Err(CoreError::Forbidden(
                "Only the creator or accepter can complete this commission".to_string(),
            )
            .into());
        }

        let documentation = documentation
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(DEFAULT_DOCUMENTATION);
        let message = self
            .backend
            .complete_commission(id, &identity.discord_id, &identity.username, documentation)
            .await?;
        tracing::info!(commission_id = id, user = %identity.username, "Commission completed");
        Ok(Reply::Success(message))
    }

    async fn report(
        &self,
        identity: &ActingIdentity,
        commission_id: &str,
        report_type: &str,
        reason: &str,
    ) -> Result<Reply, DispatchError> {
        let id = commission::parse_commission_id(commission_id)?;
        let report_type = ReportType::from_input(report_type)?;
        report::validate_reason(reason)?;
        self.precheck(id, CommissionAction::Report).await?;

        let message = self
            .backend
            .submit_report(
                id,
                &identity.discord_id,
                &identity.display_name,
                report_type,
                reason.trim(),
            )
            .await?;
        tracing::info!(
            commission_id = id,
            report_type = %report_type,
            user = %identity.username,
            "Karma report submitted"
        );
        Ok(Reply::Success(message))
    }

    async fn view(&self, commission_id: &str) -> Result<Reply, DispatchError> {
        let id = commission::parse_commission_id(commission_id)?;
        let c = self.backend.get_commission(id).await?;

        let mut lines = vec![
            format!("Commission #{} ({})", c.id, c.commission_type),
            format!("Status: {}", c.status),
            format!("Skills: {}", c.skills),
            format!("Creator: {}", c.creator.display_name),
        ];
        if let Some(accepter) = &c.accepter {
            lines.push(format!("Accepter: {}", accepter.display_name));
        }
        lines.push(format!("Created: {}", c.created_at.format("%Y-%m-%d %H:%M")));
        if let Some(expires) = c.expires_at {
            lines.push(format!("Expires: {}", expires.format("%Y-%m-%d %H:%M")));
        }
        let actions = lifecycle::legal_actions(c.status);
        if !actions.is_empty() {
            let names: Vec<&str> = actions.iter().map(|a| a.as_str()).collect();
            lines.push(format!("Available actions: {}", names.join(", ")));
        }
        Ok(Reply::Info(lines.join("\n")))
    }

    async fn my_commissions(&self, identity: &ActingIdentity) -> Result<Reply, DispatchError> {
        let commissions = self
            .backend
            .list_user_commissions(&identity.discord_id)
            .await?;
        if commissions.is_empty() {
            return Ok(Reply::Info(
                "You haven't created any commissions yet.".to_string(),
            ));
        }
        let lines: Vec<String> = commissions
            .iter()
            .take(LIST_LIMIT)
            .map(|c| {
                format!(
                    "#{} [{}] {} -- {}",
                    c.id,
                    c.status,
                    c.commission_type,
                    truncate(&c.skills, 50)
                )
            })
            .collect();
        Ok(Reply::Info(format!(
            "Your commissions ({} total):\n{}",
            commissions.len(),
            lines.join("\n")
        )))
    }

    async fn my_stats(&self, identity: &ActingIdentity) -> Result<Reply, DispatchError> {
        let stats = self.backend.user_stats(&identity.discord_id).await?;
        let rank = match stats.rank {
            Some(r) => format!("#{r}"),
            None => "unranked".to_string(),
        };
        Ok(Reply::Info(format!(
            "Stats for {}: {} commissions, {} completed, {:.1}% success rate, \
             {:.1}/5 average rating, {} karma points, rank {rank}",
            identity.display_name,
            stats.total_commissions,
            stats.completed_commissions,
            stats.success_rate,
            stats.average_rating,
            stats.karma_points,
        )))
    }

    async fn leaderboard(&self) -> Result<Reply, DispatchError> {
        let entries = self.backend.leaderboard().await?;
        if entries.is_empty() {
            return Ok(Reply::Info(
                "No leaderboard data available yet.".to_string(),
            ));
        }
        let lines: Vec<String> = entries
            .iter()
            .take(LIST_LIMIT)
            .enumerate()
            .map(|(i, e): (usize, &LeaderboardEntry)| {
                format!(
                    "{}. {} -- {} karma, {} completed, {:.1}/5",
                    i + 1,
                    e.name(),
                    e.karma_points,
                    e.completed_commissions,
                    e.average_rating
                )
            })
            .collect();
        Ok(Reply::Info(format!(
            "Karma leaderboard:\n{}",
            lines.join("\n")
        )))
    }

    async fn pending(&self) -> Result<Reply, DispatchError> {
        let commissions = self.backend.list_pending().await?;
        if commissions.is_empty() {
            return Ok(Reply::Info("No pending commissions.".to_string()));
        }
        let lines: Vec<String> = commissions
            .iter()
            .take(LIST_LIMIT)
            .map(|c| {
                format!(
                    "#{} {} by {} -- {}",
                    c.id,
                    c.commission_type,
                    c.creator.display_name,
                    truncate(&c.skills, 100)
                )
            })
            .collect();
        Ok(Reply::Info(format!(
            "Pending commissions ({}):\n{}",
            commissions.len(),
            lines.join("\n")
        )))
    }

    async fn reports(&self) -> Result<Reply, DispatchError> {
        let reports = self.backend.pending_reports().await?;
        if reports.is_empty() {
            return Ok(Reply::Info("No pending karma reports.".to_string()));
        }
        let lines: Vec<String> = reports
            .iter()
            .take(LIST_LIMIT)
            .map(|r: &KarmaReport| {
                format!(
                    "Report #{} on commission #{} ({}) by {} -- {}",
                    r.id,
                    r.commission_id,
                    r.report_type,
                    r.reporter_name,
                    truncate(&r.reason, 100)
                )
            })
            .collect();
        Ok(Reply::Info(format!(
            "Pending karma reports ({}):\n{}",
            reports.len(),
            lines.join("\n")
        )))
    }

    async fn set_channel(
        &self,
        identity: &ActingIdentity,
        channel_id: &str,
        admin_channel: bool,
    ) -> Result<Reply, DispatchError> {
        if channel_id.trim().is_empty() {
            return Err(CoreError::Validation("Channel id must not be empty".to_string()).into());
        }
        if admin_channel {
            self.backend
                .set_admin_channel(channel_id.trim(), &identity.discord_id)
                .await?;
            tracing::info!(channel_id, admin = %identity.username, "Admin channel updated");
            Ok(Reply::Success(format!(
                "Admin approval channel set to {channel_id}"
            )))
        } else {
            self.backend
                .set_public_channel(channel_id.trim(), &identity.discord_id)
                .await?;
            tracing::info!(channel_id, admin = %identity.username, "Public channel updated");
            Ok(Reply::Success(format!(
                "Public commission channel set to {channel_id}"
            )))
        }
    }
}

fn user_ref(identity: &ActingIdentity) -> mercboard_core::UserRef {
    mercboard_core::UserRef {
        discord_id: identity.discord_id.clone(),
        username: identity.username.clone(),
        display_name: identity.display_name.clone(),
    }
}

/// Trim long free text for list rendering.
fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let cut: String = text.chars().take(limit).collect();
        format!("{cut}...")
    }
}

fn help_text() -> String {
    [
        "Commission bot commands:",
        "  submit <merc|team|task> <skills>  -- create a commission",
        "  accept <id>                       -- accept an approved commission",
        "  complete <id> [documentation]     -- mark your commission completed",
        "  report <id> <positive|negative> <reason> -- file a karma report",
        "  commission <id>                   -- view commission details",
        "  mycommissions / mystats / leaderboard",
        "Admin commands:",
        "  pending / reports / approve <id> / reject <id> [reason]",
        "  set_admin_channel <channel> / set_public_channel <channel>",
    ]
    .join("\n")
}
