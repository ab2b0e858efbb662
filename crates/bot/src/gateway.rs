//! The outbound chat boundary.
//!
//! The platform SDK implements [`ChatGateway`]; this module owns the
//! delivery rule: when the acting user refuses private messages, the same
//! content is posted in the originating channel instead.
//! Delivery failures are logged and never reported as command failures.

use async_trait::async_trait;

use crate::reply::Reply;

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The recipient does not accept private messages.
    #[error("private messages refused by recipient")]
    Refused,

    /// Any other platform-side delivery failure.
    #[error("delivery failed: {0}")]
    Failed(String),
}

/// Message delivery as the chat platform exposes it.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    async fn send_private(&self, user_id: &str, content: &str) -> Result<(), DeliveryError>;

    async fn send_channel(&self, channel_id: &str, content: &str) -> Result<(), DeliveryError>;
}

/// Deliver a reply to the acting user: private first, with the originating
/// channel as fallback.
pub async fn deliver<G: ChatGateway + ?Sized>(
    gateway: &G,
    user_id: &str,
    channel_id: &str,
    reply: &Reply,
) {
    let content = reply.message();
    match gateway.send_private(user_id, &content).await {
        Ok(()) => {}
        Err(err) => {
            tracing::debug!(user_id, error = %err, "Private delivery failed, falling back");
            if let Err(err) = gateway.send_channel(channel_id, &content).await {
                tracing::warn!(channel_id, error = %err, "Channel fallback delivery failed");
            }
        }
    }
}
