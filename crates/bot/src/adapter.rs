//! The inbound chat boundary.
//!
//! The platform SDK turns each slash command or message into an
//! [`Invocation`] and pushes it into the channel consumed by [`run`].
//! Each invocation runs on its own task, so commands from different users
//! proceed concurrently without shared in-process state; the backend is
//! the only shared resource and owns its own consistency.

use std::sync::Arc;

use tokio::sync::mpsc;

use mercboard_client::CommissionBackend;
use mercboard_core::ActingIdentity;

use crate::command::Command;
use crate::dispatcher::Dispatcher;
use crate::gateway::{self, ChatGateway};

/// One inbound command as surfaced by the chat platform.
#[derive(Debug)]
pub struct Invocation {
    pub identity: ActingIdentity,
    /// Channel the command was issued in; the delivery fallback target.
    pub channel_id: String,
    pub command: Command,
}

/// Consume invocations until the sender side closes.
///
/// Spawns one task per invocation: dispatch, then deliver.  Dispatch is
/// infallible and delivery failures are logged inside [`gateway::deliver`],
/// so no fault can take the loop down.
pub async fn run<B, G>(
    mut invocations: mpsc::Receiver<Invocation>,
    dispatcher: Arc<Dispatcher<B>>,
    gateway: Arc<G>,
) where
    B: CommissionBackend + 'static,
    G: ChatGateway + 'static,
{
    while let Some(invocation) = invocations.recv().await {
        let dispatcher = Arc::clone(&dispatcher);
        let gateway = Arc::clone(&gateway);
        tokio::spawn(async move {
            let Invocation {
                identity,
                channel_id,
                command,
            } = invocation;
            let reply = dispatcher.dispatch(&identity, command).await;
            gateway::deliver(
                gateway.as_ref(),
                &identity.discord_id,
                &channel_id,
                &reply,
            )
            .await;
        });
    }
    tracing::info!("Invocation channel closed, adapter loop ending");
}
