//! Connection state shared with the health surface.
//!
//! Explicitly owned and injected wherever it is read; there is no ambient
//! bot singleton anywhere in the lifecycle or authorization code.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

/// What the operator health endpoints report about the chat connection.
#[derive(Debug, Default)]
pub struct ConnectionState {
    ready: AtomicBool,
    bot_user: RwLock<Option<String>>,
    guild_count: AtomicUsize,
}

impl ConnectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful chat-platform connection.
    pub fn set_connected(&self, bot_user: impl Into<String>, guild_count: usize) {
        *self.bot_user.write().expect("bot_user lock poisoned") = Some(bot_user.into());
        self.guild_count.store(guild_count, Ordering::SeqCst);
        self.ready.store(true, Ordering::SeqCst);
    }

    /// Record a dropped chat-platform connection.
    pub fn set_disconnected(&self) {
        self.ready.store(false, Ordering::SeqCst);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    pub fn bot_user(&self) -> Option<String> {
        self.bot_user.read().expect("bot_user lock poisoned").clone()
    }

    pub fn guild_count(&self) -> usize {
        if self.is_ready() {
            self.guild_count.load(Ordering::SeqCst)
        } else {
            0
        }
    }
}
