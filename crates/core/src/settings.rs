//! Guild channel pointers, set by admins and read by notification logic
//! outside this core.

use serde::{Deserialize, Serialize};

/// The two channels the backend remembers for a guild.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelSettings {
    /// Where approval requests are surfaced to admins.
    #[serde(default)]
    pub admin_channel: Option<String>,
    /// Where approved commissions are announced.
    #[serde(default)]
    pub public_channel: Option<String>,
}
