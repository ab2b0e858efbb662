//! Bot configuration loaded from environment variables.

/// Runtime configuration.
///
/// | Env Var                 | Required | Default                 |
/// |-------------------------|----------|-------------------------|
/// | `BACKEND_URL`           | no       | `http://localhost:5000` |
/// | `COMMISSION_CHANNEL_ID` | no       | `0`                     |
/// | `GUILD_ID`              | no       | `0`                     |
/// | `ADMIN_ROLE_NAME`       | no       | `Admin`                 |
/// | `DISCORD_BOT_TOKEN`     | yes      | --                      |
/// | `PORT`                  | no       | `5000`                  |
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Base URL of the commission backend.
    pub backend_url: String,
    /// Channel where approved commissions are announced.
    pub commission_channel_id: u64,
    /// The guild this bot serves.
    pub guild_id: u64,
    /// Role name gating privileged commands (matched case-insensitively).
    pub admin_role_name: String,
    /// Chat platform authentication token.
    pub bot_token: String,
    /// Port for the operator health surface.
    pub health_port: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{0} must be a valid {1}")]
    Malformed(&'static str, &'static str),
}

impl BotConfig {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend_url = std::env::var("BACKEND_URL")
            .unwrap_or_else(|_| "http://localhost:5000".to_string());

        let commission_channel_id = parse_var("COMMISSION_CHANNEL_ID", "0", "integer")?;
        let guild_id = parse_var("GUILD_ID", "0", "integer")?;

        let admin_role_name =
            std::env::var("ADMIN_ROLE_NAME").unwrap_or_else(|_| "Admin".to_string());

        let bot_token = std::env::var("DISCORD_BOT_TOKEN")
            .map_err(|_| ConfigError::Missing("DISCORD_BOT_TOKEN"))?;

        let health_port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .map_err(|_| ConfigError::Malformed("PORT", "u16"))?;

        Ok(Self {
            backend_url,
            commission_channel_id,
            guild_id,
            admin_role_name,
            bot_token,
            health_port,
        })
    }
}

fn parse_var(name: &'static str, default: &str, kind: &'static str) -> Result<u64, ConfigError> {
    std::env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| ConfigError::Malformed(name, kind))
}
