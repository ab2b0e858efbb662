//! The acting identity and the single authorization guard.
//!
//! Every privileged command goes through [`ensure_admin`] before any
//! network call is made; privilege checks are enforced here first,
//! independent of whatever the backend enforces.

use crate::error::CoreError;

/// The platform user issuing a command.  Carried per-invocation, never
/// persisted.
#[derive(Debug, Clone)]
pub struct ActingIdentity {
    pub discord_id: String,
    pub username: String,
    pub display_name: String,
    /// Names of the roles this user holds in the guild.
    pub roles: Vec<String>,
}

impl ActingIdentity {
    /// ASCII case-insensitive role membership test.
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|r| r.eq_ignore_ascii_case(name))
    }
}

/// Require the configured admin role on `identity`.
pub fn ensure_admin(identity: &ActingIdentity, required_role: &str) -> Result<(), CoreError> {
    if identity.has_role(required_role) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "This command requires the '{required_role}' role"
        )))
    }
}
