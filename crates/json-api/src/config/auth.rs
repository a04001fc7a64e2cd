//! Auth Config

use clap::Args;

/// Session settings for the in-memory backend.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Bearer token accepted as an administrator session when no database is
    /// configured
    #[arg(long, env = "DEV_ADMIN_TOKEN", hide_env_values = true)]
    pub dev_admin_token: Option<String>,
}
