//! Layered runtime settings.
//!
//! Values come from the environment (prefix `THERAPEASE`, `__` as the
//! section separator, e.g. `THERAPEASE__AUTH__JWT_SECRET`) on top of the
//! defaults below; a `.env` file is honoured in development.

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: SecretString,
    pub token_ttl_hours: i64,
}

/// Admin account created at startup when absent, replacing a separate
/// seed step.
#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapSettings {
    pub admin_name: String,
    pub admin_email: Option<String>,
    pub admin_password: Option<SecretString>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub bootstrap: BootstrapSettings,
}

impl Settings {
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();

        let cfg = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080_i64)?
            // Development fallback only; deployments override via env.
            .set_default("auth.jwt_secret", "dev-secret-change-me")?
            .set_default("auth.token_ttl_hours", 24_i64)?
            .set_default("bootstrap.admin_name", "Administrator")?
            .add_source(config::Environment::with_prefix("THERAPEASE").separator("__"))
            .build()?;

        Ok(cfg.try_deserialize()?)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
