//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod id;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig, ServerMode};
pub use self::auth::{AuthConfig, AuthMode};
pub use self::id::IdConfig;
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Minimum accepted length of the token signing key.
pub const MIN_JWT_KEY_LEN: usize = 6;

/// Longest accepted token TTL: one year.
pub const MAX_EXPIRATION_SECONDS: u64 = 366 * 24 * 60 * 60;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Resource identifier settings.
    #[serde(default)]
    pub id: IdConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `MINIBLOG__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("MINIBLOG")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Checks every section and reports all problems at once.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errs: Vec<String> = Vec::new();

        if self.auth.jwt_key.chars().count() < MIN_JWT_KEY_LEN {
            errs.push(format!(
                "auth.jwt_key must be at least {MIN_JWT_KEY_LEN} characters long"
            ));
        }
        if self.auth.expiration_seconds == 0 {
            errs.push("auth.expiration_seconds must be greater than zero".to_string());
        }
        if self.auth.expiration_seconds > MAX_EXPIRATION_SECONDS {
            errs.push(format!(
                "auth.expiration_seconds must be at most {MAX_EXPIRATION_SECONDS}"
            ));
        }
        if self.server.port == 0 {
            errs.push("server.port must be non-zero".to_string());
        }
        if self.server.shutdown_grace_seconds == 0 {
            errs.push("server.shutdown_grace_seconds must be greater than zero".to_string());
        }
        if self.id.salt.is_empty() {
            errs.push("id.salt must not be empty".to_string());
        }

        if errs.is_empty() {
            Ok(())
        } else {
            Err(AppError::configuration(errs.join("; ")))
        }
    }
}
