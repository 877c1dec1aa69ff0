//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the `config`
//! and `dotenvy` crates. Variables carry the `NEUROFORM` prefix and nested
//! values are separated by a double underscore.
//!
//! # Example
//!
//! ```no_run
//! use neuroform::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod ai;
mod auth;
mod database;
mod error;
mod flow;
mod server;

pub use ai::AiConfig;
pub use auth::{AuthConfig, MIN_PRODUCTION_SECRET_LEN};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use flow::FlowConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL connection; the service runs on in-memory stores without it
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Owner token verification
    pub auth: AuthConfig,

    /// Chat-completions provider
    pub ai: AiConfig,

    /// Respondent flow tuning
    #[serde(default)]
    pub flow: FlowConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `NEUROFORM` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `NEUROFORM__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `NEUROFORM__DATABASE__URL=...` -> `database.url = ...`
    /// - `NEUROFORM__AI__API_KEY=...` -> `ai.api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("NEUROFORM")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Checks ports, pool sizes, URL schemes and secret lengths, plus the
    /// stricter production requirements.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.auth.validate(&self.server.environment)?;
        self.ai.validate(&self.server.environment)?;
        self.flow.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }

    /// True when responses and insights are kept in memory only
    pub fn uses_memory_store(&self) -> bool {
        self.database.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "NEUROFORM__AUTH__JWT_SECRET",
        "NEUROFORM__AUTH__ISSUER",
        "NEUROFORM__AI__API_KEY",
        "NEUROFORM__AI__MODEL",
        "NEUROFORM__DATABASE__URL",
        "NEUROFORM__SERVER__PORT",
        "NEUROFORM__SERVER__ENVIRONMENT",
        "NEUROFORM__FLOW__FOLLOW_UP_TIMEOUT_MS",
        "NEUROFORM__FLOW__UNKNOWN_OPERATOR",
    ];

    fn set_minimal_env() {
        env::set_var("NEUROFORM__AUTH__JWT_SECRET", "dev-secret");
        env::set_var("NEUROFORM__AI__API_KEY", "gsk_test");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn load_with(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        set_minimal_env();
        for (key, value) in extra {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_load_minimal_environment() {
        let config = load_with(&[]).unwrap();

        assert_eq!(config.auth.jwt_secret.expose_secret(), "dev-secret");
        assert_eq!(config.ai.api_key.expose_secret(), "gsk_test");
        assert!(config.uses_memory_store());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.flow.follow_up_timeout_ms, 5000);
    }

    #[test]
    fn test_database_section_enables_postgres() {
        let config = load_with(&[(
            "NEUROFORM__DATABASE__URL",
            "postgresql://test@localhost/neuroform",
        )])
        .unwrap();

        let database = config.database.as_ref().unwrap();
        assert_eq!(database.url, "postgresql://test@localhost/neuroform");
        assert!(!config.uses_memory_store());
    }

    #[test]
    fn test_nested_overrides() {
        let config = load_with(&[
            ("NEUROFORM__SERVER__PORT", "3000"),
            ("NEUROFORM__AI__MODEL", "gpt-4o-mini"),
            ("NEUROFORM__FLOW__FOLLOW_UP_TIMEOUT_MS", "1500"),
            ("NEUROFORM__FLOW__UNKNOWN_OPERATOR", "show"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.ai.model, "gpt-4o-mini");
        assert_eq!(config.flow.follow_up_timeout_ms, 1500);
        assert_eq!(
            config.flow.unknown_operator,
            crate::domain::form::UnknownOperatorPolicy::Show
        );
    }

    #[test]
    fn test_missing_secret_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        env::set_var("NEUROFORM__AI__API_KEY", "gsk_test");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_production_rejects_short_secret() {
        let config = load_with(&[("NEUROFORM__SERVER__ENVIRONMENT", "production")]).unwrap();

        assert!(config.is_production());
        assert_eq!(
            config.validate(),
            Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_LEN))
        );
    }
}
