//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT and bootstrap administrator configuration
//! - `database` - Storage backend and connection pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `mail` - Outgoing mail provider configuration
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod mail;
pub mod server;

use serde::{Deserialize, Serialize};

use crate::types::Language;

// Re-export commonly used types
pub use auth::{AdminAccountConfig, JwtConfig};
pub use database::{DatabaseConfig, StorageBackend};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use mail::{MailConfig, MailProvider};
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT configuration
    pub jwt: JwtConfig,

    /// Mail configuration
    pub mail: MailConfig,

    /// Startup administrator account
    pub admin: AdminAccountConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Optional path of a TOML message catalog overriding the embedded one
    #[serde(default)]
    pub messages_path: Option<String>,

    /// Language used for e-mails and error messages
    #[serde(default)]
    pub language: Language,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            jwt: JwtConfig::default(),
            mail: MailConfig::default(),
            admin: AdminAccountConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
            messages_path: None,
            language: Language::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file for the detected environment is loaded first when
    /// present, followed by a plain `.env`.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        dotenvy::from_filename(environment.env_file()).ok();
        dotenvy::dotenv().ok();

        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            mail: MailConfig::from_env(),
            admin: AdminAccountConfig::from_env(),
            cors: CorsConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
            messages_path: std::env::var("MESSAGES_PATH").ok(),
            language: std::env::var("APP_LANGUAGE")
                .ok()
                .and_then(|l| l.parse().ok())
                .unwrap_or_default(),
        }
    }

    /// Warnings about settings that must not reach production
    pub fn production_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !self.environment.is_production() {
            return warnings;
        }
        if self.jwt.is_using_default_secret() {
            warnings.push("JWT_SECRET is using the default value".to_string());
        }
        if self.database.backend == StorageBackend::Memory {
            warnings.push("STORAGE_BACKEND=memory loses all data on restart".to_string());
        }
        if self.mail.provider == MailProvider::Console {
            warnings.push("MAIL_PROVIDER=console does not deliver any e-mail".to_string());
        }
        warnings
    }
}
