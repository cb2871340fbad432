//! Authentication and bootstrap-account configuration

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            access_token_expiry: 3600, // 1 hour
            issuer: String::from("goodhands"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
            access_token_expiry: std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
                .ok()
                .and_then(|e| e.parse().ok())
                .unwrap_or(defaults.access_token_expiry),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// Administrator account created at startup when missing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminAccountConfig {
    /// Create the account on startup
    pub enabled: bool,

    /// Login e-mail of the administrator
    pub email: String,

    /// Initial plain-text password (hashed before it is stored)
    pub password: String,
}

impl Default for AdminAccountConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            email: String::from("admin@admin.com"),
            password: String::from("Admin123!"),
        }
    }
}

impl AdminAccountConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: std::env::var("ADMIN_BOOTSTRAP")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.enabled),
            email: std::env::var("ADMIN_EMAIL").unwrap_or(defaults.email),
            password: std::env::var("ADMIN_PASSWORD").unwrap_or(defaults.password),
        }
    }
}
