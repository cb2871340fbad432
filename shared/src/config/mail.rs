//! Outgoing mail configuration

use serde::{Deserialize, Serialize};

/// Mail delivery provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    /// Deliver through an SMTP relay
    Smtp,
    /// Write messages to the log instead of sending them
    Console,
}

impl std::str::FromStr for MailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smtp" => Ok(MailProvider::Smtp),
            "console" | "log" => Ok(MailProvider::Console),
            _ => Err(format!("Invalid mail provider: {}", s)),
        }
    }
}

/// SMTP and sender configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Selected provider
    pub provider: MailProvider,

    /// SMTP host
    pub host: String,

    /// SMTP port
    pub port: u16,

    /// SMTP user name (empty disables authentication)
    #[serde(default)]
    pub username: String,

    /// SMTP password
    #[serde(default)]
    pub password: String,

    /// Use implicit/STARTTLS relay transport
    pub use_tls: bool,

    /// Address placed in the From header
    pub from_email: String,

    /// Inbox receiving contact-form messages
    pub inbox: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: MailProvider::Console,
            host: String::from("localhost"),
            port: 1025,
            username: String::new(),
            password: String::new(),
            use_tls: false,
            from_email: String::from("noreply@goodhands.local"),
            inbox: String::from("contact@goodhands.local"),
        }
    }
}

impl MailConfig {
    /// Create from environment variables (`MAIL_PROVIDER`, `SMTP_*`, `MAIL_FROM`, `MAIL_INBOX`)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let from_email = std::env::var("MAIL_FROM").unwrap_or(defaults.from_email);
        Self {
            provider: std::env::var("MAIL_PROVIDER")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.provider),
            host: std::env::var("SMTP_HOST").unwrap_or(defaults.host),
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            username: std::env::var("SMTP_USERNAME").unwrap_or_default(),
            password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
            use_tls: std::env::var("SMTP_USE_TLS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.use_tls),
            inbox: std::env::var("MAIL_INBOX").unwrap_or_else(|_| from_email.clone()),
            from_email,
        }
    }

    /// Whether SMTP authentication is configured
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mail_provider_from_str() {
        assert_eq!("SMTP".parse::<MailProvider>().unwrap(), MailProvider::Smtp);
        assert_eq!("log".parse::<MailProvider>().unwrap(), MailProvider::Console);
        assert!("ses".parse::<MailProvider>().is_err());
    }

    #[test]
    fn test_default_mail_config_uses_console() {
        let config = MailConfig::default();
        assert_eq!(config.provider, MailProvider::Console);
        assert!(!config.has_credentials());
    }
}
