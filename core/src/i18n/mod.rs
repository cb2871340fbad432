//! Localized texts for mails, responses and errors.

use gh_shared::{Language, MessageCatalog, ValidationErrors};
use std::sync::Arc;

use crate::errors::{AuthError, DomainError, DomainResult, TokenError};

/// Key holding the token validity window in minutes
pub const TOKEN_VALIDITY_KEY: &str = "token.valid.time";

/// Source of localized message templates
pub trait MessageSource: Send + Sync {
    /// Message for `key` with `{0}`-style arguments substituted, if defined
    fn get_message(&self, key: &str, args: &[&str], language: Language) -> Option<String>;
}

impl MessageSource for MessageCatalog {
    fn get_message(&self, key: &str, args: &[&str], language: Language) -> Option<String> {
        self.format(key, args, language)
    }
}

/// Message lookups bound to the application language
#[derive(Clone)]
pub struct Messages {
    source: Arc<dyn MessageSource>,
    language: Language,
}

impl Messages {
    pub fn new(source: Arc<dyn MessageSource>, language: Language) -> Self {
        Self { source, language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Text for `key`; a missing key yields the key itself
    pub fn get(&self, key: &str) -> String {
        self.format(key, &[])
    }

    pub fn format(&self, key: &str, args: &[&str]) -> String {
        self.source
            .get_message(key, args, self.language)
            .unwrap_or_else(|| {
                tracing::warn!(key = key, language = %self.language, "Missing message key");
                key.to_string()
            })
    }

    /// Validity window of verification and password reset tokens
    pub fn token_validity_minutes(&self) -> DomainResult<i64> {
        let raw = self.get(TOKEN_VALIDITY_KEY);
        raw.trim().parse().map_err(|_| {
            DomainError::internal(format!("{} is not a number: {}", TOKEN_VALIDITY_KEY, raw))
        })
    }

    fn title_and_message(&self, key: &str) -> (String, String) {
        (
            self.get(&format!("{}.title", key)),
            self.get(&format!("{}.message", key)),
        )
    }

    pub fn resource_not_found(&self, key: &str) -> DomainError {
        let (title, message) = self.title_and_message(key);
        DomainError::ResourceNotFound { title, message }
    }

    pub fn entity_deletion(&self, key: &str) -> DomainError {
        let (title, message) = self.title_and_message(key);
        DomainError::EntityDeletion { title, message }
    }

    pub fn mail_failure(&self) -> DomainError {
        let (title, message) = self.title_and_message("error.mail");
        DomainError::Mail { title, message }
    }

    pub fn token_not_found(&self) -> DomainError {
        let (title, message) = self.title_and_message("error.token.notfound");
        TokenError::NotFound { title, message }.into()
    }

    pub fn token_expired(&self, token: &str) -> DomainError {
        let (title, message) = self.title_and_message("error.token.expired");
        TokenError::AlreadyExpired {
            title,
            message,
            token: token.to_string(),
        }
        .into()
    }

    pub fn token_consumed(&self, key: &str) -> DomainError {
        let (title, message) = self.title_and_message(key);
        TokenError::AlreadyConsumed { title, message }.into()
    }

    pub fn validation(&self, errors: ValidationErrors) -> DomainError {
        let (title, message) = self.title_and_message("error.validation");
        DomainError::Validation {
            title,
            message,
            errors,
        }
    }

    /// Single field error with the message resolved from `key`
    pub fn field_error(&self, field: &str, key: &str) -> DomainError {
        self.validation(ValidationErrors::single(field, self.get(key), key))
    }

    pub fn bad_credentials(&self) -> DomainError {
        AuthError::BadCredentials {
            title: self.get("error.auth.title"),
            message: self.get("error.auth.bad.credentials"),
        }
        .into()
    }

    pub fn account_disabled(&self) -> DomainError {
        AuthError::AccountDisabled {
            title: self.get("error.auth.title"),
            message: self.get("error.auth.disabled"),
        }
        .into()
    }

    pub fn account_blocked(&self) -> DomainError {
        AuthError::AccountBlocked {
            title: self.get("error.auth.title"),
            message: self.get("error.auth.blocked"),
        }
        .into()
    }

    pub fn unauthenticated(&self) -> DomainError {
        AuthError::Unauthenticated {
            title: self.get("error.auth.title"),
            message: self.get("error.auth.unauthenticated"),
        }
        .into()
    }

    pub fn forbidden(&self) -> DomainError {
        AuthError::Forbidden {
            title: self.get("error.auth.title"),
            message: self.get("error.auth.forbidden"),
        }
        .into()
    }
}

impl std::fmt::Debug for Messages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Messages")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}
