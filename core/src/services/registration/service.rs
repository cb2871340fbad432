//! Registration service implementation

use std::sync::Arc;

use gh_shared::validation::validators;
use gh_shared::ValidationErrors;

use crate::domain::entities::User;
use crate::domain::events::DomainEvent;
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::i18n::Messages;
use crate::repositories::UserRepository;
use crate::services::notification::EventPublisher;
use crate::services::password::PasswordEncoder;
use crate::services::token::VerificationTokenService;

/// Registration form
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    pub email: String,
    pub password: String,
    pub password_repeat: String,
}

pub struct RegistrationService {
    users: Arc<dyn UserRepository>,
    verification_tokens: Arc<VerificationTokenService>,
    encoder: Arc<dyn PasswordEncoder>,
    publisher: Arc<dyn EventPublisher>,
    messages: Messages,
}

impl RegistrationService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        verification_tokens: Arc<VerificationTokenService>,
        encoder: Arc<dyn PasswordEncoder>,
        publisher: Arc<dyn EventPublisher>,
        messages: Messages,
    ) -> Self {
        Self {
            users,
            verification_tokens,
            encoder,
            publisher,
            messages,
        }
    }

    /// Store a new disabled account and publish `RegistrationComplete`
    ///
    /// The account stays stored when the verification mail fails; the
    /// error is still returned so the caller can report it.
    ///
    /// # Returns
    /// * `Err(DomainError::Validation)` - Invalid form or e-mail already registered
    /// * `Err(DomainError::Mail)` - Account stored but the mail was not sent
    pub async fn register(
        &self,
        request: RegistrationRequest,
        application_url: &str,
    ) -> DomainResult<User> {
        let email = request.email.trim().to_string();
        self.validate(&email, &request).await?;

        let hash = self.encoder.encode(&request.password)?;
        let user = self.users.create(User::new(email, hash)).await?;
        tracing::info!(user_id = %user.id, event = "user_registered", "Account registered");

        self.publisher
            .publish(DomainEvent::RegistrationComplete {
                user: user.clone(),
                application_url: application_url.to_string(),
            })
            .await?;

        Ok(user)
    }

    async fn validate(&self, email: &str, request: &RegistrationRequest) -> DomainResult<()> {
        let mut failures: Vec<(&str, &str)> = Vec::new();

        if !validators::is_valid_email(email) {
            failures.push(("email", "validation.email.invalid"));
        } else if self.users.exists_by_email(email).await? {
            failures.push(("email", "validation.email.taken"));
        }
        if !validators::is_strong_password(&request.password) {
            failures.push(("password", "validation.password.weak"));
        }
        if request.password != request.password_repeat {
            failures.push(("password_repeat", "validation.password.mismatch"));
        }

        let mut errors = ValidationErrors::new();
        for (field, key) in failures {
            errors.add_error(field, self.messages.get(key), key);
        }
        errors
            .into_result()
            .map_err(|errors| self.messages.validation(errors))
    }

    /// Reissue the verification token presented in `token` and mail it again
    ///
    /// The token may be expired; it is refreshed in place.
    ///
    /// # Returns
    /// * `Err(DomainError::ResourceNotFound)` - No account owns this token
    pub async fn resend_token(&self, token: &str, application_url: &str) -> DomainResult<()> {
        let old_token = match self.verification_tokens.find_by_token(token).await {
            Ok(old_token) => old_token,
            Err(DomainError::Token(TokenError::NotFound { .. })) => {
                return Err(self.messages.resource_not_found("error.user.notfound"))
            }
            Err(e) => return Err(e),
        };
        let user = self
            .users
            .find_by_id(old_token.user_id)
            .await?
            .ok_or_else(|| self.messages.resource_not_found("error.user.notfound"))?;

        self.publisher
            .publish(DomainEvent::ResendToken {
                user,
                old_token,
                application_url: application_url.to_string(),
            })
            .await
    }

    /// Confirmation shown after registering
    pub fn registration_complete_message(&self) -> DomainResult<String> {
        self.with_validity("registration.complete.message")
    }

    /// Confirmation shown after a resend
    pub fn resend_message(&self) -> DomainResult<String> {
        self.with_validity("registration.resend.message")
    }

    fn with_validity(&self, key: &str) -> DomainResult<String> {
        let minutes = self.messages.token_validity_minutes()?.to_string();
        Ok(self.messages.format(key, &[&minutes]))
    }
}
