//! User service implementation

use std::sync::Arc;
use uuid::Uuid;

use gh_shared::validation::validators;

use crate::domain::entities::{Role, User, UserProfile};
use crate::domain::events::DomainEvent;
use crate::errors::DomainResult;
use crate::i18n::Messages;
use crate::repositories::{DonationRepository, UserRepository};
use crate::services::notification::EventPublisher;
use crate::services::password::PasswordEncoder;
use crate::services::token::{PasswordResetTokenService, VerificationTokenService};

/// Account service
///
/// Owns token validation, password changes and the administrative
/// operations guarded by the last-admin rule.
pub struct UserService {
    users: Arc<dyn UserRepository>,
    donations: Arc<dyn DonationRepository>,
    verification_tokens: Arc<VerificationTokenService>,
    reset_tokens: Arc<PasswordResetTokenService>,
    encoder: Arc<dyn PasswordEncoder>,
    publisher: Arc<dyn EventPublisher>,
    messages: Messages,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        donations: Arc<dyn DonationRepository>,
        verification_tokens: Arc<VerificationTokenService>,
        reset_tokens: Arc<PasswordResetTokenService>,
        encoder: Arc<dyn PasswordEncoder>,
        publisher: Arc<dyn EventPublisher>,
        messages: Messages,
    ) -> Self {
        Self {
            users,
            donations,
            verification_tokens,
            reset_tokens,
            encoder,
            publisher,
            messages,
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> DomainResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| self.messages.resource_not_found("error.user.notfound"))
    }

    pub async fn find_by_email(&self, email: &str) -> DomainResult<User> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or_else(|| self.messages.resource_not_found("error.user.notfound"))
    }

    /// Check login credentials
    ///
    /// The password is checked first so an unknown e-mail and a wrong
    /// password are indistinguishable.
    ///
    /// # Returns
    /// * `Err(AuthError::BadCredentials)` - Unknown e-mail or wrong password
    /// * `Err(AuthError::AccountDisabled)` - E-mail not verified yet
    /// * `Err(AuthError::AccountBlocked)` - Locked by an administrator
    pub async fn authenticate(&self, email: &str, password: &str) -> DomainResult<User> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) if self.encoder.matches(password, &user.password_hash) => user,
            _ => {
                tracing::warn!(event = "login_failed", reason = "bad_credentials", "Login rejected");
                return Err(self.messages.bad_credentials());
            }
        };

        if !user.enabled {
            tracing::warn!(user_id = %user.id, event = "login_failed", reason = "disabled", "Login rejected");
            return Err(self.messages.account_disabled());
        }
        if user.blocked {
            tracing::warn!(user_id = %user.id, event = "login_failed", reason = "blocked", "Login rejected");
            return Err(self.messages.account_blocked());
        }

        tracing::info!(user_id = %user.id, event = "login_succeeded", "User authenticated");
        Ok(user)
    }

    /// Enable the account owning a registration token
    ///
    /// An already enabled owner means the token was used before; expiry is
    /// strict, a token expiring exactly now is still accepted.
    ///
    /// # Returns
    /// * `Err(TokenError::NotFound)` - Unknown token
    /// * `Err(TokenError::AlreadyConsumed)` - Account already enabled
    /// * `Err(TokenError::AlreadyExpired)` - Validity window elapsed; carries the token for a resend
    pub async fn validate_registration_token(&self, token: &str) -> DomainResult<User> {
        let verification = self.verification_tokens.find_by_token(token).await?;
        let mut user = self.find_by_id(verification.user_id).await?;

        if user.enabled {
            return Err(self.messages.token_consumed("error.registration.consumed"));
        }
        if verification.is_expired() {
            tracing::info!(user_id = %user.id, event = "verification_token_expired", "Verification token expired");
            return Err(self.messages.token_expired(&verification.token));
        }

        user.enable();
        let user = self.users.update(user).await?;
        tracing::info!(user_id = %user.id, event = "account_verified", "Account enabled");
        Ok(user)
    }

    /// Resolve the owner of a usable password reset token
    ///
    /// Does not consume the token; [`change_password`](Self::change_password) does.
    pub async fn validate_password_reset_token(&self, token: &str) -> DomainResult<User> {
        let reset = self.reset_tokens.find_by_token(token).await?;

        if reset.consumed {
            return Err(self.messages.token_consumed("error.password.reset.consumed"));
        }
        if reset.is_expired() {
            return Err(self.messages.token_expired(&reset.token));
        }

        self.find_by_id(reset.user_id).await
    }

    /// Validate a reset token and set a new password for its owner
    pub async fn change_password_with_token(
        &self,
        token: &str,
        new_password: &str,
    ) -> DomainResult<User> {
        let user = self.validate_password_reset_token(token).await?;
        self.change_password(user.id, new_password).await
    }

    /// Set a new password and mark any reset token of the account consumed
    pub async fn change_password(&self, user_id: Uuid, new_password: &str) -> DomainResult<User> {
        if !validators::is_strong_password(new_password) {
            return Err(self.messages.field_error("password", "validation.password.weak"));
        }

        let mut user = self.find_by_id(user_id).await?;
        user.password_hash = self.encoder.encode(new_password)?;
        let user = self.users.update(user).await?;

        if let Some(mut reset) = self.reset_tokens.find_by_user_id(user.id).await? {
            if !reset.consumed {
                reset.consume();
                self.reset_tokens.save(reset).await?;
            }
        }

        tracing::info!(user_id = %user.id, event = "password_changed", "Password changed");
        Ok(user)
    }

    /// Publish a password reset for the account registered under `email`
    pub async fn request_password_reset(
        &self,
        email: &str,
        application_url: &str,
    ) -> DomainResult<()> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| self.messages.field_error("email", "validation.email.unknown"))?;

        self.publisher
            .publish(DomainEvent::PasswordReset {
                user,
                application_url: application_url.to_string(),
            })
            .await
    }

    /// Change the login e-mail; it must stay unique
    pub async fn update_email(&self, user_id: Uuid, email: &str) -> DomainResult<User> {
        let email = email.trim();
        if !validators::is_valid_email(email) {
            return Err(self.messages.field_error("email", "validation.email.invalid"));
        }

        let mut user = self.find_by_id(user_id).await?;
        if user.email.eq_ignore_ascii_case(email) {
            return Ok(user);
        }
        if self.users.exists_by_email(email).await? {
            return Err(self.messages.field_error("email", "validation.email.taken"));
        }

        user.email = email.to_string();
        self.users.update(user).await
    }

    pub async fn update_profile(&self, user_id: Uuid, profile: UserProfile) -> DomainResult<User> {
        let mut user = self.find_by_id(user_id).await?;
        user.profile = profile;
        self.users.update(user).await
    }

    /// Administrators other than `principal_id`
    pub async fn find_all_admins(&self, principal_id: Uuid) -> DomainResult<Vec<User>> {
        self.find_by_role_excluding(Role::Admin, principal_id).await
    }

    /// Regular users other than `principal_id`
    pub async fn find_all_users(&self, principal_id: Uuid) -> DomainResult<Vec<User>> {
        self.find_by_role_excluding(Role::User, principal_id).await
    }

    async fn find_by_role_excluding(&self, role: Role, principal_id: Uuid) -> DomainResult<Vec<User>> {
        Ok(self
            .users
            .find_by_role(role)
            .await?
            .into_iter()
            .filter(|u| u.id != principal_id)
            .collect())
    }

    pub async fn block(&self, user_id: Uuid) -> DomainResult<User> {
        let mut user = self.find_by_id(user_id).await?;
        user.block();
        let user = self.users.update(user).await?;
        tracing::info!(user_id = %user.id, event = "account_blocked", "Account blocked");
        Ok(user)
    }

    pub async fn unblock(&self, user_id: Uuid) -> DomainResult<User> {
        let mut user = self.find_by_id(user_id).await?;
        user.unblock();
        let user = self.users.update(user).await?;
        tracing::info!(user_id = %user.id, event = "account_unblocked", "Account unblocked");
        Ok(user)
    }

    pub async fn add_admin_role(&self, user_id: Uuid) -> DomainResult<User> {
        let mut user = self.find_by_id(user_id).await?;
        if user.grant_role(Role::Admin) {
            tracing::info!(user_id = %user.id, event = "admin_granted", "Admin role granted");
            return self.users.update(user).await;
        }
        Ok(user)
    }

    /// Revoke the admin role, keeping at least one usable administrator
    ///
    /// # Returns
    /// * `Err(DomainError::EntityDeletion)` - Not an administrator, or no other active administrator
    pub async fn remove_admin_role(&self, user_id: Uuid) -> DomainResult<User> {
        let mut user = self.find_by_id(user_id).await?;
        if !user.is_admin() {
            return Err(self.messages.entity_deletion("error.admin.not.admin"));
        }
        self.ensure_other_active_admin(&user, "error.admin.last.demote")
            .await?;

        user.revoke_role(Role::Admin);
        // A demoted account keeps a role
        user.grant_role(Role::User);
        let user = self.users.update(user).await?;
        tracing::info!(user_id = %user.id, event = "admin_revoked", "Admin role revoked");
        Ok(user)
    }

    /// Delete an account together with its tokens
    ///
    /// Donations of the account are kept with their owner cleared.
    pub async fn delete_user(&self, user_id: Uuid) -> DomainResult<()> {
        let user = self.find_by_id(user_id).await?;
        if user.is_admin() {
            self.ensure_other_active_admin(&user, "error.admin.last.delete")
                .await?;
        }

        for mut donation in self.donations.find_by_user_id(user.id).await? {
            donation.user_id = None;
            self.donations.save(donation).await?;
        }
        self.verification_tokens.delete_by_user_id(user.id).await?;
        self.reset_tokens.delete_by_user_id(user.id).await?;
        self.users.delete(user.id).await?;

        tracing::info!(user_id = %user.id, event = "account_deleted", "Account deleted");
        Ok(())
    }

    async fn ensure_other_active_admin(&self, user: &User, key: &str) -> DomainResult<()> {
        let admins = self.users.find_by_role(Role::Admin).await?;
        if admins
            .iter()
            .any(|admin| admin.id != user.id && admin.is_active_admin())
        {
            return Ok(());
        }

        tracing::warn!(user_id = %user.id, event = "last_admin_guard", "Refused to remove the last active administrator");
        Err(self.messages.entity_deletion(key))
    }

    /// Create the bootstrap administrator unless the e-mail is already registered
    ///
    /// # Returns
    /// * `Ok(Some(user))` - Account created
    /// * `Ok(None)` - An account with this e-mail already exists
    pub async fn ensure_admin_account(&self, email: &str, password: &str) -> DomainResult<Option<User>> {
        if self.users.exists_by_email(email).await? {
            return Ok(None);
        }

        let hash = self.encoder.encode(password)?;
        let admin = self.users.create(User::new_admin(email, hash)).await?;
        tracing::info!(user_id = %admin.id, email = %admin.email, event = "admin_bootstrapped", "Administrator account created");
        Ok(Some(admin))
    }
}
