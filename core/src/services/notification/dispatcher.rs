//! Routes each domain event to its listener.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::events::DomainEvent;
use crate::errors::DomainResult;
use crate::i18n::Messages;
use crate::services::token::{PasswordResetTokenService, VerificationTokenService};

use super::listeners::{
    DonationProcessCompleteListener, PasswordResetListener, RegistrationCompleteListener,
    ResendTokenListener,
};
use super::{EventPublisher, MailMessageBuilder, MailSender};

/// In-process [`EventPublisher`] running listeners on the caller's task
pub struct NotificationDispatcher {
    registration_complete: RegistrationCompleteListener,
    resend_token: ResendTokenListener,
    password_reset: PasswordResetListener,
    donation_process_complete: DonationProcessCompleteListener,
}

impl NotificationDispatcher {
    pub fn new(
        verification_tokens: Arc<VerificationTokenService>,
        reset_tokens: Arc<PasswordResetTokenService>,
        sender: Arc<dyn MailSender>,
        builder: Arc<MailMessageBuilder>,
        messages: Messages,
    ) -> Self {
        Self {
            registration_complete: RegistrationCompleteListener::new(
                verification_tokens.clone(),
                sender.clone(),
                builder.clone(),
                messages.clone(),
            ),
            resend_token: ResendTokenListener::new(
                verification_tokens,
                sender.clone(),
                builder.clone(),
                messages.clone(),
            ),
            password_reset: PasswordResetListener::new(
                reset_tokens,
                sender.clone(),
                builder.clone(),
                messages.clone(),
            ),
            donation_process_complete: DonationProcessCompleteListener::new(
                sender, builder, messages,
            ),
        }
    }
}

#[async_trait]
impl EventPublisher for NotificationDispatcher {
    async fn publish(&self, event: DomainEvent) -> DomainResult<()> {
        tracing::debug!(
            kind = event.kind(),
            user_id = %event.user().id,
            event = "domain_event_published",
            "Dispatching domain event"
        );

        match &event {
            DomainEvent::RegistrationComplete {
                user,
                application_url,
            } => {
                self.registration_complete
                    .handle(user, application_url)
                    .await
            }
            DomainEvent::ResendToken {
                user,
                old_token,
                application_url,
            } => {
                self.resend_token
                    .handle(user, old_token, application_url)
                    .await
            }
            DomainEvent::PasswordReset {
                user,
                application_url,
            } => self.password_reset.handle(user, application_url).await,
            DomainEvent::DonationProcessComplete { user, donation } => {
                self.donation_process_complete.handle(user, donation).await
            }
        }
    }
}
