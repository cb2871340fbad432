use std::sync::Arc;

use crate::domain::entities::{User, VerificationToken};
use crate::errors::DomainResult;
use crate::i18n::Messages;
use crate::services::notification::{MailMessageBuilder, MailSender};
use crate::services::token::VerificationTokenService;

use super::{deliver, verification_url};

/// Issues the first verification token of a new account and mails its link
pub struct RegistrationCompleteListener {
    tokens: Arc<VerificationTokenService>,
    sender: Arc<dyn MailSender>,
    builder: Arc<MailMessageBuilder>,
    messages: Messages,
}

impl RegistrationCompleteListener {
    pub fn new(
        tokens: Arc<VerificationTokenService>,
        sender: Arc<dyn MailSender>,
        builder: Arc<MailMessageBuilder>,
        messages: Messages,
    ) -> Self {
        Self {
            tokens,
            sender,
            builder,
            messages,
        }
    }

    /// The token is stored before sending, so it survives a mail failure
    pub async fn handle(&self, user: &User, application_url: &str) -> DomainResult<()> {
        let validity = self.messages.token_validity_minutes()?;
        let token = self
            .tokens
            .save_token(VerificationToken::issue(user.id, validity))
            .await?;

        let url = verification_url(application_url, &token.token);
        deliver(
            self.sender.as_ref(),
            &self.messages,
            user,
            "registration.mail.subject",
            self.builder.registration(&url),
        )
        .await
    }
}
