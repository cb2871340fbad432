use std::sync::Arc;

use crate::domain::entities::{User, VerificationToken};
use crate::errors::DomainResult;
use crate::i18n::Messages;
use crate::services::notification::{MailMessageBuilder, MailSender};
use crate::services::token::VerificationTokenService;

use super::{deliver, verification_url};

/// Refreshes an existing verification token in place and mails the new link
pub struct ResendTokenListener {
    tokens: Arc<VerificationTokenService>,
    sender: Arc<dyn MailSender>,
    builder: Arc<MailMessageBuilder>,
    messages: Messages,
}

impl ResendTokenListener {
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

    pub async fn handle(
        &self,
        user: &User,
        old_token: &VerificationToken,
        application_url: &str,
    ) -> DomainResult<()> {
        let validity = self.messages.token_validity_minutes()?;
        let mut token = old_token.clone();
        token.reissue(validity);
        let token = self.tokens.save_token(token).await?;

        tracing::info!(
            user_id = %user.id,
            token_id = %token.id,
            event = "verification_token_reissued",
            "Verification token refreshed"
        );

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
