use std::sync::Arc;

use crate::domain::entities::{PasswordResetToken, User};
use crate::errors::DomainResult;
use crate::i18n::Messages;
use crate::services::notification::{MailMessageBuilder, MailSender};
use crate::services::token::PasswordResetTokenService;

use super::{deliver, password_reset_url};

/// Issues or refreshes the account's single reset token and mails its link
pub struct PasswordResetListener {
    tokens: Arc<PasswordResetTokenService>,
    sender: Arc<dyn MailSender>,
    builder: Arc<MailMessageBuilder>,
    messages: Messages,
}

impl PasswordResetListener {
    pub fn new(
        tokens: Arc<PasswordResetTokenService>,
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

    /// A refreshed token is usable again even if its previous value was consumed
    pub async fn handle(&self, user: &User, application_url: &str) -> DomainResult<()> {
        let validity = self.messages.token_validity_minutes()?;
        let token = match self.tokens.find_by_user_id(user.id).await? {
            Some(mut existing) => {
                existing.reissue(validity);
                existing
            }
            None => PasswordResetToken::issue(user.id, validity),
        };
        let token = self.tokens.save(token).await?;

        let url = password_reset_url(application_url, &token.token);
        deliver(
            self.sender.as_ref(),
            &self.messages,
            user,
            "password.reset.mail.subject",
            self.builder.password_reset(&url),
        )
        .await
    }
}
