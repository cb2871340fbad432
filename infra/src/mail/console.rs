//! Mail sender that writes messages to the log

use async_trait::async_trait;

use gh_core::domain::entities::User;
use gh_core::domain::value_objects::Mail;
use gh_core::errors::MailError;
use gh_core::services::notification::MailSender;

/// Development sender; links in the body can be copied from the log
pub struct ConsoleMailSender {
    inbox: String,
}

impl ConsoleMailSender {
    pub fn new(inbox: impl Into<String>) -> Self {
        Self {
            inbox: inbox.into(),
        }
    }
}

#[async_trait]
impl MailSender for ConsoleMailSender {
    async fn send_email(&self, recipient: &User, mail: &Mail) -> Result<(), MailError> {
        tracing::info!(
            to = %recipient.email,
            subject = %mail.subject,
            body = %mail.body,
            event = "mail_logged",
            "Mail not sent (console provider)"
        );
        Ok(())
    }

    async fn send_to_inbox(&self, mail: &Mail) -> Result<(), MailError> {
        tracing::info!(
            to = %self.inbox,
            subject = %mail.subject,
            body = %mail.body,
            event = "mail_logged",
            "Mail not sent (console provider)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_sender_always_succeeds() {
        let sender = ConsoleMailSender::new("inbox@goodhands.org");
        let user = User::new("donor@example.com", "hash");
        let mail = Mail::new("Subject", "Good Hands", "<p>body</p>");

        assert!(sender.send_email(&user, &mail).await.is_ok());
        assert!(sender.send_to_inbox(&mail).await.is_ok());
    }
}
