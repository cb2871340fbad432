use std::sync::Arc;

use gh_shared::validation::validators;
use gh_shared::ValidationErrors;

use crate::domain::value_objects::{ContactMessage, Mail};
use crate::errors::DomainResult;
use crate::i18n::Messages;
use crate::services::notification::{MailMessageBuilder, MailSender};

pub struct ContactService {
    sender: Arc<dyn MailSender>,
    builder: Arc<MailMessageBuilder>,
    messages: Messages,
}

impl ContactService {
    pub fn new(
        sender: Arc<dyn MailSender>,
        builder: Arc<MailMessageBuilder>,
        messages: Messages,
    ) -> Self {
        Self {
            sender,
            builder,
            messages,
        }
    }

    /// Validate the message and mail it to the inbox
    pub async fn send(&self, contact: ContactMessage) -> DomainResult<()> {
        self.validate(&contact)?;

        let body = self.builder.contact(&contact).map_err(|e| {
            tracing::error!(error = %e, event = "mail_failed", "Failed to render contact message");
            self.messages.mail_failure()
        })?;
        let subject = self.messages.format(
            "contact.mail.subject",
            &[&contact.first_name, &contact.last_name],
        );
        let mail = Mail::new(subject, self.messages.get("email.app.name"), body);

        self.sender.send_to_inbox(&mail).await.map_err(|e| {
            tracing::error!(error = %e, event = "mail_failed", "Failed to send contact message");
            self.messages.mail_failure()
        })?;

        tracing::info!(event = "contact_message_sent", "Contact message delivered");
        Ok(())
    }

    fn validate(&self, contact: &ContactMessage) -> DomainResult<()> {
        let mut errors = ValidationErrors::new();
        let email = contact.email.as_deref().unwrap_or_default();

        for (field, value) in [
            ("first_name", contact.first_name.as_str()),
            ("last_name", contact.last_name.as_str()),
            ("message", contact.message.as_str()),
        ] {
            if !validators::not_empty(value) {
                errors.add_error(field, self.messages.get("validation.required"), "validation.required");
            }
        }
        if !validators::is_valid_email(email.trim()) {
            errors.add_error("email", self.messages.get("validation.email.invalid"), "validation.email.invalid");
        }

        errors
            .into_result()
            .map_err(|errors| self.messages.validation(errors))
    }
}
