//! SMTP mail sender using lettre

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use gh_core::domain::entities::User;
use gh_core::domain::value_objects::Mail;
use gh_core::errors::MailError;
use gh_core::services::notification::MailSender;
use gh_shared::MailConfig;

use crate::InfrastructureError;

/// Sends HTML mail through an SMTP relay
pub struct SmtpMailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_email: String,
    inbox: String,
}

impl SmtpMailSender {
    /// Build the transport; no connection is opened until the first send
    pub fn new(config: &MailConfig) -> Result<Self, InfrastructureError> {
        let builder = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| InfrastructureError::Mail(format!("Failed to create SMTP relay: {}", e)))?
        } else {
            // Plain connection for local catch-all servers
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };

        let builder = if config.has_credentials() {
            builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
        } else {
            builder
        };

        tracing::info!(
            host = %config.host,
            port = config.port,
            tls = config.use_tls,
            "SMTP mail sender configured"
        );

        Ok(Self {
            transport: builder.port(config.port).build(),
            from_email: config.from_email.clone(),
            inbox: config.inbox.clone(),
        })
    }

    fn build_message(&self, to: &str, mail: &Mail) -> Result<Message, MailError> {
        let from: Mailbox = format!("{} <{}>", mail.sender_name, self.from_email)
            .parse()
            .map_err(|e| MailError::Encoding(format!("Invalid from address: {}", e)))?;
        let to: Mailbox = to
            .parse()
            .map_err(|e| MailError::Encoding(format!("Invalid recipient address: {}", e)))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(mail.subject.as_str())
            .header(ContentType::TEXT_HTML)
            .body(mail.body.clone())
            .map_err(|e| MailError::Encoding(format!("Failed to build message: {}", e)))
    }

    async fn deliver(&self, to: &str, mail: &Mail) -> Result<(), MailError> {
        let message = self.build_message(to, mail)?;

        self.transport.send(message).await.map_err(|e| {
            tracing::error!(error = %e, "SMTP delivery failed");
            MailError::Transport(e.to_string())
        })?;

        tracing::debug!(subject = %mail.subject, "Mail handed to SMTP relay");
        Ok(())
    }
}

#[async_trait]
impl MailSender for SmtpMailSender {
    async fn send_email(&self, recipient: &User, mail: &Mail) -> Result<(), MailError> {
        self.deliver(&recipient.email, mail).await
    }

    async fn send_to_inbox(&self, mail: &Mail) -> Result<(), MailError> {
        self.deliver(&self.inbox, mail).await
    }
}
