//! Seams between the domain and outgoing notifications.

use async_trait::async_trait;

use crate::domain::entities::User;
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::Mail;
use crate::errors::{DomainResult, MailError};

/// Transport for outgoing mail
#[async_trait]
pub trait MailSender: Send + Sync {
    /// Send a mail to the account's e-mail address
    ///
    /// # Arguments
    /// * `recipient` - Account receiving the mail
    /// * `mail` - Subject, sender display name and HTML body
    async fn send_email(&self, recipient: &User, mail: &Mail) -> Result<(), MailError>;

    /// Send a mail to the application's own inbox (contact form)
    async fn send_to_inbox(&self, mail: &Mail) -> Result<(), MailError>;
}

/// Synchronous in-process event delivery
///
/// `publish` returns once the event's listener has finished, so a listener
/// failure surfaces to the caller that raised the event.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: DomainEvent) -> DomainResult<()>;
}
