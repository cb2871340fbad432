//! Recording doubles for the notification seams

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::User;
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::Mail;
use crate::errors::{DomainResult, MailError};

use super::{EventPublisher, MailSender};

/// Mail recorded by [`MockMailSender`]; `recipient` is `None` for the inbox
#[derive(Debug, Clone)]
pub struct SentMail {
    pub recipient: Option<String>,
    pub mail: Mail,
}

/// Mail sender keeping every mail in memory
#[derive(Clone, Default)]
pub struct MockMailSender {
    sent: Arc<RwLock<Vec<SentMail>>>,
    failing: bool,
}

impl MockMailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sender rejecting every mail with a transport error
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub async fn sent(&self) -> Vec<SentMail> {
        self.sent.read().await.clone()
    }

    pub async fn sent_to(&self, email: &str) -> Vec<Mail> {
        self.sent
            .read()
            .await
            .iter()
            .filter(|m| m.recipient.as_deref() == Some(email))
            .map(|m| m.mail.clone())
            .collect()
    }

    async fn record(&self, recipient: Option<String>, mail: &Mail) -> Result<(), MailError> {
        if self.failing {
            return Err(MailError::Transport("connection refused".to_string()));
        }
        self.sent.write().await.push(SentMail {
            recipient,
            mail: mail.clone(),
        });
        Ok(())
    }
}

#[async_trait]
impl MailSender for MockMailSender {
    async fn send_email(&self, recipient: &User, mail: &Mail) -> Result<(), MailError> {
        self.record(Some(recipient.email.clone()), mail).await
    }

    async fn send_to_inbox(&self, mail: &Mail) -> Result<(), MailError> {
        self.record(None, mail).await
    }
}

/// Publisher that records events without handling them
#[derive(Clone, Default)]
pub struct MockEventPublisher {
    events: Arc<RwLock<Vec<DomainEvent>>>,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<DomainEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, event: DomainEvent) -> DomainResult<()> {
        self.events.write().await.push(event);
        Ok(())
    }
}
