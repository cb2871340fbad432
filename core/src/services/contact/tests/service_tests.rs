//! Unit tests for ContactService

use std::sync::Arc;

use crate::domain::value_objects::ContactMessage;
use crate::errors::DomainError;
use crate::services::contact::ContactService;
use crate::services::notification::{MailMessageBuilder, MockMailSender};
use crate::services::test_support::messages;

fn service(sender: &MockMailSender) -> ContactService {
    ContactService::new(
        Arc::new(sender.clone()),
        Arc::new(MailMessageBuilder::new(messages()).unwrap()),
        messages(),
    )
}

fn contact(email: Option<&str>) -> ContactMessage {
    ContactMessage {
        first_name: "Jan".to_string(),
        last_name: "Kowalski".to_string(),
        email: email.map(str::to_string),
        message: "When is the next pickup?".to_string(),
    }
}

#[tokio::test]
async fn test_contact_message_goes_to_inbox() {
    let sender = MockMailSender::new();

    service(&sender)
        .send(contact(Some("jan@example.com")))
        .await
        .unwrap();

    let sent = sender.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, None);
    assert_eq!(sent[0].mail.subject, "Message from Jan Kowalski");
    assert!(sent[0].mail.body.contains("jan@example.com"));
}

#[tokio::test]
async fn test_contact_message_requires_email() {
    let sender = MockMailSender::new();

    let result = service(&sender).send(contact(None)).await;

    match result {
        Err(DomainError::Validation { errors, .. }) => assert!(errors.has_field("email")),
        other => panic!("expected validation error, got {:?}", other),
    }
    assert!(sender.sent().await.is_empty());
}

#[tokio::test]
async fn test_contact_transport_failure_is_mail_error() {
    let sender = MockMailSender::failing();

    let result = service(&sender).send(contact(Some("jan@example.com"))).await;

    assert!(matches!(result, Err(DomainError::Mail { .. })));
}
