//! Event-driven mail notifications
//!
//! Services publish [`DomainEvent`](crate::domain::events::DomainEvent)s through
//! an [`EventPublisher`]. The [`NotificationDispatcher`] hands each event to its
//! listener, which issues or refreshes tokens and sends the mail. Handling is
//! synchronous, so a mail failure is reported to the publishing request while
//! any token stored beforehand stays stored.

mod dispatcher;
pub mod listeners;
mod mail_message;
pub mod mock;
mod traits;


pub use dispatcher::NotificationDispatcher;
pub use listeners::{password_reset_url, verification_url};
pub use mail_message::MailMessageBuilder;
pub use mock::{MockEventPublisher, MockMailSender, SentMail};
pub use traits::{EventPublisher, MailSender};
