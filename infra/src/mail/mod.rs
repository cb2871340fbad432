//! Mail delivery implementations

mod console;
mod smtp;

pub use console::ConsoleMailSender;
pub use smtp::SmtpMailSender;

use std::sync::Arc;

use gh_core::services::notification::MailSender;
use gh_shared::{MailConfig, MailProvider};

use crate::InfrastructureError;

/// Create the mail sender selected by configuration
pub fn create_mail_sender(config: &MailConfig) -> Result<Arc<dyn MailSender>, InfrastructureError> {
    match config.provider {
        MailProvider::Smtp => Ok(Arc::new(SmtpMailSender::new(config)?)),
        MailProvider::Console => {
            tracing::warn!("Using console mail provider, mails are only logged");
            Ok(Arc::new(ConsoleMailSender::new(config.inbox.clone())))
        }
    }
}
