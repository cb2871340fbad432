use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::value_objects::DonationDetails;
use crate::errors::DomainResult;
use crate::i18n::Messages;
use crate::services::notification::{MailMessageBuilder, MailSender};

use super::deliver;

/// Sends the thank-you mail for a submitted donation
pub struct DonationProcessCompleteListener {
    sender: Arc<dyn MailSender>,
    builder: Arc<MailMessageBuilder>,
    messages: Messages,
}

impl DonationProcessCompleteListener {
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

    pub async fn handle(&self, user: &User, donation: &DonationDetails) -> DomainResult<()> {
        deliver(
            self.sender.as_ref(),
            &self.messages,
            user,
            "donation.subject",
            self.builder.donation(user.display_name(), donation),
        )
        .await
    }
}
