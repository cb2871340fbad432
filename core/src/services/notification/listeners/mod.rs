//! One listener per domain event.

mod donation_process_complete;
mod password_reset;
mod registration_complete;
mod resend_token;

pub use donation_process_complete::DonationProcessCompleteListener;
pub use password_reset::PasswordResetListener;
pub use registration_complete::RegistrationCompleteListener;
pub use resend_token::ResendTokenListener;

use crate::domain::entities::User;
use crate::domain::value_objects::Mail;
use crate::errors::{DomainResult, MailError};
use crate::i18n::Messages;
use crate::services::notification::MailSender;

/// Link target of the verification mail
pub fn verification_url(application_url: &str, token: &str) -> String {
    format!("{}/register/verifyEmail?token={}", application_url, token)
}

/// Link target of the password reset mail
pub fn password_reset_url(application_url: &str, token: &str) -> String {
    format!("{}/reset-password/verifyEmail?token={}", application_url, token)
}

/// Wrap a rendered body and hand it to the sender, mapping failures to `DomainError::Mail`
pub(crate) async fn deliver(
    sender: &dyn MailSender,
    messages: &Messages,
    recipient: &User,
    subject_key: &str,
    body: Result<String, MailError>,
) -> DomainResult<()> {
    let mail = body
        .map(|body| {
            Mail::new(
                messages.get(subject_key),
                messages.get("email.app.name"),
                body,
            )
        })
        .map_err(|e| mail_failed(messages, recipient, subject_key, e))?;

    sender
        .send_email(recipient, &mail)
        .await
        .map_err(|e| mail_failed(messages, recipient, subject_key, e))?;

    tracing::info!(
        user_id = %recipient.id,
        mail = subject_key,
        event = "mail_sent",
        "Notification mail sent"
    );
    Ok(())
}

fn mail_failed(
    messages: &Messages,
    recipient: &User,
    subject_key: &str,
    error: MailError,
) -> crate::errors::DomainError {
    tracing::error!(
        user_id = %recipient.id,
        mail = subject_key,
        error = %error,
        event = "mail_failed",
        "Failed to send notification mail"
    );
    messages.mail_failure()
}
