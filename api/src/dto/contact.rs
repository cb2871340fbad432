use gh_core::ContactMessage;
use serde::{Deserialize, Serialize};

/// Contact form; every field is checked by the contact service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Ignored for logged-in users, whose account e-mail is used
    pub email: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl ContactRequest {
    pub fn into_message(self, account_email: Option<String>) -> ContactMessage {
        ContactMessage {
            first_name: self.first_name,
            last_name: self.last_name,
            email: account_email.or(self.email),
            message: self.message,
        }
    }
}
