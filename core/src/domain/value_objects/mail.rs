//! Outgoing e-mail value object.

use serde::{Deserialize, Serialize};

/// Formatted mail ready to hand to a mail sender
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mail {
    pub subject: String,
    /// Display name placed in front of the sender address
    pub sender_name: String,
    /// HTML body
    pub body: String,
}

impl Mail {
    pub fn new(
        subject: impl Into<String>,
        sender_name: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            sender_name: sender_name.into(),
            body: body.into(),
        }
    }
}
