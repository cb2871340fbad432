//! Contact form submission.

use serde::{Deserialize, Serialize};

/// Message sent from the contact form to the application inbox
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub first_name: String,
    pub last_name: String,
    /// Reply address; taken from the logged-in account when present
    pub email: Option<String>,
    pub message: String,
}
