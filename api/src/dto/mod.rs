//! Request and response bodies

pub mod account;
pub mod auth;
pub mod catalog;
pub mod contact;
pub mod donation;

use serde::{Deserialize, Serialize};

/// Plain confirmation text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `?token=...` query parameter of e-mail links
#[derive(Debug, Clone, Deserialize)]
pub struct TokenQuery {
    pub token: String,
}

/// `?sort=...` query parameter of donation lists
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SortQuery {
    pub sort: Option<String>,
}
