//! Charity institution entity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Organisation receiving donations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

impl Institution {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
        }
    }
}
