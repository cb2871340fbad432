//! bcrypt password hashing

use gh_core::errors::{DomainError, DomainResult};
use gh_core::services::password::PasswordEncoder;

/// [`PasswordEncoder`] backed by bcrypt
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordEncoder {
    cost: u32,
}

impl BcryptPasswordEncoder {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordEncoder {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordEncoder for BcryptPasswordEncoder {
    fn encode(&self, raw_password: &str) -> DomainResult<String> {
        bcrypt::hash(raw_password, self.cost)
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
    }

    fn matches(&self, raw_password: &str, encoded: &str) -> bool {
        match bcrypt::verify(raw_password, encoded) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is not a bcrypt hash");
                false
            }
        }
    }
}
