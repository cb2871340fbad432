//! Password hashing seam.

use crate::errors::DomainResult;

/// One-way password encoder
pub trait PasswordEncoder: Send + Sync {
    /// Hash a raw password for storage
    fn encode(&self, raw_password: &str) -> DomainResult<String>;

    /// Whether `raw_password` produces `encoded`
    fn matches(&self, raw_password: &str, encoded: &str) -> bool;
}

/// Reversible encoder for tests; never wire it into a server
#[derive(Debug, Clone, Copy, Default)]
pub struct MockPasswordEncoder;

impl PasswordEncoder for MockPasswordEncoder {
    fn encode(&self, raw_password: &str) -> DomainResult<String> {
        Ok(format!("{{noop}}{}", raw_password))
    }

    fn matches(&self, raw_password: &str, encoded: &str) -> bool {
        encoded.strip_prefix("{noop}") == Some(raw_password)
    }
}
