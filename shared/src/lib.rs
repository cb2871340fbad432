//! Shared utilities and common types for the Good Hands server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - The localized message catalog
//! - Field validation helpers

pub mod config;
pub mod errors;
pub mod i18n;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AdminAccountConfig, AppConfig, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    LogFormat, LoggingConfig, MailConfig, MailProvider, ServerConfig, StorageBackend,
};
pub use errors::{error_codes, ErrorResponse};
pub use i18n::{format_message, CatalogError, MessageCatalog};
pub use types::Language;
pub use utils::validation;
pub use utils::validation::{FieldError, ValidationErrors};
