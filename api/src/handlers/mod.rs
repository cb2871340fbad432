//! Request handling helpers shared by all routes

pub mod error;

pub use error::{localize_internal_error, validation_error, ApiError, ApiResult};
