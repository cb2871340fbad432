use serde::{Deserialize, Serialize};
use validator::Validate;

use super::account::UserResponse;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, code = "validation.required"))]
    pub email: String,

    #[validate(length(min = 1, code = "validation.required"))]
    pub password: String,

    #[validate(length(min = 1, code = "validation.required"))]
    pub password_repeat: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, code = "validation.required"))]
    pub email: String,

    #[validate(length(min = 1, code = "validation.required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    /// Seconds until the access token expires
    pub expires_in: i64,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(email(code = "validation.email.invalid"))]
    pub email: String,
}

/// New password submitted from the reset link
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewPasswordRequest {
    #[validate(length(min = 1, code = "validation.required"))]
    pub token: String,

    #[validate(length(min = 1, code = "validation.required"))]
    pub password: String,

    #[validate(must_match(other = "password", code = "validation.password.mismatch"))]
    pub password_repeat: String,
}

/// Reset link that may still be used
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetTokenResponse {
    pub token: String,
    pub email: String,
}
