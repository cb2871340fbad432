use chrono::{DateTime, Utc};
use gh_core::{User, UserProfile};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::donation::validate_phone_number;

/// Account as shown to its owner and to administrators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub enabled: bool,
    pub blocked: bool,
    pub roles: Vec<String>,
    pub registered_at: DateTime<Utc>,
    pub profile: UserProfile,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            enabled: user.enabled,
            blocked: user.blocked,
            roles: user.roles.iter().map(|r| r.as_str().to_string()).collect(),
            registered_at: user.registered_at,
            profile: user.profile,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateEmailRequest {
    #[validate(email(code = "validation.email.invalid"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, code = "validation.required"))]
    pub password: String,

    #[validate(must_match(other = "password", code = "validation.password.mismatch"))]
    pub password_repeat: String,
}

/// Personal details; blank values are stored as absent
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    #[validate(custom(function = "validate_profile_phone"))]
    pub phone_number: Option<String>,
    pub profile_photo: Option<String>,
}

/// Blank means no phone number
fn validate_profile_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.trim().is_empty() {
        return Ok(());
    }
    validate_phone_number(phone.trim())
}

impl From<ProfileRequest> for UserProfile {
    fn from(request: ProfileRequest) -> Self {
        fn present(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            first_name: present(request.first_name),
            last_name: present(request.last_name),
            city: present(request.city),
            country: present(request.country),
            phone_number: present(request.phone_number),
            profile_photo: present(request.profile_photo),
        }
    }
}
