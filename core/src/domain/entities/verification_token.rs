//! E-mail verification token issued at registration.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default token validity window in minutes
pub const DEFAULT_TOKEN_VALIDITY_MINUTES: i64 = 15;

/// Fresh random opaque token value
pub fn generate_token_value() -> String {
    Uuid::new_v4().to_string()
}

/// Registration verification token.
///
/// Consumption is tracked by the owner's `enabled` flag rather than on the
/// token itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationToken {
    /// Row identifier, stable across resends
    pub id: Uuid,

    /// Opaque value sent in the verification link
    pub token: String,

    /// Owning account
    pub user_id: Uuid,

    pub created_at: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,
}

impl VerificationToken {
    /// Issues a new token for `user_id` valid for `validity_minutes` from now
    pub fn issue(user_id: Uuid, validity_minutes: i64) -> Self {
        Self::issue_at(user_id, validity_minutes, Utc::now())
    }

    pub fn issue_at(user_id: Uuid, validity_minutes: i64, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            token: generate_token_value(),
            user_id,
            created_at: now,
            expires_at: now + Duration::minutes(validity_minutes),
        }
    }

    /// Replaces the value and expiry in place; the row identity is kept
    pub fn reissue(&mut self, validity_minutes: i64) {
        self.reissue_at(validity_minutes, Utc::now());
    }

    pub fn reissue_at(&mut self, validity_minutes: i64, now: DateTime<Utc>) {
        self.token = generate_token_value();
        self.created_at = now;
        self.expires_at = now + Duration::minutes(validity_minutes);
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Strictly past expiry; a token is still valid at its exact expiry instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_sets_expiry_window() {
        let now = Utc::now();
        let user_id = Uuid::new_v4();
        let token = VerificationToken::issue_at(user_id, 15, now);

        assert_eq!(token.user_id, user_id);
        assert_eq!(token.created_at, now);
        assert_eq!(token.expires_at, now + Duration::minutes(15));
        assert!(Uuid::parse_str(&token.token).is_ok());
    }

    #[test]
    fn test_expiry_is_strict() {
        let now = Utc::now();
        let token = VerificationToken::issue_at(Uuid::new_v4(), 15, now);

        assert!(!token.is_expired_at(now + Duration::minutes(15)));
        assert!(token.is_expired_at(now + Duration::minutes(15) + Duration::milliseconds(1)));
        assert!(!token.is_expired_at(now));
    }

    #[test]
    fn test_reissue_keeps_identity() {
        let now = Utc::now();
        let mut token = VerificationToken::issue_at(Uuid::new_v4(), 15, now - Duration::hours(1));
        let (id, old_value) = (token.id, token.token.clone());

        token.reissue_at(15, now);

        assert_eq!(token.id, id);
        assert_ne!(token.token, old_value);
        assert_eq!(token.expires_at, now + Duration::minutes(15));
        assert_eq!(token.created_at, now);
        assert_eq!(token.expires_at - token.created_at, Duration::minutes(15));
        assert!(!token.is_expired_at(now));
    }

    #[test]
    fn test_values_are_unique() {
        let user_id = Uuid::new_v4();
        let a = VerificationToken::issue(user_id, 15);
        let b = VerificationToken::issue(user_id, 15);
        assert_ne!(a.token, b.token);
    }
}
