//! Password reset token with explicit consumption.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::verification_token::generate_token_value;

/// Token mailed on a password reset request.
///
/// Validation only proves the link is usable; the token is consumed when the
/// password is actually changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordResetToken {
    pub id: Uuid,
    pub token: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub consumed: bool,
}

impl PasswordResetToken {
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
            consumed: false,
        }
    }

    /// New value and expiry on the same row. A refreshed link is usable again.
    pub fn reissue(&mut self, validity_minutes: i64) {
        self.reissue_at(validity_minutes, Utc::now());
    }

    pub fn reissue_at(&mut self, validity_minutes: i64, now: DateTime<Utc>) {
        self.token = generate_token_value();
        self.created_at = now;
        self.expires_at = now + Duration::minutes(validity_minutes);
        self.consumed = false;
    }

    pub fn consume(&mut self) {
        self.consumed = true;
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_is_unconsumed() {
        let now = Utc::now();
        let token = PasswordResetToken::issue_at(Uuid::new_v4(), 15, now);
        assert!(!token.consumed);
        assert_eq!(token.expires_at - token.created_at, Duration::minutes(15));
    }

    #[test]
    fn test_expiry_independent_of_consumption() {
        let now = Utc::now();
        let mut token = PasswordResetToken::issue_at(Uuid::new_v4(), 15, now);
        token.consume();

        assert!(token.consumed);
        assert!(!token.is_expired_at(now + Duration::minutes(15)));
        assert!(token.is_expired_at(now + Duration::minutes(16)));
    }

    #[test]
    fn test_reissue_clears_consumption() {
        let now = Utc::now();
        let mut token = PasswordResetToken::issue_at(Uuid::new_v4(), 15, now - Duration::hours(2));
        let old_value = token.token.clone();
        token.consume();

        token.reissue_at(15, now);

        assert!(!token.consumed);
        assert_ne!(token.token, old_value);
        assert_eq!(token.created_at, now);
        assert_eq!(token.expires_at - token.created_at, Duration::minutes(15));
    }
}
