//! User account entity and its profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Authorization role granted to an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_USER")]
    User,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    /// Stable name used in storage and JWT claims
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "ROLE_USER",
            Role::Admin => "ROLE_ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROLE_USER" => Ok(Role::User),
            "ROLE_ADMIN" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Personal details attached to every account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub phone_number: Option<String>,
    /// File name of the uploaded profile picture
    pub profile_photo: Option<String>,
}

/// Registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,

    /// Login e-mail, unique across accounts
    pub email: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Set once the e-mail address has been verified
    pub enabled: bool,

    /// Administrative lock
    pub blocked: bool,

    /// Registration timestamp
    pub registered_at: DateTime<Utc>,

    /// Granted roles
    pub roles: BTreeSet<Role>,

    /// Personal details
    pub profile: UserProfile,
}

impl User {
    /// Creates a new, not yet verified account with the `ROLE_USER` role
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let mut roles = BTreeSet::new();
        roles.insert(Role::User);

        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: password_hash.into(),
            enabled: false,
            blocked: false,
            registered_at: Utc::now(),
            roles,
            profile: UserProfile::default(),
        }
    }

    /// Creates an enabled account holding only the `ROLE_ADMIN` role
    pub fn new_admin(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let mut user = Self::new(email, password_hash);
        user.roles.clear();
        user.roles.insert(Role::Admin);
        user.enabled = true;
        user
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Enabled, not blocked
    pub fn can_authenticate(&self) -> bool {
        self.enabled && !self.blocked
    }

    /// Administrator that is able to log in
    pub fn is_active_admin(&self) -> bool {
        self.is_admin() && self.can_authenticate()
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn block(&mut self) {
        self.blocked = true;
    }

    pub fn unblock(&mut self) {
        self.blocked = false;
    }

    /// Adds `role`; returns false if it was already granted
    pub fn grant_role(&mut self, role: Role) -> bool {
        self.roles.insert(role)
    }

    /// Removes `role`; returns false if it was not granted
    pub fn revoke_role(&mut self, role: Role) -> bool {
        self.roles.remove(&role)
    }

    /// First name for greetings, if one was provided
    pub fn display_name(&self) -> Option<&str> {
        self.profile
            .first_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_disabled_regular_user() {
        let user = User::new("donor@example.com", "hash");

        assert!(!user.enabled);
        assert!(!user.blocked);
        assert!(user.has_role(Role::User));
        assert!(!user.is_admin());
        assert!(!user.can_authenticate());
    }

    #[test]
    fn test_new_admin_is_enabled() {
        let admin = User::new_admin("admin@admin.com", "hash");

        assert!(admin.is_admin());
        assert!(!admin.has_role(Role::User));
        assert!(admin.is_active_admin());
    }

    #[test]
    fn test_blocked_user_cannot_authenticate() {
        let mut admin = User::new_admin("admin@admin.com", "hash");
        admin.block();
        assert!(!admin.can_authenticate());
        assert!(!admin.is_active_admin());

        admin.unblock();
        assert!(admin.is_active_admin());
    }

    #[test]
    fn test_grant_and_revoke_role() {
        let mut user = User::new("donor@example.com", "hash");
        assert!(user.grant_role(Role::Admin));
        assert!(!user.grant_role(Role::Admin));
        assert!(user.revoke_role(Role::Admin));
        assert!(!user.revoke_role(Role::Admin));
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ROLE_ADMIN\"");
        assert_eq!("ROLE_USER".parse::<Role>().unwrap(), Role::User);
        assert!("ADMIN".parse::<Role>().is_err());
    }

    #[test]
    fn test_display_name_ignores_blank() {
        let mut user = User::new("donor@example.com", "hash");
        assert_eq!(user.display_name(), None);
        user.profile.first_name = Some("  ".to_string());
        assert_eq!(user.display_name(), None);
        user.profile.first_name = Some("Anna".to_string());
        assert_eq!(user.display_name(), Some("Anna"));
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User::new("donor@example.com", "secret-hash");
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
    }
}
