//! User repository trait defining the interface for account persistence.
//!
//! The trait is async-first and uses Result types for proper error handling.
//! Profiles and roles are stored together with the account.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::{Role, User};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Implementations handle the actual storage while keeping the abstraction
/// boundary between domain and infrastructure layers.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Arguments
    /// * `id` - The UUID of the user
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given ID
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by login e-mail (case-insensitive)
    ///
    /// # Arguments
    /// * `email` - Login e-mail
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No account uses this e-mail
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Check if an account with the given e-mail exists
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// All accounts, oldest registration first
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    /// All accounts holding `role`, oldest registration first
    async fn find_by_role(&self, role: Role) -> Result<Vec<User>, DomainError>;

    /// Create a new user in the repository
    ///
    /// # Arguments
    /// * `user` - The User entity to persist
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError)` - Creation failed (e.g., duplicate e-mail)
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user, including profile and roles
    ///
    /// # Arguments
    /// * `user` - The User entity with updated fields
    ///
    /// # Returns
    /// * `Ok(User)` - The updated user
    /// * `Err(DomainError)` - Update failed (e.g., user not found)
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Delete a user from the repository
    ///
    /// # Returns
    /// * `Ok(true)` - User was deleted
    /// * `Ok(false)` - User not found
    /// * `Err(DomainError)` - Deletion failed
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
