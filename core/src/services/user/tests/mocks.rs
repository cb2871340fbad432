//! Fixtures for user service tests

use std::sync::Arc;

use gh_shared::{Language, MessageCatalog};

use crate::domain::entities::User;
use crate::i18n::Messages;
use crate::repositories::{
    MockDonationRepository, MockPasswordResetTokenRepository, MockUserRepository,
    MockVerificationTokenRepository, UserRepository,
};
use crate::services::notification::MockEventPublisher;
use crate::services::password::{MockPasswordEncoder, PasswordEncoder};
use crate::services::token::{PasswordResetTokenService, VerificationTokenService};
use crate::services::user::UserService;

pub const PASSWORD: &str = "Secret1!";

pub struct Fixture {
    pub users: MockUserRepository,
    pub donations: MockDonationRepository,
    pub verification_tokens: MockVerificationTokenRepository,
    pub reset_tokens: MockPasswordResetTokenRepository,
    pub publisher: MockEventPublisher,
    pub service: UserService,
}

impl Fixture {
    pub fn new() -> Self {
        let messages = Messages::new(
            Arc::new(MessageCatalog::embedded().unwrap()),
            Language::English,
        );
        let users = MockUserRepository::new();
        let donations = MockDonationRepository::new();
        let verification_tokens = MockVerificationTokenRepository::new();
        let reset_tokens = MockPasswordResetTokenRepository::new();
        let publisher = MockEventPublisher::new();

        let service = UserService::new(
            Arc::new(users.clone()),
            Arc::new(donations.clone()),
            Arc::new(VerificationTokenService::new(
                Arc::new(verification_tokens.clone()),
                messages.clone(),
            )),
            Arc::new(PasswordResetTokenService::new(
                Arc::new(reset_tokens.clone()),
                messages.clone(),
            )),
            Arc::new(MockPasswordEncoder),
            Arc::new(publisher.clone()),
            messages,
        );

        Self {
            users,
            donations,
            verification_tokens,
            reset_tokens,
            publisher,
            service,
        }
    }

    /// Stores an enabled regular user
    pub async fn user(&self, email: &str) -> User {
        let mut user = User::new(email, MockPasswordEncoder.encode(PASSWORD).unwrap());
        user.enable();
        self.users.create(user).await.unwrap()
    }

    /// Stores a disabled regular user
    pub async fn unverified_user(&self, email: &str) -> User {
        let user = User::new(email, MockPasswordEncoder.encode(PASSWORD).unwrap());
        self.users.create(user).await.unwrap()
    }

    pub async fn admin(&self, email: &str) -> User {
        let admin = User::new_admin(email, MockPasswordEncoder.encode(PASSWORD).unwrap());
        self.users.create(admin).await.unwrap()
    }
}
