//! Application state: services wired from repositories and adapters

use std::sync::Arc;

use actix_web::HttpRequest;
use gh_core::repositories::{
    CategoryRepository, DonationRepository, InstitutionRepository, MockCategoryRepository,
    MockDonationRepository, MockInstitutionRepository, MockPasswordResetTokenRepository,
    MockUserRepository, MockVerificationTokenRepository, PasswordResetTokenRepository,
    UserRepository, VerificationTokenRepository,
};
use gh_core::services::{
    CategoryService, ContactService, DonationService, InstitutionService, MailMessageBuilder,
    MailSender, NotificationDispatcher, PasswordEncoder, PasswordResetTokenService,
    RegistrationService, UserService, VerificationTokenService,
};
use gh_core::{MailError, Messages};

use crate::middleware::JwtService;

/// One repository per entity
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub verification_tokens: Arc<dyn VerificationTokenRepository>,
    pub password_reset_tokens: Arc<dyn PasswordResetTokenRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub institutions: Arc<dyn InstitutionRepository>,
    pub donations: Arc<dyn DonationRepository>,
}

impl Repositories {
    /// Process-local storage, lost on restart
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            verification_tokens: Arc::new(MockVerificationTokenRepository::new()),
            password_reset_tokens: Arc::new(MockPasswordResetTokenRepository::new()),
            categories: Arc::new(MockCategoryRepository::new()),
            institutions: Arc::new(MockInstitutionRepository::new()),
            donations: Arc::new(MockDonationRepository::new()),
        }
    }

    /// MySQL-backed storage sharing one pool
    #[cfg(feature = "mysql")]
    pub fn mysql(pool: &gh_infra::DatabasePool) -> Self {
        use gh_infra::database::{
            MySqlCategoryRepository, MySqlDonationRepository, MySqlInstitutionRepository,
            MySqlPasswordResetTokenRepository, MySqlUserRepository,
            MySqlVerificationTokenRepository,
        };

        let pool = pool.get_pool().clone();
        Self {
            users: Arc::new(MySqlUserRepository::new(pool.clone())),
            verification_tokens: Arc::new(MySqlVerificationTokenRepository::new(pool.clone())),
            password_reset_tokens: Arc::new(MySqlPasswordResetTokenRepository::new(pool.clone())),
            categories: Arc::new(MySqlCategoryRepository::new(pool.clone())),
            institutions: Arc::new(MySqlInstitutionRepository::new(pool.clone())),
            donations: Arc::new(MySqlDonationRepository::new(pool)),
        }
    }
}

/// Shared state handed to every handler
pub struct AppState {
    pub users: UserService,
    pub registration: RegistrationService,
    pub donations: DonationService,
    pub categories: CategoryService,
    pub institutions: InstitutionService,
    pub contact: ContactService,
    pub messages: Messages,
    pub jwt: JwtService,
    /// Base URL for mail links; derived from the request when unset
    pub public_url: Option<String>,
}

impl AppState {
    /// Wire every service from its collaborators
    ///
    /// # Returns
    /// * `Err(MailError::Encoding)` - A mail template failed to compile
    pub fn new(
        repositories: Repositories,
        mail_sender: Arc<dyn MailSender>,
        encoder: Arc<dyn PasswordEncoder>,
        messages: Messages,
        jwt: JwtService,
        public_url: Option<String>,
    ) -> Result<Self, MailError> {
        let verification_tokens = Arc::new(VerificationTokenService::new(
            repositories.verification_tokens.clone(),
            messages.clone(),
        ));
        let reset_tokens = Arc::new(PasswordResetTokenService::new(
            repositories.password_reset_tokens.clone(),
            messages.clone(),
        ));
        let mail_builder = Arc::new(MailMessageBuilder::new(messages.clone())?);
        let dispatcher = Arc::new(NotificationDispatcher::new(
            verification_tokens.clone(),
            reset_tokens.clone(),
            mail_sender.clone(),
            mail_builder.clone(),
            messages.clone(),
        ));

        Ok(Self {
            users: UserService::new(
                repositories.users.clone(),
                repositories.donations.clone(),
                verification_tokens.clone(),
                reset_tokens,
                encoder.clone(),
                dispatcher.clone(),
                messages.clone(),
            ),
            registration: RegistrationService::new(
                repositories.users.clone(),
                verification_tokens,
                encoder,
                dispatcher.clone(),
                messages.clone(),
            ),
            donations: DonationService::new(
                repositories.donations.clone(),
                repositories.categories.clone(),
                repositories.institutions.clone(),
                dispatcher,
                messages.clone(),
            ),
            categories: CategoryService::new(
                repositories.categories.clone(),
                repositories.donations.clone(),
                messages.clone(),
            ),
            institutions: InstitutionService::new(
                repositories.institutions.clone(),
                repositories.donations.clone(),
                messages.clone(),
            ),
            contact: ContactService::new(mail_sender, mail_builder, messages.clone()),
            messages,
            jwt,
            public_url: public_url.map(|url| url.trim_end_matches('/').to_string()),
        })
    }

    /// Base URL placed in e-mail links
    pub fn application_url(&self, req: &HttpRequest) -> String {
        if let Some(url) = &self.public_url {
            return url.clone();
        }
        let info = req.connection_info();
        format!("{}://{}", info.scheme(), info.host())
    }
}
