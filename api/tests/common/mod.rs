//! Shared fixture for HTTP tests: the real application over in-memory storage

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse},
    http::{header, StatusCode},
    test, web, App, Error,
};
use gh_api::app::DEFAULT_PAYLOAD_LIMIT;
use gh_api::middleware::JwtService;
use gh_api::{create_app, AppState, Repositories};
use gh_core::services::{MockMailSender, MockPasswordEncoder, PasswordEncoder};
use gh_core::{Messages, User, UserRepository};
use gh_shared::{CorsConfig, JwtConfig, Language, MessageCatalog};
use serde_json::Value;

pub const APP_URL: &str = "http://goodhands.test";
pub const PASSWORD: &str = "Secret1!";

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub repositories: Repositories,
    pub mail: MockMailSender,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_sender(MockMailSender::new())
    }

    /// Every mail fails with a transport error
    pub fn with_failing_mail() -> Self {
        Self::with_sender(MockMailSender::failing())
    }

    fn with_sender(mail: MockMailSender) -> Self {
        let messages = Messages::new(
            Arc::new(MessageCatalog::embedded().expect("embedded catalog")),
            Language::English,
        );
        let repositories = Repositories::in_memory();
        let state = AppState::new(
            repositories.clone(),
            Arc::new(mail.clone()),
            Arc::new(MockPasswordEncoder),
            messages,
            JwtService::new(&JwtConfig::new("test-secret")),
            Some(APP_URL.to_string()),
        )
        .expect("application state");

        Self {
            state: web::Data::new(state),
            repositories,
            mail,
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody>,
            Error = Error,
            InitError = (),
        >,
    > {
        create_app(self.state.clone(), &CorsConfig::default(), DEFAULT_PAYLOAD_LIMIT)
    }

    /// Enabled account stored directly, bypassing registration
    pub async fn seed_user(&self, email: &str, admin: bool) -> User {
        let hash = MockPasswordEncoder.encode(PASSWORD).unwrap();
        let mut user = if admin {
            User::new_admin(email, hash)
        } else {
            User::new(email, hash)
        };
        user.enable();
        self.repositories.users.create(user).await.unwrap()
    }

    pub fn bearer(&self, user: &User) -> (header::HeaderName, String) {
        let token = self.state.jwt.issue(user).unwrap();
        (header::AUTHORIZATION, format!("Bearer {}", token))
    }

    /// Token in the link of the last mail sent to `email`
    pub async fn token_from_last_mail(&self, email: &str) -> String {
        let mails = self.mail.sent_to(email).await;
        let body = &mails.last().expect("mail sent").body;
        let start = body.find("token=").expect("link with token") + "token=".len();
        body[start..]
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect()
    }
}

/// Call the service and decode the JSON body (`Null` when empty)
pub async fn call<S, R, B>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let res = test::call_service(app, req).await;
    let status = res.status();
    let body = test::read_body(res).await;
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}
