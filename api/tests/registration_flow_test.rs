//! Registration, e-mail verification, resend and login over HTTP

mod common;

use actix_web::{http::StatusCode, test};
use chrono::{Duration, Utc};
use common::{call, TestContext, APP_URL, PASSWORD};
use gh_core::VerificationTokenRepository;
use gh_shared::error_codes;
use serde_json::json;

const EMAIL: &str = "donor@example.com";

fn register_request() -> test::TestRequest {
    test::TestRequest::post().uri("/api/v1/register").set_json(json!({
        "email": EMAIL,
        "password": PASSWORD,
        "password_repeat": PASSWORD,
    }))
}

fn login_request(password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "email": EMAIL, "password": password }))
}

#[actix_web::test]
async fn test_register_verify_and_login() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;

    let (status, body) = call(&app, register_request().to_request()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["message"].as_str().unwrap().contains("15 minutes"));

    let mails = ctx.mail.sent_to(EMAIL).await;
    assert_eq!(mails.len(), 1);
    assert!(mails[0]
        .body
        .contains(&format!("{}/register/verifyEmail?token=", APP_URL)));

    // Not verified yet
    let (status, body) = call(&app, login_request(PASSWORD).to_request()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], error_codes::ACCOUNT_DISABLED);

    let token = ctx.token_from_last_mail(EMAIL).await;
    let verify = format!("/api/v1/register/verifyEmail?token={}", token);
    let (status, _) = call(&app, test::TestRequest::get().uri(&verify).to_request()).await;
    assert_eq!(status, StatusCode::OK);

    // Second use of the same link
    let (status, body) = call(&app, test::TestRequest::get().uri(&verify).to_request()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], error_codes::TOKEN_CONSUMED);

    let (status, body) = call(&app, login_request(PASSWORD).to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["email"], EMAIL);
    assert_eq!(body["user"]["roles"], json!(["ROLE_USER"]));

    let access_token = body["access_token"].as_str().unwrap().to_string();
    let req = test::TestRequest::get()
        .uri("/api/v1/account")
        .insert_header(("Authorization", format!("Bearer {}", access_token)))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enabled"], true);
    assert!(body.get("password_hash").is_none());
}

#[actix_web::test]
async fn test_register_reports_every_invalid_field() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;
    ctx.seed_user(EMAIL, false).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .set_json(json!({
            "email": EMAIL,
            "password": "weak",
            "password_repeat": "other",
        }))
        .to_request();
    let (status, body) = call(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], error_codes::VALIDATION_ERROR);
    let fields = &body["details"]["fields"];
    assert!(fields["email"].is_array());
    assert!(fields["password"].is_array());
    assert!(fields["password_repeat"].is_array());
    assert!(ctx.mail.sent().await.is_empty());
}

#[actix_web::test]
async fn test_expired_link_returns_token_and_resend_refreshes_it() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;
    call(&app, register_request().to_request()).await;

    let old_token = ctx.token_from_last_mail(EMAIL).await;
    let mut stored = ctx
        .repositories
        .verification_tokens
        .find_by_token(&old_token)
        .await
        .unwrap()
        .unwrap();
    stored.expires_at = Utc::now() - Duration::minutes(1);
    ctx.repositories.verification_tokens.save(stored.clone()).await.unwrap();

    let verify = format!("/api/v1/register/verifyEmail?token={}", old_token);
    let (status, body) = call(&app, test::TestRequest::get().uri(&verify).to_request()).await;
    assert_eq!(status, StatusCode::GONE);
    assert_eq!(body["error"], error_codes::TOKEN_EXPIRED);
    assert_eq!(body["details"]["token"], old_token.as_str());

    let resend = format!("/api/v1/register/resend-token?token={}", old_token);

    // A plain link visit must not refresh the token
    let (status, _) = call(&app, test::TestRequest::get().uri(&resend).to_request()).await;
    assert_ne!(status, StatusCode::OK);
    assert_eq!(ctx.mail.sent_to(EMAIL).await.len(), 1);

    let (status, body) = call(&app, test::TestRequest::post().uri(&resend).to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("15 minutes"));

    let new_token = ctx.token_from_last_mail(EMAIL).await;
    assert_ne!(new_token, old_token);
    let refreshed = ctx
        .repositories
        .verification_tokens
        .find_by_user_id(stored.user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(refreshed.id, stored.id);
    assert_eq!(refreshed.token, new_token);

    // The old value no longer resolves
    let (status, body) = call(&app, test::TestRequest::get().uri(&verify).to_request()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], error_codes::TOKEN_NOT_FOUND);

    let verify_new = format!("/api/v1/register/verifyEmail?token={}", new_token);
    let (status, _) = call(&app, test::TestRequest::get().uri(&verify_new).to_request()).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn test_resend_with_unknown_token_is_not_found() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/register/resend-token?token=missing")
        .to_request();
    let (status, body) = call(&app, req).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], error_codes::NOT_FOUND);
}

#[actix_web::test]
async fn test_mail_failure_keeps_the_account() {
    let ctx = TestContext::with_failing_mail();
    let app = test::init_service(ctx.app()).await;

    let (status, body) = call(&app, register_request().to_request()).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], error_codes::MAIL_ERROR);

    let user = ctx.state.users.find_by_email(EMAIL).await.unwrap();
    assert!(!user.enabled);
    let token = ctx
        .repositories
        .verification_tokens
        .find_by_user_id(user.id)
        .await
        .unwrap();
    assert!(token.is_some());
}

#[actix_web::test]
async fn test_missing_token_parameter_is_bad_request() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/register/verifyEmail")
        .to_request();
    let (status, body) = call(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], error_codes::BAD_REQUEST);
}

#[actix_web::test]
async fn test_wrong_password_is_bad_credentials() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;
    ctx.seed_user(EMAIL, false).await;

    let (status, body) = call(&app, login_request("Wrong1!").to_request()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], error_codes::BAD_CREDENTIALS);
}
