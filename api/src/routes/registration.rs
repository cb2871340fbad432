//! Account registration and e-mail verification

use actix_web::{web, HttpRequest, HttpResponse};
use gh_core::services::RegistrationRequest;

use crate::dto::auth::RegisterRequest;
use crate::dto::{MessageResponse, TokenQuery};
use crate::handlers::ApiResult;
use crate::state::AppState;

use super::validated;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/register")
            .route("", web::post().to(register))
            .route("/verifyEmail", web::get().to(verify_email))
            .route("/resend-token", web::post().to(resend_token)),
    );
}

/// POST /api/v1/register
///
/// Stores a disabled account and mails the verification link.
///
/// ## Errors
/// - 400 Bad Request: invalid form or e-mail already registered
/// - 503 Service Unavailable: account stored but the mail could not be sent
pub async fn register(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let body = validated(body.into_inner(), &state)?;
    let application_url = state.application_url(&req);

    let user = state
        .registration
        .register(
            RegistrationRequest {
                email: body.email,
                password: body.password,
                password_repeat: body.password_repeat,
            },
            &application_url,
        )
        .await?;
    tracing::debug!(user_id = %user.id, "Registration request handled");

    let message = state.registration.registration_complete_message()?;
    Ok(HttpResponse::Created().json(MessageResponse::new(message)))
}

/// GET /api/v1/register/verifyEmail?token=...
///
/// ## Errors
/// - 404 Not Found: unknown token
/// - 409 Conflict: account already verified
/// - 410 Gone: link expired; the body carries the token for a resend
pub async fn verify_email(
    state: web::Data<AppState>,
    query: web::Query<TokenQuery>,
) -> ApiResult<HttpResponse> {
    state.users.validate_registration_token(&query.token).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(
        state.messages.get("registration.verified.message"),
    )))
}

/// POST /api/v1/register/resend-token?token=...
///
/// Refreshes the (possibly expired) token in place and mails it again.
pub async fn resend_token(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<TokenQuery>,
) -> ApiResult<HttpResponse> {
    let application_url = state.application_url(&req);
    state
        .registration
        .resend_token(&query.token, &application_url)
        .await?;

    let message = state.registration.resend_message()?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(message)))
}
