//! Password reset through an e-mailed link

use actix_web::{web, HttpRequest, HttpResponse};

use crate::dto::auth::{NewPasswordRequest, PasswordResetRequest, ResetTokenResponse};
use crate::dto::{MessageResponse, TokenQuery};
use crate::handlers::ApiResult;
use crate::state::AppState;

use super::validated;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reset-password")
            .route("", web::post().to(request_reset))
            .route("/verifyEmail", web::get().to(verify_reset_token))
            .route("/new", web::post().to(new_password)),
    );
}

/// POST /api/v1/reset-password
///
/// The e-mail must belong to an account; unknown addresses are reported as
/// a field error.
pub async fn request_reset(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<PasswordResetRequest>,
) -> ApiResult<HttpResponse> {
    let body = validated(body.into_inner(), &state)?;
    let application_url = state.application_url(&req);

    state
        .users
        .request_password_reset(body.email.trim(), &application_url)
        .await?;

    let minutes = state.messages.token_validity_minutes()?.to_string();
    Ok(HttpResponse::Ok().json(MessageResponse::new(
        state.messages.format("password.reset.sent.message", &[&minutes]),
    )))
}

/// GET /api/v1/reset-password/verifyEmail?token=...
///
/// Checks the link without consuming it; the token is echoed back for the
/// new-password form.
pub async fn verify_reset_token(
    state: web::Data<AppState>,
    query: web::Query<TokenQuery>,
) -> ApiResult<HttpResponse> {
    let user = state.users.validate_password_reset_token(&query.token).await?;
    Ok(HttpResponse::Ok().json(ResetTokenResponse {
        token: query.into_inner().token,
        email: user.email,
    }))
}

/// POST /api/v1/reset-password/new
pub async fn new_password(
    state: web::Data<AppState>,
    body: web::Json<NewPasswordRequest>,
) -> ApiResult<HttpResponse> {
    let body = validated(body.into_inner(), &state)?;
    state
        .users
        .change_password_with_token(&body.token, &body.password)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(
        state.messages.get("password.changed.message"),
    )))
}
