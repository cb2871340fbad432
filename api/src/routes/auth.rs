//! Login

use actix_web::{web, HttpResponse};

use crate::dto::auth::{LoginRequest, LoginResponse};
use crate::handlers::ApiResult;
use crate::state::AppState;

use super::validated;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(login));
}

/// POST /api/v1/login
///
/// ## Errors
/// - 401 Unauthorized: unknown e-mail or wrong password
/// - 403 Forbidden: account not verified or blocked
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let body = validated(body.into_inner(), &state)?;
    let user = state
        .users
        .authenticate(body.email.trim(), &body.password)
        .await?;
    let access_token = state.jwt.issue(&user)?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt.expires_in(),
        user: user.into(),
    }))
}
