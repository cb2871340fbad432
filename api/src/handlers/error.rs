//! Conversion of domain errors into JSON error responses

use actix_web::{
    body::BoxBody,
    dev::ServiceResponse,
    http::StatusCode,
    middleware::ErrorHandlerResponse,
    web, HttpResponse, ResponseError,
};
use gh_core::{AuthError, DomainError, Messages, TokenError};
use gh_shared::{error_codes, ErrorResponse, ValidationErrors};

use crate::state::AppState;

/// Error returned by every handler
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub DomainError);

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Stable machine-readable code of the error kind
    pub fn code(&self) -> &'static str {
        match &self.0 {
            DomainError::ResourceNotFound { .. } => error_codes::NOT_FOUND,
            DomainError::EntityDeletion { .. } => error_codes::ENTITY_DELETION,
            DomainError::Mail { .. } => error_codes::MAIL_ERROR,
            DomainError::Validation { .. } => error_codes::VALIDATION_ERROR,
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            DomainError::Token(e) => match e {
                TokenError::NotFound { .. } => error_codes::TOKEN_NOT_FOUND,
                TokenError::AlreadyExpired { .. } => error_codes::TOKEN_EXPIRED,
                TokenError::AlreadyConsumed { .. } => error_codes::TOKEN_CONSUMED,
            },
            DomainError::Auth(e) => match e {
                AuthError::BadCredentials { .. } => error_codes::BAD_CREDENTIALS,
                AuthError::AccountDisabled { .. } => error_codes::ACCOUNT_DISABLED,
                AuthError::AccountBlocked { .. } => error_codes::ACCOUNT_BLOCKED,
                AuthError::Unauthenticated { .. } => error_codes::UNAUTHORIZED,
                AuthError::Forbidden { .. } => error_codes::FORBIDDEN,
            },
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            DomainError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::EntityDeletion { .. } => StatusCode::CONFLICT,
            DomainError::Mail { .. } => StatusCode::SERVICE_UNAVAILABLE,
            DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
            DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            DomainError::Token(e) => match e {
                TokenError::NotFound { .. } => StatusCode::NOT_FOUND,
                TokenError::AlreadyExpired { .. } => StatusCode::GONE,
                TokenError::AlreadyConsumed { .. } => StatusCode::CONFLICT,
            },
            DomainError::Auth(e) => match e {
                AuthError::BadCredentials { .. } | AuthError::Unauthenticated { .. } => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::AccountDisabled { .. }
                | AuthError::AccountBlocked { .. }
                | AuthError::Forbidden { .. } => StatusCode::FORBIDDEN,
            },
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let status = self.status_code();

        let body = match &self.0 {
            DomainError::Internal { message } => {
                // Details stay in the log; localized text is filled in by `localize_internal_error`
                tracing::error!(error = %message, event = "internal_error", "Request failed");
                ErrorResponse::new(self.code(), "", "")
            }
            DomainError::Token(TokenError::AlreadyExpired { token, .. }) => {
                ErrorResponse::new(self.code(), self.0.title(), self.0.message())
                    .add_detail("token", token)
            }
            DomainError::Validation { errors, .. } => {
                ErrorResponse::new(self.code(), self.0.title(), self.0.message())
                    .add_detail("fields", errors.to_field_errors())
            }
            other => {
                tracing::debug!(code = self.code(), error = %other, "Request rejected");
                ErrorResponse::new(self.code(), other.title(), other.message())
            }
        };

        HttpResponse::build(status).json(body)
    }
}

/// Turn `validator` failures into a localized validation error.
///
/// Rule codes are message keys, so every field message comes from the catalog.
pub fn validation_error(errors: validator::ValidationErrors, messages: &Messages) -> ApiError {
    let mut fields: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, failures)| {
            failures
                .iter()
                .map(move |failure| (field.to_string(), failure.code.to_string()))
        })
        .collect();
    fields.sort();

    let mut collected = ValidationErrors::new();
    for (field, key) in fields {
        collected.add_error(field, messages.get(&key), key);
    }
    ApiError(messages.validation(collected))
}

/// Replace the body of 500 responses with the localized generic message
pub fn localize_internal_error<B>(
    res: ServiceResponse<B>,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let (req, res) = res.into_parts();

    let messages = match req.app_data::<web::Data<AppState>>() {
        Some(state) => state.messages.clone(),
        None => {
            let res = ServiceResponse::new(req, res).map_into_left_body();
            return Ok(ErrorHandlerResponse::Response(res));
        }
    };

    let body = ErrorResponse::new(
        error_codes::INTERNAL_ERROR,
        messages.get("error.internal.title"),
        messages.get("error.internal.message"),
    );
    let res = HttpResponse::build(res.status()).json(body);
    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, res).map_into_right_body(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    fn expired() -> ApiError {
        ApiError(DomainError::Token(TokenError::AlreadyExpired {
            title: "Link expired".to_string(),
            message: "Request a new link".to_string(),
            token: "abc".to_string(),
        }))
    }

    #[actix_web::test]
    async fn test_expired_token_response_carries_token() {
        let error = expired();
        assert_eq!(error.status_code(), StatusCode::GONE);

        let body = to_bytes(error.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], error_codes::TOKEN_EXPIRED);
        assert_eq!(json["title"], "Link expired");
        assert_eq!(json["details"]["token"], "abc");
    }

    #[actix_web::test]
    async fn test_validation_response_lists_fields() {
        let error = ApiError(DomainError::Validation {
            title: "Invalid data".to_string(),
            message: "Fix it".to_string(),
            errors: ValidationErrors::single("email", "taken", "validation.email.taken"),
        });
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);

        let body = to_bytes(error.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["details"]["fields"]["email"][0], "taken");
    }

    #[actix_web::test]
    async fn test_internal_error_hides_details() {
        let error = ApiError(DomainError::internal("connection refused"));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(error.error_response().into_body()).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(!text.contains("connection refused"));
    }

    #[test]
    fn test_auth_failures_keep_their_reason() {
        let blocked = ApiError(DomainError::Auth(AuthError::AccountBlocked {
            title: "t".to_string(),
            message: "m".to_string(),
        }));
        assert_eq!(blocked.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(blocked.code(), error_codes::ACCOUNT_BLOCKED);

        let bad = ApiError(DomainError::Auth(AuthError::BadCredentials {
            title: "t".to_string(),
            message: "m".to_string(),
        }));
        assert_eq!(bad.status_code(), StatusCode::UNAUTHORIZED);
    }
}
