//! Bearer token authentication.
//!
//! Login issues an HS256 JWT carrying the account id and roles. Protected
//! handlers take a [`CurrentUser`] or [`AdminUser`] argument; the extractor
//! verifies the token, reloads the account and re-checks that it is still
//! enabled and not blocked, so a block takes effect on the next request.

use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use chrono::Utc;
use futures_util::future::LocalBoxFuture;
use gh_core::{DomainError, User};
use gh_shared::JwtConfig;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::handlers::ApiError;
use crate::state::AppState;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub sub: String,
    /// Role names, e.g. `ROLE_ADMIN`
    pub roles: Vec<String>,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies access tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    expiry_seconds: i64,
}

impl JwtService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            expiry_seconds: config.access_token_expiry,
        }
    }

    /// Lifetime of issued tokens in seconds
    pub fn expires_in(&self) -> i64 {
        self.expiry_seconds
    }

    /// Issue an access token for `user`
    ///
    /// # Returns
    /// * `Err(DomainError::Internal)` - Signing failed
    pub fn issue(&self, user: &User) -> Result<String, DomainError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.to_string(),
            roles: user.roles.iter().map(|r| r.as_str().to_string()).collect(),
            iss: self.issuer.clone(),
            iat: now,
            exp: now + self.expiry_seconds,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to sign access token: {}", e)))
    }

    /// Decode and check signature, issuer and expiry
    pub fn verify(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);

        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                tracing::debug!(error = %e, "Rejected access token");
                None
            }
        }
    }
}

/// Extracts the token from an `Authorization: Bearer ...` header
fn extract_bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn app_state(req: &HttpRequest) -> Result<web::Data<AppState>, ApiError> {
    req.app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| ApiError(DomainError::internal("Application state is not registered")))
}

/// Resolve the account behind the request's bearer token
async fn authenticate(req: &HttpRequest, state: &AppState) -> Result<User, ApiError> {
    let messages = &state.messages;
    let claims = extract_bearer_token(req)
        .and_then(|token| state.jwt.verify(token))
        .ok_or_else(|| messages.unauthenticated())?;
    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| messages.unauthenticated())?;

    let user = match state.users.find_by_id(user_id).await {
        Ok(user) => user,
        Err(DomainError::ResourceNotFound { .. }) => return Err(messages.unauthenticated().into()),
        Err(e) => return Err(e.into()),
    };

    if !user.enabled {
        return Err(messages.account_disabled().into());
    }
    if user.blocked {
        tracing::warn!(user_id = %user.id, event = "blocked_request", "Blocked account used a valid token");
        return Err(messages.account_blocked().into());
    }
    Ok(user)
}

/// Logged-in account
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequest for CurrentUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let state = app_state(&req)?;
            authenticate(&req, &state).await.map(CurrentUser)
        })
    }
}

/// Logged-in account holding `ROLE_ADMIN`
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

impl FromRequest for AdminUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let state = app_state(&req)?;
            let user = authenticate(&req, &state).await?;
            if !user.is_admin() {
                tracing::warn!(user_id = %user.id, path = %req.path(), event = "forbidden", "Non-admin requested an admin resource");
                return Err(state.messages.forbidden().into());
            }
            Ok(AdminUser(user))
        })
    }
}

/// Account of the request if it carries a valid token, anonymous otherwise
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<User>);

impl FromRequest for OptionalUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            if extract_bearer_token(&req).is_none() {
                return Ok(OptionalUser(None));
            }
            let state = app_state(&req)?;
            Ok(OptionalUser(authenticate(&req, &state).await.ok()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test as actix_test;

    fn service() -> JwtService {
        JwtService::new(&JwtConfig::new("test-secret"))
    }

    #[test]
    fn test_extract_bearer_token() {
        let req = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_http_request();
        assert_eq!(extract_bearer_token(&req), Some("test_token_123"));

        let req_no_bearer = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_http_request();
        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_no_header = actix_test::TestRequest::default().to_http_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }

    #[test]
    fn test_issue_and_verify() {
        let jwt = service();
        let admin = User::new_admin("admin@admin.com", "hash");

        let token = jwt.issue(&admin).unwrap();
        let claims = jwt.verify(&token).unwrap();

        assert_eq!(claims.sub, admin.id.to_string());
        assert_eq!(claims.roles, vec!["ROLE_ADMIN".to_string()]);
        assert_eq!(claims.exp - claims.iat, jwt.expires_in());
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let user = User::new("donor@example.com", "hash");
        let token = JwtService::new(&JwtConfig::new("other-secret"))
            .issue(&user)
            .unwrap();

        assert!(service().verify(&token).is_none());
        assert!(service().verify("not.a.jwt").is_none());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let mut config = JwtConfig::new("test-secret");
        // Beyond the default validation leeway
        config.access_token_expiry = -120;
        let jwt = JwtService::new(&config);

        let token = jwt.issue(&User::new("donor@example.com", "hash")).unwrap();
        assert!(jwt.verify(&token).is_none());
    }
}
