//! Application factory
//!
//! Builds the Actix-web application from a prepared [`AppState`]. The same
//! factory backs the server binary and the HTTP tests.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::InternalError,
    http::StatusCode,
    middleware::ErrorHandlers,
    web, App, Error, HttpRequest, HttpResponse,
};
use gh_shared::{error_codes, CorsConfig, ErrorResponse};
use tracing_actix_web::TracingLogger;

use crate::handlers::localize_internal_error;
use crate::middleware::create_cors;
use crate::routes;
use crate::state::AppState;

/// Default JSON body limit
pub const DEFAULT_PAYLOAD_LIMIT: usize = 2 * 1024 * 1024;

/// Create and configure the application with all dependencies
pub fn create_app(
    state: web::Data<AppState>,
    cors: &CorsConfig,
    payload_limit: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let json_config = web::JsonConfig::default()
        .limit(payload_limit)
        .error_handler(|err, req| bad_request(err.to_string(), req, err));
    let query_config =
        web::QueryConfig::default().error_handler(|err, req| bad_request(err.to_string(), req, err));

    App::new()
        .app_data(state)
        .app_data(json_config)
        .app_data(query_config)
        // Order matters: the error handler sees responses before logging and CORS
        .wrap(ErrorHandlers::new().handler(StatusCode::INTERNAL_SERVER_ERROR, localize_internal_error))
        .wrap(TracingLogger::default())
        .wrap(create_cors(cors))
        .configure(routes::configure)
        .default_service(web::route().to(not_found))
}

/// Malformed JSON body or query string
fn bad_request<E>(detail: String, req: &HttpRequest, err: E) -> Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    let title = req
        .app_data::<web::Data<AppState>>()
        .map(|state| state.messages.get("error.validation.title"))
        .unwrap_or_default();
    let body = ErrorResponse::new(error_codes::BAD_REQUEST, title, detail);
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "",
        "The requested resource was not found",
    ))
}
