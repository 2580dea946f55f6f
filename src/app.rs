//! Request pipeline and application state.
//!
//! `build_app` is shared by the binary and the integration tests, so both run
//! the exact same stage order.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::header,
    middleware::{Condition, ErrorHandlerResponse, ErrorHandlers, Logger},
    web, App, HttpResponse,
};
use serde_json::json;

use crate::auth::{AuthMiddleware, JwtSettings};
use crate::config::{Config, Environment};
use crate::db::TodoRepository;
use crate::error::AppError;
use crate::redirect::HttpsRedirect;
use crate::{docs, routes};

/// Everything the pipeline needs, assembled once by the composition root.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn TodoRepository>,
    pub jwt: Arc<JwtSettings>,
    pub environment: Environment,
    pub cors_allowed_origin: String,
    pub https_port: Option<u16>,
}

impl AppState {
    pub fn new(config: &Config, repo: Arc<dyn TodoRepository>) -> Result<Self, AppError> {
        Ok(Self {
            repo,
            jwt: Arc::new(JwtSettings::from_secret(&config.app_secret)?),
            environment: config.environment,
            cors_allowed_origin: config.cors_allowed_origin.clone(),
            https_port: config.https_port,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

/// Production replacement for 5xx bodies; the detail goes to the log instead.
///
/// Headers set further in (CORS in particular) are carried over, only the
/// body and its framing headers change.
fn hide_internal_error<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    if let Some(err) = res.response().error() {
        log::error!("{} {} failed: {}", res.request().method(), res.request().path(), err);
    }

    let (req, res) = res.into_parts();
    let mut builder = HttpResponse::build(res.status());
    for (name, value) in res.headers() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            builder.append_header((name.clone(), value.clone()));
        }
    }
    let res = builder.json(json!({ "error": "An internal server error occurred" }));

    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, res).map_into_right_body(),
    ))
}

/// Error-detail stage used outside development: every 5xx gets a generic body.
fn error_detail_policy<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().default_handler_server(hide_internal_error)
}

fn cors_policy(origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(origin)
        .allow_any_method()
        .allow_any_header()
}

/// Builds the application with its stages in order, outermost first:
///
/// 1. access log
/// 2. error-detail policy (generic 5xx bodies outside development)
/// 3. Swagger UI and OpenAPI document (development only)
/// 4. HTTPS redirect (when an HTTPS port is configured)
/// 5. CORS
/// 6. authentication, on the `/api` scope
/// 7. authorization, through the `AuthenticatedUser` extractor in handlers
/// 8. the route table
pub fn build_app(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let development = state.is_development();
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into());
    let path_config = web::PathConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into());

    // actix applies `wrap` inside-out: the last call is the outermost stage.
    App::new()
        .app_data(web::Data::from(Arc::clone(&state.repo)))
        .app_data(json_config)
        .app_data(path_config)
        .route("/health", web::get().to(routes::health::health))
        .service(
            web::scope("/api")
                .wrap(AuthMiddleware::new(Arc::clone(&state.jwt)))
                .configure(routes::config),
        )
        .configure(|cfg| {
            if development {
                cfg.service(docs::swagger_ui());
            }
        })
        .wrap(cors_policy(&state.cors_allowed_origin))
        .wrap(Condition::new(
            state.https_port.is_some(),
            HttpsRedirect::new(state.https_port.unwrap_or(443)),
        ))
        .wrap(Condition::new(!development, error_detail_policy()))
        .wrap(Logger::default())
}
