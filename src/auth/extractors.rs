use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;

/// The caller behind a request that passed `AuthMiddleware`.
///
/// Taking this as a handler argument is what makes a route require
/// authorization: without validated claims in the request extensions the
/// extractor fails with `AppError::Unauthorized`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub name: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let name = req
            .extensions()
            .get::<Claims>()
            .and_then(|claims| claims.principal_name().map(str::to_owned));

        match name {
            Some(name) => ready(Ok(AuthenticatedUser { name })),
            None => ready(Err(AppError::Unauthorized(
                "No authenticated user for this request".to_string(),
            )
            .into())),
        }
    }
}
