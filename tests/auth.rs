mod common;

use actix_web::http::{header, StatusCode};
use actix_web::test;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use pretty_assertions::assert_eq;
use serde_json::json;
use todo_api::auth::AUDIENCE;
use todo_api::build_app;

use common::{bearer, state, SECRET};

fn signed(claims: serde_json::Value, secret: &str) -> String {
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap();
    format!("Bearer {}", token)
}

fn hours_from_now(hours: i64) -> i64 {
    (Utc::now() + Duration::hours(hours)).timestamp()
}

/// Sends `GET /api/todo` with the given Authorization header and returns the
/// status and JSON body.
async fn list_with(auth: Option<String>) -> (StatusCode, serde_json::Value) {
    let app = test::init_service(build_app(state())).await;

    let mut req = test::TestRequest::get().uri("/api/todo");
    if let Some(auth) = auth {
        req = req.insert_header((header::AUTHORIZATION, auth));
    }
    let resp = test::call_service(&app, req.to_request()).await;
    let status = resp.status();
    let body = test::read_body_json(resp).await;
    (status, body)
}

#[test_log::test(actix_rt::test)]
async fn test_missing_token_is_unauthorized() {
    let (status, body) = list_with(None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing token");
}

#[actix_rt::test]
async fn test_wrong_scheme_is_unauthorized() {
    let (status, _) = list_with(Some("Basic YWxpY2U6c2VjcmV0".to_string())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = list_with(Some("Bearer ".to_string())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_malformed_token_is_unauthorized() {
    let (status, body) = list_with(Some("Bearer not.a.jwt".to_string())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid token"));
}

#[actix_rt::test]
async fn test_expired_token_is_unauthorized() {
    let auth = signed(
        json!({ "unique_name": "alice", "aud": AUDIENCE, "exp": hours_from_now(-2) }),
        SECRET,
    );
    let (status, _) = list_with(Some(auth)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_foreign_key_or_audience_is_unauthorized() {
    let other_key = signed(
        json!({ "unique_name": "alice", "aud": AUDIENCE, "exp": hours_from_now(1) }),
        "some-other-secret-entirely",
    );
    let (status, _) = list_with(Some(other_key)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let other_audience = signed(
        json!({ "unique_name": "alice", "aud": "BillingApi", "exp": hours_from_now(1) }),
        SECRET,
    );
    let (status, _) = list_with(Some(other_audience)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_token_without_principal_name_is_rejected() {
    // Signature, lifetime and audience are all fine; only the name is missing.
    let empty_name = signed(
        json!({ "unique_name": "", "aud": AUDIENCE, "exp": hours_from_now(1) }),
        SECRET,
    );
    let (status, body) = list_with(Some(empty_name)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized. Please re-login.");

    let no_name = signed(
        json!({ "sub": "42", "aud": AUDIENCE, "exp": hours_from_now(1) }),
        SECRET,
    );
    let (status, body) = list_with(Some(no_name)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized. Please re-login.");
}

#[actix_rt::test]
async fn test_valid_token_is_accepted() {
    let state = state();
    let auth = bearer(&state, "alice");
    let app = test::init_service(build_app(state)).await;

    let req = test::TestRequest::get()
        .uri("/api/todo")
        .insert_header((header::AUTHORIZATION, auth))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_bearer_scheme_is_case_insensitive() {
    let state = state();
    let token = state.jwt.issue_token("alice", Duration::hours(1)).unwrap();

    for scheme in ["bearer", "BEARER"] {
        let (status, _) = list_with(Some(format!("{} {}", scheme, token))).await;
        assert_eq!(status, StatusCode::OK, "scheme {}", scheme);
    }
}

#[actix_rt::test]
async fn test_every_todo_route_requires_a_token() {
    let app = test::init_service(build_app(state())).await;

    let requests = vec![
        test::TestRequest::get().uri("/api/todo"),
        test::TestRequest::post()
            .uri("/api/todo")
            .set_json(json!({ "title": "sneaky" })),
        test::TestRequest::get().uri("/api/todo/1"),
        test::TestRequest::put()
            .uri("/api/todo/1")
            .set_json(json!({ "title": "sneaky" })),
        test::TestRequest::delete().uri("/api/todo/1"),
    ];

    for req in requests {
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}

#[actix_rt::test]
async fn test_health_needs_no_token() {
    let app = test::init_service(build_app(state())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
