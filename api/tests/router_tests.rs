// Router tests that stop before any query reaches the database
// The pool connects lazily, so every case here must be rejected by
// authentication, validation or the update builder.

use api::{create_router, AppState};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use common::auth::JwtService;
use common::config::Settings;
use common::db::DbPool;
use common::models::UserClaims;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.database.url = "postgres://localhost:1/jobboard_test".to_string();
    settings.database.connect_timeout_seconds = 1;
    settings.auth.jwt_secret = "router-test-secret".to_string();
    settings
}

fn test_app() -> Router {
    let settings = test_settings();
    let db_pool = DbPool::new_lazy(&settings.database).expect("lazy pool");
    let metrics_handle = PrometheusBuilder::new().build_recorder().handle();
    create_router(AppState::new(db_pool, metrics_handle, settings))
}

fn token(is_admin: bool) -> String {
    let settings = test_settings();
    JwtService::new(&settings.auth.jwt_secret, 1)
        .encode_token("u1", is_admin)
        .expect("token")
}

fn request(method: Method, uri: &str, bearer: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(bearer) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", bearer));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = test_app().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_anonymous_create_job_is_unauthorized() {
    let body = json!({ "title": "t", "companyHandle": "c1" });
    let (status, body) = send(request(Method::POST, "/jobs", None, Some(body))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
    assert!(body["trace_id"].is_string());
}

#[tokio::test]
async fn test_non_admin_patch_is_unauthorized() {
    let token = token(false);
    let body = json!({ "title": "New" });
    let (status, _) = send(request(Method::PATCH, "/jobs/1", Some(&token), Some(body))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_token_is_treated_as_anonymous() {
    let (status, _) = send(request(Method::DELETE, "/jobs/1", Some("not-a-jwt"), None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_admin_token_is_unauthorized() {
    let settings = test_settings();
    let expired = JwtService::new(&settings.auth.jwt_secret, 1)
        .encode_claims(&UserClaims {
            sub: "admin".to_string(),
            username: "admin".to_string(),
            is_admin: true,
            exp: 1_000_000,
            iat: 0,
        })
        .expect("token");

    let (status, _) = send(request(Method::DELETE, "/companies/c1", Some(&expired), None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_create_job_with_missing_fields_is_rejected() {
    let token = token(true);
    let body = json!({ "salary": -5 });
    let (status, body) = send(request(Method::POST, "/jobs", Some(&token), Some(body))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    let details: Vec<String> =
        serde_json::from_value(body["details"].clone()).expect("violations");
    assert!(details.contains(&"instance requires property \"title\"".to_string()));
    assert!(details.contains(&"instance requires property \"companyHandle\"".to_string()));
    assert!(details
        .iter()
        .any(|v| v.starts_with("instance.salary must be greater than or equal to 0")));
}

#[tokio::test]
async fn test_admin_empty_job_patch_reports_no_data() {
    let token = token(true);
    let (status, body) =
        send(request(Method::PATCH, "/jobs/1", Some(&token), Some(json!({})))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No data supplied for update");
}

#[tokio::test]
async fn test_admin_empty_company_patch_reports_no_data() {
    let token = token(true);
    let (status, body) =
        send(request(Method::PATCH, "/companies/c1", Some(&token), Some(json!({})))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No data supplied for update");
}

#[tokio::test]
async fn test_job_patch_cannot_change_company() {
    let token = token(true);
    let body = json!({ "companyHandle": "c2" });
    let (status, body) = send(request(Method::PATCH, "/jobs/1", Some(&token), Some(body))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["details"][0],
        "instance is not allowed to have the additional property \"companyHandle\""
    );
}

#[tokio::test]
async fn test_company_patch_cannot_change_handle() {
    let token = token(true);
    let body = json!({ "handle": "c-new" });
    let (status, _) =
        send(request(Method::PATCH, "/companies/c1", Some(&token), Some(body))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_job_search_rejects_non_numeric_min_salary() {
    let (status, body) = send(request(Method::GET, "/jobs?minSalary=abc", None, None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0], "instance.minSalary is not of a type(s) integer");
}

#[tokio::test]
async fn test_job_search_rejects_unknown_filter() {
    let (status, _) = send(request(Method::GET, "/jobs?nope=1", None, None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_company_search_rejects_inverted_employee_range() {
    let (status, body) = send(request(
        Method::GET,
        "/companies?minEmployees=10&maxEmployees=5",
        None,
        None,
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_non_numeric_job_id_is_rejected() {
    let (status, body) = send(request(Method::GET, "/jobs/abc", None, None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_metrics_endpoint_renders() {
    let response = test_app()
        .oneshot(request(Method::GET, "/metrics", None, None))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
}
