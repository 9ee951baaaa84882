#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test;
use serde_json::{json, Value};
use todo_api::config::JwtConfig;
use todo_api::AppState;
use uuid::Uuid;

pub const TEST_BCRYPT_COST: u32 = 4;

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        expiry: chrono::Duration::hours(1),
    }
}

/// Fresh state on an empty in-memory store.
pub fn test_state() -> AppState {
    AppState::in_memory(&jwt_config(), TEST_BCRYPT_COST)
}

// Helper struct to hold auth details
pub struct TestUser {
    pub id: Uuid,
    pub token: String,
}

pub async fn read_json(resp: ServiceResponse<impl MessageBody>) -> (u16, Value) {
    let status = resp.status().as_u16();
    let body = test::read_body(resp).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|_| {
            panic!("response was not JSON: {:?}", String::from_utf8_lossy(&body))
        })
    };
    (status, json)
}

pub async fn register_user(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    email: &str,
    password: &str,
) -> TestUser {
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "email": email,
            "name": "Test User",
            "password": password
        }))
        .to_request();
    let (status, body) = read_json(test::call_service(app, req).await).await;
    assert_eq!(status, 201, "Failed to register user. Body: {}", body);

    TestUser {
        id: body["data"]["user"]["id"]
            .as_str()
            .and_then(|id| Uuid::parse_str(id).ok())
            .expect("registration response should carry the user id"),
        token: body["data"]["token"]
            .as_str()
            .expect("registration response should carry a token")
            .to_string(),
    }
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
