//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use portfoliofy_api::{AppState, build_app};
use portfoliofy_core::config::AppConfig;
use portfoliofy_database::Stores;

/// Password that satisfies the default strength policy.
pub const PASSWORD: &str = "amber-Lantern-river-42!";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for subscribing to events
    pub state: AppState,
}

/// Response captured from the router
pub struct TestResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Parsed JSON body (`Value::Null` when empty)
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The `error` code of an error body.
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

/// A registered user with a bearer token.
pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub token: String,
}

impl TestApp {
    /// Create a new test application on a fresh in-memory store
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret".to_string();
        let state = AppState::new(config, &Stores::in_memory(), None);
        Self {
            router: build_app(state.clone()),
            state,
        }
    }

    /// Send a request and capture status and JSON body
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse { status, body }
    }

    /// Register `username` and log in
    pub async fn user(&self, username: &str) -> TestUser {
        let registered = self
            .request(
                "POST",
                "/api/auth/register",
                Some(serde_json::json!({
                    "username": username,
                    "email": format!("{username}@example.com"),
                    "password": PASSWORD,
                })),
                None,
            )
            .await;
        assert_eq!(registered.status, StatusCode::CREATED, "{}", registered.body);

        let login = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "username": username, "password": PASSWORD })),
                None,
            )
            .await;
        assert_eq!(login.status, StatusCode::OK);

        TestUser {
            id: login.data()["user"]["id"]
                .as_str()
                .and_then(|s| s.parse().ok())
                .expect("user id"),
            username: username.to_string(),
            token: login.data()["access_token"]
                .as_str()
                .expect("token")
                .to_string(),
        }
    }

    /// Create a portfolio for `owner`
    pub async fn portfolio(&self, owner: &TestUser, is_public: bool) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/portfolios",
                Some(serde_json::json!({
                    "title": format!("{}'s work", owner.username),
                    "description": "Selected projects",
                    "is_public": is_public,
                    "contact_email": format!("{}@example.com", owner.username),
                })),
                Some(&owner.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.data()["id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("portfolio id")
    }

    /// Ask for access to `portfolio_id` as `requester`, returning the request ID
    pub async fn request_access(&self, requester: &TestUser, portfolio_id: Uuid) -> Uuid {
        let response = self
            .request(
                "POST",
                &format!("/api/portfolios/{portfolio_id}/access-requests"),
                Some(serde_json::json!({ "message": "I'd like to see your work" })),
                Some(&requester.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.data()["id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("request id")
    }

    /// Unread count for `user`
    pub async fn unread(&self, user: &TestUser) -> u64 {
        let response = self
            .request("GET", "/api/notifications/unread-count", None, Some(&user.token))
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response.data()["count"].as_u64().expect("count")
    }
}
