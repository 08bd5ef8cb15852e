//! Test harness driving the HTTP router in-process.
//!
//! Every test builds its own router from a `TestDependencies`, so mock
//! providers, AI and clock are never shared between tests. Requests go
//! through `tower::ServiceExt::oneshot`; no socket is bound.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use desci_core::kernel::TestDependencies;
use desci_core::server::build_app;
use serde_json::Value;
use tower::ServiceExt;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Router plus the mocks it was built from.
///
/// `deps` shares its mock providers, AI and clock with the router, so tests
/// can advance time or count provider calls after sending requests.
pub struct TestHarness {
    pub router: Router,
    pub deps: TestDependencies,
}

impl TestHarness {
    pub fn new(deps: TestDependencies) -> Self {
        init_tracing();
        let router = build_app(deps.clone().into_deps(), &[]);
        Self { router, deps }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(get_request(uri)).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("valid request");
        self.send(request).await
    }

    /// POST with a raw body, for malformed-payload cases.
    pub async fn post_raw(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("valid request");
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        Self::send_to(self.router.clone(), request).await
    }

    /// Send through a router clone, for requests spawned onto another task.
    pub async fn send_to(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, json)
    }
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

/// Ids of `data` in response order.
pub fn ids(body: &Value) -> Vec<i64> {
    body["data"]
        .as_array()
        .expect("data is an array")
        .iter()
        .map(|p| p["id"].as_i64().expect("numeric id"))
        .collect()
}
