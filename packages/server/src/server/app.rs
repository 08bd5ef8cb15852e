//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    BoxError, Router,
};
use tower::timeout::{error::Elapsed, TimeoutLayer};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::ApiError;
use crate::server::routes::{
    ai_test_handler, arxiv_papers_handler, assistant_handler, health_handler,
    list_projects_handler, social_posts_handler, submit_project_handler,
};

/// Upper bound on a whole request, including a cold-cache fan-out.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub server_deps: Arc<ServerDeps>,
}

impl AxumAppState {
    pub fn new(server_deps: ServerDeps) -> Self {
        Self {
            server_deps: Arc::new(server_deps),
        }
    }
}

/// CORS: any origin when `allowed_origins` is empty, otherwise exactly the
/// listed ones. Unparseable entries are skipped with a warning.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

/// Map middleware errors into the JSON error envelope.
async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<Elapsed>() {
        ApiError::Timeout("Request timed out".to_string())
    } else {
        ApiError::internal("Unhandled internal error", anyhow::Error::msg(err))
    }
}

/// Fail requests running longer than `timeout` with a 408 in the usual
/// `{success: false, error}` shape.
fn with_request_timeout(router: Router, timeout: Duration) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_middleware_error))
            .layer(TimeoutLayer::new(timeout)),
    )
}

/// Build the Axum application router
pub fn build_app(server_deps: ServerDeps, allowed_origins: &[String]) -> Router {
    let app_state = AxumAppState::new(server_deps);

    let router = Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/projects",
            get(list_projects_handler).post(submit_project_handler),
        )
        .route("/api/arxiv", get(arxiv_papers_handler))
        .route("/api/social/posts", get(social_posts_handler))
        .route("/api/ai/test", post(ai_test_handler))
        .route("/api/ai/assistant", post(assistant_handler))
        .layer(Extension(app_state));

    // Middleware layers (applied in reverse order - last added runs first)
    with_request_timeout(router, REQUEST_TIMEOUT)
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
