use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::server::app::AxumAppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    cache: CacheHealth,
    /// Projects submitted since startup
    submissions: usize,
    /// Projects anchored on the ledger since startup
    anchored: usize,
}

#[derive(Debug, Serialize)]
pub struct CacheHealth {
    populated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    age_secs: Option<i64>,
    count: usize,
}

/// Health check endpoint
///
/// Always 200 while the process serves requests; reports the state of the
/// project cache without triggering a refresh.
pub async fn health_handler(Extension(state): Extension<AxumAppState>) -> Json<HealthResponse> {
    let deps = &state.server_deps;
    let project_cache = deps.aggregator.cache();
    let entry = project_cache.get();

    let cache = CacheHealth {
        populated: entry.is_some(),
        age_secs: project_cache.age(deps.clock.now()).map(|age| age.num_seconds()),
        count: entry.map(|e| e.projects.len()).unwrap_or_default(),
    };

    Json(HealthResponse {
        status: "ok",
        cache,
        submissions: deps.aggregator.submissions().count(),
        anchored: deps.ledger.anchored_count(),
    })
}
