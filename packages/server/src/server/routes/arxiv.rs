use arxiv_client::Paper;
use axum::extract::{rejection::QueryRejection, Extension, Query};
use axum::Json;
use serde::Deserialize;

use crate::domains::sources::{desci_feed_query, user_query};
use crate::server::app::AxumAppState;
use crate::server::{ApiError, ApiResponse};

#[derive(Debug, Default, Deserialize)]
pub struct ArxivQuery {
    pub q: Option<String>,
}

/// `GET /api/arxiv?q=<query>`
///
/// Without `q`, the newest DeSci papers; with it, a relevance-ranked search.
pub async fn arxiv_papers_handler(
    Extension(state): Extension<AxumAppState>,
    query: Result<Query<ArxivQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Paper>>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let search = match query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => user_query(q),
        None => desci_feed_query(),
    };

    let papers = state
        .server_deps
        .arxiv
        .search(&search)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch arXiv papers", e))?;

    Ok(Json(ApiResponse::ok(papers)))
}
