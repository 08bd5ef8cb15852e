use axum::extract::Extension;
use axum::Json;

use crate::domains::sources::SocialPost;
use crate::server::app::AxumAppState;
use crate::server::{ApiError, ApiResponse};

/// `GET /api/social/posts`
///
/// Live X search results when a bearer token is configured, the curated
/// posts otherwise.
pub async fn social_posts_handler(
    Extension(state): Extension<AxumAppState>,
) -> Result<Json<ApiResponse<Vec<SocialPost>>>, ApiError> {
    let posts = state
        .server_deps
        .social
        .recent_posts()
        .await
        .map_err(|e| ApiError::internal("Failed to fetch social posts", e))?;

    Ok(Json(ApiResponse::ok(posts)))
}
