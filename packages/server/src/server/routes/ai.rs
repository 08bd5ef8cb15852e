//! Language-model routes: enrichment preview and the research assistant.

use axum::extract::{rejection::JsonRejection, Extension};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domains::enrichment::NewProject;
use crate::domains::projects::{Category, ProjectScores};
use crate::kernel::ChatMessage;
use crate::server::app::AxumAppState;
use crate::server::{ApiError, ApiResponse};

#[derive(Debug, Deserialize)]
pub struct AiTestRequest {
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AiTestResult {
    pub summary: String,
    pub category: Category,
    pub scores: ProjectScores,
}

#[derive(Debug, Deserialize)]
pub struct AssistantRequest {
    pub question: Option<String>,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct AssistantAnswer {
    pub answer: String,
}

/// `POST /api/ai/test` with `{ description }`
///
/// Summary, category and scores for a description, computed concurrently.
pub async fn ai_test_handler(
    Extension(state): Extension<AxumAppState>,
    body: Result<Json<AiTestRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AiTestResult>>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let description = request
        .description
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Project description is required".to_string()))?;

    let enricher = &state.server_deps.enricher;
    let project = NewProject::describe(description.clone());
    let (summary, category, scores) = tokio::join!(
        enricher.summarize(&description),
        enricher.categorize(&description),
        enricher.score(&project),
    );

    Ok(Json(ApiResponse::ok(AiTestResult {
        summary,
        category,
        scores,
    })))
}

/// `POST /api/ai/assistant` with `{ question, history? }`
pub async fn assistant_handler(
    Extension(state): Extension<AxumAppState>,
    body: Result<Json<AssistantRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AssistantAnswer>>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let question = request
        .question
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Question is required".to_string()))?;

    let assistant = state
        .server_deps
        .assistant
        .as_ref()
        .ok_or_else(|| ApiError::Unavailable("Research assistant is not configured".to_string()))?;

    let answer = assistant
        .ask(&question, &request.history)
        .await
        .map_err(|e| ApiError::internal("Failed to process your question", e))?;

    Ok(Json(ApiResponse::ok(AssistantAnswer { answer })))
}
