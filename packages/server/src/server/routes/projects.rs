//! Project listing and submission.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Query,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domains::enrichment::NewProject;
use crate::domains::ledger::LedgerMetadata;
use crate::domains::projects::{
    filter_by_category, sort_by_score, CategoryFilter, ProjectRecord, ScoreKey,
};
use crate::server::app::AxumAppState;
use crate::server::{ApiError, ApiResponse};

const DEFAULT_NAME: &str = "Unnamed Project";
const DEFAULT_DESCRIPTION: &str = "No description provided";

#[derive(Debug, Default, Deserialize)]
pub struct ProjectQuery {
    pub category: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AppliedFilters {
    pub category: CategoryFilter,
    #[serde(rename = "sortBy")]
    pub sort_by: ScoreKey,
}

#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub success: bool,
    pub data: Vec<ProjectRecord>,
    pub count: usize,
    pub filters: AppliedFilters,
}

#[derive(Debug, Serialize)]
pub struct SubmittedProject {
    pub project: ProjectRecord,
    pub ledger: LedgerMetadata,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// `GET /api/projects?category=<Category|All>&sortBy=<score key>`
///
/// Unknown category or sort key values are rejected with 400; absent or
/// empty ones take the defaults (`All`, `transparency`).
pub async fn list_projects_handler(
    Extension(state): Extension<AxumAppState>,
    query: Result<Query<ProjectQuery>, QueryRejection>,
) -> Result<Json<ProjectListResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let category = match non_blank(query.category.as_deref()) {
        Some(raw) => raw
            .parse::<CategoryFilter>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => CategoryFilter::All,
    };
    let sort_by = match non_blank(query.sort_by.as_deref()) {
        Some(raw) => raw
            .parse::<ScoreKey>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => ScoreKey::default(),
    };

    let projects = state.server_deps.aggregator.get_all_projects().await;
    let data = sort_by_score(&filter_by_category(&projects, category), sort_by);

    tracing::debug!(
        category = %category,
        sort_by = %sort_by,
        total = projects.len(),
        returned = data.len(),
        "Listing projects"
    );

    Ok(Json(ProjectListResponse {
        success: true,
        count: data.len(),
        data,
        filters: AppliedFilters { category, sort_by },
    }))
}

/// `POST /api/projects` with `{ name?, description?, url }`
///
/// Enriches the project, anchors it on the ledger and makes it visible in
/// the listing immediately.
pub async fn submit_project_handler(
    Extension(state): Extension<AxumAppState>,
    body: Result<Json<NewProject>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<SubmittedProject>>), ApiError> {
    let Json(input) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let deps = &state.server_deps;

    let url = non_blank(input.url.as_deref())
        .ok_or_else(|| ApiError::BadRequest("Project URL is required".to_string()))?
        .to_string();
    let name = non_blank(input.name.as_deref())
        .unwrap_or(DEFAULT_NAME)
        .to_string();
    let description = non_blank(input.description.as_deref())
        .unwrap_or(DEFAULT_DESCRIPTION)
        .to_string();

    let enrichment = deps
        .enricher
        .enrich(&NewProject {
            name: Some(name.clone()),
            description: Some(description.clone()),
            url: Some(url.clone()),
        })
        .await;

    let now = deps.clock.now();
    let project = ProjectRecord {
        id: now.timestamp_millis(),
        name,
        description,
        category: enrichment.category,
        scores: enrichment.scores,
        url,
        last_updated: now.date_naive(),
    };

    let ledger = deps
        .ledger
        .store_project(&project)
        .map_err(|e| ApiError::internal("Failed to store project", e))?;

    deps.aggregator.add_submission(project.clone()).await;

    tracing::info!(
        project_id = project.id,
        name = %project.name,
        category = %project.category,
        "Project submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(SubmittedProject { project, ledger })),
    ))
}
