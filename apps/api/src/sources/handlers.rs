use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::job::{JobPosting, JobType};
use crate::sources::{search_all, SearchQuery};
use crate::state::AppState;
use crate::validation::{bounded_count, require_keywords};

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub keywords: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub job_type: Option<JobType>,
    #[serde(default)]
    pub max_results: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub count: usize,
    pub postings: Vec<JobPosting>,
}

/// POST /api/v1/jobs/search
///
/// Deduplicated, unscored postings from every configured source.
pub async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    require_keywords("keywords", &request.keywords)?;
    let max = state.config.max_jobs_per_search;
    let max_results = bounded_count("max_results", request.max_results, max, max)?;

    let query = SearchQuery {
        keywords: request.keywords,
        location: request.location,
        job_type: request.job_type,
        max_results,
    };
    let postings = search_all(&state.sources, &query).await?;

    Ok(Json(SearchResponse {
        count: postings.len(),
        postings,
    }))
}
