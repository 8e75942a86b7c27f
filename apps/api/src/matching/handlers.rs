//! Axum route handlers for the matching API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::dedup::dedupe;
use crate::matching::ranking::{rank, rank_with_breakdown, RankedMatch};
use crate::matching::skill_gap::{recommend, SkillGapReport, TREND_CONTEXT_SIZE};
use crate::matching::trends::relevant_trends;
use crate::models::job::JobPosting;
use crate::models::profile::CandidateProfile;
use crate::profile::analyzer::analyze_resume;
use crate::sources::{search_all, SearchQuery};
use crate::state::AppState;
use crate::validation::{bounded_count, require_keywords, require_text};

/// Upper bound on `top_n` for trend filtering.
const MAX_TRENDS: usize = 50;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    pub profile: CandidateProfile,
    pub postings: Vec<JobPosting>,
    #[serde(default)]
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub backend: &'static str,
    pub count: usize,
    pub postings: Vec<JobPosting>,
}

#[derive(Debug, Deserialize)]
pub struct DedupeRequest {
    pub postings: Vec<JobPosting>,
}

#[derive(Debug, Serialize)]
pub struct DedupeResponse {
    pub count: usize,
    pub postings: Vec<JobPosting>,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub resume_text: String,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub backend: &'static str,
    pub profile: CandidateProfile,
    pub matches: Vec<RankedMatch>,
}

#[derive(Debug, Deserialize)]
pub struct TrendsRequest {
    pub skills: Vec<String>,
    /// Custom corpus; the built-in one when absent.
    #[serde(default)]
    pub trends: Option<Vec<String>>,
    #[serde(default)]
    pub top_n: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct TrendsResponse {
    pub trends: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SkillSuggestionsRequest {
    pub profile: CandidateProfile,
}

#[derive(Debug, Serialize)]
pub struct SkillSuggestionsResponse {
    pub backend: &'static str,
    pub report: SkillGapReport,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/rank
///
/// Scores caller-supplied postings against a profile and returns them best first.
pub async fn handle_rank(
    State(state): State<AppState>,
    Json(request): Json<RankRequest>,
) -> Result<Json<RankResponse>, AppError> {
    let max = state.config.max_jobs_per_search;
    let limit = bounded_count("limit", request.limit, max, max)?;
    if request.postings.len() > max {
        return Err(AppError::Validation(format!(
            "postings must contain at most {max} entries"
        )));
    }

    let postings = rank(&state.scorer, &request.profile, request.postings, limit).await;

    Ok(Json(RankResponse {
        backend: state.scorer.backend(),
        count: postings.len(),
        postings,
    }))
}

/// POST /api/v1/jobs/dedupe
pub async fn handle_dedupe(Json(request): Json<DedupeRequest>) -> Json<DedupeResponse> {
    let postings = dedupe(request.postings);
    Json(DedupeResponse {
        count: postings.len(),
        postings,
    })
}

/// POST /api/v1/jobs/match
///
/// Full pipeline: resume analysis → profile → search every source → rank with
/// per-posting score breakdowns.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    require_text("resume_text", &request.resume_text)?;
    require_keywords("keywords", &request.keywords)?;
    let max = state.config.max_jobs_per_search;
    let limit = bounded_count("limit", request.limit, max, max)?;

    let location = request
        .location
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| state.config.default_location.clone());

    let analysis = analyze_resume(
        state.llm.as_ref(),
        &request.resume_text,
        state.config.analyst_timeout,
    )
    .await;
    let profile = analysis.into_profile(Some(&location));

    let query = SearchQuery::new(request.keywords, Some(location), max);
    let postings = search_all(&state.sources, &query).await?;
    let matches = rank_with_breakdown(&state.scorer, &profile, postings, limit).await;

    Ok(Json(MatchResponse {
        backend: state.scorer.backend(),
        profile,
        matches,
    }))
}

/// POST /api/v1/trends
pub async fn handle_trends(
    State(state): State<AppState>,
    Json(request): Json<TrendsRequest>,
) -> Result<Json<TrendsResponse>, AppError> {
    let top_n = bounded_count("top_n", request.top_n, TREND_CONTEXT_SIZE, MAX_TRENDS)?;

    let trends = match &request.trends {
        Some(custom) => relevant_trends(custom.as_slice(), request.skills.as_slice(), top_n),
        None => relevant_trends(state.trends.as_slice(), request.skills.as_slice(), top_n),
    };

    Ok(Json(TrendsResponse { trends }))
}

/// POST /api/v1/skills/suggestions
///
/// Never fails once the request parses: analyst trouble yields the fallback report.
pub async fn handle_skill_suggestions(
    State(state): State<AppState>,
    Json(request): Json<SkillSuggestionsRequest>,
) -> Json<SkillSuggestionsResponse> {
    let report = recommend(
        state.analyst.as_ref(),
        &request.profile,
        &state.trends,
        state.config.analyst_timeout,
    )
    .await;

    Json(SkillSuggestionsResponse {
        backend: state.analyst.backend(),
        report,
    })
}
