use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::job::JobPosting;
use crate::models::profile::CandidateProfile;
use crate::profile::analyzer::keyword_analysis;
use crate::state::AppState;
use crate::validation::require_text;
use crate::writing::cover_letter::{draft_cover_letter, CoverLetter, CoverLetterRequest};
use crate::writing::optimizer::{optimize_resume, OptimizationFocus, OptimizedResume};

#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    pub resume_text: String,
    pub posting: JobPosting,
    #[serde(default)]
    pub focus: OptimizationFocus,
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterBody {
    #[serde(flatten)]
    pub request: CoverLetterRequest,
    /// Profile from `/profile/analyze`; derived from the resume text when absent.
    #[serde(default)]
    pub profile: Option<CandidateProfile>,
}

/// POST /api/v1/resumes/optimize
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<OptimizedResume>, AppError> {
    require_text("resume_text", &request.resume_text)?;
    require_text("posting.title", &request.posting.title)?;

    let optimized = optimize_resume(
        state.llm.as_ref(),
        &request.resume_text,
        &request.posting,
        request.focus,
    )
    .await?;

    Ok(Json(optimized))
}

/// POST /api/v1/cover-letters
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(body): Json<CoverLetterBody>,
) -> Result<Json<CoverLetter>, AppError> {
    let request = body.request;
    require_text("candidate_name", &request.candidate_name)?;
    require_text("resume_text", &request.resume_text)?;
    if let Some(field) = request.posting.missing_field() {
        return Err(AppError::Validation(format!("posting.{field} cannot be empty")));
    }

    let profile = body
        .profile
        .unwrap_or_else(|| keyword_analysis(&request.resume_text).into_profile(None));

    let letter = draft_cover_letter(
        state.llm.as_ref(),
        &request,
        &profile,
        state.config.analyst_timeout,
    )
    .await;

    Ok(Json(letter))
}
