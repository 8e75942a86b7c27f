use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::profile::CandidateProfile;
use crate::profile::analyzer::{analyze_resume, ResumeAnalysis};
use crate::profile::completeness::{check_completeness, CompletenessReport};
use crate::state::AppState;
use crate::validation::require_text;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    #[serde(default)]
    pub preferred_location: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: ResumeAnalysis,
    pub profile: CandidateProfile,
    pub completeness: CompletenessReport,
}

/// POST /api/v1/profile/analyze
///
/// Analyses resume text and returns the derived candidate profile. The profile
/// can be sent back as-is to the rank, suggestion and alert endpoints.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    require_text("resume_text", &request.resume_text)?;

    let location = request
        .preferred_location
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| state.config.default_location.clone());

    let analysis = analyze_resume(
        state.llm.as_ref(),
        &request.resume_text,
        state.config.analyst_timeout,
    )
    .await;
    let profile = analysis.clone().into_profile(Some(&location));
    let completeness = check_completeness(&request.resume_text);

    Ok(Json(AnalyzeResponse {
        analysis,
        profile,
        completeness,
    }))
}
