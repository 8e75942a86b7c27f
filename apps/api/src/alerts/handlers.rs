use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::alerts::digest::render_digest;
use crate::alerts::{check_alert, AlertDigest, JobAlert};
use crate::errors::AppError;
use crate::models::job::{JobLevel, JobType};
use crate::models::profile::CandidateProfile;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AlertCriteria {
    pub user_id: String,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub job_types: Vec<JobType>,
    #[serde(default)]
    pub levels: Vec<JobLevel>,
    #[serde(default)]
    pub min_salary: Option<u64>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct CheckAlertRequest {
    pub alert: AlertCriteria,
    pub profile: CandidateProfile,
}

#[derive(Debug, Serialize)]
pub struct CheckAlertResponse {
    pub alert: JobAlert,
    pub digest: AlertDigest,
    pub summary: String,
}

/// POST /api/v1/alerts/check
///
/// Runs the alert once and returns the ranked matches plus a text digest.
pub async fn handle_check_alert(
    State(state): State<AppState>,
    Json(request): Json<CheckAlertRequest>,
) -> Result<Json<CheckAlertResponse>, AppError> {
    let criteria = request.alert;
    let mut alert = JobAlert::new(criteria.user_id, criteria.keywords)?;
    alert.locations = criteria.locations;
    alert.job_types = criteria.job_types;
    alert.levels = criteria.levels;
    alert.min_salary = criteria.min_salary;
    alert.is_active = criteria.is_active;

    let digest = check_alert(
        &state.sources,
        &state.scorer,
        &alert,
        &request.profile,
        state.config.max_jobs_per_search,
        state.config.alert_max_results,
    )
    .await?;
    let summary = render_digest(&digest);

    Ok(Json(CheckAlertResponse {
        alert,
        digest,
        summary,
    }))
}
