//! Match analysis capability: the narrow seam between the scoring core and
//! whatever produces qualitative judgements.
//!
//! Default: `KeywordAnalyst` (pure-Rust, deterministic, no network).
//! With an API key: `LlmAnalyst` (semantic judgements via Claude).
//!
//! `AppState` holds an `Arc<dyn MatchAnalyst>`, chosen at startup from config.
//! Callers must treat every method as unreliable and bound it with [`bounded`].

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::llm_client::prompts::{excerpt, DESCRIPTION_EXCERPT_CHARS, JSON_ONLY_SYSTEM};
use crate::llm_client::{CallOptions, LlmClient, LlmError};
use crate::matching::prompts::{
    COVERAGE_PROMPT_TEMPLATE, FIT_PROMPT_TEMPLATE, SKILL_GAP_PROMPT_TEMPLATE,
};
use crate::matching::skill_gap::{LearningResource, PriorityLevel, SkillGapReport};
use crate::models::job::JobPosting;
use crate::models::profile::CandidateProfile;
use crate::profile::vocabulary::{certification_for, mentions, TECHNICAL_SKILLS};

#[derive(Debug, Error)]
pub enum AnalystError {
    #[error("analysis backend unavailable: {0}")]
    Unavailable(String),

    #[error("analysis call timed out after {0:?}")]
    Timeout(Duration),

    #[error("malformed analysis response: {0}")]
    Malformed(String),

    #[error("sub-score {0} is outside [0, 100]")]
    OutOfRange(f64),
}

impl From<LlmError> for AnalystError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Parse(e) => AnalystError::Malformed(e.to_string()),
            LlmError::EmptyContent => AnalystError::Malformed("empty content".to_string()),
            other => AnalystError::Unavailable(other.to_string()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// One method per use case so each can be stubbed independently in tests.
#[async_trait]
pub trait MatchAnalyst: Send + Sync {
    /// "keyword" or "llm", reported back to clients.
    fn backend(&self) -> &'static str;

    /// Share of the posting's requirements covered by the profile, in `[0, 100]`.
    async fn score_coverage(
        &self,
        profile: &CandidateProfile,
        posting: &JobPosting,
    ) -> Result<f64, AnalystError>;

    /// Holistic fit (location, job type, ...) in `[0, 100]`.
    async fn judge_fit(
        &self,
        profile: &CandidateProfile,
        posting: &JobPosting,
    ) -> Result<f64, AnalystError>;

    /// Skill-gap recommendations given trends already filtered for this profile.
    async fn generate_report(
        &self,
        profile: &CandidateProfile,
        relevant_trends: &[String],
    ) -> Result<SkillGapReport, AnalystError>;
}

/// Runs an analyst call under `limit`; elapsing counts as a failed call.
pub async fn bounded<T, F>(limit: Duration, call: F) -> Result<T, AnalystError>
where
    F: Future<Output = Result<T, AnalystError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| AnalystError::Timeout(limit))?
}

/// Rejects NaN and values outside `[0, 100]`.
pub fn validate_sub_score(value: f64) -> Result<f64, AnalystError> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(AnalystError::OutOfRange(value))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordAnalyst: default deterministic implementation
// ────────────────────────────────────────────────────────────────────────────

/// Keyword-based analyst. Fast, deterministic, no LLM call.
///
/// - coverage: share of requirements mentioning at least one profile skill
///   (neutral 50 when the posting lists none)
/// - fit: 0.8 × location compatibility + 0.2 × salary transparency
/// - report: vocabulary skills named by the trends that the profile lacks
pub struct KeywordAnalyst;

const LOCATION_WEIGHT: f64 = 0.8;
const TRANSPARENCY_WEIGHT: f64 = 0.2;

#[async_trait]
impl MatchAnalyst for KeywordAnalyst {
    fn backend(&self) -> &'static str {
        "keyword"
    }

    async fn score_coverage(
        &self,
        profile: &CandidateProfile,
        posting: &JobPosting,
    ) -> Result<f64, AnalystError> {
        Ok(keyword_coverage(profile, posting))
    }

    async fn judge_fit(
        &self,
        profile: &CandidateProfile,
        posting: &JobPosting,
    ) -> Result<f64, AnalystError> {
        let location = location_compatibility(profile.preferred_location(), posting);
        let transparency = if posting.salary_range.is_some() { 100.0 } else { 60.0 };
        Ok(LOCATION_WEIGHT * location + TRANSPARENCY_WEIGHT * transparency)
    }

    async fn generate_report(
        &self,
        profile: &CandidateProfile,
        relevant_trends: &[String],
    ) -> Result<SkillGapReport, AnalystError> {
        Ok(keyword_report(profile, relevant_trends))
    }
}

fn keyword_coverage(profile: &CandidateProfile, posting: &JobPosting) -> f64 {
    if posting.requirements.is_empty() {
        return 50.0;
    }
    let covered = posting
        .requirements
        .iter()
        .filter(|req| profile.skills().iter().any(|skill| mentions(req, skill)))
        .count();
    covered as f64 / posting.requirements.len() as f64 * 100.0
}

/// 100 for remote or same city, 70 for same state or no preference, 20 otherwise.
fn location_compatibility(preferred: Option<&str>, posting: &JobPosting) -> f64 {
    if posting.is_remote() {
        return 100.0;
    }
    let Some(preferred) = preferred else {
        return 70.0;
    };

    let (pref_city, pref_state) = split_location(preferred);
    let (city, state) = split_location(&posting.location);

    if !pref_city.is_empty() && pref_city == city {
        100.0
    } else if !pref_state.is_empty() && pref_state == state {
        70.0
    } else {
        20.0
    }
}

/// "Dallas, TX" → ("dallas", "tx").
fn split_location(location: &str) -> (String, String) {
    let mut parts = location.split(',').map(|p| p.trim().to_lowercase());
    let city = parts.next().unwrap_or_default();
    let state = parts.next().unwrap_or_default();
    (city, state)
}

fn keyword_report(profile: &CandidateProfile, relevant_trends: &[String]) -> SkillGapReport {
    let mut skills_to_add: Vec<String> = Vec::new();
    let mut skills_to_improve: Vec<String> = Vec::new();

    for trend in relevant_trends {
        for skill in TECHNICAL_SKILLS {
            if !mentions(trend, skill) {
                continue;
            }
            let bucket = if profile.has_skill(skill) {
                &mut skills_to_improve
            } else {
                &mut skills_to_add
            };
            if !bucket.iter().any(|s| s == skill) {
                bucket.push(skill.to_string());
            }
        }
    }

    let certifications_to_consider: Vec<String> = skills_to_improve
        .iter()
        .chain(skills_to_add.iter())
        .filter_map(|s| certification_for(s))
        .map(str::to_string)
        .collect();

    let learning_resources = skills_to_add
        .iter()
        .map(|skill| LearningResource {
            skill: skill.clone(),
            resources: vec![
                format!("Official {skill} documentation and getting-started guide"),
                format!("A small portfolio project built with {skill}"),
            ],
        })
        .collect();

    let priority_level = match skills_to_add.len() {
        0 => PriorityLevel::Low,
        1 | 2 => PriorityLevel::Medium,
        _ => PriorityLevel::High,
    };

    let explanation = if relevant_trends.is_empty() {
        "No current market trends mention your skills; no changes recommended.".to_string()
    } else if skills_to_add.is_empty() {
        format!(
            "Your skills already appear in {} current market trend(s). Deepen them to stay competitive.",
            relevant_trends.len()
        )
    } else {
        format!(
            "Trends around your current skills also call for: {}.",
            skills_to_add.join(", ")
        )
    };

    SkillGapReport {
        skills_to_add,
        skills_to_improve,
        certifications_to_consider,
        learning_resources,
        priority_level,
        explanation,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmAnalyst: semantic judgements via Claude
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmAnalyst(pub LlmClient);

#[derive(Debug, Deserialize)]
struct CoverageResponse {
    coverage: f64,
}

#[derive(Debug, Deserialize)]
struct FitResponse {
    fit: f64,
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, AnalystError> {
    serde_json::to_string(value).map_err(|e| AnalystError::Malformed(e.to_string()))
}

#[async_trait]
impl MatchAnalyst for LlmAnalyst {
    fn backend(&self) -> &'static str {
        "llm"
    }

    async fn score_coverage(
        &self,
        profile: &CandidateProfile,
        posting: &JobPosting,
    ) -> Result<f64, AnalystError> {
        let prompt = COVERAGE_PROMPT_TEMPLATE
            .replace("{skills_json}", &to_json(profile.skills())?)
            .replace("{title}", &posting.title)
            .replace("{requirements_json}", &to_json(&posting.requirements)?);

        let response: CoverageResponse = self
            .0
            .call_json(&prompt, JSON_ONLY_SYSTEM, CallOptions::SCORING)
            .await?;
        validate_sub_score(response.coverage)
    }

    async fn judge_fit(
        &self,
        profile: &CandidateProfile,
        posting: &JobPosting,
    ) -> Result<f64, AnalystError> {
        let job_type = to_json(&posting.job_type)?;
        let prompt = FIT_PROMPT_TEMPLATE
            .replace("{candidate_level}", profile.experience_level().as_str())
            .replace("{focus_json}", &to_json(profile.career_focus())?)
            .replace(
                "{preferred_location}",
                profile.preferred_location().unwrap_or("no preference"),
            )
            .replace("{title}", &posting.title)
            .replace("{company}", &posting.company)
            .replace("{location}", &posting.location)
            .replace("{job_type}", job_type.trim_matches('"'))
            .replace("{posting_level}", posting.level.as_str())
            .replace(
                "{salary_range}",
                posting.salary_range.as_deref().unwrap_or("not disclosed"),
            )
            .replace(
                "{description}",
                &excerpt(&posting.description, DESCRIPTION_EXCERPT_CHARS),
            );

        let response: FitResponse = self
            .0
            .call_json(&prompt, JSON_ONLY_SYSTEM, CallOptions::SCORING)
            .await?;
        validate_sub_score(response.fit)
    }

    async fn generate_report(
        &self,
        profile: &CandidateProfile,
        relevant_trends: &[String],
    ) -> Result<SkillGapReport, AnalystError> {
        let prompt = SKILL_GAP_PROMPT_TEMPLATE
            .replace("{skills_json}", &to_json(profile.skills())?)
            .replace("{candidate_level}", profile.experience_level().as_str())
            .replace("{focus_json}", &to_json(profile.career_focus())?)
            .replace("{trends_json}", &to_json(relevant_trends)?);

        let report: SkillGapReport = self
            .0
            .call_json(&prompt, JSON_ONLY_SYSTEM, CallOptions::ANALYSIS)
            .await?;
        Ok(report)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
