use std::fmt::Display;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::matching::analyst::{bounded, MatchAnalyst};
use crate::matching::trends::relevant_trends;
use crate::models::profile::CandidateProfile;

/// Number of filtered trends handed to the analyst as context.
pub const TREND_CONTEXT_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningResource {
    pub skill: String,
    #[serde(default)]
    pub resources: Vec<String>,
}

/// Recommendations built fresh for each request; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGapReport {
    #[serde(default)]
    pub skills_to_add: Vec<String>,
    #[serde(default)]
    pub skills_to_improve: Vec<String>,
    #[serde(default)]
    pub certifications_to_consider: Vec<String>,
    #[serde(default)]
    pub learning_resources: Vec<LearningResource>,
    #[serde(default)]
    pub priority_level: PriorityLevel,
    #[serde(default)]
    pub explanation: String,
}

impl SkillGapReport {
    /// Empty report returned when the analyst could not produce one.
    pub fn fallback(reason: impl Display) -> Self {
        Self {
            skills_to_add: Vec::new(),
            skills_to_improve: Vec::new(),
            certifications_to_consider: Vec::new(),
            learning_resources: Vec::new(),
            priority_level: PriorityLevel::Medium,
            explanation: format!("Skill analysis failed: {reason}"),
        }
    }
}

/// Produces skill-gap recommendations for `profile` against the trend corpus.
///
/// Never fails: analyst errors and timeouts yield [`SkillGapReport::fallback`].
pub async fn recommend(
    analyst: &dyn MatchAnalyst,
    profile: &CandidateProfile,
    trends: &[String],
    timeout: Duration,
) -> SkillGapReport {
    let relevant = relevant_trends(trends, profile.skills(), TREND_CONTEXT_SIZE);
    info!(
        "Skill-gap analysis: {} relevant trend(s), backend={}",
        relevant.len(),
        analyst.backend()
    );

    match bounded(timeout, analyst.generate_report(profile, &relevant)).await {
        Ok(report) => report,
        Err(e) => {
            warn!("Skill-gap analysis failed, returning empty report: {e}");
            SkillGapReport::fallback(e)
        }
    }
}
