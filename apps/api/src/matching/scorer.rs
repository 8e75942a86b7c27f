//! Match Scorer: 0–100 compatibility between one candidate profile and one posting.
//!
//! score = 0.40 × skills + 0.25 × experience + 0.20 × focus + 0.15 × overall
//!
//! Skills and overall come from the `MatchAnalyst`; experience and focus are
//! computed here. A failing, slow or nonsensical analyst turns that one posting's
//! score into `NEUTRAL_SCORE` instead of an error.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::matching::analyst::{bounded, validate_sub_score, AnalystError, MatchAnalyst};
use crate::models::job::{JobLevel, JobPosting};
use crate::models::profile::CandidateProfile;
use crate::profile::vocabulary::tokens;

/// Score assigned when a posting cannot be analysed.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Fixed sub-score weights. They sum to 1.0.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MatchWeights {
    pub skills: f64,
    pub experience: f64,
    pub focus: f64,
    pub overall: f64,
}

pub const MATCH_WEIGHTS: MatchWeights = MatchWeights {
    skills: 0.40,
    experience: 0.25,
    focus: 0.20,
    overall: 0.15,
};

/// Sub-scores behind a match, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub skills: f64,
    pub experience: f64,
    pub focus: f64,
    pub overall: f64,
}

impl SubScores {
    pub fn weighted_total(&self, weights: &MatchWeights) -> f64 {
        (weights.skills * self.skills
            + weights.experience * self.experience
            + weights.focus * self.focus
            + weights.overall * self.overall)
            .clamp(0.0, 100.0)
    }
}

/// How a match score was reached. `components` is `None` when the neutral
/// default was used, with `fallback_reason` saying why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub total: f64,
    pub components: Option<SubScores>,
    pub fallback_reason: Option<String>,
}

impl ScoreBreakdown {
    pub fn neutral(reason: impl Into<String>) -> Self {
        Self {
            total: NEUTRAL_SCORE,
            components: None,
            fallback_reason: Some(reason.into()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.components.is_none()
    }
}

/// Experience-level alignment by distance on the seniority ladder.
/// Exact 100, adjacent 60, two apart 30, further 10.
pub fn level_alignment(candidate: JobLevel, posting: JobLevel) -> f64 {
    match candidate.ordinal().abs_diff(posting.ordinal()) {
        0 => 100.0,
        1 => 60.0,
        2 => 30.0,
        _ => 10.0,
    }
}

const FOCUS_STOP_WORDS: &[&str] = &["and", "the", "for", "with", "of"];
/// Minimum length for a focus word to count; shorter words are noise.
const MIN_FOCUS_WORD: usize = 3;
/// Minimum length for prefix matching ("engineer" ~ "engineering").
const MIN_STEM: usize = 5;

fn words_related(focus_word: &str, token: &str) -> bool {
    focus_word == token
        || (focus_word.len() >= MIN_STEM
            && token.len() >= MIN_STEM
            && (focus_word.starts_with(token) || token.starts_with(focus_word)))
}

/// Share of the profile's focus areas echoed by the posting's title or description.
/// A profile without focus areas scores a neutral 50.
pub fn focus_alignment(career_focus: &[String], posting: &JobPosting) -> f64 {
    if career_focus.is_empty() {
        return NEUTRAL_SCORE;
    }

    let text = format!("{} {}", posting.title, posting.description).to_lowercase();
    let posting_tokens: HashSet<&str> = tokens(&text).collect();

    let matched = career_focus
        .iter()
        .filter(|area| {
            let area = area.to_lowercase();
            let echoed = tokens(&area)
                .filter(|w| w.len() >= MIN_FOCUS_WORD && !FOCUS_STOP_WORDS.contains(w))
                .any(|w| posting_tokens.iter().any(|t| words_related(w, t)));
            echoed
        })
        .count();

    matched as f64 / career_focus.len() as f64 * 100.0
}

/// Postings scored at once when no explicit cap is configured.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 8;

/// Scores postings against a profile. Cheap to clone; clones share one permit
/// pool, so the in-flight cap holds across tasks and requests.
#[derive(Clone)]
pub struct MatchScorer {
    analyst: Arc<dyn MatchAnalyst>,
    timeout: Duration,
    permits: Arc<Semaphore>,
}

impl MatchScorer {
    pub fn new(analyst: Arc<dyn MatchAnalyst>, timeout: Duration) -> Self {
        Self {
            analyst,
            timeout,
            permits: Arc::new(Semaphore::new(DEFAULT_MAX_IN_FLIGHT)),
        }
    }

    /// Caps how many postings are analysed concurrently (at least one).
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.permits = Arc::new(Semaphore::new(max_in_flight.max(1)));
        self
    }

    pub fn backend(&self) -> &'static str {
        self.analyst.backend()
    }

    /// Final score in `[0, 100]`.
    pub async fn score(&self, profile: &CandidateProfile, posting: &JobPosting) -> f64 {
        self.breakdown(profile, posting).await.total
    }

    pub async fn breakdown(
        &self,
        profile: &CandidateProfile,
        posting: &JobPosting,
    ) -> ScoreBreakdown {
        let Ok(_permit) = self.permits.acquire().await else {
            return ScoreBreakdown::neutral("scorer is shut down");
        };

        match self.sub_scores(profile, posting).await {
            Ok(components) => {
                let total = components.weighted_total(&MATCH_WEIGHTS);
                debug!(
                    "Scored '{}' at {}: {:.1} ({:?})",
                    posting.title, posting.company, total, components
                );
                ScoreBreakdown {
                    total,
                    components: Some(components),
                    fallback_reason: None,
                }
            }
            Err(e) => {
                warn!(
                    "Analysis failed for '{}' at {}, using neutral score: {e}",
                    posting.title, posting.company
                );
                ScoreBreakdown::neutral(e.to_string())
            }
        }
    }

    async fn sub_scores(
        &self,
        profile: &CandidateProfile,
        posting: &JobPosting,
    ) -> Result<SubScores, AnalystError> {
        let (coverage, fit) = tokio::join!(
            bounded(self.timeout, self.analyst.score_coverage(profile, posting)),
            bounded(self.timeout, self.analyst.judge_fit(profile, posting)),
        );

        Ok(SubScores {
            skills: validate_sub_score(coverage?)?,
            experience: level_alignment(profile.experience_level(), posting.level),
            focus: focus_alignment(profile.career_focus(), posting),
            overall: validate_sub_score(fit?)?,
        })
    }
}
