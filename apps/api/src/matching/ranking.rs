//! Ranking Pipeline: turns a profile and raw postings into an ordered, scored list.
//!
//! Flow: drop inconsistent postings → dedupe → score each posting concurrently →
//!       stable sort by score (descending) → truncate to `limit`.

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::matching::dedup::dedupe;
use crate::matching::scorer::{MatchScorer, ScoreBreakdown};
use crate::models::job::JobPosting;
use crate::models::profile::CandidateProfile;

/// A scored posting together with how its score was reached.
#[derive(Debug, Clone, Serialize)]
pub struct RankedMatch {
    pub posting: JobPosting,
    pub breakdown: ScoreBreakdown,
}

/// Ranks postings for `profile`, returning at most `limit` postings with
/// `match_score` populated.
pub async fn rank(
    scorer: &MatchScorer,
    profile: &CandidateProfile,
    postings: Vec<JobPosting>,
    limit: usize,
) -> Vec<JobPosting> {
    rank_with_breakdown(scorer, profile, postings, limit)
        .await
        .into_iter()
        .map(|m| m.posting)
        .collect()
}

/// Same as [`rank`] but keeps the per-posting score breakdown.
///
/// Scoring runs one task per posting; results are reassembled by input index,
/// so concurrency never affects the order of the output. Ties keep their
/// deduplicated input order.
pub async fn rank_with_breakdown(
    scorer: &MatchScorer,
    profile: &CandidateProfile,
    postings: Vec<JobPosting>,
    limit: usize,
) -> Vec<RankedMatch> {
    if limit == 0 {
        return Vec::new();
    }

    let received = postings.len();
    let consistent: Vec<JobPosting> = postings
        .into_iter()
        .filter(|p| match p.missing_field() {
            Some(field) => {
                warn!("Dropping posting {} with blank {field}", p.id);
                false
            }
            None => true,
        })
        .map(|mut p| {
            p.match_score = None;
            p
        })
        .collect();

    let unique = dedupe(consistent);
    if unique.is_empty() {
        return Vec::new();
    }

    let breakdowns = score_all(scorer, profile, &unique).await;

    let mut ranked: Vec<RankedMatch> = unique
        .into_iter()
        .zip(breakdowns)
        .map(|(posting, breakdown)| RankedMatch {
            posting: posting.with_score(breakdown.total),
            breakdown,
        })
        .collect();

    // `sort_by` is stable: equal scores keep their input order.
    ranked.sort_by(|a, b| {
        b.posting
            .ordering_score()
            .partial_cmp(&a.posting.ordering_score())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(limit);

    info!(
        "Ranked {} of {} posting(s) (backend={})",
        ranked.len(),
        received,
        scorer.backend()
    );
    ranked
}

/// Scores every posting on its own task. Output is index-aligned with `postings`.
async fn score_all(
    scorer: &MatchScorer,
    profile: &CandidateProfile,
    postings: &[JobPosting],
) -> Vec<ScoreBreakdown> {
    let profile = Arc::new(profile.clone());
    let mut set = JoinSet::new();

    for (index, posting) in postings.iter().cloned().enumerate() {
        let scorer = scorer.clone();
        let profile = Arc::clone(&profile);
        set.spawn(async move { (index, scorer.breakdown(&profile, &posting).await) });
    }

    let mut slots: Vec<Option<ScoreBreakdown>> = vec![None; postings.len()];
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((index, breakdown)) => slots[index] = Some(breakdown),
            Err(e) => warn!("Scoring task did not complete: {e}"),
        }
    }

    slots
        .into_iter()
        .map(|slot| slot.unwrap_or_else(|| ScoreBreakdown::neutral("scoring task aborted")))
        .collect()
}
