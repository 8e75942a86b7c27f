//! Job alerts: saved search criteria checked on request against every job source.
//!
//! Flow: search each alert location → keep postings that satisfy the alert's
//! filters → rank against the candidate profile → truncate to the alert budget.

pub mod digest;
pub mod handlers;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::ranking::rank;
use crate::matching::scorer::MatchScorer;
use crate::models::job::{JobLevel, JobPosting, JobType};
use crate::models::profile::CandidateProfile;
use crate::sources::{search_all, JobSource, SearchQuery};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobAlert {
    pub id: Uuid,
    pub user_id: String,
    pub keywords: Vec<String>,
    /// Empty means anywhere.
    pub locations: Vec<String>,
    /// Empty means any type.
    pub job_types: Vec<JobType>,
    /// Empty means any level.
    pub levels: Vec<JobLevel>,
    pub min_salary: Option<u64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl JobAlert {
    pub fn new(user_id: impl Into<String>, keywords: Vec<String>) -> Result<Self, AppError> {
        let user_id = user_id.into();
        if user_id.trim().is_empty() {
            return Err(AppError::Validation("user_id cannot be empty".to_string()));
        }
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        if keywords.is_empty() {
            return Err(AppError::Validation(
                "an alert needs at least one keyword".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            keywords,
            locations: Vec::new(),
            job_types: Vec::new(),
            levels: Vec::new(),
            min_salary: None,
            is_active: true,
            created_at: Utc::now(),
        })
    }
}

/// Result of one alert check. Built per request; nothing is remembered between checks.
#[derive(Debug, Clone, Serialize)]
pub struct AlertDigest {
    pub alert_id: Uuid,
    pub user_id: String,
    pub keywords: Vec<String>,
    pub checked_at: DateTime<Utc>,
    pub matches: Vec<JobPosting>,
}

/// Whether `posting` satisfies the alert's type, level, location and salary filters.
/// Keywords are applied by the search itself.
pub fn matches_alert(alert: &JobAlert, posting: &JobPosting) -> bool {
    let type_ok = alert.job_types.is_empty() || alert.job_types.contains(&posting.job_type);
    let level_ok = alert.levels.is_empty() || alert.levels.contains(&posting.level);

    let location_ok = alert.locations.is_empty()
        || posting.is_remote()
        || alert.locations.iter().any(|l| {
            let l = l.trim().to_lowercase();
            !l.is_empty() && posting.location.to_lowercase().contains(&l)
        });

    // Postings that do not disclose pay are kept; the user can judge them.
    let salary_ok = match (alert.min_salary, posting.salary_floor()) {
        (Some(min), Some(floor)) => floor >= min,
        _ => true,
    };

    type_ok && level_ok && location_ok && salary_ok
}

/// Runs an alert once. Inactive alerts yield an empty digest without searching.
pub async fn check_alert(
    sources: &[Arc<dyn JobSource>],
    scorer: &MatchScorer,
    alert: &JobAlert,
    profile: &CandidateProfile,
    per_search: usize,
    max_matches: usize,
) -> Result<AlertDigest, AppError> {
    let mut digest = AlertDigest {
        alert_id: alert.id,
        user_id: alert.user_id.clone(),
        keywords: alert.keywords.clone(),
        checked_at: Utc::now(),
        matches: Vec::new(),
    };
    if !alert.is_active {
        info!("Alert {} is inactive, skipping", alert.id);
        return Ok(digest);
    }

    let locations: Vec<Option<String>> = if alert.locations.is_empty() {
        vec![None]
    } else {
        alert.locations.iter().cloned().map(Some).collect()
    };

    let mut candidates = Vec::new();
    for location in locations {
        let query = SearchQuery::new(alert.keywords.clone(), location, per_search);
        candidates.extend(search_all(sources, &query).await?);
    }

    let filtered: Vec<JobPosting> = candidates
        .into_iter()
        .filter(|p| matches_alert(alert, p))
        .collect();

    digest.matches = rank(scorer, profile, filtered, max_matches).await;
    info!(
        "Alert {} for {}: {} match(es)",
        alert.id,
        alert.user_id,
        digest.matches.len()
    );
    Ok(digest)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::matching::stubs::StubAnalyst;
    use crate::models::job::fixtures::posting;
    use crate::sources::stubs::{DownSource, FixedSource};

    fn alert() -> JobAlert {
        JobAlert::new("user_001", vec!["engineer".to_string()]).unwrap()
    }

    fn scorer() -> MatchScorer {
        MatchScorer::new(Arc::new(StubAnalyst::default()), Duration::from_secs(5))
    }

    fn profile() -> CandidateProfile {
        CandidateProfile::new(["python", "kafka"], JobLevel::Senior, ["Data Engineering"])
    }

    #[test]
    fn test_alert_requires_keywords() {
        assert!(JobAlert::new("user_001", vec![" ".to_string()]).is_err());
        assert!(JobAlert::new("", vec!["rust".to_string()]).is_err());
    }

    #[test]
    fn test_empty_filters_match_everything() {
        assert!(matches_alert(&alert(), &posting("Data Engineer", "Acme", &[])));
    }

    #[test]
    fn test_type_and_level_filters() {
        let mut a = alert();
        a.job_types = vec![JobType::Remote];
        assert!(!matches_alert(&a, &posting("Data Engineer", "Acme", &[])));

        let mut a = alert();
        a.levels = vec![JobLevel::Mid, JobLevel::Senior];
        let mut p = posting("Data Engineer", "Acme", &[]);
        assert!(matches_alert(&a, &p));
        p.level = JobLevel::Executive;
        assert!(!matches_alert(&a, &p));
    }

    #[test]
    fn test_location_filter_passes_remote_postings() {
        let mut a = alert();
        a.locations = vec!["Austin".to_string()];
        let mut p = posting("Data Engineer", "Acme", &[]);
        assert!(!matches_alert(&a, &p));
        p.location = "Remote".to_string();
        assert!(matches_alert(&a, &p));
    }

    #[test]
    fn test_min_salary_uses_range_floor() {
        let mut a = alert();
        a.min_salary = Some(100_000);
        let mut p = posting("Data Engineer", "Acme", &[]);
        p.salary_range = Some("$90,000 - $130,000".to_string());
        assert!(!matches_alert(&a, &p));
        p.salary_range = Some("$120,000 - $160,000".to_string());
        assert!(matches_alert(&a, &p));
        p.salary_range = None;
        assert!(matches_alert(&a, &p));
    }

    #[tokio::test]
    async fn test_inactive_alert_does_not_search() {
        let mut a = alert();
        a.is_active = false;
        let sources: Vec<Arc<dyn JobSource>> = vec![Arc::new(DownSource)];
        let digest = check_alert(&sources, &scorer(), &a, &profile(), 10, 10)
            .await
            .unwrap();
        assert!(digest.matches.is_empty());
    }

    #[tokio::test]
    async fn test_check_alert_filters_ranks_and_truncates() {
        let mut remote = posting("Platform Engineer", "Remote Co", &["python"]);
        remote.location = "Remote".to_string();
        let sources: Vec<Arc<dyn JobSource>> = vec![Arc::new(FixedSource(vec![
            posting("Data Engineer", "Acme", &["python", "kafka"]),
            posting("Java Engineer", "Acme", &["java"]),
            remote,
        ]))];
        let mut a = alert();
        a.locations = vec!["Dallas".to_string(), "Austin".to_string()];

        let digest = check_alert(&sources, &scorer(), &a, &profile(), 10, 2)
            .await
            .unwrap();
        let titles: Vec<&str> = digest.matches.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Data Engineer", "Platform Engineer"]);
        assert!(digest.matches.iter().all(|p| p.match_score.is_some()));
    }

    #[tokio::test]
    async fn test_all_sources_down_propagates() {
        let sources: Vec<Arc<dyn JobSource>> = vec![Arc::new(DownSource)];
        let result = check_alert(&sources, &scorer(), &alert(), &profile(), 10, 10).await;
        assert!(matches!(result, Err(AppError::SourceUnavailable(_))));
    }
}
