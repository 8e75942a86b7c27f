//! Job sources: where raw, unscored postings come from.
//!
//! Every source implements `JobSource`; `search_all` fans a query out across the
//! configured sources in priority order and merges what comes back.

pub mod handlers;
pub mod sample_board;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::matching::dedup::dedupe;
use crate::models::job::{JobPosting, JobType};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{source_name} is unavailable: {message}")]
    Unavailable {
        source_name: &'static str,
        message: String,
    },
}

/// What to look for. `max_results` caps the merged result, not each source.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub keywords: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub job_type: Option<JobType>,
    pub max_results: usize,
}

impl SearchQuery {
    pub fn new(keywords: Vec<String>, location: Option<String>, max_results: usize) -> Self {
        Self {
            keywords,
            location,
            job_type: None,
            max_results,
        }
    }

    /// Keywords with blanks removed.
    pub fn terms(&self) -> impl Iterator<Item = String> + '_ {
        self.keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
    }

    /// Whether a posting satisfies the keyword, location and job-type filters.
    ///
    /// Keywords match the title or description as substrings. A location matches
    /// remote postings or postings whose location contains the query's city.
    pub fn accepts(&self, posting: &JobPosting) -> bool {
        let haystack = format!("{} {}", posting.title, posting.description).to_lowercase();
        let keyword_hit = self.terms().any(|k| haystack.contains(&k));

        let location_hit = match self.location.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(location) => {
                let city = location.split(',').next().unwrap_or(location).trim().to_lowercase();
                posting.is_remote() || posting.location.to_lowercase().contains(&city)
            }
        };

        let type_hit = self.job_type.map_or(true, |t| t == posting.job_type);

        keyword_hit && location_hit && type_hit
    }
}

#[async_trait]
pub trait JobSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn search(&self, query: &SearchQuery) -> Result<Vec<JobPosting>, SourceError>;
}

/// Queries every source in order and returns deduplicated postings, at most
/// `query.max_results` of them.
///
/// Each source is asked for an equal share of the budget (at least one posting).
/// A failing source is logged and skipped; only when every source fails is the
/// search itself an error.
pub async fn search_all(
    sources: &[Arc<dyn JobSource>],
    query: &SearchQuery,
) -> Result<Vec<JobPosting>, AppError> {
    if sources.is_empty() {
        return Err(AppError::SourceUnavailable(
            "no job sources configured".to_string(),
        ));
    }
    if query.max_results == 0 {
        return Ok(Vec::new());
    }

    let per_source = SearchQuery {
        max_results: (query.max_results / sources.len()).max(1),
        ..query.clone()
    };

    let mut postings = Vec::new();
    let mut failures = Vec::new();
    for source in sources {
        match source.search(&per_source).await {
            Ok(found) => {
                info!("{} returned {} posting(s)", source.name(), found.len());
                postings.extend(found);
            }
            Err(e) => {
                warn!("Skipping job source {}: {e}", source.name());
                failures.push(e.to_string());
            }
        }
    }

    if failures.len() == sources.len() {
        return Err(AppError::SourceUnavailable(failures.join("; ")));
    }

    let mut unique = dedupe(postings);
    unique.truncate(query.max_results);
    Ok(unique)
}


#[cfg(test)]
mod tests {
    use super::stubs::{DownSource, FixedSource};
    use super::*;
    use crate::models::job::fixtures::posting;

    fn query(max_results: usize) -> SearchQuery {
        SearchQuery::new(vec!["engineer".to_string()], None, max_results)
    }

    #[tokio::test]
    async fn test_failing_source_is_skipped() {
        let sources: Vec<Arc<dyn JobSource>> = vec![
            Arc::new(DownSource),
            Arc::new(FixedSource(vec![posting("Data Engineer", "Acme", &[])])),
        ];
        let found = search_all(&sources, &query(10)).await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_all_sources_down_is_an_error() {
        let sources: Vec<Arc<dyn JobSource>> = vec![Arc::new(DownSource), Arc::new(DownSource)];
        let err = search_all(&sources, &query(10)).await.unwrap_err();
        assert!(matches!(err, AppError::SourceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_unavailable_source_is_named_in_the_error() {
        let sources: Vec<Arc<dyn JobSource>> = vec![Arc::new(DownSource)];
        match search_all(&sources, &query(10)).await.unwrap_err() {
            AppError::SourceUnavailable(message) => {
                assert_eq!(message, "down is unavailable: connection refused");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_no_sources_is_an_error() {
        let err = search_all(&[], &query(10)).await.unwrap_err();
        assert!(matches!(err, AppError::SourceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_results_are_deduplicated_across_sources() {
        let sources: Vec<Arc<dyn JobSource>> = vec![
            Arc::new(FixedSource(vec![posting("Data Engineer", "Acme", &[])])),
            Arc::new(FixedSource(vec![
                posting("DATA ENGINEER", "acme", &[]),
                posting("ML Engineer", "Acme", &[]),
            ])),
        ];
        let found = search_all(&sources, &query(10)).await.unwrap();
        let titles: Vec<&str> = found.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Data Engineer", "ML Engineer"]);
    }

    #[tokio::test]
    async fn test_budget_is_split_between_sources() {
        let many: Vec<JobPosting> = (0..5)
            .map(|i| posting(&format!("Engineer {i}"), "Acme", &[]))
            .collect();
        let sources: Vec<Arc<dyn JobSource>> = vec![
            Arc::new(FixedSource(many.clone())),
            Arc::new(FixedSource(many)),
        ];
        // 4 / 2 sources = 2 each; the second source repeats the first's postings.
        let found = search_all(&sources, &query(4)).await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_query_accepts_remote_postings_anywhere() {
        let mut p = posting("Backend Developer", "StartupXYZ", &[]);
        p.location = "Remote".to_string();
        p.job_type = JobType::Remote;
        let q = SearchQuery::new(
            vec!["backend".to_string()],
            Some("Seattle, WA".to_string()),
            5,
        );
        assert!(q.accepts(&p));
    }

    #[test]
    fn test_query_rejects_other_cities_and_blank_keywords() {
        let p = posting("Data Engineer", "Acme", &[]);
        let elsewhere = SearchQuery::new(
            vec!["data".to_string()],
            Some("Boston, MA".to_string()),
            5,
        );
        assert!(!elsewhere.accepts(&p));

        let blank = SearchQuery::new(vec!["  ".to_string()], None, 5);
        assert!(!blank.accepts(&p));
    }
}
