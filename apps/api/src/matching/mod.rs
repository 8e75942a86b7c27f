pub mod analyst;
pub mod dedup;
pub mod handlers;
pub mod prompts;
pub mod ranking;
pub mod scorer;
pub mod skill_gap;
pub mod trends;

/// Deterministic analysts for exercising the pipeline without a backend.
#[cfg(test)]
pub(crate) mod stubs {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::analyst::{AnalystError, MatchAnalyst};
    use super::skill_gap::{PriorityLevel, SkillGapReport};
    use crate::models::job::JobPosting;
    use crate::models::profile::CandidateProfile;

    /// coverage = matched / required × 100 (exact skill names), fit = 50.
    #[derive(Default)]
    pub struct StubAnalyst {
        coverage_calls: AtomicUsize,
        seen_trends: Mutex<Vec<String>>,
    }

    impl StubAnalyst {
        pub fn coverage_calls(&self) -> usize {
            self.coverage_calls.load(Ordering::SeqCst)
        }

        pub fn seen_trends(&self) -> Vec<String> {
            self.seen_trends.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MatchAnalyst for StubAnalyst {
        fn backend(&self) -> &'static str {
            "stub"
        }

        async fn score_coverage(
            &self,
            profile: &CandidateProfile,
            posting: &JobPosting,
        ) -> Result<f64, AnalystError> {
            self.coverage_calls.fetch_add(1, Ordering::SeqCst);
            if posting.requirements.is_empty() {
                return Ok(0.0);
            }
            let matched = posting
                .requirements
                .iter()
                .filter(|r| profile.has_skill(r))
                .count();
            Ok(matched as f64 / posting.requirements.len() as f64 * 100.0)
        }

        async fn judge_fit(
            &self,
            _profile: &CandidateProfile,
            _posting: &JobPosting,
        ) -> Result<f64, AnalystError> {
            Ok(50.0)
        }

        async fn generate_report(
            &self,
            _profile: &CandidateProfile,
            relevant_trends: &[String],
        ) -> Result<SkillGapReport, AnalystError> {
            *self.seen_trends.lock().unwrap() = relevant_trends.to_vec();
            Ok(SkillGapReport {
                skills_to_add: vec!["terraform".to_string()],
                skills_to_improve: Vec::new(),
                certifications_to_consider: Vec::new(),
                learning_resources: Vec::new(),
                priority_level: PriorityLevel::Low,
                explanation: "stub".to_string(),
            })
        }
    }

    /// Same sub-score for every posting.
    pub struct ConstantAnalyst(pub f64);

    #[async_trait]
    impl MatchAnalyst for ConstantAnalyst {
        fn backend(&self) -> &'static str {
            "constant"
        }

        async fn score_coverage(
            &self,
            _profile: &CandidateProfile,
            _posting: &JobPosting,
        ) -> Result<f64, AnalystError> {
            Ok(self.0)
        }

        async fn judge_fit(
            &self,
            _profile: &CandidateProfile,
            _posting: &JobPosting,
        ) -> Result<f64, AnalystError> {
            Ok(self.0)
        }

        async fn generate_report(
            &self,
            _profile: &CandidateProfile,
            _relevant_trends: &[String],
        ) -> Result<SkillGapReport, AnalystError> {
            Err(AnalystError::Unavailable("constant analyst has no reports".into()))
        }
    }

    /// Every call fails.
    pub struct FailingAnalyst;

    #[async_trait]
    impl MatchAnalyst for FailingAnalyst {
        fn backend(&self) -> &'static str {
            "failing"
        }

        async fn score_coverage(
            &self,
            _profile: &CandidateProfile,
            _posting: &JobPosting,
        ) -> Result<f64, AnalystError> {
            Err(AnalystError::Unavailable("stub backend down".into()))
        }

        async fn judge_fit(
            &self,
            _profile: &CandidateProfile,
            _posting: &JobPosting,
        ) -> Result<f64, AnalystError> {
            Err(AnalystError::Malformed("garbage".into()))
        }

        async fn generate_report(
            &self,
            _profile: &CandidateProfile,
            _relevant_trends: &[String],
        ) -> Result<SkillGapReport, AnalystError> {
            Err(AnalystError::Unavailable("stub backend down".into()))
        }
    }

    /// Returns values no valid backend would.
    pub struct GarbageAnalyst;

    #[async_trait]
    impl MatchAnalyst for GarbageAnalyst {
        fn backend(&self) -> &'static str {
            "garbage"
        }

        async fn score_coverage(
            &self,
            _profile: &CandidateProfile,
            _posting: &JobPosting,
        ) -> Result<f64, AnalystError> {
            Ok(250.0)
        }

        async fn judge_fit(
            &self,
            _profile: &CandidateProfile,
            _posting: &JobPosting,
        ) -> Result<f64, AnalystError> {
            Ok(f64::NAN)
        }

        async fn generate_report(
            &self,
            _profile: &CandidateProfile,
            _relevant_trends: &[String],
        ) -> Result<SkillGapReport, AnalystError> {
            Err(AnalystError::Malformed("not json".into()))
        }
    }

    /// Never answers within any reasonable timeout.
    pub struct SlowAnalyst;

    const FOREVER: Duration = Duration::from_secs(3600);

    #[async_trait]
    impl MatchAnalyst for SlowAnalyst {
        fn backend(&self) -> &'static str {
            "slow"
        }

        async fn score_coverage(
            &self,
            _profile: &CandidateProfile,
            _posting: &JobPosting,
        ) -> Result<f64, AnalystError> {
            tokio::time::sleep(FOREVER).await;
            Ok(100.0)
        }

        async fn judge_fit(
            &self,
            _profile: &CandidateProfile,
            _posting: &JobPosting,
        ) -> Result<f64, AnalystError> {
            tokio::time::sleep(FOREVER).await;
            Ok(100.0)
        }

        async fn generate_report(
            &self,
            _profile: &CandidateProfile,
            _relevant_trends: &[String],
        ) -> Result<SkillGapReport, AnalystError> {
            tokio::time::sleep(FOREVER).await;
            Err(AnalystError::Unavailable("unreachable".into()))
        }
    }

    /// Tracks how many analyst calls are running at the same moment.
    #[derive(Default)]
    pub struct CountingAnalyst {
        current: AtomicUsize,
        peak: AtomicUsize,
    }

    impl CountingAnalyst {
        pub fn peak(&self) -> usize {
            self.peak.load(Ordering::SeqCst)
        }

        async fn observe(&self) -> Result<f64, AnalystError> {
            let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.current.fetch_sub(1, Ordering::SeqCst);
            Ok(60.0)
        }
    }

    #[async_trait]
    impl MatchAnalyst for CountingAnalyst {
        fn backend(&self) -> &'static str {
            "counting"
        }

        async fn score_coverage(
            &self,
            _profile: &CandidateProfile,
            _posting: &JobPosting,
        ) -> Result<f64, AnalystError> {
            self.observe().await
        }

        async fn judge_fit(
            &self,
            _profile: &CandidateProfile,
            _posting: &JobPosting,
        ) -> Result<f64, AnalystError> {
            self.observe().await
        }

        async fn generate_report(
            &self,
            _profile: &CandidateProfile,
            _relevant_trends: &[String],
        ) -> Result<SkillGapReport, AnalystError> {
            Err(AnalystError::Unavailable("no reports".into()))
        }
    }

    /// Panics while scoring any posting titled "Boom"; otherwise full marks.
    pub struct PanickingAnalyst;

    #[async_trait]
    impl MatchAnalyst for PanickingAnalyst {
        fn backend(&self) -> &'static str {
            "panicking"
        }

        async fn score_coverage(
            &self,
            _profile: &CandidateProfile,
            posting: &JobPosting,
        ) -> Result<f64, AnalystError> {
            if posting.title == "Boom" {
                panic!("analyst crashed on {}", posting.title);
            }
            Ok(100.0)
        }

        async fn judge_fit(
            &self,
            _profile: &CandidateProfile,
            _posting: &JobPosting,
        ) -> Result<f64, AnalystError> {
            Ok(100.0)
        }

        async fn generate_report(
            &self,
            _profile: &CandidateProfile,
            _relevant_trends: &[String],
        ) -> Result<SkillGapReport, AnalystError> {
            Err(AnalystError::Unavailable("no reports".into()))
        }
    }
}
