use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::matching::analyst::{KeywordAnalyst, LlmAnalyst, MatchAnalyst};
use crate::matching::scorer::MatchScorer;
use crate::matching::trends::default_trend_corpus;
use crate::sources::sample_board::SampleBoardSource;
use crate::sources::JobSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when no API key is configured; LLM-only features then degrade or refuse.
    pub llm: Option<LlmClient>,
    /// Pluggable analyst. Default: KeywordAnalyst. LlmAnalyst when an API key is set.
    pub analyst: Arc<dyn MatchAnalyst>,
    pub scorer: MatchScorer,
    /// Job sources in priority order.
    pub sources: Arc<Vec<Arc<dyn JobSource>>>,
    /// Read-only market-trend corpus, loaded once at startup.
    pub trends: Arc<Vec<String>>,
}

impl AppState {
    pub fn new(config: Config, llm: Option<LlmClient>) -> Self {
        let analyst: Arc<dyn MatchAnalyst> = match &llm {
            Some(client) => Arc::new(LlmAnalyst(client.clone())),
            None => Arc::new(KeywordAnalyst),
        };
        info!("Match analyst backend: {}", analyst.backend());

        let sources: Vec<Arc<dyn JobSource>> = vec![Arc::new(SampleBoardSource)];

        Self::with_parts(config, llm, analyst, sources)
    }

    pub fn with_parts(
        config: Config,
        llm: Option<LlmClient>,
        analyst: Arc<dyn MatchAnalyst>,
        sources: Vec<Arc<dyn JobSource>>,
    ) -> Self {
        let scorer = MatchScorer::new(Arc::clone(&analyst), config.analyst_timeout)
            .with_max_in_flight(config.max_concurrent_scoring);
        Self {
            config,
            llm,
            analyst,
            scorer,
            sources: Arc::new(sources),
            trends: Arc::new(default_trend_corpus()),
        }
    }
}
