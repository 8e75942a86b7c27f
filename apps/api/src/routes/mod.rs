pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::alerts::handlers as alerts;
use crate::matching::handlers as matching;
use crate::profile::handlers as profile;
use crate::sources::handlers as sources;
use crate::state::AppState;
use crate::writing::handlers as writing;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile
        .route("/api/v1/profile/analyze", post(profile::handle_analyze))
        // Jobs
        .route("/api/v1/jobs/search", post(sources::handle_search))
        .route("/api/v1/jobs/dedupe", post(matching::handle_dedupe))
        .route("/api/v1/jobs/rank", post(matching::handle_rank))
        .route("/api/v1/jobs/match", post(matching::handle_match))
        // Market insight
        .route("/api/v1/trends", post(matching::handle_trends))
        .route(
            "/api/v1/skills/suggestions",
            post(matching::handle_skill_suggestions),
        )
        // Writing
        .route("/api/v1/resumes/optimize", post(writing::handle_optimize))
        .route("/api/v1/cover-letters", post(writing::handle_cover_letter))
        // Alerts
        .route("/api/v1/alerts/check", post(alerts::handle_check_alert))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::matching::analyst::KeywordAnalyst;
    use crate::sources::sample_board::SampleBoardSource;
    use crate::sources::stubs::DownSource;
    use crate::sources::JobSource;

    fn app() -> Router {
        let sources: Vec<Arc<dyn JobSource>> = vec![Arc::new(SampleBoardSource)];
        build_router(AppState::with_parts(
            Config::default(),
            None,
            Arc::new(KeywordAnalyst),
            sources,
        ))
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn profile_json() -> Value {
        json!({
            "skills": ["Python", "Kafka", "Spark"],
            "experience_level": "senior",
            "career_focus": ["Data Engineering"]
        })
    }

    fn posting_json(title: &str, company: &str, requirements: &[&str]) -> Value {
        json!({
            "title": title,
            "company": company,
            "location": "Dallas, TX",
            "job_type": "full_time",
            "level": "senior",
            "description": format!("{title} at {company}"),
            "requirements": requirements,
            "application_url": format!("https://example.com/{title}")
        })
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["analyst"], "keyword");
        assert_eq!(body["llm_configured"], false);
    }

    #[tokio::test]
    async fn test_rank_orders_by_coverage_and_dedupes() {
        let body = json!({
            "profile": profile_json(),
            "postings": [
                posting_json("Java Developer", "B Corp", &["Java", "Spring"]),
                posting_json("Data Engineer", "A Corp", &["Python", "Kafka"]),
                posting_json("data engineer", "a corp", &["Python"]),
            ],
            "limit": 10
        });
        let (status, value) = post_json(app(), "/api/v1/jobs/rank", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["count"], 2);
        assert_eq!(value["postings"][0]["title"], "Data Engineer");
        assert_eq!(value["postings"][1]["title"], "Java Developer");
        assert!(value["postings"][0]["match_score"].as_f64().unwrap() > 0.0);
    }

    #[tokio::test]
    async fn test_negative_limit_is_rejected() {
        let body = json!({
            "profile": profile_json(),
            "postings": [posting_json("Data Engineer", "A Corp", &["Python"])],
            "limit": -1
        });
        let (status, value) = post_json(app(), "/api/v1/jobs/rank", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_rank_rejects_too_many_postings() {
        let postings: Vec<Value> = (0..=Config::default().max_jobs_per_search)
            .map(|i| posting_json(&format!("Role {i}"), "A Corp", &["Python"]))
            .collect();
        let body = json!({ "profile": profile_json(), "postings": postings, "limit": 1 });
        let (status, value) = post_json(app(), "/api/v1/jobs/rank", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_dedupe_endpoint() {
        let body = json!({
            "postings": [
                posting_json("Senior Data Engineer", "TechCorp Inc.", &[]),
                posting_json("senior data engineer", "techcorp inc.", &[]),
            ]
        });
        let (status, value) = post_json(app(), "/api/v1/jobs/dedupe", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["count"], 1);
    }

    #[tokio::test]
    async fn test_trends_endpoint_filters_custom_corpus() {
        let body = json!({
            "skills": ["python"],
            "trends": ["Kubernetes demand rising", "Python is popular"],
            "top_n": 5
        });
        let (status, value) = post_json(app(), "/api/v1/trends", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["trends"], json!(["Python is popular"]));
    }

    #[tokio::test]
    async fn test_search_requires_keywords() {
        let body = json!({ "keywords": ["  "] });
        let (status, _) = post_json(app(), "/api/v1/jobs/search", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_with_every_source_down_is_503() {
        let sources: Vec<Arc<dyn JobSource>> = vec![Arc::new(DownSource)];
        let app = build_router(AppState::with_parts(
            Config::default(),
            None,
            Arc::new(KeywordAnalyst),
            sources,
        ));
        let (status, value) =
            post_json(app, "/api/v1/jobs/search", json!({ "keywords": ["data"] })).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(value["error"]["code"], "SOURCE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_match_runs_the_whole_pipeline() {
        let body = json!({
            "resume_text": "Data engineer with 6 years of experience. Python, Kafka, Spark, AWS.",
            "keywords": ["data"],
            "location": "Dallas, TX",
            "limit": 3
        });
        let (status, value) = post_json(app(), "/api/v1/jobs/match", body).await;
        assert_eq!(status, StatusCode::OK);
        let matches = value["matches"].as_array().unwrap();
        assert!(!matches.is_empty() && matches.len() <= 3);
        assert_eq!(matches[0]["posting"]["title"], "Senior Data Engineer");
        assert_eq!(value["profile"]["experience_level"], "senior");
    }

    #[tokio::test]
    async fn test_skill_suggestions_with_keyword_backend() {
        let body = json!({ "profile": profile_json() });
        let (status, value) = post_json(app(), "/api/v1/skills/suggestions", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["backend"], "keyword");
        assert!(value["report"]["skills_to_improve"]
            .as_array()
            .unwrap()
            .contains(&json!("kafka")));
    }

    #[tokio::test]
    async fn test_optimize_without_llm_is_502() {
        let body = json!({
            "resume_text": "Data engineer",
            "posting": posting_json("Data Engineer", "A Corp", &["Python"])
        });
        let (status, value) = post_json(app(), "/api/v1/resumes/optimize", body).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(value["error"]["code"], "LLM_ERROR");
    }

    #[tokio::test]
    async fn test_cover_letter_falls_back_to_template() {
        let body = json!({
            "candidate_name": "Jane Doe",
            "resume_text": "Data engineer skilled in Python and Kafka",
            "posting": posting_json("Data Engineer", "A Corp", &["Python"]),
            "tone": "enthusiastic"
        });
        let (status, value) = post_json(app(), "/api/v1/cover-letters", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["backend"], "template");
        assert!(value["content"].as_str().unwrap().starts_with("Dear A Corp Team,"));
    }

    #[tokio::test]
    async fn test_alert_check_returns_digest() {
        let body = json!({
            "alert": {
                "user_id": "user_001",
                "keywords": ["data engineer", "python", "kafka"],
                "locations": ["Dallas", "Austin"],
                "job_types": ["full_time", "remote"],
                "levels": ["mid", "senior"]
            },
            "profile": profile_json()
        });
        let (status, value) = post_json(app(), "/api/v1/alerts/check", body).await;
        assert_eq!(status, StatusCode::OK);
        let matches = value["digest"]["matches"].as_array().unwrap();
        assert!(!matches.is_empty());
        assert!(value["summary"].as_str().unwrap().contains("found!"));
    }

    #[tokio::test]
    async fn test_profile_analyze_uses_default_location() {
        let body = json!({
            "resume_text": "SUMMARY\nBackend developer, 3 years of experience with Rust and Go."
        });
        let (status, value) = post_json(app(), "/api/v1/profile/analyze", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["profile"]["preferred_location"], "Dallas, TX");
        assert_eq!(value["analysis"]["experience_level"], "mid");
        assert_eq!(value["analysis"]["backend"], "keyword");
    }
}
