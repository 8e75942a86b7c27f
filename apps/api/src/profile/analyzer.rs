//! Resume analysis: turns raw resume text into a `CandidateProfile`.
//!
//! With an LLM client the analysis is semantic; without one, or when the call
//! fails or times out, a keyword pass over the same text produces the analysis.
//! Either way the caller always gets a result.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::llm_client::prompts::{excerpt, JSON_ONLY_SYSTEM, RESUME_EXCERPT_CHARS};
use crate::llm_client::{CallOptions, LlmClient};
use crate::models::job::JobLevel;
use crate::models::profile::CandidateProfile;
use crate::profile::completeness::check_completeness;
use crate::profile::prompts::RESUME_ANALYSIS_PROMPT_TEMPLATE;
use crate::profile::vocabulary::{mentions, FOCUS_AREAS, TECHNICAL_SKILLS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisBackend {
    Llm,
    Keyword,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeAnalysis {
    pub skills: Vec<String>,
    pub experience_level: JobLevel,
    pub career_focus: Vec<String>,
    pub strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
    /// 1–10.
    pub ats_score: u8,
    pub summary: String,
    pub backend: AnalysisBackend,
}

impl ResumeAnalysis {
    pub fn into_profile(self, preferred_location: Option<&str>) -> CandidateProfile {
        let profile = CandidateProfile::new(self.skills, self.experience_level, self.career_focus);
        match preferred_location {
            Some(location) => profile.with_preferred_location(location),
            None => profile,
        }
    }
}

/// Shape the model is asked to return. Every field is optional so a partial
/// answer still parses.
#[derive(Debug, Deserialize)]
struct LlmAnalysis {
    #[serde(default)]
    skills: Vec<String>,
    #[serde(default)]
    experience_level: String,
    #[serde(default)]
    career_focus: Vec<String>,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    improvement_areas: Vec<String>,
    #[serde(default)]
    ats_score: Option<f64>,
    #[serde(default)]
    summary: String,
}

impl From<LlmAnalysis> for ResumeAnalysis {
    fn from(raw: LlmAnalysis) -> Self {
        Self {
            skills: raw.skills,
            experience_level: JobLevel::from_label(&raw.experience_level).unwrap_or_default(),
            career_focus: raw.career_focus,
            strengths: raw.strengths,
            improvement_areas: raw.improvement_areas,
            ats_score: raw.ats_score.map_or(5, clamp_ats),
            summary: raw.summary,
            backend: AnalysisBackend::Llm,
        }
    }
}

fn clamp_ats(score: f64) -> u8 {
    if score.is_finite() {
        score.round().clamp(1.0, 10.0) as u8
    } else {
        5
    }
}

pub async fn analyze_resume(
    llm: Option<&LlmClient>,
    resume_text: &str,
    timeout: Duration,
) -> ResumeAnalysis {
    let Some(llm) = llm else {
        return keyword_analysis(resume_text);
    };

    let prompt = RESUME_ANALYSIS_PROMPT_TEMPLATE
        .replace("{resume_text}", &excerpt(resume_text, RESUME_EXCERPT_CHARS));
    let call = llm.call_json::<LlmAnalysis>(&prompt, JSON_ONLY_SYSTEM, CallOptions::ANALYSIS);

    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(raw)) => {
            let analysis = ResumeAnalysis::from(raw);
            info!(
                "Resume analysed by LLM: {} skill(s), level {}",
                analysis.skills.len(),
                analysis.experience_level.as_str()
            );
            analysis
        }
        Ok(Err(e)) => {
            warn!("Resume analysis failed, using keyword analysis: {e}");
            keyword_analysis(resume_text)
        }
        Err(_) => {
            warn!("Resume analysis timed out after {timeout:?}, using keyword analysis");
            keyword_analysis(resume_text)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Keyword analysis
// ────────────────────────────────────────────────────────────────────────────

/// Deterministic analysis from the skill and focus vocabularies.
pub fn keyword_analysis(resume_text: &str) -> ResumeAnalysis {
    let skills: Vec<String> = TECHNICAL_SKILLS
        .iter()
        .filter(|skill| mentions(resume_text, skill))
        .map(|skill| skill.to_string())
        .collect();

    let years = years_of_experience(resume_text);
    let experience_level = years.map(level_for_years).unwrap_or_default();

    let career_focus: Vec<String> = FOCUS_AREAS
        .iter()
        .filter(|(_, signals)| signals.iter().any(|s| mentions(resume_text, s)))
        .map(|(area, _)| area.to_string())
        .collect();

    let completeness = check_completeness(resume_text);

    let mut strengths = Vec::new();
    if skills.len() >= 5 {
        strengths.push(format!("Broad technical toolkit ({} recognised skills)", skills.len()));
    }
    if let Some(primary) = career_focus.first() {
        strengths.push(format!("Clear focus on {primary}"));
    }
    if let Some(years) = years {
        strengths.push(format!("{years} years of stated experience"));
    }

    let mut improvement_areas = completeness.suggestions.clone();
    if skills.is_empty() {
        improvement_areas.push("Name the specific technologies you have used".to_string());
    }

    let ats_score = clamp_ats(completeness.completeness_score * 10.0);
    let summary = format!(
        "Keyword analysis found {} skill(s) and {} focus area(s); estimated level {}.",
        skills.len(),
        career_focus.len(),
        experience_level.as_str()
    );

    ResumeAnalysis {
        skills,
        experience_level,
        career_focus,
        strengths,
        improvement_areas,
        ats_score,
        summary,
        backend: AnalysisBackend::Keyword,
    }
}

/// 0–1 entry, 2–4 mid, 5–7 senior, 8–11 lead, 12+ executive.
pub fn level_for_years(years: u32) -> JobLevel {
    match years {
        0..=1 => JobLevel::Entry,
        2..=4 => JobLevel::Mid,
        5..=7 => JobLevel::Senior,
        8..=11 => JobLevel::Lead,
        _ => JobLevel::Executive,
    }
}

/// "N years of experience", then "N years in|with", then "experience ... N years".
static YEARS_PATTERNS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        r"(\d+)\+?\s*(?:years?|yrs)\s*(?:of\s*)?experience",
        r"(\d+)\+?\s*(?:years?|yrs)\s*(?:in|with)",
        r"experience.*?(\d+)\+?\s*(?:years?|yrs)",
    ]
    .map(|pattern| Regex::new(pattern).expect("years-of-experience pattern is valid"))
});

/// Years of experience stated in the text. Patterns are tried in order and the
/// first match of the first matching pattern wins.
pub fn years_of_experience(text: &str) -> Option<u32> {
    let lowered = text.to_lowercase();
    YEARS_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(&lowered)
            .and_then(|caps| caps.get(1))
            .and_then(|years| years.as_str().parse().ok())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe | jane@example.com\n\
        SUMMARY\nData engineer with 6+ years of experience building data pipelines.\n\
        EXPERIENCE\nBuilt streaming ETL with Kafka and Spark on AWS.\n\
        EDUCATION\nBS Computer Science\n\
        SKILLS\nPython, SQL, Docker, Airflow";

    #[test]
    fn test_keyword_analysis_extracts_skills_level_and_focus() {
        let analysis = keyword_analysis(RESUME);
        for skill in ["python", "sql", "kafka", "spark", "aws", "docker", "airflow"] {
            assert!(analysis.skills.contains(&skill.to_string()), "missing {skill}");
        }
        assert!(!analysis.skills.contains(&"go".to_string()));
        assert_eq!(analysis.experience_level, JobLevel::Senior);
        assert_eq!(analysis.career_focus.first().map(String::as_str), Some("Data Engineering"));
        assert_eq!(analysis.backend, AnalysisBackend::Keyword);
        assert_eq!(analysis.ats_score, 10);
    }

    #[test]
    fn test_years_of_experience_patterns() {
        assert_eq!(years_of_experience("5 years of experience in Rust"), Some(5));
        assert_eq!(years_of_experience("3+ years with Python"), Some(3));
        assert_eq!(years_of_experience("10 yrs experience"), Some(10));
        assert_eq!(years_of_experience("Founded in 2019, 40 years old company"), None);
        assert_eq!(years_of_experience("no numbers here"), None);
    }

    #[test]
    fn test_years_stated_after_the_word_experience() {
        let text = "Experience: 7 years building data platforms";
        assert_eq!(years_of_experience(text), Some(7));
        assert_eq!(keyword_analysis(text).experience_level, JobLevel::Senior);

        let text = "Professional experience of 9 years";
        assert_eq!(years_of_experience(text), Some(9));
        assert_eq!(keyword_analysis(text).experience_level, JobLevel::Lead);
    }

    #[test]
    fn test_earlier_pattern_takes_precedence() {
        let text = "Experience since 2015: led a team. 4 years of experience with Spark.";
        assert_eq!(years_of_experience(text), Some(4));
    }

    #[test]
    fn test_level_for_years_boundaries() {
        assert_eq!(level_for_years(0), JobLevel::Entry);
        assert_eq!(level_for_years(1), JobLevel::Entry);
        assert_eq!(level_for_years(2), JobLevel::Mid);
        assert_eq!(level_for_years(5), JobLevel::Senior);
        assert_eq!(level_for_years(8), JobLevel::Lead);
        assert_eq!(level_for_years(12), JobLevel::Executive);
    }

    #[test]
    fn test_unstated_experience_defaults_to_mid() {
        let analysis = keyword_analysis("Skills: Rust, Go");
        assert_eq!(analysis.experience_level, JobLevel::Mid);
    }

    #[test]
    fn test_llm_analysis_is_normalised() {
        let raw: LlmAnalysis = serde_json::from_str(
            r#"{"skills": ["Python", " Kafka "], "experience_level": "Senior", "ats_score": 14.2}"#,
        )
        .unwrap();
        let analysis = ResumeAnalysis::from(raw);
        assert_eq!(analysis.experience_level, JobLevel::Senior);
        assert_eq!(analysis.ats_score, 10);

        let profile = analysis.into_profile(Some("Dallas, TX"));
        assert_eq!(profile.skills(), ["python".to_string(), "kafka".to_string()]);
        assert_eq!(profile.preferred_location(), Some("Dallas, TX"));
    }

    #[test]
    fn test_unknown_llm_level_falls_back_to_mid() {
        let raw: LlmAnalysis = serde_json::from_str(r#"{"experience_level": "wizard"}"#).unwrap();
        let analysis = ResumeAnalysis::from(raw);
        assert_eq!(analysis.experience_level, JobLevel::Mid);
        assert_eq!(analysis.ats_score, 5);
    }

    #[tokio::test]
    async fn test_without_llm_uses_keyword_analysis() {
        let analysis = analyze_resume(None, RESUME, Duration::from_secs(1)).await;
        assert_eq!(analysis.backend, AnalysisBackend::Keyword);
        assert_eq!(analysis.experience_level, JobLevel::Senior);
    }
}
