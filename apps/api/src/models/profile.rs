use serde::{Deserialize, Serialize};

use crate::models::job::JobLevel;

/// Structured view of a candidate, derived from resume analysis.
///
/// Skills are normalized on construction (trimmed, lower-cased, deduplicated in
/// first-seen order) and the profile is read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawProfile")]
pub struct CandidateProfile {
    skills: Vec<String>,
    experience_level: JobLevel,
    career_focus: Vec<String>,
    preferred_location: Option<String>,
}

/// Wire shape accepted from clients; normalized through `CandidateProfile::new`.
#[derive(Deserialize)]
struct RawProfile {
    #[serde(default)]
    skills: Vec<String>,
    #[serde(default)]
    experience_level: JobLevel,
    #[serde(default)]
    career_focus: Vec<String>,
    #[serde(default)]
    preferred_location: Option<String>,
}

impl From<RawProfile> for CandidateProfile {
    fn from(raw: RawProfile) -> Self {
        let profile = CandidateProfile::new(raw.skills, raw.experience_level, raw.career_focus);
        match raw.preferred_location {
            Some(location) => profile.with_preferred_location(location),
            None => profile,
        }
    }
}

impl CandidateProfile {
    pub fn new<S, F>(skills: S, experience_level: JobLevel, career_focus: F) -> Self
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        F: IntoIterator,
        F::Item: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for skill in skills {
            let skill = skill.as_ref().trim().to_lowercase();
            if !skill.is_empty() && !normalized.contains(&skill) {
                normalized.push(skill);
            }
        }

        let career_focus = career_focus
            .into_iter()
            .map(|f| f.as_ref().trim().to_string())
            .filter(|f| !f.is_empty())
            .collect();

        Self {
            skills: normalized,
            experience_level,
            career_focus,
            preferred_location: None,
        }
    }

    pub fn with_preferred_location(mut self, location: impl Into<String>) -> Self {
        let location = location.into();
        self.preferred_location = if location.trim().is_empty() {
            None
        } else {
            Some(location.trim().to_string())
        };
        self
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn experience_level(&self) -> JobLevel {
        self.experience_level
    }

    pub fn career_focus(&self) -> &[String] {
        &self.career_focus
    }

    pub fn preferred_location(&self) -> Option<&str> {
        self.preferred_location.as_deref()
    }

    /// Case-insensitive membership test.
    pub fn has_skill(&self, skill: &str) -> bool {
        let skill = skill.trim().to_lowercase();
        self.skills.iter().any(|s| *s == skill)
    }
}
