use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Seniority of a posting or a candidate. Ordered from most junior to most senior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobLevel {
    Entry,
    #[default]
    Mid,
    Senior,
    Lead,
    Executive,
}

impl JobLevel {
    pub const ALL: [JobLevel; 5] = [
        JobLevel::Entry,
        JobLevel::Mid,
        JobLevel::Senior,
        JobLevel::Lead,
        JobLevel::Executive,
    ];

    /// Position on the seniority ladder; `Entry` is 0.
    pub fn ordinal(self) -> u8 {
        match self {
            JobLevel::Entry => 0,
            JobLevel::Mid => 1,
            JobLevel::Senior => 2,
            JobLevel::Lead => 3,
            JobLevel::Executive => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobLevel::Entry => "entry",
            JobLevel::Mid => "mid",
            JobLevel::Senior => "senior",
            JobLevel::Lead => "lead",
            JobLevel::Executive => "executive",
        }
    }

    /// Lenient parse of free-form labels returned by analysis backends
    /// ("Senior", "mid-level", "junior", ...).
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        if label.is_empty() {
            return None;
        }
        if label.starts_with("entry") || label.starts_with("junior") || label == "intern" {
            Some(JobLevel::Entry)
        } else if label.starts_with("mid") || label == "intermediate" {
            Some(JobLevel::Mid)
        } else if label.starts_with("senior") || label == "sr" {
            Some(JobLevel::Senior)
        } else if label.starts_with("lead") || label.starts_with("principal") || label == "staff" {
            Some(JobLevel::Lead)
        } else if label.starts_with("exec") || label == "director" || label == "vp" {
            Some(JobLevel::Executive)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Remote,
    Hybrid,
}

/// A single job opening as reported by a job source.
///
/// `match_score` is unset when the posting leaves a source and is written
/// exactly once by the ranking pipeline through [`JobPosting::with_score`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub source: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: JobType,
    pub level: JobLevel,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub salary_range: Option<String>,
    #[serde(default)]
    pub posted_date: Option<DateTime<Utc>>,
    pub application_url: String,
    #[serde(default)]
    pub match_score: Option<f64>,
}

impl JobPosting {
    /// Returns the posting with its match score assigned.
    pub fn with_score(mut self, score: f64) -> Self {
        self.match_score = Some(score);
        self
    }

    /// Score used for ordering; unscored postings sort as 0.
    pub fn ordering_score(&self) -> f64 {
        self.match_score.unwrap_or(0.0)
    }

    /// Name of the first required field that is blank, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.title.trim().is_empty() {
            Some("title")
        } else if self.company.trim().is_empty() {
            Some("company")
        } else if self.application_url.trim().is_empty() {
            Some("application_url")
        } else {
            None
        }
    }

    pub fn is_remote(&self) -> bool {
        self.job_type == JobType::Remote || self.location.to_lowercase().contains("remote")
    }

    /// Lower bound of `salary_range` in whole currency units, e.g.
    /// "$120,000 - $160,000" → 120000.
    pub fn salary_floor(&self) -> Option<u64> {
        let range = self.salary_range.as_deref()?;
        let first = range.split('-').next()?;
        let digits: String = first.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return None;
        }
        let mut value: u64 = digits.parse().ok()?;
        if first.to_lowercase().trim_end().ends_with('k') {
            value *= 1000;
        }
        Some(value)
    }
}
