use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Share of sections a resume needs before it counts as complete.
const COMPLETE_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeSection {
    ContactInfo,
    Summary,
    Experience,
    Education,
    Skills,
}

impl ResumeSection {
    pub const ALL: [ResumeSection; 5] = [
        ResumeSection::ContactInfo,
        ResumeSection::Summary,
        ResumeSection::Experience,
        ResumeSection::Education,
        ResumeSection::Skills,
    ];

    fn keywords(self) -> &'static [&'static str] {
        match self {
            ResumeSection::ContactInfo => &[],
            ResumeSection::Summary => &["summary", "objective", "profile"],
            ResumeSection::Experience => &["experience", "work", "employment"],
            ResumeSection::Education => &["education", "degree", "university"],
            ResumeSection::Skills => &["skills", "technical", "technologies"],
        }
    }

    fn suggestion(self) -> &'static str {
        match self {
            ResumeSection::ContactInfo => "Add contact information (email, phone, LinkedIn)",
            ResumeSection::Summary => "Add a professional summary or objective",
            ResumeSection::Experience => "Include work experience section",
            ResumeSection::Education => "Add education background",
            ResumeSection::Skills => "List relevant technical skills",
        }
    }

    fn present_in(self, lowered: &str) -> bool {
        match self {
            ResumeSection::ContactInfo => has_email(lowered),
            _ => self.keywords().iter().any(|k| lowered.contains(k)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletenessReport {
    pub completeness_score: f64,
    pub sections_found: Vec<ResumeSection>,
    pub missing_sections: Vec<ResumeSection>,
    pub suggestions: Vec<String>,
    pub is_complete: bool,
}

/// Checks which of the expected resume sections are present.
pub fn check_completeness(resume_text: &str) -> CompletenessReport {
    let lowered = resume_text.to_lowercase();

    let (sections_found, missing_sections): (Vec<_>, Vec<_>) = ResumeSection::ALL
        .into_iter()
        .partition(|section| section.present_in(&lowered));

    let completeness_score = sections_found.len() as f64 / ResumeSection::ALL.len() as f64;
    let suggestions = missing_sections
        .iter()
        .map(|s| s.suggestion().to_string())
        .collect();

    CompletenessReport {
        completeness_score,
        sections_found,
        missing_sections,
        suggestions,
        is_complete: completeness_score >= COMPLETE_THRESHOLD,
    }
}

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
        .expect("email pattern is valid")
});

fn has_email(text: &str) -> bool {
    EMAIL.is_match(text)
}
