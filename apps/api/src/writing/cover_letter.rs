use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::llm_client::prompts::{
    excerpt, DESCRIPTION_EXCERPT_CHARS, RESUME_EXCERPT_CHARS, TRUTHFULNESS_INSTRUCTION,
};
use crate::llm_client::{CallOptions, LlmClient};
use crate::models::job::JobPosting;
use crate::models::profile::CandidateProfile;
use crate::profile::vocabulary::mentions;
use crate::writing::prompts::{bullet_list, COVER_LETTER_PROMPT_TEMPLATE, WRITER_SYSTEM};
use crate::writing::templates::{
    tidy, CREATIVE_TEMPLATE, ENTHUSIASTIC_TEMPLATE, PROFESSIONAL_TEMPLATE,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverLetterTone {
    #[default]
    Professional,
    Enthusiastic,
    Creative,
}

impl CoverLetterTone {
    pub fn as_str(self) -> &'static str {
        match self {
            CoverLetterTone::Professional => "professional",
            CoverLetterTone::Enthusiastic => "enthusiastic",
            CoverLetterTone::Creative => "creative",
        }
    }

    fn template(self) -> &'static str {
        match self {
            CoverLetterTone::Professional => PROFESSIONAL_TEMPLATE,
            CoverLetterTone::Enthusiastic => ENTHUSIASTIC_TEMPLATE,
            CoverLetterTone::Creative => CREATIVE_TEMPLATE,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl LetterLength {
    fn instruction(self) -> &'static str {
        match self {
            LetterLength::Short => "2 short paragraphs, under 200 words",
            LetterLength::Medium => "3-4 paragraphs",
            LetterLength::Long => "4-5 paragraphs with concrete examples",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterBackend {
    Llm,
    Template,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoverLetterRequest {
    pub candidate_name: String,
    pub resume_text: String,
    pub posting: JobPosting,
    #[serde(default)]
    pub tone: CoverLetterTone,
    #[serde(default)]
    pub length: LetterLength,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverLetter {
    pub content: String,
    pub tone: CoverLetterTone,
    pub length: LetterLength,
    pub word_count: usize,
    pub backend: LetterBackend,
}

impl CoverLetter {
    fn new(content: String, request: &CoverLetterRequest, backend: LetterBackend) -> Self {
        Self {
            word_count: content.split_whitespace().count(),
            content,
            tone: request.tone,
            length: request.length,
            backend,
        }
    }
}

/// Drafts a cover letter. Uses the LLM when one is configured and falls back to
/// the tone's built-in template when it is absent, fails or times out.
pub async fn draft_cover_letter(
    llm: Option<&LlmClient>,
    request: &CoverLetterRequest,
    profile: &CandidateProfile,
    timeout: Duration,
) -> CoverLetter {
    let Some(llm) = llm else {
        return render_template(request, profile);
    };

    let prompt = COVER_LETTER_PROMPT_TEMPLATE
        .replace("{tone}", request.tone.as_str())
        .replace("{length_instruction}", request.length.instruction())
        .replace("{truthfulness}", TRUTHFULNESS_INSTRUCTION)
        .replace("{candidate_name}", &request.candidate_name)
        .replace("{title}", &request.posting.title)
        .replace("{company}", &request.posting.company)
        .replace("{requirements}", &bullet_list(&request.posting.requirements))
        .replace(
            "{description}",
            &excerpt(&request.posting.description, DESCRIPTION_EXCERPT_CHARS),
        )
        .replace(
            "{resume_text}",
            &excerpt(&request.resume_text, RESUME_EXCERPT_CHARS),
        );

    let call = llm.call_text(&prompt, WRITER_SYSTEM, CallOptions::WRITING);
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(content)) => {
            info!(
                "Drafted {} cover letter for {}",
                request.tone.as_str(),
                request.posting.company
            );
            CoverLetter::new(content, request, LetterBackend::Llm)
        }
        Ok(Err(e)) => {
            warn!("Cover letter generation failed, using template: {e}");
            render_template(request, profile)
        }
        Err(_) => {
            warn!("Cover letter generation timed out after {timeout:?}, using template");
            render_template(request, profile)
        }
    }
}

/// Fills the tone's template from the posting and the candidate profile.
pub fn render_template(request: &CoverLetterRequest, profile: &CandidateProfile) -> CoverLetter {
    let posting = &request.posting;
    let requirement_text = format!("{} {}", posting.description, posting.requirements.join(" "));

    let matched: Vec<&str> = profile
        .skills()
        .iter()
        .filter(|skill| mentions(&requirement_text, skill))
        .map(String::as_str)
        .collect();

    let relevant_field = profile
        .career_focus()
        .first()
        .map(|f| f.to_lowercase())
        .unwrap_or_else(|| "software engineering".to_string());

    let experience_paragraph = match request.length {
        LetterLength::Short => String::new(),
        _ => format!(
            "As a {}-level professional, I have spent my career delivering work much like what this role describes: {}",
            profile.experience_level().as_str(),
            first_sentence(&posting.description).to_lowercase()
        ),
    };

    let skills_paragraph = if matched.is_empty() {
        format!(
            "I am eager to apply my skills to the challenges your {} team is taking on.",
            posting.title
        )
    } else {
        format!(
            "My hands-on experience with {} maps directly onto your requirements.",
            join_human(&matched)
        )
    };

    let extra_paragraph = match request.length {
        LetterLength::Long if !posting.requirements.is_empty() => format!(
            "In particular, your emphasis on \"{}\" stands out to me, and it is an area where I can contribute from day one.",
            posting.requirements[0]
        ),
        _ => String::new(),
    };

    let content = request
        .tone
        .template()
        .replace("{job_title}", &posting.title)
        .replace("{company_name}", &posting.company)
        .replace("{candidate_name}", &request.candidate_name)
        .replace("{relevant_field}", &relevant_field)
        .replace("{experience_paragraph}", &experience_paragraph)
        .replace("{skills_paragraph}", &skills_paragraph)
        .replace("{extra_paragraph}", &extra_paragraph);

    CoverLetter::new(tidy(&content), request, LetterBackend::Template)
}

fn first_sentence(text: &str) -> &str {
    let text = text.trim();
    match text.find(". ") {
        Some(end) => &text[..=end],
        None => text,
    }
}

/// "a", "a and b", "a, b and c".
fn join_human(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [one] => one.to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}
