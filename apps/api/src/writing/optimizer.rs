use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::{
    excerpt, DESCRIPTION_EXCERPT_CHARS, RESUME_EXCERPT_CHARS, TRUTHFULNESS_INSTRUCTION,
};
use crate::llm_client::{CallOptions, LlmClient};
use crate::models::job::JobPosting;
use crate::profile::vocabulary::{mentions, TECHNICAL_SKILLS};
use crate::writing::prompts::{bullet_list, OPTIMIZE_PROMPT_TEMPLATE, WRITER_SYSTEM};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationFocus {
    #[default]
    SkillsMatch,
    Keywords,
    AtsFriendly,
}

impl OptimizationFocus {
    fn instruction(self) -> &'static str {
        match self {
            OptimizationFocus::SkillsMatch => {
                "Highlight the skills and experience that match the job requirements \
                 and emphasize achievements that align with the role."
            }
            OptimizationFocus::Keywords => {
                "Mirror the job posting's terminology so the resume uses the same keywords \
                 for skills the candidate actually has."
            }
            OptimizationFocus::AtsFriendly => {
                "Use plain section headings, simple bullet points and no tables or columns \
                 so applicant tracking systems parse every section."
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizedResume {
    pub focus: OptimizationFocus,
    pub content: String,
    /// Technologies the posting asks for that the original resume never mentions.
    pub missing_keywords: Vec<String>,
}

/// Vocabulary skills named by the posting but absent from the resume.
pub fn missing_keywords(resume_text: &str, posting: &JobPosting) -> Vec<String> {
    let posting_text = format!(
        "{} {} {}",
        posting.title,
        posting.description,
        posting.requirements.join(" ")
    );
    TECHNICAL_SKILLS
        .iter()
        .filter(|skill| mentions(&posting_text, skill) && !mentions(resume_text, skill))
        .map(|skill| skill.to_string())
        .collect()
}

/// Rewrites a resume for one posting. Requires an LLM; there is no offline
/// rewrite, so a missing client is an error rather than a silent no-op.
pub async fn optimize_resume(
    llm: Option<&LlmClient>,
    resume_text: &str,
    posting: &JobPosting,
    focus: OptimizationFocus,
) -> Result<OptimizedResume, AppError> {
    let llm = llm.ok_or_else(|| {
        AppError::Llm("resume optimization needs a configured language model".to_string())
    })?;

    let prompt = OPTIMIZE_PROMPT_TEMPLATE
        .replace("{focus_instruction}", focus.instruction())
        .replace("{truthfulness}", TRUTHFULNESS_INSTRUCTION)
        .replace("{resume_text}", &excerpt(resume_text, RESUME_EXCERPT_CHARS))
        .replace("{title}", &posting.title)
        .replace("{company}", &posting.company)
        .replace("{requirements}", &bullet_list(&posting.requirements))
        .replace(
            "{description}",
            &excerpt(&posting.description, DESCRIPTION_EXCERPT_CHARS),
        );

    let content = llm
        .call_text(&prompt, WRITER_SYSTEM, CallOptions::WRITING)
        .await
        .map_err(|e| AppError::Llm(format!("Resume optimization failed: {e}")))?;

    info!(
        "Optimized resume for '{}' at {} ({:?})",
        posting.title, posting.company, focus
    );

    Ok(OptimizedResume {
        focus,
        content,
        missing_keywords: missing_keywords(resume_text, posting),
    })
}
