// Prompt templates for resume optimization and cover letters.
// Cross-cutting fragments (truthfulness, excerpt sizes) live in llm_client::prompts.

/// System prompt for free-text writing calls.
pub const WRITER_SYSTEM: &str = "You are an experienced career coach and professional writer. \
    Respond with the requested document only: no preamble, no closing remarks, \
    no markdown code fences.";

/// Resume optimization prompt. Replace `{focus_instruction}`, `{truthfulness}`,
/// `{resume_text}`, `{title}`, `{company}`, `{requirements}`, `{description}`.
pub const OPTIMIZE_PROMPT_TEMPLATE: &str = r#"Optimize the following resume for the target job. Keep the same overall format.

Focus: {focus_instruction}

{truthfulness}

Original resume:
{resume_text}

Target job:
Title: {title}
Company: {company}
Requirements:
{requirements}
Description: {description}

Return the complete optimized resume text."#;

/// Cover letter prompt. Replace `{tone}`, `{length_instruction}`, `{truthfulness}`,
/// `{candidate_name}`, `{title}`, `{company}`, `{requirements}`, `{description}`,
/// `{resume_text}`.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Write a cover letter for this job application with a {tone} tone.

Job details:
- Title: {title}
- Company: {company}
- Requirements:
{requirements}
- Description: {description}

Candidate: {candidate_name}
Resume:
{resume_text}

The letter should:
1. Be {length_instruction}
2. Show genuine interest in the role
3. Highlight the experience and skills most relevant to the requirements
4. Close with a clear call to action

{truthfulness}

Format it as a business letter signed by {candidate_name}."#;

pub fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        return "(none listed)".to_string();
    }
    items
        .iter()
        .map(|item| format!("  * {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}
