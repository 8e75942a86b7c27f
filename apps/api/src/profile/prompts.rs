// Prompt templates for resume analysis.

/// Resume analysis prompt. Replace `{resume_text}` before sending.
pub const RESUME_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following resume.

Resume:
{resume_text}

Return a JSON object with this EXACT schema (no extra fields):
{
  "skills": ["python", "kafka"],
  "experience_level": "entry | mid | senior | lead | executive",
  "career_focus": ["Data Engineering"],
  "strengths": ["..."],
  "improvement_areas": ["..."],
  "ats_score": 7,
  "summary": "Two or three sentences."
}

Rules:
- "skills": concrete technologies, languages and tools only, lower-case.
- "experience_level": pick exactly one of the listed values.
- "career_focus": at most three broad areas, most prominent first.
- "ats_score": integer 1-10 for how well an applicant tracking system would parse the resume."#;
