// Prompt templates for the LLM-backed match analyst.
// Placeholders in `{braces}` are filled with `str::replace` before sending.

/// Requirement coverage. Expects `{"coverage": <0-100>}`.
pub const COVERAGE_PROMPT_TEMPLATE: &str = r#"Judge how well a candidate's skills cover a job posting's requirements.

Candidate skills: {skills_json}

Posting title: {title}
Posting requirements: {requirements_json}

For each requirement decide whether the candidate's skills semantically satisfy it
(synonyms and closely related technologies count; unrelated skills do not).
coverage = (satisfied requirements / total requirements) * 100.
If the posting lists no requirements, judge coverage against the title alone.

Return a JSON object with this EXACT schema:
{"coverage": 75.0}"#;

/// Holistic fit not covered by skills, level or focus. Expects `{"fit": <0-100>}`.
pub const FIT_PROMPT_TEMPLATE: &str = r#"Judge the overall fit between a candidate and a job posting.

Candidate:
- Experience level: {candidate_level}
- Career focus: {focus_json}
- Preferred location: {preferred_location}

Posting:
- Title: {title}
- Company: {company}
- Location: {location}
- Job type: {job_type}
- Level: {posting_level}
- Salary range: {salary_range}
- Description: {description}

Consider ONLY factors that skills alignment, level match and career-focus overlap
do not already capture: location or remote compatibility, job type, how concrete
and credible the posting is, and anything in the description that clearly helps or
hurts the candidate.

Return a JSON object with this EXACT schema:
{"fit": 60.0}"#;

/// Skill-gap report. Expects the `SkillGapReport` JSON shape.
pub const SKILL_GAP_PROMPT_TEMPLATE: &str = r#"Recommend skill improvements for a candidate given current job-market trends.

Current skills: {skills_json}
Experience level: {candidate_level}
Career focus: {focus_json}
Relevant market trends: {trends_json}

Return a JSON object with this EXACT schema:
{
  "skills_to_add": ["skill"],
  "skills_to_improve": ["skill"],
  "certifications_to_consider": ["certification"],
  "learning_resources": [
    {"skill": "skill", "resources": ["resource"]}
  ],
  "priority_level": "high|medium|low",
  "explanation": "Why these improvements are recommended"
}

Only recommend skills the candidate does not already list under skills_to_add.
Keep every list to at most five entries."#;
