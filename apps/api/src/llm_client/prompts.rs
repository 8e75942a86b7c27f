// Shared prompt fragments. Each module that talks to the LLM keeps its own
// prompts.rs alongside it and pulls cross-cutting pieces from here.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured career assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction appended to every prompt that rewrites candidate material.
pub const TRUTHFULNESS_INSTRUCTION: &str = "\
    CRITICAL: Stay truthful to the source material. Do NOT invent employers, titles, \
    dates, degrees, certifications or metrics that are not present in the resume. \
    Rephrase and reorder; never fabricate.";

/// Upper bound on resume characters embedded in a prompt.
pub const RESUME_EXCERPT_CHARS: usize = 4000;
/// Upper bound on posting description characters embedded in a prompt.
pub const DESCRIPTION_EXCERPT_CHARS: usize = 1500;

/// Truncates on a char boundary, appending an ellipsis when text was cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_keeps_short_text() {
        assert_eq!(excerpt("  short  ", 10), "short");
    }

    #[test]
    fn test_excerpt_cuts_on_char_boundary() {
        assert_eq!(excerpt("héllo wörld", 5), "héllo...");
    }
}
