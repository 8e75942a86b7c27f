use std::fmt::Write;

use crate::alerts::AlertDigest;

/// Plain-text digest suitable for an e-mail body or a chat notification.
pub fn render_digest(digest: &AlertDigest) -> String {
    let mut out = String::new();

    if digest.matches.is_empty() {
        let _ = writeln!(
            out,
            "No new job opportunities for {} ({}).",
            digest.user_id,
            digest.keywords.join(", ")
        );
        return out;
    }

    let _ = writeln!(
        out,
        "New Job Opportunities - {} match{} found!",
        digest.matches.len(),
        if digest.matches.len() == 1 { "" } else { "es" }
    );
    let _ = writeln!(out, "Keywords: {}", digest.keywords.join(", "));
    let _ = writeln!(out, "Checked: {}", digest.checked_at.format("%Y-%m-%d %H:%M UTC"));

    for (i, posting) in digest.matches.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}. {} at {} ({})",
            i + 1,
            posting.title,
            posting.company,
            posting.location
        );
        if let Some(score) = posting.match_score {
            let _ = writeln!(out, "   Match: {score:.0}%");
        }
        if let Some(salary) = &posting.salary_range {
            let _ = writeln!(out, "   Salary: {salary}");
        }
        let _ = writeln!(out, "   Apply: {}", posting.application_url);
    }

    out
}
