use std::collections::HashSet;

use crate::models::job::JobPosting;

/// Identity of an opening across sources: normalized title and company.
pub type IdentityKey = (String, String);

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

pub fn identity_key(posting: &JobPosting) -> IdentityKey {
    (normalize(&posting.title), normalize(&posting.company))
}

/// Collapses postings that describe the same opening.
///
/// Keeps the first posting seen for each identity key and preserves input order,
/// so callers control precedence by concatenating sources primary-first.
pub fn dedupe(postings: Vec<JobPosting>) -> Vec<JobPosting> {
    let mut seen: HashSet<IdentityKey> = HashSet::with_capacity(postings.len());
    postings
        .into_iter()
        .filter(|p| seen.insert(identity_key(p)))
        .collect()
}
