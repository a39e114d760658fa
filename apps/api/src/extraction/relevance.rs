//! Relevance scoring — how much a block of text looks like a job description.
//!
//! Two independent checks:
//! - [`is_job_description_like`] is the hard gate (≥ 3 distinct trigger keywords).
//! - [`score`] ranks blocks that already passed the gate.

/// Minimum distinct trigger keywords for a block to be considered at all.
pub const MIN_TRIGGER_KEYWORDS: usize = 3;

const TRIGGER_KEYWORDS: &[&str] = &[
    "responsibilities",
    "requirements",
    "qualifications",
    "experience",
    "skills",
    "role",
    "position",
    "candidate",
    "job",
    "work",
    "team",
    "company",
    "opportunity",
    "looking for",
    "seeking",
    "years",
    "degree",
];

const KEYWORD_BONUSES: &[(&str, f64)] = &[
    ("responsibilities", 50.0),
    ("requirements", 50.0),
    ("qualifications", 40.0),
    ("experience", 30.0),
    ("skills", 30.0),
    ("years of experience", 40.0),
    ("bachelor", 20.0),
    ("master", 20.0),
    ("degree", 15.0),
    ("team", 10.0),
    ("role", 20.0),
    ("position", 20.0),
    ("candidate", 25.0),
    ("ideal candidate", 35.0),
    ("looking for", 30.0),
    ("seeking", 25.0),
    ("salary", 15.0),
    ("benefits", 10.0),
    ("remote", 10.0),
    ("hybrid", 10.0),
];

/// Markers of page chrome rather than posting content.
const BOILERPLATE_MARKERS: &[&str] = &["navigation", "menu", "header", "footer", "cookie", "privacy"];
const BOILERPLATE_PENALTY: f64 = 20.0;

/// Number of distinct trigger keywords present (case-insensitive substring match).
pub fn trigger_keyword_count(text: &str) -> usize {
    let lower = text.to_lowercase();
    TRIGGER_KEYWORDS
        .iter()
        .filter(|kw| lower.contains(*kw))
        .count()
}

/// The hard gate. Length plays no part.
pub fn is_job_description_like(text: &str) -> bool {
    trigger_keyword_count(text) >= MIN_TRIGGER_KEYWORDS
}

/// Length/10 plus keyword bonuses, minus a fixed penalty per boilerplate marker.
pub fn score(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let base = text.chars().count() as f64 / 10.0;

    let bonus: f64 = KEYWORD_BONUSES
        .iter()
        .filter(|(kw, _)| lower.contains(kw))
        .map(|(_, points)| points)
        .sum();

    let penalty = BOILERPLATE_MARKERS
        .iter()
        .filter(|marker| lower.contains(*marker))
        .count() as f64
        * BOILERPLATE_PENALTY;

    base + bonus - penalty
}
