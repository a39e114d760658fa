//! Bullet synthesizer — the local path used when no hosted model is configured.
//!
//! Rewrites up to five resume lines around the job's keywords and pads the
//! result with keyword-based filler so the user always gets a usable set.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Lines this short or shorter are not worth rewriting.
const MIN_LINE_CHARS: usize = 20;
const MAX_REWRITTEN_LINES: usize = 5;
/// Filler is added until at least this many points exist.
const MIN_POINTS: usize = 4;

pub const BULLET_PREFIX: &str = "• ";
const BULLET_GLYPHS: &[char] = &['•', '-', '*'];

pub const ACTION_VERBS: [&str; 15] = [
    "Developed",
    "Implemented",
    "Designed",
    "Led",
    "Managed",
    "Created",
    "Built",
    "Optimized",
    "Improved",
    "Delivered",
    "Streamlined",
    "Launched",
    "Analyzed",
    "Engineered",
    "Spearheaded",
];

static ANCHOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(experience|skills|work|projects?)\b").unwrap());

/// Builds bullet points from the resume and ranked job keywords.
///
/// `_style` is accepted so callers can pass the full profile; the local
/// algorithm does not use it.
pub fn synthesize_bullets(resume: &str, keywords: &[String], _style: &str) -> Vec<String> {
    let mut points: Vec<String> = resume
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().count() > MIN_LINE_CHARS)
        .take(MAX_REWRITTEN_LINES)
        .enumerate()
        .map(|(i, line)| rewrite_line(line, keywords, i))
        .collect();

    let mut i = points.len();
    while points.len() < MIN_POINTS && !keywords.is_empty() {
        let keyword = &keywords[i % keywords.len()];
        let verb = ACTION_VERBS[i % ACTION_VERBS.len()];
        points.push(format!(
            "{BULLET_PREFIX}{verb} innovative solutions using {keyword} technologies to drive business growth"
        ));
        i += 1;
    }

    points
}

fn rewrite_line(line: &str, keywords: &[String], i: usize) -> String {
    let mut text = strip_bullet(line).to_string();

    if !keywords.is_empty() {
        let keyword = &keywords[i % keywords.len()];
        if !text.to_lowercase().contains(&keyword.to_lowercase()) {
            text = ANCHOR_RE
                .replacen(&text, 1, |caps: &Captures| format!("{keyword} {}", &caps[1]))
                .into_owned();
        }
    }

    if !starts_with_action_verb(&text) {
        let verb = ACTION_VERBS[i % ACTION_VERBS.len()];
        text = format!("{verb} {}", lowercase_first(&text));
    }

    format!("{BULLET_PREFIX}{text}")
}

/// Removes one leading `•`, `-` or `*` and the whitespace after it.
pub fn strip_bullet(line: &str) -> &str {
    let line = line.trim_start();
    line.strip_prefix(BULLET_GLYPHS).unwrap_or(line).trim_start()
}

fn starts_with_action_verb(text: &str) -> bool {
    let first_word = text
        .split_whitespace()
        .next()
        .unwrap_or("")
        .trim_end_matches(|c: char| !c.is_alphanumeric());
    ACTION_VERBS
        .iter()
        .any(|verb| verb.eq_ignore_ascii_case(first_word))
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
