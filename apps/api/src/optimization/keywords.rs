//! Keyword extraction — frequency-ranked content words of a text.

use std::collections::{HashMap, HashSet};

/// How many keywords [`extract_keywords`] returns at most.
pub const MAX_KEYWORDS: usize = 20;
/// Tokens this short or shorter are dropped.
const MIN_TOKEN_CHARS: usize = 3;

const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "her", "was",
    "one", "our", "out", "day", "get", "has", "him", "his", "how", "its", "may", "new", "now",
    "old", "see", "two", "who", "did", "let", "put", "say", "she", "too", "use", "way",
    "will", "with", "this", "that", "from", "they", "have", "been", "were", "said", "each",
    "which", "their", "what", "when", "where", "there", "about", "would", "could", "should",
    "into", "than", "then", "them", "these", "those", "some", "such", "only", "other", "also",
    "over", "very", "just", "your", "more", "most", "make", "like", "well", "using", "able",
    "within", "while", "being", "both", "must", "does", "here", "upon",
];

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Lowercased tokens split on non-word characters, short tokens and
/// stopwords removed, in order of appearance.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_lowercase)
        .filter(|t| !is_stopword(t))
        .collect()
}

/// Top [`MAX_KEYWORDS`] tokens by descending count. Equal counts keep
/// first-seen order.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut order: Vec<(String, u32)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for token in tokenize(text) {
        match index.get(&token) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(token.clone(), order.len());
                order.push((token, 1));
            }
        }
    }

    // stable sort keeps first-seen order among ties
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(token, _)| token)
        .collect()
}

/// Job keywords, with those the resume also mentions moved to the front.
/// Ranking is otherwise preserved.
pub fn prioritize_keywords(job_description: &str, resume: &str) -> Vec<String> {
    let resume_keywords: HashSet<String> = tokenize(resume).into_iter().collect();
    let (shared, rest): (Vec<String>, Vec<String>) = extract_keywords(job_description)
        .into_iter()
        .partition(|kw| resume_keywords.contains(kw));
    shared.into_iter().chain(rest).collect()
}
