//! Extractor — finds the job-description block in a page's HTML.
//!
//! Order of attempts:
//! 1. the site's own selector table (first qualifying block wins),
//! 2. the generic selector table (same policy),
//! 3. a scan of every `div`, `section`, `article` and `p`, ranked by
//!    [`relevance::score`].
//!
//! A block qualifies only if it clears a length floor and the relevance gate.

use reqwest::Url;
use scraper::{node::Node, ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::extraction::normalize::normalize;
use crate::extraction::relevance::{is_job_description_like, score};
use crate::extraction::sites::{JobSite, GENERIC_SELECTORS};

/// Length floor for blocks matched by a selector.
pub const MIN_SELECTOR_CHARS: usize = 200;
/// Length floor for blocks found by the whole-page scan.
pub const MIN_CANDIDATE_CHARS: usize = 300;

const CANDIDATE_ELEMENTS: &str = "div, section, article, p";

/// How far below a block [`visible_text`] descends.
pub const MAX_TEXT_DEPTH: usize = 256;

const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head"];

const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "section", "article", "main", "aside", "header", "footer", "nav", "ul", "ol",
    "li", "dl", "dt", "dd", "table", "tr", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote",
    "pre",
];

/// The page handed to the extractor.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    pub url: String,
    pub html: String,
}

impl PageSnapshot {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }

    /// Lowercased hostname. Falls back to the raw string when it is not a URL,
    /// so a bare hostname works too.
    pub fn hostname(&self) -> String {
        Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_lowercase))
            .unwrap_or_else(|| self.url.trim().to_lowercase())
    }
}

/// A block that passed the gate, plus how it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedBlock {
    pub text: String,
    pub site: JobSite,
    /// The selector that matched, or `None` for the whole-page scan.
    pub selector: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    Found(ExtractedBlock),
    NotFound,
}

/// Returns the page's job-description block, or `NotFound`. Never fails.
pub fn extract_job_description(page: &PageSnapshot) -> ExtractionOutcome {
    let site = JobSite::from_hostname(&page.hostname());
    let document = Html::parse_document(&page.html);

    let found = first_qualifying(&document, site.selectors())
        .or_else(|| first_qualifying(&document, GENERIC_SELECTORS))
        .map(|(text, selector)| ExtractedBlock {
            text,
            site,
            selector: Some(selector),
        })
        .or_else(|| {
            best_scoring_block(&document).map(|text| ExtractedBlock {
                text,
                site,
                selector: None,
            })
        });

    match found {
        Some(block) => {
            debug!(
                "Extracted {} chars from {:?} via {}",
                block.text.chars().count(),
                block.site,
                block.selector.unwrap_or("page scan")
            );
            ExtractionOutcome::Found(block)
        }
        None => {
            debug!("No job description found on {}", page.url);
            ExtractionOutcome::NotFound
        }
    }
}

/// First element, across selectors in order, whose text qualifies.
fn first_qualifying(
    document: &Html,
    selectors: &'static [&'static str],
) -> Option<(String, &'static str)> {
    for &raw in selectors {
        let selector = match Selector::parse(raw) {
            Ok(s) => s,
            Err(e) => {
                warn!("Selector failed: {raw}: {e:?}");
                continue;
            }
        };

        for element in document.select(&selector) {
            let text = normalize(&visible_text(element));
            if text.chars().count() > MIN_SELECTOR_CHARS && is_job_description_like(&text) {
                return Some((text, raw));
            }
        }
    }
    None
}

/// Highest-scoring gated candidate among all block elements. Ties keep the
/// earlier element in document order.
fn best_scoring_block(document: &Html) -> Option<String> {
    let selector = Selector::parse(CANDIDATE_ELEMENTS).ok()?;

    let mut best: Option<(f64, String)> = None;
    for element in document.select(&selector) {
        let text = normalize(&visible_text(element));
        if text.chars().count() <= MIN_CANDIDATE_CHARS || !is_job_description_like(&text) {
            continue;
        }
        let candidate_score = score(&text);
        match &best {
            Some((best_score, _)) if *best_score >= candidate_score => {}
            _ => best = Some((candidate_score, text)),
        }
    }
    best.map(|(_, text)| text)
}

/// Rendered-ish text of an element: skips scripts and styles, breaks lines
/// around block elements. Nodes more than [`MAX_TEXT_DEPTH`] levels below
/// `element` are left out.
pub fn visible_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    // `None` marks the end of a block element.
    let mut stack = Vec::new();
    stack.extend(element.children().rev().map(|child| Some((child, 1))));

    while let Some(step) = stack.pop() {
        let Some((node, depth)) = step else {
            out.push('\n');
            continue;
        };
        match node.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                let name = el.name();
                if SKIPPED_ELEMENTS.contains(&name) {
                    continue;
                }
                if name == "br" {
                    out.push('\n');
                    continue;
                }
                if BLOCK_ELEMENTS.contains(&name) {
                    out.push('\n');
                    stack.push(None);
                }
                if depth < MAX_TEXT_DEPTH {
                    stack.extend(node.children().rev().map(|child| Some((child, depth + 1))));
                }
            }
            _ => {}
        }
    }
    out
}
