//! Per-site selector tables and job-page URL detection.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Job boards with hand-tuned selector lists. Everything else is `Generic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobSite {
    LinkedIn,
    Indeed,
    Glassdoor,
    Wellfound,
    StackOverflow,
    Generic,
}

const LINKEDIN_SELECTORS: &[&str] = &[
    "[data-job-details] .jobs-description__content",
    ".jobs-search__job-details--container .jobs-description-content__text",
    ".jobs-description-content__text",
    ".jobs-box__html-content",
    ".jobs-description__content .jobs-description-content__text",
    // dynamic-content containers
    "[class*=\"jobs-description\"]",
    "[class*=\"job-details\"]",
];

const INDEED_SELECTORS: &[&str] = &[
    ".jobsearch-JobComponent-description",
    ".jobsearch-jobDescriptionText",
    "#jobDescriptionText",
    ".jobsearch-JobMetadataHeader-item",
    ".jobsearch-JobComponent-description div",
];

const GLASSDOOR_SELECTORS: &[&str] = &[
    "[data-test=\"jobDescription\"]",
    ".jobDescriptionContent",
    ".desc",
    "#JobDescContainer",
    ".jobDescription",
];

const WELLFOUND_SELECTORS: &[&str] = &[
    "[data-test=\"JobDescription\"]",
    ".job_description",
    ".startup-job-description",
    ".component_a9eb2",
];

const STACKOVERFLOW_SELECTORS: &[&str] = &[
    ".job-description",
    ".job-details .mb32",
    "#overview + div",
    ".job-description-content",
];

/// Company career pages and anything else without a dedicated table.
pub const GENERIC_SELECTORS: &[&str] = &[
    "[class*=\"job-description\"]",
    "[class*=\"job_description\"]",
    "[class*=\"jobDescription\"]",
    "[id*=\"job-description\"]",
    "[id*=\"description\"]",
    "[class*=\"description\"]",
    "[class*=\"job-details\"]",
    "[class*=\"job_details\"]",
    "[class*=\"jobDetails\"]",
    "[class*=\"position-description\"]",
    "[class*=\"role-description\"]",
    "main article",
    "main section",
    ".content",
    ".main-content",
];

impl JobSite {
    /// Dispatches on a lowercased hostname substring.
    pub fn from_hostname(hostname: &str) -> Self {
        let host = hostname.to_lowercase();
        if host.contains("linkedin.com") {
            JobSite::LinkedIn
        } else if host.contains("indeed.com") {
            JobSite::Indeed
        } else if host.contains("glassdoor.com") {
            JobSite::Glassdoor
        } else if host.contains("angel.co") || host.contains("wellfound.com") {
            JobSite::Wellfound
        } else if host.contains("stackoverflow.com") {
            JobSite::StackOverflow
        } else {
            JobSite::Generic
        }
    }

    /// Site-specific selectors, most specific first. Empty for `Generic`,
    /// which goes straight to [`GENERIC_SELECTORS`].
    pub fn selectors(&self) -> &'static [&'static str] {
        match self {
            JobSite::LinkedIn => LINKEDIN_SELECTORS,
            JobSite::Indeed => INDEED_SELECTORS,
            JobSite::Glassdoor => GLASSDOOR_SELECTORS,
            JobSite::Wellfound => WELLFOUND_SELECTORS,
            JobSite::StackOverflow => STACKOVERFLOW_SELECTORS,
            JobSite::Generic => &[],
        }
    }
}

static JOB_PAGE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"linkedin\.com.*/jobs/",
        r"indeed\.com.*/viewjob",
        r"glassdoor\.com.*/job-listing",
        r"angel\.co.*/jobs",
        r"stackoverflow\.com.*/jobs",
        r"remote\.co/job",
        r"weworkremotely\.com.*/job",
        r"jobs\.",
        r"careers\.",
        r"career",
        r"job",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Whether a URL plausibly points at a job posting.
pub fn is_job_page(url: &str) -> bool {
    let url = url.to_lowercase();
    JOB_PAGE_PATTERNS.iter().any(|re| re.is_match(&url))
}
