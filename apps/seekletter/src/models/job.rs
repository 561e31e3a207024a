use serde::{Deserialize, Serialize};

/// Sentinel stored in place of optional job fields the board did not return.
pub const NOT_AVAILABLE: &str = "N/A";

/// Maximum characters of the board's abstract kept as the teaser.
pub const TEASER_MAX_CHARS: usize = 150;

/// Stored when the detail page loaded but had no description region.
pub const NO_DESCRIPTION: &str = "[No description found]";
/// Start of the text stored when the detail page could not be fetched.
pub const FETCH_FAILED_PREFIX: &str = "[Failed to fetch job page:";

/// True for descriptions the collector wrote in place of real advert text.
pub fn is_placeholder_description(description: &str) -> bool {
    let description = description.trim();
    description == NO_DESCRIPTION || description.starts_with(FETCH_FAILED_PREFIX)
}

/// One saved job as collected from the board, description included.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRecord {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub posted: Option<String>,
    pub teaser: String,
    pub description: String,
}

impl JobRecord {
    pub fn metadata(&self) -> JobMetadata {
        JobMetadata {
            id: self.id.clone(),
            title: self.title.clone(),
            company: self.company.clone(),
            location: or_sentinel(&self.location),
            salary: or_sentinel(&self.salary),
            posted: or_sentinel(&self.posted),
            teaser: self.teaser.chars().take(TEASER_MAX_CHARS).collect(),
        }
    }
}

/// The `metadata.json` document in a job folder.
///
/// Reading is lenient: older folders used `job_title` / `employer`, and any
/// field may be missing. Writing always emits the canonical key set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMetadata {
    #[serde(default)]
    pub id: String,
    #[serde(default = "unknown_title", alias = "job_title")]
    pub title: String,
    #[serde(default = "unknown_employer", alias = "employer")]
    pub company: String,
    #[serde(default = "not_available")]
    pub location: String,
    #[serde(default = "not_available")]
    pub salary: String,
    #[serde(default = "not_available")]
    pub posted: String,
    #[serde(default)]
    pub teaser: String,
}

fn or_sentinel(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

fn unknown_title() -> String {
    "Unknown Title".to_string()
}

fn unknown_employer() -> String {
    "Unknown Employer".to_string()
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}
