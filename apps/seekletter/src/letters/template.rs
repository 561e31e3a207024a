//! Prompt template rendering (Jinja syntax via minijinja).

use std::path::Path;

use minijinja::{context, Environment};

use crate::errors::AppError;
use crate::models::JobMetadata;

/// A prompt blueprint such as:
///
/// ```text
/// Write a cover letter for {{ job_title }} at {{ employer }}.
/// {{ job_description }}
/// {{ cv_text }}
/// ```
///
/// Also available: `job_id`, `location`, `salary`, `posted`, `teaser`.
/// Undefined variables render as empty strings.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    source: String,
}

impl PromptTemplate {
    /// Parses `source` up front so syntax errors surface before any API call.
    pub fn new(source: impl Into<String>) -> Result<Self, AppError> {
        let source = source.into();
        Environment::new().template_from_str(&source)?;
        Ok(Self { source })
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!(
                "Cannot read prompt template {}: {e}",
                path.display()
            ))
        })?;
        Self::new(source)
    }

    pub fn render(
        &self,
        metadata: &JobMetadata,
        job_description: &str,
        cv_text: &str,
    ) -> Result<String, AppError> {
        let env = Environment::new();
        let template = env.template_from_str(&self.source)?;
        let rendered = template.render(context! {
            job_id => metadata.id,
            job_title => metadata.title,
            employer => metadata.company,
            location => metadata.location,
            salary => metadata.salary,
            posted => metadata.posted,
            teaser => metadata.teaser,
            job_description => job_description,
            cv_text => cv_text,
        })?;
        Ok(rendered)
    }
}
