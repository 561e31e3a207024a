//! Letter Generator — one cover letter per collected job.
//!
//! Flow per folder: skip if lettered → load metadata + description →
//! skip placeholder descriptions → render prompt → chat model →
//! write `cover_letter.tex`.
//!
//! Every per-job failure is logged and counted; none aborts the batch.
//! Only an unreadable store root is fatal.

use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::letters::template::PromptTemplate;
use crate::llm_client::prompts::COVER_LETTER_SYSTEM;
use crate::llm_client::ChatModel;
use crate::models::is_placeholder_description;
use crate::store::{JobFolder, JobStore};

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Render prompts and report what would be generated, without calling the model.
    pub dry_run: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    pub generated: usize,
    pub already_done: usize,
    /// Folders with missing, malformed, or placeholder inputs.
    pub skipped: usize,
    /// Model errors and empty completions.
    pub failed: usize,
    /// Jobs that would have been generated in a dry run.
    pub pending: usize,
}

#[derive(Debug)]
enum Outcome {
    Generated(PathBuf),
    AlreadyDone,
    Skipped(String),
    Failed(String),
    Pending,
}

/// Inputs shared by every job in one run.
pub struct LetterContext<'a> {
    pub template: &'a PromptTemplate,
    pub cv_text: &'a str,
    pub model: &'a dyn ChatModel,
}

pub async fn generate_letters(
    store: &JobStore,
    ctx: &LetterContext<'_>,
    options: &GenerateOptions,
) -> Result<GenerationSummary, AppError> {
    let folders = store.folders().map_err(|e| {
        AppError::Config(format!(
            "Cannot read job store {}: {e}",
            store.root().display()
        ))
    })?;
    info!("Found {} job folders in {}", folders.len(), store.root().display());

    let mut summary = GenerationSummary::default();
    for folder in &folders {
        let name = folder.name();
        match process_folder(folder, ctx, options).await {
            Outcome::Generated(path) => {
                info!("Saved cover letter for {name} to {}", path.display());
                summary.generated += 1;
            }
            Outcome::AlreadyDone => {
                info!("Cover letter already exists for {name}, skipping");
                summary.already_done += 1;
            }
            Outcome::Skipped(reason) => {
                warn!("Skipping {name}: {reason}");
                summary.skipped += 1;
            }
            Outcome::Failed(reason) => {
                error!("Failed for {name}: {reason}");
                summary.failed += 1;
            }
            Outcome::Pending => {
                info!("Would generate a cover letter for {name}");
                summary.pending += 1;
            }
        }
    }

    Ok(summary)
}

async fn process_folder(
    folder: &JobFolder,
    ctx: &LetterContext<'_>,
    options: &GenerateOptions,
) -> Outcome {
    if folder.has_cover_letter() {
        return Outcome::AlreadyDone;
    }

    let inputs = folder
        .read_metadata()
        .and_then(|metadata| Ok((metadata, folder.read_description()?)));
    let (metadata, description) = match inputs {
        Ok(inputs) => inputs,
        Err(e) => return Outcome::Skipped(e.to_string()),
    };
    if is_placeholder_description(&description) {
        return Outcome::Skipped(format!(
            "no job description collected ({}), run collect again",
            description.trim()
        ));
    }

    let prompt = match ctx.template.render(&metadata, &description, ctx.cv_text) {
        Ok(prompt) => prompt,
        Err(e) => return Outcome::Skipped(e.to_string()),
    };

    if options.dry_run {
        return Outcome::Pending;
    }

    info!("Generating letter for: {} ({})", metadata.title, metadata.company);
    let letter = match ctx.model.complete(COVER_LETTER_SYSTEM, &prompt).await {
        Ok(Some(letter)) if !letter.trim().is_empty() => letter,
        Ok(_) => return Outcome::Failed("no letter returned".to_string()),
        Err(e) => return Outcome::Failed(e.to_string()),
    };

    match folder.write_cover_letter(&letter) {
        Ok(path) => Outcome::Generated(path),
        Err(AppError::Io(e)) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            Outcome::AlreadyDone
        }
        Err(e) => Outcome::Failed(e.to_string()),
    }
}
