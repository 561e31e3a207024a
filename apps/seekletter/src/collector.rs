//! Job Collector — saved jobs from the board into the job store.
//!
//! Flow: saved_jobs query → per job: detail page → extract description →
//! write `metadata.json` + `job_description.txt`.
//!
//! Only the query itself can fail the run. A detail page that does not load
//! turns into placeholder text and the batch moves on.

use tracing::{debug, info};

use crate::board::{DescriptionExtractor, JobBoard, PageFetch, SavedJobEdge};
use crate::errors::AppError;
use crate::models::{is_placeholder_description, FETCH_FAILED_PREFIX, NO_DESCRIPTION};
use crate::store::{JobFolder, JobStore};

/// Preview length of the abstract in debug logs.
const PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, Default)]
pub struct CollectOptions {
    /// Re-fetch and rewrite jobs that are already collected.
    pub refresh: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectSummary {
    pub total: usize,
    pub saved: usize,
    pub already_collected: usize,
    /// Saved with a placeholder instead of a real description.
    pub placeholders: usize,
}

/// Turns a detail-page fetch into the text stored as the job description.
pub fn description_from_page(page: PageFetch, extractor: &dyn DescriptionExtractor) -> String {
    match page {
        PageFetch::Html(html) => extractor
            .extract(&html)
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        PageFetch::Status(code) => format!("{FETCH_FAILED_PREFIX} {code}]"),
        PageFetch::Failed(reason) => format!("{FETCH_FAILED_PREFIX} {reason}]"),
    }
}

/// A folder is left alone once collected, unless it only holds placeholder
/// text and has no letter yet.
fn is_settled(folder: &JobFolder) -> bool {
    folder.is_collected() && (folder.has_cover_letter() || !folder.has_placeholder_description())
}

fn log_preview(edge: &SavedJobEdge) {
    let job = &edge.node.job;
    let teaser: String = job.abstract_text().chars().take(PREVIEW_CHARS).collect();
    debug!(
        "{} | {} | {} | {} | {}...",
        job.title,
        job.company(),
        job.location_label().as_deref().unwrap_or("N/A"),
        job.posted_label().as_deref().unwrap_or("N/A"),
        teaser
    );
}

/// Runs the collector against `board`, writing into `store`.
pub async fn collect_saved_jobs(
    board: &dyn JobBoard,
    extractor: &dyn DescriptionExtractor,
    store: &JobStore,
    options: &CollectOptions,
) -> Result<CollectSummary, AppError> {
    let edges = board.saved_jobs().await?;
    store.ensure_root()?;

    let mut summary = CollectSummary {
        total: edges.len(),
        ..Default::default()
    };

    for (index, edge) in edges.into_iter().enumerate() {
        log_preview(&edge);
        let job = edge.node.job;

        let folder = store.folder_for(&job.id, &job.title);
        if !options.refresh && is_settled(&folder) {
            info!(
                "[{}/{}] Already collected: {}, skipping",
                index + 1,
                summary.total,
                folder.name()
            );
            summary.already_collected += 1;
            continue;
        }

        let page = board.job_page(&job.id).await;
        let description = description_from_page(page, extractor);
        if is_placeholder_description(&description) {
            summary.placeholders += 1;
        }

        let record = job.into_record(description);
        store.save_job(&record)?;
        summary.saved += 1;
        info!(
            "[{}/{}] Saved: {} ({})",
            index + 1,
            summary.total,
            record.title,
            record.company
        );
    }

    Ok(summary)
}
