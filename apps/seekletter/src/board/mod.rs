// Job board integration: credentials from the browser, the GraphQL
// saved-jobs query, and detail-page scraping.

pub mod browser;
pub mod credentials;
pub mod extract;
pub mod graphql;
pub mod session;

use async_trait::async_trait;

use crate::errors::AppError;

pub use credentials::{acquire_credentials, CredentialSource, SessionCredentials};
pub use extract::{DescriptionExtractor, JobAdDetailsExtractor};
pub use graphql::SavedJobEdge;
pub use session::BoardSession;

/// Outcome of fetching one job's detail page. Never an error: a failed page
/// becomes placeholder text, not a failed batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageFetch {
    Html(String),
    /// Server answered with something other than 200.
    Status(u16),
    /// Request never completed.
    Failed(String),
}

/// The remote side of the collector.
#[async_trait]
pub trait JobBoard: Send + Sync {
    /// The first page of the user's saved jobs. Errors here are fatal.
    async fn saved_jobs(&self) -> Result<Vec<SavedJobEdge>, AppError>;

    async fn job_page(&self, job_id: &str) -> PageFetch;
}
