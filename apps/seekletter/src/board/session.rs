//! HTTP session against the job board, carrying the browser's credentials.

use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, COOKIE, ORIGIN, REFERER, USER_AGENT,
};
use reqwest::{Client, StatusCode};
use tracing::{error, info, warn};

use crate::board::credentials::SessionCredentials;
use crate::board::graphql::{GraphQlRequest, GraphQlResponse, SavedJobEdge, SavedJobsData};
use crate::board::{JobBoard, PageFetch};
use crate::config::BoardConfig;
use crate::errors::AppError;

pub const BOARD_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15)";
const SAVED_JOBS_PATH: &str = "/my-activity/saved-jobs";

/// One logged-in session: a `reqwest::Client` with bearer, cookie and
/// origin headers baked in, reused for the query and every detail page.
pub struct BoardSession {
    client: Client,
    config: BoardConfig,
}

impl BoardSession {
    pub fn new(
        credentials: &SessionCredentials,
        mut config: BoardConfig,
    ) -> Result<Self, AppError> {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        let headers = session_headers(credentials, &config)?;
        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self { client, config })
    }

    fn graphql_url(&self) -> String {
        format!("{}/graphql", self.config.base_url)
    }

    fn job_url(&self, job_id: &str) -> String {
        format!("{}/job/{}?ref=saved", self.config.base_url, job_id)
    }
}

pub fn saved_jobs_url(base_url: &str) -> String {
    format!("{}{SAVED_JOBS_PATH}", base_url.trim_end_matches('/'))
}

fn session_headers(
    credentials: &SessionCredentials,
    config: &BoardConfig,
) -> Result<HeaderMap, AppError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        header_value(&format!("Bearer {}", credentials.access_token.as_str()))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(REFERER, header_value(&saved_jobs_url(&config.base_url))?);
    headers.insert(ORIGIN, header_value(&config.base_url)?);
    headers.insert(USER_AGENT, HeaderValue::from_static(BOARD_USER_AGENT));
    if !credentials.cookies.is_empty() {
        headers.insert(COOKIE, header_value(&credentials.cookies.header_value())?);
    }
    Ok(headers)
}

fn header_value(value: &str) -> Result<HeaderValue, AppError> {
    let mut header = HeaderValue::from_str(value)
        .map_err(|e| AppError::Config(format!("Invalid header value: {e}")))?;
    header.set_sensitive(true);
    Ok(header)
}

#[async_trait]
impl JobBoard for BoardSession {
    async fn saved_jobs(&self) -> Result<Vec<SavedJobEdge>, AppError> {
        let payload = GraphQlRequest::saved_jobs(
            self.config.page_size,
            &self.config.locale,
            &self.config.timezone,
        );

        let response = self
            .client
            .post(self.graphql_url())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            error!("Saved-jobs query failed with {status}. Full response text: {body}");
            return Err(AppError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: GraphQlResponse<SavedJobsData> = serde_json::from_str(&body)?;
        if !parsed.errors.is_empty() {
            let message = parsed
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(AppError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let viewer = parsed
            .data
            .and_then(|d| d.viewer)
            .ok_or(AppError::SessionRejected)?;
        let edges = viewer.saved_jobs.map(|s| s.edges).unwrap_or_default();

        info!("Saved-jobs query returned {} jobs", edges.len());
        if edges.len() as u64 >= u64::from(self.config.page_size) {
            warn!(
                "Received a full page of {} saved jobs; later saved jobs are not fetched",
                self.config.page_size
            );
        }

        Ok(edges)
    }

    async fn job_page(&self, job_id: &str) -> PageFetch {
        let response = match self.client.get(self.job_url(job_id)).send().await {
            Ok(r) => r,
            Err(e) => return PageFetch::Failed(e.to_string()),
        };

        if response.status() != StatusCode::OK {
            return PageFetch::Status(response.status().as_u16());
        }

        match response.text().await {
            Ok(html) => PageFetch::Html(html),
            Err(e) => PageFetch::Failed(e.to_string()),
        }
    }
}
