//! Live `CredentialSource` backed by a headed Chrome profile (CDP via chromiumoxide).
//!
//! The profile directory keeps the board's login between runs, so a manual
//! login is only needed the first time (`collect --login`).

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::board::credentials::{
    find_access_token, AccessToken, Cookie, CookieSet, CredentialSource,
};
use crate::errors::AppError;

/// Returns every localStorage entry as `[key, value]` pairs.
const LOCAL_STORAGE_ENTRIES_JS: &str = "Object.entries(window.localStorage)";

/// Time given to the page's session JS to populate storage after load.
pub const DEFAULT_SETTLE: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct BrowserOptions {
    pub profile_dir: PathBuf,
    pub chrome_executable: Option<PathBuf>,
    pub settle: Duration,
}

impl BrowserOptions {
    pub fn new(profile_dir: impl Into<PathBuf>) -> Self {
        Self {
            profile_dir: profile_dir.into(),
            chrome_executable: std::env::var("CHROME_BIN").ok().map(PathBuf::from),
            settle: DEFAULT_SETTLE,
        }
    }
}

pub struct ChromeCredentialSource {
    browser: Browser,
    handler_task: JoinHandle<()>,
    page: Page,
    settle: Duration,
}

impl ChromeCredentialSource {
    pub async fn launch(options: &BrowserOptions) -> Result<Self, AppError> {
        let mut builder = BrowserConfig::builder()
            .with_head()
            .user_data_dir(&options.profile_dir)
            .arg("--no-first-run")
            .arg("--disable-extensions")
            .arg("--disable-popup-blocking")
            .arg("--start-maximized")
            .arg("--disable-blink-features=AutomationControlled");

        if let Some(chrome) = &options.chrome_executable {
            info!("Using custom Chrome binary: {}", chrome.display());
            builder = builder.chrome_executable(chrome);
        }

        let config = builder
            .build()
            .map_err(|e| AppError::Browser(format!("Failed to build browser config: {e}")))?;

        info!(
            "Launching Chrome with profile {}",
            options.profile_dir.display()
        );
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| AppError::Browser(format!("Failed to launch browser: {e}")))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    error!("Browser handler error (ignoring): {e}");
                }
            }
            debug!("Browser handler task ended");
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| AppError::Browser(format!("Failed to create page: {e}")))?;

        Ok(Self {
            browser,
            handler_task,
            page,
            settle: options.settle,
        })
    }

    /// Navigates and waits for the page's own scripts to settle.
    pub async fn open(&self, url: &str) -> Result<(), AppError> {
        info!("Navigating to {url}");
        self.page
            .goto(url)
            .await
            .map_err(|e| AppError::Browser(format!("Navigation to {url} failed: {e}")))?;
        tokio::time::sleep(self.settle).await;
        Ok(())
    }

    async fn local_storage_entries(&self) -> Result<Vec<(String, String)>, AppError> {
        self.page
            .evaluate(LOCAL_STORAGE_ENTRIES_JS)
            .await
            .map_err(|e| AppError::Browser(format!("Reading localStorage failed: {e}")))?
            .into_value::<Vec<(String, String)>>()
            .map_err(AppError::Json)
    }

    pub async fn close(mut self) -> Result<(), AppError> {
        self.browser
            .close()
            .await
            .map_err(|e| AppError::Browser(format!("Error closing browser: {e}")))?;
        self.handler_task
            .await
            .map_err(|e| AppError::Browser(format!("Error awaiting handler: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl CredentialSource for ChromeCredentialSource {
    async fn access_token(&self) -> Result<AccessToken, AppError> {
        let entries = self.local_storage_entries().await?;
        debug!("localStorage holds {} entries", entries.len());

        let (key, token) = find_access_token(&entries).ok_or(AppError::CredentialsNotFound)?;
        info!("Token found under key: {key}");
        Ok(token)
    }

    async fn cookies(&self) -> Result<CookieSet, AppError> {
        let cookies = self
            .page
            .get_cookies()
            .await
            .map_err(|e| AppError::Browser(format!("Get cookies failed: {e}")))?;

        Ok(cookies
            .into_iter()
            .map(|c| Cookie {
                name: c.name,
                value: c.value,
            })
            .collect())
    }
}
