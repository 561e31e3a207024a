use std::num::NonZeroU32;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_SEEK_BASE_URL: &str = "https://www.seek.co.nz";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Application configuration loaded from environment variables.
/// Only `OPENAI_API_KEY` is secret, and only `generate` requires it.
#[derive(Debug, Clone)]
pub struct Config {
    pub jobs_dir: PathBuf,
    pub prompt_path: PathBuf,
    pub cv_path: PathBuf,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub board: BoardConfig,
    pub rust_log: String,
}

/// Job board endpoint and query parameters.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub base_url: String,
    pub locale: String,
    pub timezone: String,
    pub page_size: u32,
    pub profile_dir: PathBuf,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SEEK_BASE_URL.to_string(),
            locale: "en-NZ".to_string(),
            timezone: "Pacific/Auckland".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            profile_dir: default_profile_dir(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = BoardConfig::default();
        let page_size = match std::env::var("SEEK_PAGE_SIZE") {
            Ok(raw) => parse_page_size(&raw)?,
            Err(_) => defaults.page_size,
        };

        Ok(Config {
            jobs_dir: env_path("JOBS_DIR", "jobs"),
            prompt_path: env_path("PROMPT_PATH", "prompts/prompt_template.txt"),
            cv_path: env_path("CV_PATH", "prompts/cv_full.txt"),
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            openai_model: env_or("OPENAI_MODEL", DEFAULT_MODEL),
            openai_base_url: env_or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            board: BoardConfig {
                base_url: env_or("SEEK_BASE_URL", &defaults.base_url),
                locale: env_or("SEEK_LOCALE", &defaults.locale),
                timezone: env_or("SEEK_TIMEZONE", &defaults.timezone),
                page_size,
                profile_dir: std::env::var("SEEK_PROFILE_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.profile_dir),
            },
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    /// The API key, or a descriptive error for commands that need it.
    pub fn require_openai_key(&self) -> Result<&str> {
        self.openai_api_key
            .as_deref()
            .context("Required environment variable 'OPENAI_API_KEY' is not set")
    }
}

fn parse_page_size(raw: &str) -> Result<u32> {
    let size = raw
        .trim()
        .parse::<NonZeroU32>()
        .context("SEEK_PAGE_SIZE must be a positive integer")?;
    Ok(size.get())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_path(key: &str, default: &str) -> PathBuf {
    PathBuf::from(env_or(key, default))
}

fn default_profile_dir() -> PathBuf {
    std::env::var("HOME")
        .map(|home| PathBuf::from(home).join(".seekbot-profile"))
        .unwrap_or_else(|_| PathBuf::from(".seekbot-profile"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_defaults_target_seek_nz() {
        let board = BoardConfig::default();
        assert_eq!(board.base_url, "https://www.seek.co.nz");
        assert_eq!(board.locale, "en-NZ");
        assert_eq!(board.timezone, "Pacific/Auckland");
        assert_eq!(board.page_size, 100);
        assert!(board.profile_dir.ends_with(".seekbot-profile"));
    }

    #[test]
    fn test_page_size_must_be_positive() {
        assert_eq!(parse_page_size("50").unwrap(), 50);
        assert_eq!(parse_page_size(" 20 ").unwrap(), 20);
        for raw in ["0", "-5", "lots", ""] {
            let err = parse_page_size(raw).unwrap_err();
            assert!(err.to_string().contains("SEEK_PAGE_SIZE"), "{raw}: {err}");
        }
    }

    #[test]
    fn test_require_openai_key_errors_when_missing() {
        let config = Config {
            jobs_dir: PathBuf::from("jobs"),
            prompt_path: PathBuf::from("p"),
            cv_path: PathBuf::from("c"),
            openai_api_key: None,
            openai_model: DEFAULT_MODEL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            board: BoardConfig::default(),
            rust_log: "info".to_string(),
        };
        let err = config.require_openai_key().unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}
