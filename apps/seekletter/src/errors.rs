use thiserror::Error;

/// Application-level error type.
/// Setup failures surface as one of these and abort the run; per-job failures
/// are logged by the pipelines and never bubble up.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Auth token not found in localStorage. Log in with `seekletter collect --login` first")]
    CredentialsNotFound,

    #[error("Job board rejected the session (viewer is null). The login has probably expired")]
    SessionRejected,

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_includes_status() {
        let err = AppError::Api {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "API error (status 502): bad gateway");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "metadata.json");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Io(_)));
    }
}
