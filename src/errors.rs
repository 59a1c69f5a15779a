use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search error: {0}")]
    Search(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No download URL: {0}")]
    NoDownloadUrl(String),

    #[error("Stream failure: {0}")]
    StreamFailure(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// True for the failure kinds a host bot treats as "nothing found"
    /// rather than an operational fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_) | AppError::Search(_))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
