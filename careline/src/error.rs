use thiserror::Error;

#[derive(Error, Debug)]
pub enum CarelineError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream completion error: {0}")]
    Upstream(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CarelineError>;
