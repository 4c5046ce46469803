use thiserror::Error;

#[derive(Error, Debug)]
pub enum MyMrError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("GitLab API returned status {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to decode GitLab response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Enrichment task aborted: {0}")]
    Enrichment(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, MyMrError>;
