#[derive(Debug, thiserror::Error)]
pub enum FarmProfitError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Scrape error: {0}")]
    Scrape(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, FarmProfitError>;
