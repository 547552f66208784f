use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Failure kinds surfaced by the scraping pipeline.
///
/// Track-info extraction degrades per field to sentinel values and only
/// returns one of these when the page itself could not be fetched.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("unexpected page structure: {0}")]
    Parse(String),

    #[error("not found: {0}")]
    NotFound(String),
}

impl ScrapeError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ScrapeError::NotFound(_))
    }
}

impl From<reqwest::Error> for ScrapeError {
    fn from(err: reqwest::Error) -> Self {
        ScrapeError::Network(err.to_string())
    }
}
