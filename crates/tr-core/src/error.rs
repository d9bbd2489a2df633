/// Why a conjugation scrape produced nothing usable.
///
/// These never reach the caller of the pipeline; they select the generator fallback.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("conjugation request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("conjugation source returned HTTP {0}")]
    Status(u16),

    #[error("failed to read conjugation page: {0}")]
    Body(String),

    #[error("invalid conjugation url: {0}")]
    InvalidUrl(String),

    #[error("request cancelled")]
    Cancelled,

    #[error("no conjugations found in page")]
    NothingExtracted,
}

impl ScrapeError {
    /// Timeouts are reported separately from other network failures
    pub fn is_timeout(&self) -> bool {
        match self {
            ScrapeError::Timeout => true,
            ScrapeError::Transport(e) => e.is_timeout(),
            _ => false,
        }
    }
}
