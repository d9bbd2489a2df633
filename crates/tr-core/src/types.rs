use tr_types::ConjugationTable;

use crate::error::ScrapeError;

/// Result of the scraping half of the conjugation pipeline
#[derive(Debug)]
pub enum ScrapeOutcome {
    Scraped(ConjugationTable),
    Failed(ScrapeError),
}

impl ScrapeOutcome {
    /// An empty extraction counts as a failure
    pub fn from_extracted(table: ConjugationTable) -> Self {
        if table.is_empty() {
            ScrapeOutcome::Failed(ScrapeError::NothingExtracted)
        } else {
            ScrapeOutcome::Scraped(table)
        }
    }
}
