use tr_types::{ConjugationTable, Verb};

use crate::error::ScrapeError;

/// Full conjugation lookup for one language
#[async_trait::async_trait]
pub trait Conjugator: Send + Sync {
    /// Conjugation table for `verb`. Empty when nothing could be produced.
    async fn conjugate(&self, verb: &str) -> ConjugationTable;
}

/// Remote page holding conjugation tables
#[async_trait::async_trait]
pub trait ConjugationSource: Send + Sync {
    /// Raw markup for the verb's conjugation page
    async fn fetch(&self, verb: &Verb) -> Result<String, ScrapeError>;

    /// Source identifier for logs
    fn name(&self) -> &str;
}

/// Turns a fetched page into a table. Layout-specific and swappable.
pub trait MarkupExtractor: Send + Sync {
    fn extract(&self, markup: &str, verb: &Verb) -> ConjugationTable;
}

/// Rule-based forms for regular verbs
pub trait FormGenerator: Send + Sync {
    fn generate(&self, verb: &Verb) -> ConjugationTable;
}
