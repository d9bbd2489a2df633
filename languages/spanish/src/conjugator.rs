use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tr_config::conjugation::ConjugationConfig;
use tr_core::language::{ConjugationSource, Conjugator, FormGenerator, MarkupExtractor};
use tr_core::{ScrapeError, ScrapeOutcome};
use tr_types::{ConjugationTable, Verb};

use crate::cache::CacheStore;
use crate::extractor::SpanishDictExtractor;
use crate::fetcher::SpanishDictSource;
use crate::generator::SpanishGenerator;
use crate::merge::reconcile;
use crate::validator::ConjugationValidator;

/// Cache → scrape + generate → merge → cache.
///
/// Scrape failures never surface; they only decide how much of the result
/// comes from the generator.
pub struct SpanishConjugator {
    source: Arc<dyn ConjugationSource>,
    extractor: Arc<dyn MarkupExtractor>,
    generator: SpanishGenerator,
    cache: Arc<CacheStore>,
    cancel: CancellationToken,
}

impl SpanishConjugator {
    pub fn new(
        source: Arc<dyn ConjugationSource>,
        extractor: Arc<dyn MarkupExtractor>,
        cache: Arc<CacheStore>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            source,
            extractor,
            generator: SpanishGenerator::new(),
            cache,
            cancel,
        }
    }

    /// SpanishDict source and extractor configured from `config`
    pub fn from_config(
        config: &ConjugationConfig,
        cache: Arc<CacheStore>,
        cancel: CancellationToken,
    ) -> Result<Self, ScrapeError> {
        let source = SpanishDictSource::new(
            &config.source_url,
            Duration::from_secs(config.timeout_seconds),
        )?;
        let extractor = SpanishDictExtractor::new(ConjugationValidator::new(config.validation))
            .with_table_class(config.table_class.as_str());

        Ok(Self::new(Arc::new(source), Arc::new(extractor), cache, cancel))
    }

    pub fn cache(&self) -> &Arc<CacheStore> {
        &self.cache
    }

    async fn scrape(&self, verb: &Verb) -> ScrapeOutcome {
        let fetched = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(ScrapeError::Cancelled),
            result = self.source.fetch(verb) => result,
        };

        match fetched {
            Ok(markup) => ScrapeOutcome::from_extracted(self.extractor.extract(&markup, verb)),
            Err(e) => ScrapeOutcome::Failed(e),
        }
    }
}

#[async_trait]
impl Conjugator for SpanishConjugator {
    async fn conjugate(&self, verb: &str) -> ConjugationTable {
        let verb = Verb::new(verb);
        if verb.is_empty() {
            return ConjugationTable::new();
        }

        if let Some(hit) = self.cache.get(&verb).await {
            tracing::debug!("cache hit for {verb}");
            return hit;
        }

        let (outcome, generated) = tokio::join!(self.scrape(&verb), async {
            self.generator.generate(&verb)
        });

        let cancelled = match &outcome {
            ScrapeOutcome::Scraped(table) => {
                tracing::debug!(
                    "scraped {} forms for {verb} from {}",
                    table.cell_count(),
                    self.source.name()
                );
                false
            }
            ScrapeOutcome::Failed(e) if e.is_timeout() => {
                tracing::warn!("conjugation lookup for {verb} timed out, using rule-based forms");
                false
            }
            ScrapeOutcome::Failed(ScrapeError::Cancelled) => true,
            ScrapeOutcome::Failed(e) => {
                tracing::debug!("scrape for {verb} failed: {e}");
                false
            }
        };

        let merged = reconcile(outcome, generated);

        if merged.is_empty() {
            tracing::debug!("no conjugations for {verb}");
        } else if !cancelled {
            self.cache.put(verb, merged.clone()).await;
        }

        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_rejects_unusable_source_url() {
        let config = ConjugationConfig {
            source_url: "not a url".to_string(),
            ..ConjugationConfig::default()
        };
        let result = SpanishConjugator::from_config(
            &config,
            Arc::new(CacheStore::in_memory()),
            CancellationToken::new(),
        );
        assert!(matches!(result, Err(ScrapeError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn blank_verb_never_reaches_the_source() {
        let config = ConjugationConfig {
            source_url: "http://127.0.0.1:9/conjugate/".to_string(),
            ..ConjugationConfig::default()
        };
        let cache = Arc::new(CacheStore::in_memory());
        let conjugator =
            SpanishConjugator::from_config(&config, cache.clone(), CancellationToken::new())
                .unwrap();

        assert!(conjugator.conjugate("  \t ").await.is_empty());
        assert!(conjugator.cache().is_empty().await);
    }
}
