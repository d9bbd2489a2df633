use std::time::Duration;

use async_trait::async_trait;
use tr_core::ScrapeError;
use tr_core::language::ConjugationSource;
use tr_types::Verb;
use url::Url;

const USER_AGENT: &str = concat!("tr/", env!("CARGO_PKG_VERSION"));

/// One GET per verb against the SpanishDict conjugation page
#[derive(Clone)]
pub struct SpanishDictSource {
    client: reqwest::Client,
    base_url: Url,
}

impl SpanishDictSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ScrapeError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ScrapeError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ScrapeError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Page URL with the verb percent-encoded as the last path segment
    pub fn page_url(&self, verb: &Verb) -> Result<Url, ScrapeError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ScrapeError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(verb.as_str());
        Ok(url)
    }
}

#[async_trait]
impl ConjugationSource for SpanishDictSource {
    async fn fetch(&self, verb: &Verb) -> Result<String, ScrapeError> {
        let url = self.page_url(verb)?;
        tracing::debug!("fetching conjugations from {url}");

        let response = self.client.get(url).send().await.map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status(status.as_u16()));
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                ScrapeError::Timeout
            } else {
                ScrapeError::Body(e.to_string())
            }
        })
    }

    fn name(&self) -> &str {
        "spanishdict"
    }
}

fn classify(e: reqwest::Error) -> ScrapeError {
    if e.is_timeout() {
        ScrapeError::Timeout
    } else {
        ScrapeError::Transport(e)
    }
}
