use tr_types::Verb;

pub type LanguageCode = String;

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text from source to target language
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError>;

    /// Get supported language pairs
    fn supported_languages(&self) -> Vec<(LanguageCode, LanguageCode)>;
}

#[derive(Debug, Clone)]
pub struct Translation {
    pub original: String,
    pub text: String,
    pub from: LanguageCode,
    pub to: LanguageCode,
    pub provider: String,
    /// Spanish source text that looks like an infinitive
    pub is_verb: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("empty text provided")]
    EmptyInput,

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("translation request timed out")]
    Timeout,

    #[error("failed to parse translation response: {0}")]
    ParseError(String),

    #[error("Unsupported language pair: {from} -> {to}")]
    UnsupportedLanguagePair { from: String, to: String },

    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Suffix heuristic: Spanish text ending in ar/er/ir is treated as a verb
pub fn looks_like_verb(text: &str, from: &str) -> bool {
    from == "es" && Verb::new(text).is_conjugable()
}
