use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tr_config::Config;
use tr_core::language::Conjugator;
use tr_core::state::AppState;
use tr_lang_spanish::{CacheStore, MyMemoryTranslator, SpanishConjugator};
use tr_translator::{TranslateError, Translator};
use tr_types::{ConjugationTable, Direction, Tense, Verb};

use crate::ui::{self, Palette};

/// Owns the services behind the CLI and REPL and the session's cancel token
pub struct AppController {
    state: Arc<AppState>,
    translator: Arc<dyn Translator>,
    conjugator: Arc<dyn Conjugator>,
    cache: Arc<CacheStore>,
    cancel_token: CancellationToken,
    config_path: Option<PathBuf>,
    palette: Palette,
}

impl AppController {
    pub fn new(
        state: Arc<AppState>,
        translator: Arc<dyn Translator>,
        conjugator: Arc<dyn Conjugator>,
        cache: Arc<CacheStore>,
        cancel_token: CancellationToken,
        palette: Palette,
    ) -> Self {
        Self {
            state,
            translator,
            conjugator,
            cache,
            cancel_token,
            config_path: None,
            palette,
        }
    }

    /// MyMemory translator and the SpanishDict pipeline, wired from `config`
    pub async fn from_config(config: Config, config_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let cancel_token = CancellationToken::new();

        let cache = if config.conjugation.cache_enabled {
            match config
                .conjugation
                .cache_path
                .clone()
                .or_else(CacheStore::default_path)
            {
                Some(path) => Arc::new(CacheStore::open(path).await),
                None => {
                    tracing::warn!("No home directory, conjugation cache kept in memory");
                    Arc::new(CacheStore::in_memory())
                }
            }
        } else {
            Arc::new(CacheStore::in_memory())
        };

        let conjugator = SpanishConjugator::from_config(
            &config.conjugation,
            cache.clone(),
            cancel_token.child_token(),
        )?;
        let translator = MyMemoryTranslator::new(
            config.translator.api_url.clone(),
            Duration::from_secs(config.translator.timeout_seconds),
        )?;
        let palette = Palette::for_stdout(config.display.color);

        let mut controller = Self::new(
            Arc::new(AppState::new(config)),
            Arc::new(translator),
            Arc::new(conjugator),
            cache,
            cancel_token,
            palette,
        );
        controller.config_path = config_path;
        Ok(controller)
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Translate `text`; Spanish verbs also get their conjugations appended
    pub async fn translate(
        &self,
        text: &str,
        direction: Direction,
        all_tenses: bool,
    ) -> Result<String, TranslateError> {
        let (from, to) = direction.langs();
        let translation = self
            .translator
            .translate(text, from.to_string(), to.to_string())
            .await?;
        tracing::debug!(
            "translated {:?} via {} (verb: {})",
            translation.original,
            translation.provider,
            translation.is_verb
        );

        let mut out = ui::render_translation(&translation, self.palette);

        if translation.from == "es" && translation.is_verb {
            let verb = Verb::new(&translation.original);
            *self.state.last_verb.write().await = Some(verb.clone());

            let table = self.conjugator.conjugate(verb.as_str()).await;
            if !table.is_empty() {
                let (defaults, show_all) = {
                    let config = self.state.config.read().await;
                    (
                        config.display.default_tenses.clone(),
                        all_tenses || config.display.show_all_tenses,
                    )
                };
                out.push_str("\n\n");
                out.push_str(&self.render_table(&table, &verb, &defaults, show_all));
            }
        }

        Ok(out)
    }

    /// [`Self::translate`] raced against the session's cancel token; `None` once cancelled
    pub async fn translate_until_cancelled(
        &self,
        text: &str,
        direction: Direction,
        all_tenses: bool,
    ) -> Option<Result<String, TranslateError>> {
        tokio::select! {
            biased;
            _ = self.cancel_token.cancelled() => None,
            result = self.translate(text, direction, all_tenses) => Some(result),
        }
    }

    /// Every tense available for `verb`, `None` when nothing was found
    pub async fn conjugate_all(&self, verb: &str) -> Option<String> {
        let table = self.conjugator.conjugate(verb).await;
        if table.is_empty() {
            return None;
        }
        Some(self.render_table(&table, &Verb::new(verb), &[], true))
    }

    /// `expand [verb]`, defaulting to the last translated verb
    pub async fn expand(&self, verb: Option<&str>) -> String {
        let verb = match verb {
            Some(verb) => Verb::new(verb),
            None => match self.state.last_verb.read().await.clone() {
                Some(verb) => verb,
                None => {
                    return self
                        .palette
                        .error("No verb to expand. Please translate a verb first.");
                }
            },
        };

        match self.conjugate_all(verb.as_str()).await {
            Some(out) => out,
            None => self
                .palette
                .warning(&format!("No conjugations found for '{verb}'")),
        }
    }

    fn render_table(
        &self,
        table: &ConjugationTable,
        verb: &Verb,
        defaults: &[Tense],
        show_all: bool,
    ) -> String {
        let tenses = ui::visible_tenses(table, defaults, show_all);
        let mut out = ui::render_conjugations(table, &tenses, self.palette);

        if !show_all {
            if let Some(hint) = ui::expansion_hint(table, tenses.len(), verb.as_str(), self.palette)
            {
                out.push_str("\n\n");
                out.push_str(&hint);
            }
        }
        out
    }

    /// Cancel in-flight lookups and wait for the cache to reach disk
    pub async fn shutdown(&self) {
        self.cancel_token.cancel();
        self.cache.sync().await;
    }
}
