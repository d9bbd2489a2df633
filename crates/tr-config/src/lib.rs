use std::env;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use self::conjugation::ConjugationConfig;
use self::display::DisplayConfig;
use self::translator::TranslatorConfig;

pub mod conjugation;
pub mod display;
pub mod translator;

const SECTIONS: [&str; 3] = ["translator", "conjugation", "display"];

/// Top-level keys of the older flat config file, all of which now live under `display`
const FLAT_DISPLAY_KEYS: [&str; 3] = ["default_direction", "default_tenses", "show_all_tenses"];

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub conjugation: ConjugationConfig,
    pub display: DisplayConfig,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_overrides(|key| env::var(key).ok());
        config
    }

    /// Parse a config file. Flat `default_direction`/`default_tenses`/
    /// `show_all_tenses` keys are moved under `display` unless that section
    /// already sets them; other unknown top-level keys are logged and ignored.
    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        let mut value: Value = serde_json::from_str(data)?;

        if let Some(root) = value.as_object_mut() {
            let flat: Vec<(&str, Value)> = FLAT_DISPLAY_KEYS
                .iter()
                .filter_map(|key| root.remove(*key).map(|v| (*key, v)))
                .collect();

            if !flat.is_empty() {
                tracing::info!("Reading {} flat config keys as display settings", flat.len());
                let display = root
                    .entry("display")
                    .or_insert_with(|| Value::Object(Map::new()));
                if let Some(display) = display.as_object_mut() {
                    for (key, v) in flat {
                        display.entry(key).or_insert(v);
                    }
                }
            }

            for key in root.keys().filter(|k| !SECTIONS.contains(&k.as_str())) {
                tracing::warn!("Ignoring unknown config key {key:?}");
            }
        }

        serde_json::from_value(value)
    }

    /// Apply `TR_*` overrides from `lookup`. Unparseable values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(secs) = lookup("TR_TIMEOUT_SECONDS").and_then(|v| v.parse().ok()) {
            self.translator.timeout_seconds = secs;
            self.conjugation.timeout_seconds = secs;
        }

        if let Some(value) = lookup("TR_VALIDATION") {
            match value.parse() {
                Ok(profile) => self.conjugation.validation = profile,
                Err(e) => tracing::warn!("ignoring TR_VALIDATION: {e}"),
            }
        }

        if let Some(path) = lookup("TR_CACHE_PATH") {
            self.conjugation.cache_path = Some(path.into());
        }

        if let Some(value) = lookup("TR_DIRECTION") {
            match value.parse() {
                Ok(direction) => self.display.default_direction = direction,
                Err(e) => tracing::warn!("ignoring TR_DIRECTION: {e}"),
            }
        }
    }
}
