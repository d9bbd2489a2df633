use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tr_types::ValidationProfile;

fn default_source_url() -> String {
    "https://www.spanishdict.com/conjugate/".to_string()
}

fn default_table_class() -> String {
    "sTe03NLF".to_string()
}

fn default_timeout_seconds() -> u64 {
    15
}

fn default_cache_enabled() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ConjugationConfig {
    /// Conjugation page prefix; the verb is appended as a path segment
    #[serde(default = "default_source_url")]
    pub source_url: String,
    /// Class of the indicative table on the conjugation page
    #[serde(default = "default_table_class")]
    pub table_class: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub validation: ValidationProfile,
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,
    /// Overrides the per-user cache file location
    #[serde(default)]
    pub cache_path: Option<PathBuf>,
}

impl Default for ConjugationConfig {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            table_class: default_table_class(),
            timeout_seconds: default_timeout_seconds(),
            validation: ValidationProfile::default(),
            cache_enabled: default_cache_enabled(),
            cache_path: None,
        }
    }
}
