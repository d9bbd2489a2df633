use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tr_config::Config;

/// `~/.config/tr`
fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("tr"))
}

pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

/// Read `path`, writing the defaults there first if it does not exist yet
pub fn load_or_init(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        let config = Config::default();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(&config)?)?;
        tracing::info!("Created default config at {}", path.display());
        return Ok(config);
    }

    let data = fs::read_to_string(path)?;
    Ok(Config::from_json(&data)?)
}

/// User config with `TR_*` overrides applied. Falls back to defaults when the
/// file cannot be read or parsed.
pub fn load_user_config() -> (Config, Option<PathBuf>) {
    let path = config_path();

    let config = match path.as_deref() {
        Some(path) => match load_or_init(path) {
            Ok(mut config) => {
                config.apply_overrides(|key| env::var(key).ok());
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config {}, using defaults: {e}", path.display());
                Config::new()
            }
        },
        None => {
            tracing::warn!("No home directory, using default config");
            Config::new()
        }
    };

    (config, path)
}

#[cfg(test)]
mod tests {
    use tr_types::{Direction, Tense};

    use super::*;

    #[test]
    fn first_run_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tr").join("config.json");

        let config = load_or_init(&path).unwrap();
        assert_eq!(config.display.default_tenses, vec![Tense::Present, Tense::Preterite]);

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["display"]["default_direction"], "es2en");
        assert_eq!(written["conjugation"]["validation"], "lenient");
    }

    #[test]
    fn existing_file_is_respected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"display":{"default_direction":"en2es","show_all_tenses":true}}"#)
            .unwrap();

        let config = load_or_init(&path).unwrap();
        assert_eq!(config.display.default_direction, Direction::EnToEs);
        assert!(config.display.show_all_tenses);
        assert_eq!(config.conjugation.timeout_seconds, 15);
    }

    #[test]
    fn flat_file_from_older_versions_is_honoured() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"default_direction":"en2es","default_tenses":["conditional"],"show_all_tenses":false}"#,
        )
        .unwrap();

        let config = load_or_init(&path).unwrap();
        assert_eq!(config.display.default_direction, Direction::EnToEs);
        assert_eq!(config.display.default_tenses, vec![Tense::Conditional]);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ nope").unwrap();

        assert!(load_or_init(&path).is_err());
    }
}
