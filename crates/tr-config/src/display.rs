use serde::{Deserialize, Serialize};
use tr_types::{Direction, Tense};

fn default_tenses() -> Vec<Tense> {
    vec![Tense::Present, Tense::Preterite]
}

fn default_color() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DisplayConfig {
    #[serde(default)]
    pub default_direction: Direction,
    #[serde(default = "default_tenses")]
    pub default_tenses: Vec<Tense>,
    #[serde(default)]
    pub show_all_tenses: bool,
    /// Only honoured when stdout is a terminal
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_direction: Direction::default(),
            default_tenses: default_tenses(),
            show_all_tenses: false,
            color: default_color(),
        }
    }
}
