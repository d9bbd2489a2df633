use tokio::sync::RwLock;
use tr_config::Config;
use tr_types::{Direction, Verb};

/// Mutable session state shared by the CLI and REPL
#[derive(Default)]
pub struct AppState {
    pub config: RwLock<Config>,
    pub direction: RwLock<Direction>,
    /// Last Spanish verb shown, target of a bare `expand`
    pub last_verb: RwLock<Option<Verb>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let direction = config.display.default_direction;
        Self {
            config: RwLock::new(config),
            direction: RwLock::new(direction),
            last_verb: RwLock::new(None),
        }
    }
}
