pub mod error;
pub mod language;
pub mod preprocess;
pub mod state;
pub mod types;

pub use error::ScrapeError;
pub use types::ScrapeOutcome;
