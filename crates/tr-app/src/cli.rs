use clap::{Parser, Subcommand};
use tr_types::Direction;

#[derive(Debug, Parser)]
#[command(name = "tr", bin_name = "tr", version)]
#[command(about = "Translate between English and Spanish", long_about = None)]
pub struct Cli {
    /// Text to translate. Starts the interactive mode when empty.
    pub text: Vec<String>,

    /// Translation direction: es2en or en2es
    #[arg(short, long, global = true)]
    pub direction: Option<Direction>,

    /// Log pipeline steps to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Show every scraped tense instead of the configured defaults
    #[arg(long, global = true)]
    pub all_tenses: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the conjugation table for a Spanish verb
    Conjugate { verb: String },
}

impl Cli {
    /// Positional words joined with single spaces
    pub fn joined_text(&self) -> Option<String> {
        let text = self.text.join(" ");
        if text.trim().is_empty() { None } else { Some(text) }
    }
}
