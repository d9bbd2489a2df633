use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tr_types::Direction;

mod cli;
mod controller;
mod profile;
mod repl;
mod ui;


use self::cli::{Cli, Command};
use self::controller::AppController;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so they never interleave with rendered tables
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let (config, config_path) = profile::load_user_config();
    let default_direction = config.display.default_direction;
    let controller = AppController::from_config(config, config_path).await?;

    // Ctrl+C cancels in-flight lookups and ends the session
    let cancel = controller.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown requested");
            cancel.cancel();
        }
    });

    let code = match (&cli.command, cli.joined_text()) {
        (Some(Command::Conjugate { verb }), _) => {
            match controller.conjugate_all(verb).await {
                Some(out) => println!("Verb Conjugations for: {verb}\n{out}"),
                None => println!("No conjugations found for verb: {verb}"),
            }
            ExitCode::SUCCESS
        }
        (None, Some(text)) => {
            let direction = cli
                .direction
                .unwrap_or_else(|| Direction::infer(&text, default_direction));
            match controller
                .translate_until_cancelled(&text, direction, cli.all_tenses)
                .await
            {
                Some(Ok(out)) => {
                    println!("{out}");
                    ExitCode::SUCCESS
                }
                Some(Err(e)) => {
                    eprintln!("Translation error: {e}");
                    ExitCode::FAILURE
                }
                None => {
                    eprintln!("Translation cancelled.");
                    ExitCode::from(130)
                }
            }
        }
        (None, None) => {
            if let Some(direction) = cli.direction {
                *controller.state().direction.write().await = direction;
            }
            let session = repl::run(&controller, cli.all_tenses).await;
            controller.shutdown().await;
            session?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    controller.shutdown().await;
    Ok(code)
}
