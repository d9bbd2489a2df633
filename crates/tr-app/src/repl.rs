use std::io::BufRead;

use kanal::AsyncReceiver;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::controller::AppController;
use crate::ui;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Toggle,
    Clear,
    Exit,
    Config,
    Tenses,
    Expand(Option<String>),
    Translate(String),
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }

        let lower = line.to_lowercase();
        match lower.as_str() {
            "help" | "h" => return Command::Help,
            "toggle" | "t" => return Command::Toggle,
            "clear" | "cls" => return Command::Clear,
            "exit" | "quit" | "q" => return Command::Exit,
            "config" => return Command::Config,
            "tenses" => return Command::Tenses,
            "expand" => return Command::Expand(None),
            _ => {}
        }

        if let Some(rest) = lower.strip_prefix("expand ") {
            let verb = rest.trim();
            return Command::Expand((!verb.is_empty()).then(|| verb.to_string()));
        }

        Command::Translate(line.to_string())
    }
}

/// What the loop should do after a command
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    Print(String),
    Clear,
    Continue,
    Exit,
}

pub async fn execute(controller: &AppController, command: Command, all_tenses: bool) -> Step {
    let palette = controller.palette();
    let state = controller.state();

    match command {
        Command::Empty => Step::Continue,
        Command::Exit => Step::Exit,
        Command::Clear => Step::Clear,
        Command::Help => Step::Print(ui::render_help(palette)),
        Command::Toggle => {
            let mut direction = state.direction.write().await;
            *direction = direction.toggle();
            tracing::debug!("direction now {:?}", *direction);
            Step::Print(palette.warning(&format!("Switched to: {}", direction.label())))
        }
        Command::Config => {
            let config = state.config.read().await;
            Step::Print(ui::render_config(&config, controller.config_path(), palette))
        }
        Command::Tenses => {
            let config = state.config.read().await;
            Step::Print(ui::render_tenses(&config.display.default_tenses, palette))
        }
        Command::Expand(verb) => Step::Print(controller.expand(verb.as_deref()).await),
        Command::Translate(text) => {
            let direction = *state.direction.read().await;
            match controller.translate(&text, direction, all_tenses).await {
                Ok(out) => Step::Print(out),
                Err(e) => Step::Print(palette.error(&format!("Translation error: {e}"))),
            }
        }
    }
}

/// Line-mode session on stdin/stdout until exit, EOF or cancellation
pub async fn run(controller: &AppController, all_tenses: bool) -> anyhow::Result<()> {
    let lines = spawn_stdin_reader();
    let mut stdout = tokio::io::stdout();
    session(controller, all_tenses, lines, &mut stdout).await
}

/// Stdin lines from a plain thread. A pending read there never holds up
/// runtime shutdown; the thread ends with the process.
fn spawn_stdin_reader() -> AsyncReceiver<String> {
    let (tx, rx) = kanal::bounded(1);

    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to read stdin: {e}");
                    break;
                }
            }
        }
        tracing::debug!("stdin reader stopping");
    });

    rx.to_async()
}

/// Prompt loop over `lines`, writing to `out`. A closed channel counts as EOF.
pub async fn session<W>(
    controller: &AppController,
    all_tenses: bool,
    lines: AsyncReceiver<String>,
    out: &mut W,
) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let palette = controller.palette();
    let cancel = controller.cancel_token();

    out.write_all(ui::welcome(palette).as_bytes()).await?;

    loop {
        let direction = *controller.state().direction.read().await;
        out.write_all(format!("\n{}", ui::prompt(direction, palette)).as_bytes())
            .await?;
        out.flush().await?;

        let line = tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.recv() => line,
        };
        let Ok(line) = line else {
            break;
        };

        let step = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            step = execute(controller, Command::parse(&line), all_tenses) => step,
        };

        match step {
            Step::Print(text) => out.write_all(format!("\n{text}\n").as_bytes()).await?,
            Step::Clear => {
                out.write_all(format!("{CLEAR_SCREEN}{}", ui::welcome(palette)).as_bytes())
                    .await?
            }
            Step::Continue => {}
            Step::Exit => break,
        }
    }

    out.write_all(format!("\n{}\n", palette.success("¡Adiós! Goodbye!")).as_bytes())
        .await?;
    out.flush().await?;
    Ok(())
}
