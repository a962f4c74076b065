//! CLI Trivia
//!
//! Interactive timed quiz. No arguments; tuning comes from the environment
//! (see [`trivia::config`]). Logs go to stderr, filtered by `RUST_LOG`.

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use trivia::{
    VERSION,
    Console, GameConfig, QuestionBank, QuizGame, Shutdown,
};

#[cfg(feature = "debug-tracing")]
const DEFAULT_FILTER: &str = "trivia=debug,cli_trivia=debug";
#[cfg(not(feature = "debug-tracing"))]
const DEFAULT_FILTER: &str = "warn";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("CLI Trivia v{}", VERSION);

    let config = GameConfig::from_env().context("Invalid configuration")?;
    let bank = QuestionBank::builtin(config.bank).context("Failed to load question bank")?;
    info!(
        bank = %config.bank,
        questions = bank.len(),
        seconds = config.question_seconds(),
        "Configured"
    );

    let shutdown = Shutdown::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                signal.trigger();
            }
            Err(e) => warn!("Failed to listen for interrupt: {}", e),
        }
    });

    let console = Console::stdio().context("Failed to open terminal input")?;
    let mut game = QuizGame::new(config, bank, console, shutdown.subscribe());

    let exit = game.run().await?;
    info!(?exit, "Exiting");
    Ok(())
}
