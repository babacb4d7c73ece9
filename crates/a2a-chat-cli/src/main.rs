mod cli;
mod completions;
mod config;
mod error;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::CliConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        completions::generate_completions(shell);
        return Ok(());
    }

    // Configure logging: always write to file, the terminal belongs to the TUI
    let log_dir = dirs::data_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("a2a-chat")
        .join("logs");
    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "a2a-chat.log");
    let (non_blocking, log_guard) = tracing_appender::non_blocking(file_appender);

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .init();

    let mut config = CliConfig::load(cli.config.as_deref());
    if cli.no_stream {
        config.chat.stream_replies = false;
    }

    tracing::info!(
        stream_replies = config.chat.stream_replies,
        agent_card = %config.agent.agent_card,
        "Starting a2a-chat"
    );

    if let Err(err) = tui::run(&config).await {
        tracing::error!("Chat client failed: {err:#}");
        drop(log_guard);
        error::handle_error(err);
    }

    Ok(())
}
