use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "a2a-chat")]
#[command(version, about = "A2A Chat - talk to a simulated travel assistant agent")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file (defaults to ~/.config/a2a-chat/config.toml)
    #[arg(long, global = true, env = "A2A_CHAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Wait for the whole reply instead of streaming it word by word
    #[arg(long, global = true)]
    pub no_stream: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
