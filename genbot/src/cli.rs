//! CLI parser.

use clap::{Parser, Subcommand};
use generation_provider::ProviderKind;

#[derive(Parser)]
#[command(name = "genbot")]
#[command(about = "Telegram bot for generated images, answers and videos", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; flags override BOT_TOKEN / GENERATION_BACKEND).
    Run {
        #[arg(short, long)]
        token: Option<String>,
        /// Generation backend: hosted or local
        #[arg(short, long)]
        backend: Option<ProviderKind>,
    },
    /// Load and validate configuration, print it with secrets masked, and exit.
    Check {
        #[arg(short, long)]
        token: Option<String>,
        #[arg(short, long)]
        backend: Option<ProviderKind>,
    },
}
