use anyhow::Result;
use clap::Parser;
use genbot::{run_bot, BotConfig, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token, backend } => {
            let config = BotConfig::load(token, backend)?;
            run_bot(config).await
        }
        Commands::Check { token, backend } => {
            let config = BotConfig::load(token, backend)?;
            config.validate()?;
            for (key, value) in config.summary() {
                println!("{:<18} {}", key, value);
            }
            println!("configuration OK");
            Ok(())
        }
    }
}
