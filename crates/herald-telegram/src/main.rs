//! Herald Telegram Bot binary.
//!
//! Start the bot with:
//! ```bash
//! TELEGRAM_BOT_TOKEN=xxx HERALD_ALLOWED_USER=you cargo run -p herald-telegram
//! ```

use clap::Parser;
use herald_telegram::HeraldBot;
use tracing_subscriber::EnvFilter;

/// Herald Telegram Bot - daily scheduled messages with live counters
#[derive(Parser, Debug)]
#[command(name = "herald-telegram")]
#[command(about = "Telegram bot that sends a templated message daily")]
struct Args {
    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load environment variables from .env if present
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let filter = match args.verbose {
        0 => "herald_telegram=info,teloxide=warn",
        1 => "herald_telegram=debug,teloxide=info",
        2 => "herald_telegram=trace,teloxide=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Create the bot
    let bot = HeraldBot::new()?;

    // Get bot info
    match bot.get_me().await {
        Ok(username) => {
            tracing::info!(username = %username, "Bot initialized successfully");
            println!("\nHerald Telegram Bot");
            println!("   Bot: @{}", username);
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to get bot info");
            return Err(e.into());
        }
    }

    println!("\nOpen Telegram and send /create_scheduled_message to begin");
    println!("   Press Ctrl+C to stop\n");

    // Start the bot
    bot.start_polling().await?;

    Ok(())
}
