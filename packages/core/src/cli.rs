use clap::Parser;

/// Homework review status bot CLI arguments
#[derive(Debug, Parser)]
#[command(
    name = "homework-bot",
    version,
    about = "Relays homework review status changes to a Telegram chat"
)]
pub struct Cli {
    /// Seconds to wait between polls
    #[arg(long)]
    pub retry_period: Option<u64>,

    /// How many seconds back the first poll looks
    #[arg(long)]
    pub lookback: Option<u64>,

    /// Unix timestamp to start polling from (overrides --lookback)
    #[arg(long)]
    pub from_date: Option<i64>,
}
