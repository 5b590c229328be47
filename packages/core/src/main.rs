use std::sync::Arc;

use chrono::Utc;
use clap::Parser;
use dotenvy::dotenv;

use homework_bot::cli::Cli;
use homework_bot::config::{check_tokens, Config};
use homework_bot::logging::init_logging;
use homework_bot::scheduler::{Poller, TokioSleeper};
use homework_bot::services::{PracticumClient, TelegramBot};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    let config = Config::from_env()
        .and_then(|config| config.with_cli(&cli))
        .unwrap_or_else(|err| {
            tracing::error!("{}", err);
            std::process::exit(1);
        });

    if !check_tokens(&config.credentials) {
        tracing::error!("Missing required tokens, bot stopped");
        std::process::exit(1);
    }

    tracing::info!("Bot started with config: {:?}", config);

    let initial_cursor = config
        .initial_cursor(Utc::now().timestamp())
        .unwrap_or_else(|err| {
            tracing::error!("{}", err);
            std::process::exit(1);
        });

    let credentials = &config.credentials;
    let api = PracticumClient::new(
        config.practicum_endpoint.clone(),
        credentials.practicum_token.clone(),
    );
    let bot = TelegramBot::new(
        config.telegram_api_url.clone(),
        credentials.telegram_token.clone(),
        credentials.telegram_chat_id.clone(),
    );

    let mut poller = Poller::new(
        Arc::new(api),
        Arc::new(bot),
        Arc::new(TokioSleeper),
        config.retry_period(),
        initial_cursor,
    );

    poller.run().await;
}
