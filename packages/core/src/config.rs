use std::env;
use std::fmt;
use std::time::Duration;

use crate::cli::Cli;
use crate::error::BotError;

pub const PRACTICUM_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const RETRY_PERIOD_SECONDS: u64 = 600;
/// How far back the first poll looks (30 days).
pub const LOOKBACK_SECONDS: u64 = 2_592_000;

/// The three secrets the bot needs. Empty strings mean "not provided".
#[derive(Clone, Default)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

// Tokens never reach the logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &redact(&self.practicum_token))
            .field("telegram_token", &redact(&self.telegram_token))
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() {
        "<missing>"
    } else {
        "<redacted>"
    }
}

impl Credentials {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).unwrap_or_default();
        Self {
            practicum_token: read("PRACTICUM_TOKEN"),
            telegram_token: read("TELEGRAM_TOKEN"),
            telegram_chat_id: read("TELEGRAM_CHAT_ID"),
        }
    }

    /// Names of every credential that is empty, in declaration order.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("PRACTICUM_TOKEN", &self.practicum_token),
            ("TELEGRAM_TOKEN", &self.telegram_token),
            ("TELEGRAM_CHAT_ID", &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Returns `true` only when all three credentials are present.
///
/// Each missing credential is logged individually; the caller must abort
/// startup on `false`.
pub fn check_tokens(credentials: &Credentials) -> bool {
    let missing = credentials.missing();
    for name in &missing {
        tracing::error!("{}", BotError::token_not_found(*name));
    }
    missing.is_empty()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub practicum_endpoint: String,
    pub telegram_api_url: String,
    pub retry_period_seconds: u64,
    pub lookback_seconds: u64,
    /// Explicit first cursor; overrides `lookback_seconds` when set.
    pub from_date: Option<i64>,
}

impl Config {
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials::from_lookup(&lookup);

        let practicum_endpoint = lookup("PRACTICUM_ENDPOINT")
            .unwrap_or_else(|| PRACTICUM_ENDPOINT.to_string());

        let telegram_api_url =
            lookup("TELEGRAM_API_URL").unwrap_or_else(|| TELEGRAM_API_URL.to_string());

        let retry_period_seconds = match lookup("RETRY_PERIOD_SECONDS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                BotError::config(format!(
                    "RETRY_PERIOD_SECONDS must be a valid number, got {:?}",
                    raw
                ))
            })?,
            None => RETRY_PERIOD_SECONDS,
        };
        check_retry_period(retry_period_seconds)?;

        Ok(Self {
            credentials,
            practicum_endpoint,
            telegram_api_url,
            retry_period_seconds,
            lookback_seconds: LOOKBACK_SECONDS,
            from_date: None,
        })
    }

    /// Command-line values take precedence over the environment.
    pub fn with_cli(mut self, cli: &Cli) -> Result<Self, BotError> {
        if let Some(secs) = cli.retry_period {
            check_retry_period(secs)?;
            self.retry_period_seconds = secs;
        }
        if let Some(secs) = cli.lookback {
            self.lookback_seconds = secs;
        }
        if cli.from_date.is_some() {
            self.from_date = cli.from_date;
        }
        Ok(self)
    }

    pub fn retry_period(&self) -> Duration {
        Duration::from_secs(self.retry_period_seconds)
    }

    /// The cursor used for the very first poll.
    pub fn initial_cursor(&self, now: i64) -> Result<i64, BotError> {
        if let Some(from_date) = self.from_date {
            return Ok(from_date);
        }
        i64::try_from(self.lookback_seconds)
            .ok()
            .and_then(|lookback| now.checked_sub(lookback))
            .ok_or_else(|| {
                BotError::config(format!(
                    "lookback of {}s reaches before the earliest timestamp",
                    self.lookback_seconds
                ))
            })
    }
}

/// A zero period would poll the API in a tight loop.
fn check_retry_period(secs: u64) -> Result<(), BotError> {
    if secs == 0 {
        return Err(BotError::config("retry period must be at least 1 second"));
    }
    Ok(())
}
