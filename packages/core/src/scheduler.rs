//! Homework status polling loop.
//!
//! Each cycle fetches statuses since the cursor, validates the body, parses
//! the newest submission record and notifies the chat when its status
//! sentence differs from the last one delivered. Every cycle ends with a
//! fixed sleep, whatever happened.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::signal;

use crate::error::BotResult;
use crate::homework::{check_response, current_date, homeworks, parse_status};
use crate::services::telegram::send_message;
use crate::services::{HomeworkApi, MessageSender};

/// Pause between cycles. Swappable so tests run without real delay.
#[async_trait]
pub trait Sleeper {
    async fn sleep(&self, period: Duration);
}

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, period: Duration) {
        tokio::time::sleep(period).await;
    }
}

/// In-memory loop state. Lives for the process lifetime only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollState {
    /// `from_date` sent with the next request.
    pub cursor: i64,
    /// Last status sentence that was actually delivered.
    pub last_status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new status was delivered; the cursor advanced.
    Notified,
    /// The newest record matches the last delivered status.
    Unchanged,
    /// The API returned an empty `homeworks` list.
    NoHomeworks,
    /// A new status was found but the message could not be sent.
    NotDelivered,
    /// Fetching, validation or parsing failed.
    Failed,
}

pub struct Poller {
    api: Arc<dyn HomeworkApi + Send + Sync>,
    sender: Arc<dyn MessageSender + Send + Sync>,
    sleeper: Arc<dyn Sleeper + Send + Sync>,
    retry_period: Duration,
    state: PollState,
}

impl Poller {
    pub fn new(
        api: Arc<dyn HomeworkApi + Send + Sync>,
        sender: Arc<dyn MessageSender + Send + Sync>,
        sleeper: Arc<dyn Sleeper + Send + Sync>,
        retry_period: Duration,
        initial_cursor: i64,
    ) -> Self {
        Self {
            api,
            sender,
            sleeper,
            retry_period,
            state: PollState {
                cursor: initial_cursor,
                last_status: None,
            },
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Run one cycle. Failures are logged here and never escape.
    pub async fn poll_once(&mut self) -> CycleOutcome {
        match self.try_poll().await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!("Polling cycle failed: {}", err);
                CycleOutcome::Failed
            }
        }
    }

    async fn try_poll(&mut self) -> BotResult<CycleOutcome> {
        let response = self.api.get_api_answer(self.state.cursor).await?;
        check_response(&response)?;
        let server_date = current_date(&response)?;

        let Some(latest) = homeworks(&response).first() else {
            tracing::debug!("No homework status updates since {}", self.state.cursor);
            return Ok(CycleOutcome::NoHomeworks);
        };

        let message = parse_status(latest)?;
        if self.state.last_status.as_deref() == Some(message.as_str()) {
            tracing::debug!("Homework status unchanged");
            return Ok(CycleOutcome::Unchanged);
        }

        if !send_message(self.sender.as_ref(), &message).await {
            return Ok(CycleOutcome::NotDelivered);
        }

        tracing::info!("Status change delivered, cursor {} -> {}", self.state.cursor, server_date);
        self.state.last_status = Some(message);
        self.state.cursor = server_date;
        Ok(CycleOutcome::Notified)
    }

    /// One cycle followed by the retry sleep.
    pub async fn tick(&mut self) -> CycleOutcome {
        let outcome = self.poll_once().await;
        self.sleeper.sleep(self.retry_period).await;
        outcome
    }

    /// Poll forever. Only `Ctrl+C` (SIGINT) stops the loop.
    pub async fn run(&mut self) {
        tracing::info!(
            "Homework polling started (interval: {}s, from_date: {})",
            self.retry_period.as_secs(),
            self.state.cursor
        );

        loop {
            tokio::select! {
                outcome = self.tick() => {
                    tracing::debug!("Cycle finished: {:?}", outcome);
                }

                _ = signal::ctrl_c() => {
                    tracing::info!("Shutdown signal received. Stopping polling.");
                    break;
                }
            }
        }

        tracing::info!("Homework polling stopped");
    }
}
