//! Telegram Bot API delivery.
//!
//! Only `sendMessage` is used. [`send_message`] is the notifier the
//! scheduler calls: it never propagates a delivery failure, it logs it and
//! reports whether the message went out.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::error::{BotError, BotResult};

/// Anything that can deliver a text message to the configured chat.
#[async_trait]
pub trait MessageSender {
    async fn send_text(&self, text: &str) -> BotResult<()>;
}

#[derive(Clone)]
pub struct TelegramBot {
    api_url: String,
    token: String,
    chat_id: String,
    http: Client,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

impl TelegramBot {
    pub fn new(api_url: String, token: String, chat_id: String) -> Self {
        Self {
            api_url,
            token,
            chat_id,
            http: Client::new(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_url.trim_end_matches('/'),
            self.token,
            method
        )
    }
}

#[async_trait]
impl MessageSender for TelegramBot {
    async fn send_text(&self, text: &str) -> BotResult<()> {
        let body = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
        };

        // The URL embeds the bot token, so it stays out of error messages.
        let response = self
            .http
            .post(self.method_url("sendMessage"))
            .json(&body)
            .send()
            .await
            .map_err(|err| BotError::send_message(err.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(BotError::send_message(format!(
                "Telegram returned HTTP {}: {}",
                status, detail
            )));
        }

        Ok(())
    }
}

/// Deliver `message`, logging instead of propagating any failure.
///
/// Returns `true` when the message was accepted.
pub async fn send_message(sender: &(dyn MessageSender + Send + Sync), message: &str) -> bool {
    match sender.send_text(message).await {
        Ok(()) => {
            tracing::debug!("Message sent: {}", message);
            true
        }
        Err(err) => {
            tracing::error!("{}", err);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn bot_for(server: &MockServer) -> TelegramBot {
        TelegramBot::new(server.uri(), "123:abc".to_string(), "42".to_string())
    }

    #[tokio::test]
    async fn posts_chat_id_and_text_to_send_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/sendMessage"))
            .and(body_json(json!({"chat_id": "42", "text": "hello"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        bot_for(&server).send_text("hello").await.unwrap();
    }

    #[tokio::test]
    async fn api_rejection_is_a_send_message_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"ok": false, "description": "chat not found"})),
            )
            .mount(&server)
            .await;

        let err = bot_for(&server).send_text("hello").await.unwrap_err();
        assert!(matches!(err, BotError::SendMessage { .. }));
        assert!(err.to_string().contains("chat not found"));
    }

    #[tokio::test]
    async fn send_message_swallows_failures() {
        let bot = TelegramBot::new("http://127.0.0.1:1".into(), "123:abc".into(), "42".into());
        assert!(!send_message(&bot, "hello").await);
    }

    #[tokio::test]
    async fn send_message_reports_delivery() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        assert!(send_message(&bot_for(&server), "hello").await);
    }
}
