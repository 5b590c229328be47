use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::error::{BotError, BotResult};

/// Source of homework review statuses.
#[async_trait]
pub trait HomeworkApi {
    /// Fetch every status change since `from_date` as a raw JSON body.
    async fn get_api_answer(&self, from_date: i64) -> BotResult<Value>;
}

#[derive(Clone)]
pub struct PracticumClient {
    endpoint: String,
    token: String,
    http: Client,
}

impl PracticumClient {
    pub fn new(endpoint: String, token: String) -> Self {
        Self {
            endpoint,
            token,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn get_api_answer(&self, from_date: i64) -> BotResult<Value> {
        tracing::debug!("Requesting homework statuses from_date={}", from_date);

        let response = self
            .http
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|err| {
                BotError::response_api(format!("Request to {} failed: {}", self.endpoint, err))
            })?;

        if response.status() != StatusCode::OK {
            return Err(BotError::HttpStatus {
                status: response.status().as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| BotError::response_api(format!("Response is not valid JSON: {}", err)))
    }
}
