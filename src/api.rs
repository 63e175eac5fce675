use std::future::Future;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::model::{AttemptRequest, Feedback, HealthStatus, Scenario};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const CASH_GAME: &str = "cash_game";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Decode(#[source] reqwest::Error),
}

pub trait PracticeApi {
    fn health(&self) -> impl Future<Output = Result<HealthStatus, ClientError>> + Send;

    fn scenarios(
        &self,
        category: &str,
    ) -> impl Future<Output = Result<Vec<Scenario>, ClientError>> + Send;

    fn submit_attempt(
        &self,
        attempt: &AttemptRequest,
    ) -> impl Future<Output = Result<Feedback, ClientError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpPracticeApi {
    client: Client,
    base_url: String,
}

impl HttpPracticeApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder().build().map_err(ClientError::Transport)?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            warn!(path, status = status.as_u16(), "backend rejected request");
            return Err(ClientError::Status(status.as_u16()));
        }
        response.json::<T>().await.map_err(|err| {
            warn!(path, error = %err, "could not decode backend response");
            ClientError::Decode(err)
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        debug!(path, "GET");
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|err| {
                warn!(path, error = %err, "GET failed");
                ClientError::Transport(err)
            })?;
        Self::decode(path, response).await
    }
}

impl PracticeApi for HttpPracticeApi {
    async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.get_json("/api/v1/health").await
    }

    async fn scenarios(&self, category: &str) -> Result<Vec<Scenario>, ClientError> {
        self.get_json(&format!("/api/v1/practice/scenarios/{category}"))
            .await
    }

    async fn submit_attempt(&self, attempt: &AttemptRequest) -> Result<Feedback, ClientError> {
        let path = "/api/v1/practice/attempt";
        debug!(path, scenario_id = %attempt.scenario_id, action = %attempt.action, "POST");
        let response = self
            .client
            .post(self.url(path))
            .json(attempt)
            .send()
            .await
            .map_err(|err| {
                warn!(path, error = %err, "POST failed");
                ClientError::Transport(err)
            })?;
        Self::decode(path, response).await
    }
}
