// HTTP implementation of the assistant API
use crate::application::assistant_api::{ApiError, ApiResult, AssistantApi};
use crate::domain::chat::ChatReply;
use crate::domain::meeting::Meeting;
use crate::domain::task::Task;
use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpAssistantApi {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct TaskList {
    tasks: Vec<Task>,
}

#[derive(Deserialize)]
struct MeetingList {
    meetings: Vec<Meeting>,
}

#[derive(Deserialize)]
struct HealthStatus {
    status: String,
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl HttpAssistantApi {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        tracing::debug!("Making request to: GET {}", url);

        let response = self.client.get(&url).send().await?;
        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();
        tracing::debug!("Received response {} from {}", status, response.url());

        if !status.is_success() {
            return Err(ApiError::Server {
                status: status.as_u16(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl AssistantApi for HttpAssistantApi {
    async fn send_chat_message(&self, text: &str) -> ApiResult<ChatReply> {
        let url = self.url("chat");
        tracing::debug!("Making request to: POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&ChatRequest { message: text })
            .send()
            .await?;

        Self::read_json(response).await
    }

    async fn list_tasks(&self) -> ApiResult<Vec<Task>> {
        let body: TaskList = self.get_json("tasks").await?;
        Ok(body.tasks)
    }

    async fn list_meetings(&self) -> ApiResult<Vec<Meeting>> {
        let body: MeetingList = self.get_json("meetings").await?;
        Ok(body.meetings)
    }

    async fn health_check(&self) -> ApiResult<()> {
        let body: HealthStatus = self.get_json("health").await?;
        if body.status != "ok" {
            tracing::warn!("Assistant service reports status '{}'", body.status);
        }
        Ok(())
    }
}
