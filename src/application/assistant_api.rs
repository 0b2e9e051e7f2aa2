// API trait for the remote assistant service
use crate::domain::chat::ChatReply;
use crate::domain::meeting::Meeting;
use crate::domain::task::Task;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never reached the service or no response came back.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-2xx status.
    #[error("server error: HTTP {status}")]
    Server { status: u16 },

    /// A 2xx body that does not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Every call is a single independent round trip: no retry, no
/// deduplication of concurrent calls.
#[async_trait]
pub trait AssistantApi: Send + Sync {
    /// Send one chat message and return the assistant's reply
    async fn send_chat_message(&self, text: &str) -> ApiResult<ChatReply>;

    /// Fetch the full task list
    async fn list_tasks(&self) -> ApiResult<Vec<Task>>;

    /// Fetch the full meeting list
    async fn list_meetings(&self) -> ApiResult<Vec<Meeting>>;

    /// Probe service liveness
    async fn health_check(&self) -> ApiResult<()>;
}
