// In-memory AssistantApi double for panel tests
use crate::application::assistant_api::{ApiError, ApiResult, AssistantApi};
use crate::domain::chat::ChatReply;
use crate::domain::meeting::Meeting;
use crate::domain::task::Task;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::oneshot;

pub fn task(id: i64, title: &str, completed: bool) -> Task {
    Task {
        id,
        title: title.to_string(),
        completed,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn meeting(id: i64, title: &str) -> Meeting {
    Meeting {
        id,
        title: title.to_string(),
        start_time: Utc.with_ymd_and_hms(2024, 1, 2, 14, 0, 0).unwrap(),
        end_time: Utc.with_ymd_and_hms(2024, 1, 2, 15, 0, 0).unwrap(),
    }
}

#[derive(Default)]
pub struct ScriptedApi {
    pub reply: Mutex<String>,
    pub fail_chat: AtomicBool,
    pub fail_tasks: AtomicBool,
    pub fail_meetings: AtomicBool,
    pub fail_health: AtomicBool,
    pub tasks: Mutex<Vec<Task>>,
    pub meetings: Mutex<Vec<Meeting>>,
    /// Consumed one per `list_tasks` call before falling back to `tasks`.
    pub task_script: Mutex<VecDeque<(Duration, Vec<Task>)>>,
    pub chat_gate: Mutex<Option<oneshot::Receiver<()>>>,
    pub sent: Mutex<Vec<String>>,
    pub chat_calls: AtomicUsize,
    pub task_calls: AtomicUsize,
    pub meeting_calls: AtomicUsize,
    pub health_calls: AtomicUsize,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self {
            reply: Mutex::new("ok".to_string()),
            ..Default::default()
        }
    }

    pub fn with_lists(tasks: Vec<Task>, meetings: Vec<Meeting>) -> Self {
        let api = Self::new();
        *api.tasks.lock().unwrap() = tasks;
        *api.meetings.lock().unwrap() = meetings;
        api
    }

    pub fn set_reply(&self, text: &str) {
        *self.reply.lock().unwrap() = text.to_string();
    }

    pub fn set_tasks(&self, tasks: Vec<Task>) {
        *self.tasks.lock().unwrap() = tasks;
    }

    /// Hold the next chat call until the returned sender fires.
    pub fn gate_chat(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.chat_gate.lock().unwrap() = Some(rx);
        tx
    }

    pub fn script_tasks(&self, delay: Duration, tasks: Vec<Task>) {
        self.task_script.lock().unwrap().push_back((delay, tasks));
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.task_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssistantApi for ScriptedApi {
    async fn send_chat_message(&self, text: &str) -> ApiResult<ChatReply> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(text.to_string());

        let gate = self.chat_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if self.fail_chat.load(Ordering::SeqCst) {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        Ok(ChatReply::text(self.reply.lock().unwrap().clone()))
    }

    async fn list_tasks(&self) -> ApiResult<Vec<Task>> {
        self.task_calls.fetch_add(1, Ordering::SeqCst);

        let scripted = self.task_script.lock().unwrap().pop_front();
        if let Some((delay, tasks)) = scripted {
            tokio::time::sleep(delay).await;
            return Ok(tasks);
        }

        if self.fail_tasks.load(Ordering::SeqCst) {
            return Err(ApiError::Server { status: 500 });
        }
        Ok(self.tasks.lock().unwrap().clone())
    }

    async fn list_meetings(&self) -> ApiResult<Vec<Meeting>> {
        self.meeting_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_meetings.load(Ordering::SeqCst) {
            return Err(ApiError::Server { status: 500 });
        }
        Ok(self.meetings.lock().unwrap().clone())
    }

    async fn health_check(&self) -> ApiResult<()> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_health.load(Ordering::SeqCst) {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        Ok(())
    }
}
