// Chat panel - Append-only transcript driven by the chat endpoint
use crate::application::assistant_api::AssistantApi;
use crate::application::notification_bridge::NotificationBridge;
use crate::domain::chat::{ChatMessage, SEND_FAILURE_TEXT};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Draft was empty after trimming; nothing was sent.
    Ignored,
    /// A reply was appended. `notified` is set when it signalled a data change.
    Replied { notified: bool },
    /// The request failed and the error entry was appended.
    Failed,
}

#[derive(Default)]
struct ChatState {
    transcript: Vec<ChatMessage>,
    draft: String,
}

#[derive(Clone)]
pub struct ChatPanel {
    api: Arc<dyn AssistantApi>,
    bridge: NotificationBridge,
    state: Arc<Mutex<ChatState>>,
}

impl ChatPanel {
    pub fn new(api: Arc<dyn AssistantApi>, bridge: NotificationBridge) -> Self {
        Self {
            api,
            bridge,
            state: Arc::new(Mutex::new(ChatState::default())),
        }
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        self.state().draft = text.into();
    }

    #[cfg(test)]
    pub fn draft(&self) -> String {
        self.state().draft.clone()
    }

    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.state().transcript.clone()
    }

    /// Send the current draft.
    ///
    /// The user entry is appended and the draft cleared before the request is
    /// issued, so exactly one entry exists while the call is pending and
    /// exactly one more (reply or error) once it resolves.
    pub async fn submit(&self) -> SubmitOutcome {
        let text = {
            let mut state = self.state();
            if state.draft.trim().is_empty() {
                return SubmitOutcome::Ignored;
            }
            let text = std::mem::take(&mut state.draft);
            state.transcript.push(ChatMessage::user(text.clone()));
            text
        };

        match self.api.send_chat_message(&text).await {
            Ok(reply) => {
                let notified = reply.signals_change();
                tracing::debug!(
                    "Chat reply of type {}",
                    reply.kind.as_deref().unwrap_or("unknown")
                );
                self.state()
                    .transcript
                    .push(ChatMessage::assistant(reply.content));

                if notified {
                    tracing::debug!("Chat reply changed server data, notifying dashboard");
                    self.bridge.publish();
                }
                SubmitOutcome::Replied { notified }
            }
            Err(e) => {
                tracing::error!("Error sending chat message: {}", e);
                self.state()
                    .transcript
                    .push(ChatMessage::assistant(SEND_FAILURE_TEXT));
                SubmitOutcome::Failed
            }
        }
    }

    /// Replace the draft with `text` and submit it.
    pub async fn send(&self, text: impl Into<String>) -> SubmitOutcome {
        self.set_draft(text);
        self.submit().await
    }

    fn state(&self) -> MutexGuard<'_, ChatState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
