// Dashboard panel - Task/meeting snapshot refreshed from the list endpoints
use crate::application::assistant_api::AssistantApi;
use crate::application::notification_bridge::NotificationBridge;
use crate::domain::command::{DashboardAction, DashboardCommand};
use crate::domain::meeting::Meeting;
use crate::domain::task::Task;
use futures::StreamExt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};

/// Banner shown in place of the dashboard when a refresh fails.
pub const LOAD_FAILURE_TEXT: &str = "Failed to load dashboard data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelMode {
    Loading,
    Loaded,
    Errored(String),
}

/// Point-in-time copy of the panel, used for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub mode: PanelMode,
    pub tasks: Vec<Task>,
    pub meetings: Vec<Meeting>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Loaded,
    Errored,
    /// A newer refresh started before this one finished; its result was
    /// dropped.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The command was accepted and the follow-up refresh ran.
    Applied(RefreshOutcome),
    /// The command failed. Nothing changed on screen.
    Failed,
}

struct DashboardState {
    mode: PanelMode,
    tasks: Vec<Task>,
    meetings: Vec<Meeting>,
    generation: u64,
    in_flight: Option<AbortHandle>,
}

pub struct DashboardPanel {
    api: Arc<dyn AssistantApi>,
    bridge: NotificationBridge,
    state: Mutex<DashboardState>,
    applied: watch::Sender<u64>,
}

impl DashboardPanel {
    pub fn new(api: Arc<dyn AssistantApi>, bridge: NotificationBridge) -> Self {
        Self {
            api,
            bridge,
            state: Mutex::new(DashboardState {
                mode: PanelMode::Loading,
                tasks: Vec::new(),
                meetings: Vec::new(),
                generation: 0,
                in_flight: None,
            }),
            applied: watch::Sender::new(0),
        }
    }

    pub fn view(&self) -> DashboardView {
        let state = self.state();
        DashboardView {
            mode: state.mode.clone(),
            tasks: state.tasks.clone(),
            meetings: state.meetings.clone(),
        }
    }

    /// Ticks each time a refresh result is applied (loaded or errored).
    pub fn updates(&self) -> watch::Receiver<u64> {
        self.applied.subscribe()
    }

    /// Fetch tasks and meetings together and replace both lists wholesale.
    ///
    /// If either fetch fails the panel goes to `Errored` and keeps the old
    /// lists. Starting a refresh aborts any earlier one still in flight, and
    /// only the most recently started refresh may apply its result.
    pub async fn refresh(&self) -> RefreshOutcome {
        // Ticket and in-flight handle change together, so a refresh can only
        // ever abort fetches older than its own.
        let (ticket, fetch) = {
            let mut state = self.state();
            state.generation += 1;
            state.mode = PanelMode::Loading;

            let api = self.api.clone();
            let fetch = tokio::spawn(async move {
                futures::try_join!(api.list_tasks(), api.list_meetings())
            });
            if let Some(previous) = state.in_flight.replace(fetch.abort_handle()) {
                previous.abort();
            }
            (state.generation, fetch)
        };

        let result = fetch.await;

        let mut state = self.state();
        let cancelled = matches!(&result, Err(e) if e.is_cancelled());
        if state.generation != ticket || cancelled {
            tracing::debug!("Discarding dashboard refresh #{}, superseded", ticket);
            return RefreshOutcome::Superseded;
        }
        state.in_flight = None;

        let outcome = match result {
            Ok(Ok((tasks, meetings))) => {
                tracing::debug!(
                    "Dashboard refresh #{} loaded {} tasks, {} meetings",
                    ticket,
                    tasks.len(),
                    meetings.len()
                );
                state.tasks = tasks;
                state.meetings = meetings;
                state.mode = PanelMode::Loaded;
                RefreshOutcome::Loaded
            }
            Ok(Err(e)) => {
                tracing::error!("Error fetching dashboard data: {}", e);
                state.mode = PanelMode::Errored(LOAD_FAILURE_TEXT.to_string());
                RefreshOutcome::Errored
            }
            Err(e) => {
                tracing::error!("Dashboard fetch task failed: {}", e);
                state.mode = PanelMode::Errored(LOAD_FAILURE_TEXT.to_string());
                RefreshOutcome::Errored
            }
        };
        drop(state);

        self.applied.send_modify(|count| *count += 1);
        outcome
    }

    pub async fn complete_task(&self, id: i64) -> ActionOutcome {
        let title = self.task_title(id);
        self.run_command(DashboardCommand::new(DashboardAction::CompleteTask, title))
            .await
    }

    pub async fn delete_task(&self, id: i64) -> ActionOutcome {
        let title = self.task_title(id);
        self.run_command(DashboardCommand::new(DashboardAction::DeleteTask, title))
            .await
    }

    pub async fn delete_meeting(&self, id: i64) -> ActionOutcome {
        let title = self.meeting_title(id);
        self.run_command(DashboardCommand::new(DashboardAction::DeleteMeeting, title))
            .await
    }

    /// Refresh now and again on every bridge notification until the returned
    /// handle is dropped.
    pub fn mount(self: &Arc<Self>) -> DashboardMount {
        // Subscribe before the first fetch so no notification slips between.
        let notifications = self.bridge.subscribe().into_stream();

        // Outside the listener, so an early unmount cannot cancel it.
        let panel = Arc::clone(self);
        tokio::spawn(async move {
            panel.refresh().await;
        });

        let panel = Arc::clone(self);
        let listener = tokio::spawn(async move {
            let mut notifications = std::pin::pin!(notifications);
            while notifications.next().await.is_some() {
                tracing::debug!("Data-changed notification received, refreshing dashboard");
                let panel = panel.clone();
                tokio::spawn(async move {
                    panel.refresh().await;
                });
            }
        });

        DashboardMount { listener }
    }

    async fn run_command(&self, command: DashboardCommand) -> ActionOutcome {
        let text = command.to_string();
        match self.api.send_chat_message(&text).await {
            Ok(_) => ActionOutcome::Applied(self.refresh().await),
            Err(e) => {
                tracing::error!("Error running dashboard command '{}': {}", text, e);
                ActionOutcome::Failed
            }
        }
    }

    // An id missing from the snapshot still produces a command, with an
    // empty title; the service decides what that means.
    fn task_title(&self, id: i64) -> String {
        let state = self.state();
        match state.tasks.iter().find(|t| t.id == id) {
            Some(task) => task.title.clone(),
            None => {
                tracing::warn!("Task {} is not in the current snapshot", id);
                String::new()
            }
        }
    }

    fn meeting_title(&self, id: i64) -> String {
        let state = self.state();
        match state.meetings.iter().find(|m| m.id == id) {
            Some(meeting) => meeting.title.clone(),
            None => {
                tracing::warn!("Meeting {} is not in the current snapshot", id);
                String::new()
            }
        }
    }

    fn state(&self) -> MutexGuard<'_, DashboardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Keeps the dashboard subscribed to the bridge. In-flight refreshes are
/// left to finish when this is dropped.
pub struct DashboardMount {
    listener: JoinHandle<()>,
}

impl DashboardMount {
    /// Stops the bridge listener; same as dropping the handle.
    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for DashboardMount {
    fn drop(&mut self) {
        self.listener.abort();
    }
}
