// Interactive console - Line-oriented front end hosting both panels
use crate::application::chat_panel::SubmitOutcome;
use crate::application::dashboard_panel::{ActionOutcome, PanelMode};
use crate::application::workspace::Workspace;
use crate::infrastructure::config::ConsoleSettings;
use crate::presentation::render::Renderer;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::watch;

// How long to wait for the dashboard to pick up a chat-driven change.
const DASHBOARD_SETTLE_TIMEOUT: Duration = Duration::from_secs(10);

const HELP_TEXT: &str = "\
Type a message to chat with the assistant, or use a command:
  /dashboard             show tasks and meetings
  /refresh               reload tasks and meetings
  /complete <id>         mark a task complete
  /delete-task <id>      delete a task
  /delete-meeting <id>   delete a meeting
  /history               show the conversation so far
  /help                  show this help
  /quit                  exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Chat(String),
    Dashboard,
    Refresh,
    CompleteTask(i64),
    DeleteTask(i64),
    DeleteMeeting(i64),
    History,
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_command(line: &str) -> ConsoleCommand {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return ConsoleCommand::Chat(line.to_string());
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    let with_id = |build: fn(i64) -> ConsoleCommand| match arg.map(str::parse::<i64>) {
        Some(Ok(id)) => build(id),
        _ => ConsoleCommand::Invalid(format!("/{} needs a numeric id", name)),
    };

    match name {
        "dashboard" => ConsoleCommand::Dashboard,
        "refresh" => ConsoleCommand::Refresh,
        "complete" => with_id(ConsoleCommand::CompleteTask),
        "delete-task" => with_id(ConsoleCommand::DeleteTask),
        "delete-meeting" => with_id(ConsoleCommand::DeleteMeeting),
        "history" => ConsoleCommand::History,
        "help" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        other => ConsoleCommand::Invalid(format!("Unknown command /{}", other)),
    }
}

pub struct Console<W> {
    workspace: Workspace,
    renderer: Renderer,
    settings: ConsoleSettings,
    out: W,
}

impl<W: AsyncWrite + Unpin> Console<W> {
    pub fn new(workspace: Workspace, renderer: Renderer, settings: ConsoleSettings, out: W) -> Self {
        Self {
            workspace,
            renderer,
            settings,
            out,
        }
    }

    /// Mount the dashboard and process lines until `/quit` or end of input.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> anyhow::Result<()> {
        let mut updates = self.workspace.dashboard.updates();
        let mount = self.workspace.dashboard.mount();
        self.print("Type a message, or /help for commands.").await?;

        if self.settle(&mut updates).await {
            self.print_dashboard().await?;
        } else {
            tracing::warn!("Dashboard did not finish its first load");
        }

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            let command = parse_command(&line);
            if command == ConsoleCommand::Quit {
                break;
            }
            self.handle(command).await?;
        }

        mount.unmount();
        tracing::info!("Console closed");
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.out
    }

    async fn handle(&mut self, command: ConsoleCommand) -> anyhow::Result<()> {
        match command {
            ConsoleCommand::Chat(text) => self.chat(text).await?,
            ConsoleCommand::Dashboard => self.print_dashboard().await?,
            ConsoleCommand::Refresh => {
                self.workspace.dashboard.refresh().await;
                self.print_dashboard().await?;
            }
            ConsoleCommand::CompleteTask(id) => {
                let already_done = self
                    .workspace
                    .dashboard
                    .view()
                    .tasks
                    .iter()
                    .any(|t| t.id == id && t.completed);
                if already_done {
                    self.print(&format!("Task #{} is already complete", id)).await?;
                } else {
                    let outcome = self.workspace.dashboard.complete_task(id).await;
                    self.after_action(outcome).await?;
                }
            }
            ConsoleCommand::DeleteTask(id) => {
                let outcome = self.workspace.dashboard.delete_task(id).await;
                self.after_action(outcome).await?;
            }
            ConsoleCommand::DeleteMeeting(id) => {
                let outcome = self.workspace.dashboard.delete_meeting(id).await;
                self.after_action(outcome).await?;
            }
            ConsoleCommand::History => {
                let transcript = self.workspace.chat.transcript();
                let text = self.renderer.transcript(&transcript);
                self.print(&text).await?;
            }
            ConsoleCommand::Help => self.print(HELP_TEXT).await?,
            ConsoleCommand::Invalid(reason) => {
                self.print(&format!("{} (try /help)", reason)).await?;
            }
            ConsoleCommand::Quit => {}
        }
        Ok(())
    }

    async fn chat(&mut self, text: String) -> anyhow::Result<()> {
        let mut updates = self.workspace.dashboard.updates();
        updates.borrow_and_update();

        let outcome = self.workspace.chat.send(text).await;
        if outcome == SubmitOutcome::Ignored {
            return Ok(());
        }

        if let Some(reply) = self.workspace.chat.transcript().last() {
            let line = self.renderer.message(reply);
            self.print(&line).await?;
        }

        if outcome == (SubmitOutcome::Replied { notified: true })
            && self.settings.show_dashboard_after_chat
        {
            if self.settle(&mut updates).await {
                self.print_dashboard().await?;
            } else {
                tracing::warn!("Dashboard did not refresh after chat change");
            }
        }
        Ok(())
    }

    /// Wait for a refresh to be applied with no newer one pending.
    async fn settle(&self, updates: &mut watch::Receiver<u64>) -> bool {
        let dashboard = &self.workspace.dashboard;
        let settled = tokio::time::timeout(DASHBOARD_SETTLE_TIMEOUT, async {
            loop {
                if updates.changed().await.is_err() {
                    return false;
                }
                if dashboard.view().mode != PanelMode::Loading {
                    return true;
                }
            }
        })
        .await;
        settled.unwrap_or(false)
    }

    // Action failures are only logged; the dashboard is shown as it stands.
    async fn after_action(&mut self, outcome: ActionOutcome) -> anyhow::Result<()> {
        tracing::debug!("Dashboard action finished: {:?}", outcome);
        self.print_dashboard().await
    }

    async fn print_dashboard(&mut self) -> anyhow::Result<()> {
        let text = self.renderer.dashboard(&self.workspace.dashboard.view());
        self.print(&text).await
    }

    async fn print(&mut self, text: &str) -> anyhow::Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await?;
        Ok(())
    }
}
