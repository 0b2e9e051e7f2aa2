// Plain-text rendering of the chat transcript and the dashboard
use crate::application::dashboard_panel::{DashboardView, PanelMode};
use crate::domain::chat::ChatMessage;
use crate::domain::meeting::Meeting;
use crate::domain::task::Task;
use chrono::{DateTime, FixedOffset, Utc};
use std::fmt::Write;

pub const NO_TASKS_TEXT: &str = "No tasks yet";
pub const NO_MEETINGS_TEXT: &str = "No meetings scheduled";

const DATE_FORMAT: &str = "%b %-d, %Y";
const DATE_TIME_FORMAT: &str = "%b %-d, %Y %-I:%M %p";
const TIME_FORMAT: &str = "%-I:%M %p";

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    offset: FixedOffset,
}

impl Renderer {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    #[cfg(test)]
    pub fn utc() -> Self {
        Self::new(FixedOffset::east_opt(0).unwrap())
    }

    pub fn message(&self, message: &ChatMessage) -> String {
        let speaker = if message.is_user { "you" } else { "assistant" };
        format!("{}> {}", speaker, message.text)
    }

    pub fn transcript(&self, messages: &[ChatMessage]) -> String {
        messages
            .iter()
            .map(|m| self.message(m))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Errors and loading replace the whole panel.
    pub fn dashboard(&self, view: &DashboardView) -> String {
        match &view.mode {
            PanelMode::Loading => "Loading...".to_string(),
            PanelMode::Errored(message) => format!("! {}", message),
            PanelMode::Loaded => {
                let mut out = String::from("Tasks\n");
                if view.tasks.is_empty() {
                    let _ = writeln!(out, "  {}", NO_TASKS_TEXT);
                }
                for task in &view.tasks {
                    let _ = writeln!(out, "{}", self.task(task));
                }

                out.push_str("\nMeetings\n");
                if view.meetings.is_empty() {
                    let _ = writeln!(out, "  {}", NO_MEETINGS_TEXT);
                }
                for meeting in &view.meetings {
                    let _ = writeln!(out, "{}", self.meeting(meeting));
                }

                out.trim_end().to_string()
            }
        }
    }

    pub fn task(&self, task: &Task) -> String {
        let check = if task.completed { "x" } else { " " };
        format!(
            "  [{}] #{} {}  {}",
            check,
            task.id,
            task.title,
            self.format(task.created_at, DATE_FORMAT)
        )
    }

    pub fn meeting(&self, meeting: &Meeting) -> String {
        format!(
            "  #{} {}  {} - {}",
            meeting.id,
            meeting.title,
            self.format(meeting.start_time, DATE_TIME_FORMAT),
            self.format(meeting.end_time, TIME_FORMAT)
        )
    }

    fn format(&self, at: DateTime<Utc>, pattern: &str) -> String {
        at.with_timezone(&self.offset).format(pattern).to_string()
    }
}
