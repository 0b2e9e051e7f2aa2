// Natural-language commands synthesized for dashboard actions
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAction {
    CompleteTask,
    DeleteTask,
    DeleteMeeting,
}

impl DashboardAction {
    fn verb(self) -> &'static str {
        match self {
            DashboardAction::CompleteTask => "complete task",
            DashboardAction::DeleteTask => "delete task",
            DashboardAction::DeleteMeeting => "delete meeting",
        }
    }
}

/// A dashboard action rendered as the chat text the assistant service parses.
///
/// The service only understands free text, so the item is identified by its
/// title rather than its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardCommand {
    pub action: DashboardAction,
    pub title: String,
}

impl DashboardCommand {
    pub fn new(action: DashboardAction, title: impl Into<String>) -> Self {
        Self {
            action,
            title: title.into(),
        }
    }
}

impl fmt::Display for DashboardCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action.verb(), self.title)
    }
}
