// Application layer - Panel view models and the API they depend on
pub mod assistant_api;
pub mod chat_panel;
pub mod dashboard_panel;
pub mod notification_bridge;
pub mod workspace;

#[cfg(test)]
pub mod testing;
