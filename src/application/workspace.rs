// Workspace - Owns the notification bridge and wires it into both panels
use crate::application::assistant_api::AssistantApi;
use crate::application::chat_panel::ChatPanel;
use crate::application::dashboard_panel::DashboardPanel;
use crate::application::notification_bridge::NotificationBridge;
use std::sync::Arc;

/// Chat is the publisher and the dashboard the subscriber on a bridge that
/// belongs to this workspace alone.
pub struct Workspace {
    pub chat: ChatPanel,
    pub dashboard: Arc<DashboardPanel>,
}

impl Workspace {
    pub fn new(api: Arc<dyn AssistantApi>) -> Self {
        let bridge = NotificationBridge::new();
        let chat = ChatPanel::new(api.clone(), bridge.clone());
        let dashboard = Arc::new(DashboardPanel::new(api, bridge));

        Self { chat, dashboard }
    }

    /// Probe the service once, then build the workspace. An unhealthy or
    /// unreachable service is only a warning; the panels surface failures
    /// on their own.
    pub async fn connect(api: Arc<dyn AssistantApi>) -> Self {
        match api.health_check().await {
            Ok(()) => tracing::info!("Assistant service is healthy"),
            Err(e) => tracing::warn!("Assistant service health check failed: {}", e),
        }
        Self::new(api)
    }
}
