use crate::error::Result;
use crate::events::Notification;
use std::collections::HashMap;
use tracing::{debug, info};
use zbus::zvariant::Value;
use zbus::Connection;

use super::NotificationSink;

const APP_NAME: &str = "Harpoon";
const DESTINATION: &str = "org.freedesktop.Notifications";
const PATH: &str = "/org/freedesktop/Notifications";

/// Desktop popups through the freedesktop notification service on the session bus.
pub struct DesktopSink {
    connection: Connection,
    timeout_ms: i32,
}

impl DesktopSink {
    pub async fn connect(timeout_ms: u64) -> Result<Self> {
        info!("Connecting to the notification service over D-Bus");
        let connection = Connection::session().await?;
        Ok(Self {
            connection,
            timeout_ms: i32::try_from(timeout_ms).unwrap_or(i32::MAX),
        })
    }
}

#[async_trait::async_trait]
impl NotificationSink for DesktopSink {
    fn name(&self) -> &'static str {
        "desktop"
    }

    async fn deliver(&self, notification: &Notification) -> Result<()> {
        let body = notification.message();
        let actions: Vec<&str> = Vec::new();
        let hints: HashMap<&str, Value<'_>> = HashMap::new();

        self.connection
            .call_method(
                Some(DESTINATION),
                PATH,
                Some(DESTINATION),
                "Notify",
                &(APP_NAME, 0u32, "", APP_NAME, body.as_str(), actions, hints, self.timeout_ms),
            )
            .await?;

        debug!("Desktop notification sent: {}", body);
        Ok(())
    }
}
