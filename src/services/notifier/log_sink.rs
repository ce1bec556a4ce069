use crate::error::Result;
use crate::events::Notification;
use tracing::{info, warn};

use super::NotificationSink;

/// Writes notifications to the log. Always installed.
pub struct LogSink;

#[async_trait::async_trait]
impl NotificationSink for LogSink {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn deliver(&self, notification: &Notification) -> Result<()> {
        match notification {
            Notification::SwitchFailed(_) => warn!("{}", notification),
            Notification::OverlayRequested(bindings) => {
                info!("Marks ({}):", bindings.len());
                for line in notification.message().lines() {
                    info!("  {}", line);
                }
            }
            _ => info!("{}", notification),
        }
        Ok(())
    }
}
