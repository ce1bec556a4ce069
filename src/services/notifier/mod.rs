//! Outbound notification fan-out.
//!
//! The mark engine publishes every [`Notification`] on one broadcast channel and does
//! not know who listens. Each sink runs in its own task with its own receiver.

mod desktop;
mod log_sink;

pub use desktop::DesktopSink;
pub use log_sink::LogSink;

use crate::error::Result;
use crate::events::Notification;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

const CHANNEL_CAPACITY: usize = 64;

/// Publishing side of the notification channel. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notification>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    pub fn publish(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            debug!("Notification dropped: no subscribers");
        }
    }
}

/// Consumer of notifications (log, desktop popups, ...).
#[async_trait::async_trait]
pub trait NotificationSink: Send + Sync {
    fn name(&self) -> &'static str;

    async fn deliver(&self, notification: &Notification) -> Result<()>;
}

/// Runs `sink` until the notifier is dropped.
pub fn spawn_sink(
    sink: Box<dyn NotificationSink>,
    mut rx: broadcast::Receiver<Notification>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(notification) => {
                    if let Err(e) = sink.deliver(&notification).await {
                        warn!("{} sink failed to deliver notification: {}", sink.name(), e);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("{} sink lagged, skipped {} notifications", sink.name(), skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        debug!("{} sink stopped", sink.name());
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct RecordingSink {
        seen: Arc<Mutex<Vec<Notification>>>,
    }

    #[async_trait::async_trait]
    impl NotificationSink for RecordingSink {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn deliver(&self, notification: &Notification) -> Result<()> {
            self.seen.lock().push(notification.clone());
            Ok(())
        }
    }

    #[test]
    fn test_publish_without_subscribers_is_fine() {
        Notifier::new().publish(Notification::AllCleared);
    }

    #[tokio::test]
    async fn test_sink_receives_in_order_and_stops_on_close() {
        let notifier = Notifier::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let handle = spawn_sink(
            Box::new(RecordingSink { seen: seen.clone() }),
            notifier.subscribe(),
        );

        notifier.publish(Notification::MarkModeEntered);
        notifier.publish(Notification::AllCleared);
        drop(notifier);

        handle.await.unwrap();
        assert_eq!(
            *seen.lock(),
            vec![Notification::MarkModeEntered, Notification::AllCleared]
        );
    }
}
