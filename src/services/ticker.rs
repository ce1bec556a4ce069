use crate::events::ControlEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

/// "Schedule a repeating callback, cancel it later" capability used for the
/// mark-mode timeout poll.
pub trait TickScheduler: Send {
    fn start(&mut self, interval: Duration);
    fn stop(&mut self);
}

/// Feeds [`ControlEvent::Tick`] into the event loop from a tokio task.
pub struct TokioTicker {
    tx: mpsc::Sender<ControlEvent>,
    handle: Option<JoinHandle<()>>,
}

impl TokioTicker {
    pub fn new(tx: mpsc::Sender<ControlEvent>) -> Self {
        Self { tx, handle: None }
    }
}

impl TickScheduler for TokioTicker {
    fn start(&mut self, period: Duration) {
        self.stop();

        let tx = self.tx.clone();
        self.handle = Some(tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticks.tick().await;
                if tx.send(ControlEvent::Tick).await.is_err() {
                    break;
                }
            }
        }));
        debug!("Ticker started ({}ms)", period.as_millis());
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("Ticker stopped");
        }
    }
}

impl Drop for TokioTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
