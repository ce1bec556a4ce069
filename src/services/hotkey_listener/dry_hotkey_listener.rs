use crate::error::Result;
use crate::events::{ControlEvent, Intent};
use crate::marks::Slot;
use crate::services::window_registry::DryRunRegistry;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

use super::r#trait::HotkeyListenerTrait;

const STEP_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DemoStep {
    Press(Intent),
    /// User focuses another window by hand.
    RotateFocus,
}

fn demo_script() -> Vec<DemoStep> {
    let slot = |n| Slot::new(n).map(Intent::Slot);
    let mut steps = Vec::new();

    steps.push(DemoStep::Press(Intent::ActivateMarkMode));
    steps.extend(slot(1).map(DemoStep::Press));
    steps.push(DemoStep::RotateFocus);
    steps.push(DemoStep::Press(Intent::ActivateMarkMode));
    steps.extend(slot(2).map(DemoStep::Press));
    steps.push(DemoStep::Press(Intent::CycleNext));
    steps.push(DemoStep::Press(Intent::CyclePrev));
    steps.push(DemoStep::Press(Intent::ShowOverlay));
    steps.extend(Slot::new(1).map(|s| DemoStep::Press(Intent::ClearSlot(s))));
    steps
}

/// Replays a fixed hotkey sequence against the dry-run registry.
pub struct DryRunHotkeyListener {
    registry: Arc<DryRunRegistry>,
    tx: mpsc::Sender<ControlEvent>,
    step_delay: Duration,
}

impl DryRunHotkeyListener {
    pub fn new(registry: Arc<DryRunRegistry>, tx: mpsc::Sender<ControlEvent>) -> Self {
        info!("Initializing dry-run hotkey listener");
        Self {
            registry,
            tx,
            step_delay: STEP_DELAY,
        }
    }

    #[cfg(test)]
    fn with_step_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }

    async fn run_impl(self) -> Result<()> {
        info!("Dry-run mode: replaying a scripted hotkey session");

        for step in demo_script() {
            tokio::time::sleep(self.step_delay).await;
            match step {
                DemoStep::Press(intent) => {
                    info!("[DRY RUN] hotkey {}", intent);
                    if self.tx.send(intent.into()).await.is_err() {
                        return Ok(());
                    }
                }
                DemoStep::RotateFocus => {
                    self.registry.rotate_focus();
                }
            }
        }

        info!("Dry-run script finished, idling until shutdown");
        self.tx.closed().await;
        Ok(())
    }
}

#[async_trait::async_trait]
impl HotkeyListenerTrait for DryRunHotkeyListener {
    async fn run(self: Box<Self>) -> Result<()> {
        (*self).run_impl().await
    }
}
