use crate::config::Config;
use crate::error::Result;
use crate::events::ControlEvent;
use crate::services::window_registry::DryRunRegistry;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Source of intents for the event loop.
#[async_trait::async_trait]
pub trait HotkeyListenerTrait {
    /// Runs until the event loop stops receiving.
    async fn run(self: Box<Self>) -> Result<()>;
}

/// Factory function to create the evdev listener, or the scripted one when a dry-run
/// registry is given
pub fn create_hotkey_listener(
    config: &Config,
    tx: mpsc::Sender<ControlEvent>,
    dry_run: Option<Arc<DryRunRegistry>>,
) -> Result<Box<dyn HotkeyListenerTrait + Send>> {
    match dry_run {
        Some(registry) => Ok(Box::new(
            super::dry_hotkey_listener::DryRunHotkeyListener::new(registry, tx),
        )),
        None => Ok(Box::new(super::keyboard_listener::RealHotkeyListener::new(
            config, tx,
        )?)),
    }
}
