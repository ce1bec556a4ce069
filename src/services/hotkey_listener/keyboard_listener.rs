use crate::config::Config;
use crate::error::{HarpoonError, Result};
use crate::events::{ControlEvent, Intent, KeyCode, KeyEvent, KeyState};
use crate::harpoon_error;
use crate::services::VirtualDevice;
use crate::utils::DeviceFinder;
use evdev::{Device, EventStream, EventType, InputEvent};
use std::path::Path;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use super::chord_decoder::ChordDecoder;
use super::key_mapping::HotkeyMap;
use super::r#trait::HotkeyListenerTrait;

/// Reads the keyboard through evdev and turns configured chords into intents.
pub struct RealHotkeyListener {
    events: EventStream,
    grabbed: bool,
    passthrough: Option<VirtualDevice>,
    decoder: ChordDecoder,
    tx: mpsc::Sender<ControlEvent>,
}

impl RealHotkeyListener {
    pub fn new(config: &Config, tx: mpsc::Sender<ControlEvent>) -> Result<Self> {
        info!("Initializing hotkey listener");

        let hotkeys = HotkeyMap::from_config(&config.hotkeys)
            .map_err(|e| harpoon_error!(internal, "Invalid hotkeys: {}", e))?;

        let device_path = DeviceFinder::find_keyboard_device(&config.input.device_path)?;
        let mut device = Device::open(&device_path).map_err(|e| {
            harpoon_error!(device_not_found, "Failed to open device {:?}: {}", device_path, e)
        })?;

        let passthrough = if config.input.grab {
            if let Err(e) = device.grab() {
                Self::log_grab_error(&device_path, &e);
                return Err(harpoon_error!(
                    permission,
                    "Failed to grab the device exclusively: {}",
                    e
                ));
            }
            info!("Device grabbed exclusively, non-hotkey keys go through uinput");
            Some(VirtualDevice::new("Harpoon Passthrough")?)
        } else {
            None
        };

        info!(
            "Listening on {} ({}) with {} chords",
            device.name().unwrap_or("Unknown"),
            device_path.display(),
            hotkeys.len()
        );

        let events = device.into_event_stream()?;

        Ok(Self {
            events,
            grabbed: passthrough.is_some(),
            passthrough,
            decoder: ChordDecoder::new(hotkeys),
            tx,
        })
    }

    async fn run_impl(mut self) -> Result<()> {
        loop {
            let event = match self.events.next_event().await {
                Ok(event) => event,
                Err(e) => {
                    error!("Failed to read keyboard events: {}", e);
                    return Err(HarpoonError::Io(e));
                }
            };

            if let Some(intent) = self.handle_event(event) {
                if self.tx.send(intent.into()).await.is_err() {
                    info!("Event loop closed, hotkey listener stopping");
                    return Ok(());
                }
            }
        }
    }

    /// Feeds key events to the chord decoder; keys it lets through go to the
    /// passthrough device when grabbing.
    fn handle_event(&mut self, event: InputEvent) -> Option<Intent> {
        if event.event_type() != EventType::KEY {
            return None;
        }

        let key = evdev::KeyCode::new(event.code());
        let state = KeyState::from_value(event.value())?;
        let decoded = self.decoder.feed(key, state);

        if decoded.forward {
            self.forward(KeyEvent::new(KeyCode(key.code()), state, decoded.modifiers));
        }
        decoded.intent
    }

    fn forward(&mut self, event: KeyEvent) {
        if let Some(device) = self.passthrough.as_mut() {
            if let Err(e) = device.send_key(&event) {
                warn!("Passthrough via {} failed: {}", device.name(), e);
            }
        }
    }

    fn log_grab_error(device_path: &Path, e: &std::io::Error) {
        warn!("Failed to grab {}: {}", device_path.display(), e);
        warn!("Another process may hold the device, or input.grab needs to be false.");
        warn!("Add your user to the input group: sudo usermod -a -G input $USER");
    }
}

#[async_trait::async_trait]
impl HotkeyListenerTrait for RealHotkeyListener {
    async fn run(self: Box<Self>) -> Result<()> {
        (*self).run_impl().await
    }
}

impl Drop for RealHotkeyListener {
    fn drop(&mut self) {
        if self.grabbed {
            info!("Releasing grabbed device");
            if let Err(e) = self.events.device_mut().ungrab() {
                error!("Failed to release device: {}", e);
            }
        }
    }
}
