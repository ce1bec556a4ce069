use crate::error::{HarpoonError, Result};
use crate::events::KeyEvent;
use tracing::{debug, info};

const EV_KEY: i32 = 1;

/// uinput keyboard that re-emits keys the grabbed device would otherwise swallow.
pub struct VirtualDevice {
    device: uinput::Device,
    device_name: String,
}

impl VirtualDevice {
    pub fn new(device_name: &str) -> Result<Self> {
        info!("Creating uinput device '{}' for key passthrough", device_name);

        let device = uinput::default()?
            .name(device_name)?
            .event(uinput::event::Keyboard::All)?
            .create()
            .map_err(|e| {
                HarpoonError::Internal(format!(
                    "Failed to create virtual device '{}': {}",
                    device_name, e
                ))
            })?;

        Ok(Self {
            device,
            device_name: device_name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.device_name
    }

    /// Writes one key transition followed by a sync report.
    pub fn send_key(&mut self, event: &KeyEvent) -> Result<()> {
        let code = i32::from(event.key_code.value());

        self.device
            .write(EV_KEY, code, event.state.value())
            .map_err(|e| HarpoonError::Internal(format!("Failed to emit key {}: {}", code, e)))?;
        self.device
            .synchronize()
            .map_err(|e| HarpoonError::Internal(format!("Failed to sync events: {}", e)))?;

        debug!("Forwarded {}", event);
        Ok(())
    }
}

impl Drop for VirtualDevice {
    fn drop(&mut self) {
        info!("Closing virtual device '{}'", self.device_name);
    }
}
