use crate::error::{HarpoonError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const MOUSE_HINTS: [&str; 4] = ["mouse", "deathadder", "touchpad", "trackpoint"];

pub struct DeviceFinder;

impl DeviceFinder {
    /// Resolves `input.device_path`: an explicit path, or `"auto"` to search.
    pub fn find_keyboard_device(device_path: &str) -> Result<PathBuf> {
        if device_path != "auto" {
            let path = PathBuf::from(device_path);
            return if path.exists() {
                info!("Using configured device {:?}", path);
                Ok(path)
            } else {
                HarpoonError::device_not_found(format!("Configured device not found: {:?}", path))
            };
        }

        Self::auto_find_keyboard()
    }

    fn auto_find_keyboard() -> Result<PathBuf> {
        info!("Searching for a keyboard device...");

        if let Ok(device) = Self::find_by_id() {
            info!("Found keyboard by id: {:?}", device);
            return Ok(device);
        }

        if let Ok(device) = Self::find_by_event_devices() {
            info!("Found keyboard among event devices: {:?}", device);
            return Ok(device);
        }

        HarpoonError::device_not_found(
            "No usable keyboard device. Make sure your user is in the 'input' group",
        )
    }

    /// Ranks a `/dev/input/by-id` entry name; `None` means not a keyboard candidate.
    fn by_id_priority(name: &str) -> Option<u32> {
        let lower = name.to_lowercase();
        if !lower.contains("event") || !(lower.contains("kbd") || lower.contains("keyboard")) {
            return None;
        }
        if MOUSE_HINTS.iter().any(|hint| lower.contains(hint)) {
            return None;
        }

        let priority = if lower.ends_with("event-kbd") {
            100
        } else if lower.contains("keyboard") {
            50
        } else {
            10
        };
        Some(priority)
    }

    fn find_by_id() -> Result<PathBuf> {
        let by_id_dir = Path::new("/dev/input/by-id");
        if !by_id_dir.exists() {
            debug!("/dev/input/by-id does not exist");
            return HarpoonError::device_not_found("by-id directory missing");
        }

        let entries = fs::read_dir(by_id_dir).map_err(|e| {
            HarpoonError::Permission(format!("Cannot read /dev/input/by-id: {}", e))
        })?;

        let mut candidates = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("").to_string();

            let Some(priority) = Self::by_id_priority(&name) else {
                continue;
            };
            if !Self::is_device_accessible(&path) {
                warn!("Device {:?} is not accessible", path);
                continue;
            }
            if Self::is_keyboard_device(&path) {
                debug!("Keyboard candidate {} (priority {})", name, priority);
                candidates.push((path, priority));
            }
        }

        candidates.sort_by(|a, b| b.1.cmp(&a.1));
        match candidates.into_iter().next() {
            Some((path, _)) => Ok(path),
            None => HarpoonError::device_not_found("No keyboard in /dev/input/by-id"),
        }
    }

    fn find_by_event_devices() -> Result<PathBuf> {
        let entries = fs::read_dir("/dev/input")
            .map_err(|e| HarpoonError::Permission(format!("Cannot read /dev/input: {}", e)))?;

        let mut event_devices = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("event"))
            {
                event_devices.push(path);
            }
        }
        event_devices.sort();

        event_devices
            .into_iter()
            .find(|path| Self::is_device_accessible(path) && Self::is_keyboard_device(path))
            .map_or_else(
                || HarpoonError::device_not_found("No accessible keyboard among event devices"),
                Ok,
            )
    }

    /// Has letter, space and enter keys and is not a pointing device.
    fn is_keyboard_device(device_path: &Path) -> bool {
        let device = match evdev::Device::open(device_path) {
            Ok(device) => device,
            Err(e) => {
                debug!("Cannot open {:?}: {}", device_path, e);
                return false;
            }
        };

        let name = device.name().unwrap_or("Unknown").to_lowercase();
        if MOUSE_HINTS.iter().any(|hint| name.contains(hint)) {
            debug!("Skipping pointing device {:?} ({})", device_path, name);
            return false;
        }

        device.supported_keys().is_some_and(|keys| {
            keys.contains(evdev::KeyCode::KEY_A)
                && keys.contains(evdev::KeyCode::KEY_SPACE)
                && keys.contains(evdev::KeyCode::KEY_ENTER)
                && keys.iter().count() > 20
        })
    }

    fn is_device_accessible(device_path: &Path) -> bool {
        match fs::File::open(device_path) {
            Ok(_) => true,
            Err(e) => {
                debug!("Device {:?} not accessible: {}", device_path, e);
                false
            }
        }
    }
}
