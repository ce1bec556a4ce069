use crate::error::Result;
use crate::events::{WindowHandle, WindowInfo};
use parking_lot::RwLock;
use tracing::info;

use super::r#trait::WindowRegistry;

const FAKE_WINDOWS: [(&str, &str); 4] = [
    ("Terminal - dry_run", "alacritty"),
    ("Browser - dry_run", "firefox"),
    ("Editor - dry_run", "code"),
    ("Game - dry_run", "steam"),
];

/// In-memory registry used with `--dry-run`: fixed fake windows, no desktop access.
pub struct DryRunRegistry {
    windows: Vec<WindowInfo>,
    focused: RwLock<usize>,
}

impl DryRunRegistry {
    pub fn new() -> Self {
        let windows = FAKE_WINDOWS
            .iter()
            .enumerate()
            .map(|(i, (title, process))| {
                WindowInfo::new(WindowHandle(i as u64 + 1), title.to_string())
                    .with_process(*process)
                    .with_pid(1000 + i as u32)
            })
            .collect();

        Self {
            windows,
            focused: RwLock::new(0),
        }
    }

    /// Simulates the user focusing the next window.
    pub fn rotate_focus(&self) -> WindowHandle {
        let mut focused = self.focused.write();
        *focused = (*focused + 1) % self.windows.len();
        let window = &self.windows[*focused];
        info!("Dry-run: focus moved to {}", window);
        window.handle
    }

    fn get(&self, handle: WindowHandle) -> Option<&WindowInfo> {
        self.windows.iter().find(|w| w.handle == handle)
    }
}

impl Default for DryRunRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowRegistry for DryRunRegistry {
    fn foreground_window(&self) -> Option<WindowHandle> {
        self.windows.get(*self.focused.read()).map(|w| w.handle)
    }

    fn is_valid(&self, handle: WindowHandle) -> bool {
        self.get(handle).is_some_and(|w| w.visible)
    }

    fn title(&self, handle: WindowHandle) -> Option<String> {
        self.get(handle).map(|w| w.title.clone())
    }

    fn process_name(&self, handle: WindowHandle) -> Option<String> {
        self.get(handle).and_then(|w| w.process_name.clone())
    }

    fn activate(&self, handle: WindowHandle) -> bool {
        match self.windows.iter().position(|w| w.handle == handle) {
            Some(index) => {
                *self.focused.write() = index;
                info!("[DRY RUN] Activated {}", self.windows[index]);
                true
            }
            None => false,
        }
    }

    fn enumerate(&self) -> Result<Vec<WindowInfo>> {
        Ok(self.windows.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_and_activate() {
        let registry = DryRunRegistry::new();
        let first = registry.foreground_window().unwrap();

        let second = registry.rotate_focus();
        assert_ne!(first, second);
        assert_eq!(registry.foreground_window(), Some(second));

        assert!(registry.activate(first));
        assert_eq!(registry.foreground_window(), Some(first));
        assert!(!registry.activate(WindowHandle(99)));
    }

    #[test]
    fn test_lookup_by_process_and_title() {
        let registry = DryRunRegistry::new();
        assert_eq!(
            registry.find_by_process_and_title("CODE", "editor"),
            Some(WindowHandle(3))
        );
        assert_eq!(registry.process_name(WindowHandle(2)).as_deref(), Some("firefox"));
    }
}
