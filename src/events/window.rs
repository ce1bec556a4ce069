use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to a live top-level window.
///
/// The value is whatever the active backend uses to address windows (X11 window id,
/// sway container id, an index for the dry-run registry). It is only meaningful for
/// the lifetime of the window and is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowHandle(pub u64);

impl WindowHandle {
    pub fn value(&self) -> u64 {
        self.0
    }

    /// X11 tools print and accept ids in hex.
    pub fn to_hex(&self) -> String {
        format!("0x{:08x}", self.0)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let value = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16).ok()?,
            None => raw.parse::<u64>().ok()?,
        };
        Some(Self(value))
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Snapshot of one top-level window as reported by a registry backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowInfo {
    pub handle: WindowHandle,
    pub title: String,
    pub process_name: Option<String>,
    pub pid: Option<u32>,
    pub visible: bool,
    /// Desktop, dock and other shell surfaces that are never switch targets.
    pub shell: bool,
}

impl WindowInfo {
    pub fn new(handle: WindowHandle, title: String) -> Self {
        Self {
            handle,
            title,
            process_name: None,
            pid: None,
            visible: true,
            shell: false,
        }
    }

    pub fn with_process(mut self, process_name: impl Into<String>) -> Self {
        self.process_name = Some(process_name.into());
        self
    }

    pub fn with_pid(mut self, pid: u32) -> Self {
        self.pid = Some(pid);
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_shell(mut self, shell: bool) -> Self {
        self.shell = shell;
        self
    }

    /// Case-insensitive substring match on the title.
    pub fn matches_pattern(&self, pattern: &str) -> bool {
        if pattern.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&pattern.to_lowercase())
    }

    /// Whether this window is a switch candidate for `(process_name, title_pattern)`.
    pub fn matches_binding(&self, process_name: &str, title_pattern: &str) -> bool {
        if self.shell || !self.visible || self.title.is_empty() {
            return false;
        }

        let process_matches = self
            .process_name
            .as_deref()
            .is_some_and(|name| name.to_lowercase() == process_name.to_lowercase());

        process_matches && self.matches_pattern(title_pattern)
    }
}

impl fmt::Display for WindowInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.process_name {
            Some(process) => write!(f, "{} \"{}\" ({})", self.handle, self.title, process),
            None => write!(f, "{} \"{}\"", self.handle, self.title),
        }
    }
}
