use crate::marks::{Binding, Slot};
use std::fmt;

/// Outbound notifications published by the core for UI-facing sinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    MarkCaptured { slot: Slot, binding: Binding },
    MarkCleared(Slot),
    AllCleared,
    SwitchFailed(Slot),
    MarkModeEntered,
    MarkModeExpired,
    CycleEmpty,
    /// Snapshot of all marks, ascending by slot.
    OverlayRequested(Vec<Binding>),
}

impl Notification {
    /// Short human-readable body, used by desktop notifications and logs.
    pub fn message(&self) -> String {
        match self {
            Notification::MarkCaptured { slot, binding } => {
                format!("Slot {} marked: {} ({})", slot, binding.process_name, binding.title_pattern)
            }
            Notification::MarkCleared(slot) => format!("Slot {} cleared.", slot),
            Notification::AllCleared => "All marks cleared.".to_string(),
            Notification::SwitchFailed(slot) => {
                format!("Could not find the window for slot {}.", slot)
            }
            Notification::MarkModeEntered => "Mark mode: press 1-9 to mark the current window.".to_string(),
            Notification::MarkModeExpired => "Mark mode cancelled.".to_string(),
            Notification::CycleEmpty => "No marks to cycle through.".to_string(),
            Notification::OverlayRequested(bindings) => render_overlay(bindings),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

fn render_overlay(bindings: &[Binding]) -> String {
    if bindings.is_empty() {
        return "No marks set. Use mark mode to add windows.".to_string();
    }

    bindings
        .iter()
        .map(|b| format!("[{}] {} - {}", b.slot, b.process_name, b.title_pattern))
        .collect::<Vec<_>>()
        .join("\n")
}
