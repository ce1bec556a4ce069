use crate::marks::Slot;
use std::fmt;

/// Decoded hotkey or UI command handled by the mode controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    ActivateMarkMode,
    Slot(Slot),
    ClearSlot(Slot),
    ClearAll,
    CycleNext,
    CyclePrev,
    ShowOverlay,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::ActivateMarkMode => write!(f, "mark-mode"),
            Intent::Slot(slot) => write!(f, "slot-{}", slot),
            Intent::ClearSlot(slot) => write!(f, "clear-{}", slot),
            Intent::ClearAll => write!(f, "clear-all"),
            Intent::CycleNext => write!(f, "cycle-next"),
            Intent::CyclePrev => write!(f, "cycle-prev"),
            Intent::ShowOverlay => write!(f, "show-overlay"),
        }
    }
}

/// Everything the event loop feeds into the controller, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    Intent(Intent),
    /// Periodic mark-mode timeout check.
    Tick,
}

impl From<Intent> for ControlEvent {
    fn from(intent: Intent) -> Self {
        ControlEvent::Intent(intent)
    }
}
