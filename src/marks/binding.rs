use crate::events::WindowHandle;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::slot::Slot;

/// A slot bound to a window, identified by owning process and title pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub slot: Slot,
    pub process_name: String,
    pub title_pattern: String,
    /// Last handle known to point at the window. Never persisted.
    pub window_handle: Option<WindowHandle>,
}

impl Binding {
    pub fn new(slot: Slot, process_name: impl Into<String>, title_pattern: impl Into<String>) -> Self {
        Self {
            slot,
            process_name: process_name.into(),
            title_pattern: title_pattern.into(),
            window_handle: None,
        }
    }

    pub fn with_handle(mut self, handle: WindowHandle) -> Self {
        self.window_handle = Some(handle);
        self
    }

    pub fn is_valid(&self) -> bool {
        !self.process_name.is_empty() && !self.title_pattern.is_empty()
    }

    pub fn to_record(&self) -> BindingRecord {
        BindingRecord {
            slot: self.slot.get(),
            process_name: self.process_name.clone(),
            title_pattern: self.title_pattern.clone(),
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: \"{}\"", self.slot, self.process_name, self.title_pattern)
    }
}

/// On-disk form of a [`Binding`].
///
/// The slot stays a raw integer here so a single bad record is skipped on load
/// instead of failing the whole file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingRecord {
    pub slot: u8,
    pub process_name: String,
    pub title_pattern: String,
}

impl BindingRecord {
    pub fn into_binding(self) -> Option<Binding> {
        let slot = Slot::new(self.slot)?;
        let binding = Binding::new(slot, self.process_name, self.title_pattern);
        binding.is_valid().then_some(binding)
    }
}
