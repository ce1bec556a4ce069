use crate::events::{Notification, WindowHandle};
use crate::services::notifier::Notifier;
use crate::services::window_registry::WindowRegistry;
use smallvec::SmallVec;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use super::binding::Binding;
use super::pattern::derive_pattern;
use super::slot::{Slot, MAX_SLOT};
use super::storage::MarkStorage;

/// Occupied slots in ascending order. Never more than nine.
pub type OccupiedSlots = SmallVec<[Slot; MAX_SLOT as usize]>;

/// Owner of all slot bindings and of their persisted copy.
///
/// Every capture/clear rewrites the marks file. Write failures are logged and the
/// in-memory state stays authoritative for the rest of the process.
pub struct MarkStore {
    marks: BTreeMap<Slot, Binding>,
    storage: MarkStorage,
    notifier: Notifier,
}

impl MarkStore {
    /// Creates the store and loads whatever the marks file holds.
    pub fn load(storage: MarkStorage, notifier: Notifier) -> Self {
        let marks = storage
            .load()
            .into_iter()
            .map(|binding| (binding.slot, binding))
            .collect();

        Self {
            marks,
            storage,
            notifier,
        }
    }

    /// Binds `slot` to the foreground window. No-op when the slot is out of range or the
    /// window (or its process name or title) is unavailable.
    pub fn capture(&mut self, slot: u8, registry: &dyn WindowRegistry) -> Option<Binding> {
        let Some(slot) = Slot::new(slot) else {
            debug!("Capture ignored: slot {} out of range", slot);
            return None;
        };

        let Some(handle) = registry.foreground_window() else {
            debug!("Capture skipped for slot {}: no foreground window", slot);
            return None;
        };

        let process_name = registry.process_name(handle).filter(|p| !p.is_empty());
        let title = registry.title(handle).filter(|t| !t.is_empty());
        let (Some(process_name), Some(title)) = (process_name, title) else {
            debug!("Capture skipped for slot {}: {} has no process name or title", slot, handle);
            return None;
        };

        let binding = Binding::new(slot, process_name, derive_pattern(&title)).with_handle(handle);
        if !binding.is_valid() {
            debug!("Capture skipped for slot {}: empty title pattern from \"{}\"", slot, title);
            return None;
        }

        info!("Marked {}", binding);
        self.marks.insert(slot, binding.clone());
        self.persist();

        self.notifier.publish(Notification::MarkCaptured {
            slot,
            binding: binding.clone(),
        });
        Some(binding)
    }

    /// Removes the binding at `slot`. Returns whether anything was removed.
    pub fn clear(&mut self, slot: u8) -> bool {
        let Some(slot) = Slot::new(slot) else {
            return false;
        };

        if self.marks.remove(&slot).is_none() {
            return false;
        }

        info!("Cleared slot {}", slot);
        self.persist();
        self.notifier.publish(Notification::MarkCleared(slot));
        true
    }

    /// Removes every binding. Returns `false` when the store was already empty.
    pub fn clear_all(&mut self) -> bool {
        if self.marks.is_empty() {
            return false;
        }

        info!("Clearing all {} marks", self.marks.len());
        self.marks.clear();
        self.persist();
        self.notifier.publish(Notification::AllCleared);
        true
    }

    pub fn get(&self, slot: u8) -> Option<&Binding> {
        Slot::new(slot).and_then(|slot| self.marks.get(&slot))
    }

    pub fn count(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// All bindings, ascending by slot.
    pub fn all(&self) -> impl Iterator<Item = &Binding> {
        self.marks.values()
    }

    pub fn occupied_slots(&self) -> OccupiedSlots {
        self.marks.keys().copied().collect()
    }

    /// Remembers a freshly resolved handle. Handles are never written to disk.
    pub fn cache_handle(&mut self, slot: Slot, handle: WindowHandle) {
        if let Some(binding) = self.marks.get_mut(&slot) {
            binding.window_handle = Some(handle);
        }
    }

    pub fn storage(&self) -> &MarkStorage {
        &self.storage
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(self.marks.values()) {
            warn!("Failed to save marks to {:?}: {}", self.storage.path(), e);
        }
    }
}
