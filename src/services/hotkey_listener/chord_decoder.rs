use crate::debug_if_enabled;
use crate::events::{Intent, KeyState, Modifiers};
use evdev::KeyCode;
use smallvec::SmallVec;

use super::key_mapping::{key_name, HotkeyMap};
use super::modifier_state::ModifierState;

/// What to do with one key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    pub intent: Option<Intent>,
    /// Pass the key on to the passthrough device.
    pub forward: bool,
    /// Modifiers held after this event.
    pub modifiers: Modifiers,
}

/// Turns raw key transitions into chord intents.
///
/// A chord press is swallowed along with its repeats and its release, even when the
/// modifiers are let go first. Everything else is forwarded.
#[derive(Debug)]
pub struct ChordDecoder {
    hotkeys: HotkeyMap,
    modifier_state: ModifierState,
    consumed: SmallVec<[u16; 4]>,
}

impl ChordDecoder {
    pub fn new(hotkeys: HotkeyMap) -> Self {
        Self {
            hotkeys,
            modifier_state: ModifierState::new(),
            consumed: SmallVec::new(),
        }
    }

    pub fn feed(&mut self, key: KeyCode, state: KeyState) -> Decoded {
        self.modifier_state.update_key(key, state);
        let modifiers = self.modifier_state.to_modifiers();

        if let Some(pos) = self.consumed.iter().position(|&code| code == key.code()) {
            if state == KeyState::Released {
                self.consumed.swap_remove(pos);
            }
            return Decoded {
                intent: None,
                forward: false,
                modifiers,
            };
        }

        if state == KeyState::Pressed && !ModifierState::is_modifier(key) {
            if let Some(intent) = self.hotkeys.lookup(key.code(), modifiers) {
                debug_if_enabled!(
                    "Chord {}+{} -> {}",
                    modifiers,
                    key_name(key.code()).unwrap_or("?"),
                    intent
                );
                self.consumed.push(key.code());
                return Decoded {
                    intent: Some(intent),
                    forward: false,
                    modifiers,
                };
            }
        }

        Decoded {
            intent: None,
            forward: true,
            modifiers,
        }
    }
}
