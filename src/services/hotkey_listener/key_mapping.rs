use crate::config::HotkeysConfig;
use crate::events::{Intent, Modifiers};
use crate::marks::Slot;
use evdev::KeyCode;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Key names accepted in `[hotkeys]`, mapped to evdev codes.
static KEY_NAMES: Lazy<HashMap<&'static str, KeyCode>> = Lazy::new(|| {
    HashMap::from([
        ("a", KeyCode::KEY_A),
        ("b", KeyCode::KEY_B),
        ("c", KeyCode::KEY_C),
        ("d", KeyCode::KEY_D),
        ("e", KeyCode::KEY_E),
        ("f", KeyCode::KEY_F),
        ("g", KeyCode::KEY_G),
        ("h", KeyCode::KEY_H),
        ("i", KeyCode::KEY_I),
        ("j", KeyCode::KEY_J),
        ("k", KeyCode::KEY_K),
        ("l", KeyCode::KEY_L),
        ("m", KeyCode::KEY_M),
        ("n", KeyCode::KEY_N),
        ("o", KeyCode::KEY_O),
        ("p", KeyCode::KEY_P),
        ("q", KeyCode::KEY_Q),
        ("r", KeyCode::KEY_R),
        ("s", KeyCode::KEY_S),
        ("t", KeyCode::KEY_T),
        ("u", KeyCode::KEY_U),
        ("v", KeyCode::KEY_V),
        ("w", KeyCode::KEY_W),
        ("x", KeyCode::KEY_X),
        ("y", KeyCode::KEY_Y),
        ("z", KeyCode::KEY_Z),
        ("1", KeyCode::KEY_1),
        ("2", KeyCode::KEY_2),
        ("3", KeyCode::KEY_3),
        ("4", KeyCode::KEY_4),
        ("5", KeyCode::KEY_5),
        ("6", KeyCode::KEY_6),
        ("7", KeyCode::KEY_7),
        ("8", KeyCode::KEY_8),
        ("9", KeyCode::KEY_9),
        ("0", KeyCode::KEY_0),
        ("f1", KeyCode::KEY_F1),
        ("f2", KeyCode::KEY_F2),
        ("f3", KeyCode::KEY_F3),
        ("f4", KeyCode::KEY_F4),
        ("f5", KeyCode::KEY_F5),
        ("f6", KeyCode::KEY_F6),
        ("f7", KeyCode::KEY_F7),
        ("f8", KeyCode::KEY_F8),
        ("f9", KeyCode::KEY_F9),
        ("f10", KeyCode::KEY_F10),
        ("f11", KeyCode::KEY_F11),
        ("f12", KeyCode::KEY_F12),
        ("space", KeyCode::KEY_SPACE),
        ("enter", KeyCode::KEY_ENTER),
        ("tab", KeyCode::KEY_TAB),
        ("escape", KeyCode::KEY_ESC),
        ("backspace", KeyCode::KEY_BACKSPACE),
        ("minus", KeyCode::KEY_MINUS),
        ("equal", KeyCode::KEY_EQUAL),
        ("leftbrace", KeyCode::KEY_LEFTBRACE),
        ("rightbrace", KeyCode::KEY_RIGHTBRACE),
        ("semicolon", KeyCode::KEY_SEMICOLON),
        ("apostrophe", KeyCode::KEY_APOSTROPHE),
        ("grave", KeyCode::KEY_GRAVE),
        ("backslash", KeyCode::KEY_BACKSLASH),
        ("comma", KeyCode::KEY_COMMA),
        ("dot", KeyCode::KEY_DOT),
        ("slash", KeyCode::KEY_SLASH),
        ("up", KeyCode::KEY_UP),
        ("down", KeyCode::KEY_DOWN),
        ("left", KeyCode::KEY_LEFT),
        ("right", KeyCode::KEY_RIGHT),
        ("home", KeyCode::KEY_HOME),
        ("end", KeyCode::KEY_END),
        ("pageup", KeyCode::KEY_PAGEUP),
        ("pagedown", KeyCode::KEY_PAGEDOWN),
        ("insert", KeyCode::KEY_INSERT),
        ("delete", KeyCode::KEY_DELETE),
    ])
});

static KEY_CODES: Lazy<HashMap<u16, &'static str>> =
    Lazy::new(|| KEY_NAMES.iter().map(|(name, code)| (code.code(), *name)).collect());

pub fn key_code_for(name: &str) -> Option<KeyCode> {
    KEY_NAMES.get(name.to_lowercase().as_str()).copied()
}

pub fn key_name(code: u16) -> Option<&'static str> {
    KEY_CODES.get(&code).copied()
}

/// Chord table: (key, exact modifier set) -> intent.
#[derive(Debug, Clone)]
pub struct HotkeyMap {
    chords: HashMap<(u16, Modifiers), Intent>,
}

impl HotkeyMap {
    /// Builds the table from `[hotkeys]`.
    ///
    /// Digits 1-9 with the base modifiers select a slot, with the clear modifier added
    /// they clear it. Errors name the offending key or modifier.
    pub fn from_config(config: &HotkeysConfig) -> Result<Self, String> {
        let base = Modifiers::from_names(config.modifiers.as_slice())
            .map_err(|name| format!("unknown modifier '{}'", name))?;
        if base.is_empty() {
            return Err("at least one base modifier is required".to_string());
        }

        let extra = Modifiers::from_names(&[&config.clear_modifier])
            .map_err(|name| format!("unknown clear modifier '{}'", name))?;
        let clear = base.union(extra);
        if clear == base {
            return Err(format!(
                "clear modifier '{}' is already a base modifier",
                config.clear_modifier
            ));
        }

        let mut map = Self {
            chords: HashMap::new(),
        };

        for slot in Slot::all() {
            let digit = slot.get().to_string();
            map.bind(&digit, base, Intent::Slot(slot))?;
            map.bind(&digit, clear, Intent::ClearSlot(slot))?;
        }

        map.bind(&config.mark_mode, base, Intent::ActivateMarkMode)?;
        map.bind(&config.cycle_next, base, Intent::CycleNext)?;
        map.bind(&config.cycle_prev, base, Intent::CyclePrev)?;
        map.bind(&config.show_overlay, base, Intent::ShowOverlay)?;
        map.bind(&config.clear_all, base, Intent::ClearAll)?;

        Ok(map)
    }

    pub fn lookup(&self, key: u16, modifiers: Modifiers) -> Option<Intent> {
        self.chords.get(&(key, modifiers)).copied()
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    fn bind(&mut self, key_name: &str, modifiers: Modifiers, intent: Intent) -> Result<(), String> {
        let code = key_code_for(key_name).ok_or_else(|| format!("unknown key '{}'", key_name))?;

        if let Some(existing) = self.chords.insert((code.code(), modifiers), intent) {
            return Err(format!(
                "{}+{} is bound to both {} and {}",
                modifiers, key_name, existing, intent
            ));
        }
        Ok(())
    }
}
