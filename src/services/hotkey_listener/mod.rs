mod chord_decoder;
mod dry_hotkey_listener;
mod key_mapping;
mod keyboard_listener;
mod modifier_state;
mod r#trait;

pub use self::key_mapping::HotkeyMap;
pub use self::r#trait::{create_hotkey_listener, HotkeyListenerTrait};
