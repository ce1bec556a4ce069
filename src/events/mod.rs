pub mod intent;
pub mod keyboard;
pub mod notification;
pub mod window;

pub use intent::{ControlEvent, Intent};
pub use keyboard::{KeyCode, KeyEvent, KeyState, Modifiers};
pub use notification::Notification;
pub use window::{WindowHandle, WindowInfo};
