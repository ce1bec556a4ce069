pub mod hotkey_listener;
pub mod mode_controller;
pub mod notifier;
pub mod ticker;
pub mod virtual_device;
pub mod window_registry;

pub use hotkey_listener::create_hotkey_listener;
pub use mode_controller::{ModeController, ModeSettings};
pub use notifier::{spawn_sink, DesktopSink, LogSink, Notifier};
pub use ticker::TokioTicker;
pub use virtual_device::VirtualDevice;
pub use window_registry::{create_window_registry, DryRunRegistry};
