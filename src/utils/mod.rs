pub mod autostart;
pub mod command;
pub mod device_finder;
pub mod permissions;
pub mod process;

pub use device_finder::DeviceFinder;

// Conditional logging: skips argument formatting when the level is off
#[macro_export]
macro_rules! debug_if_enabled {
    ($($arg:tt)*) => {
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! trace_if_enabled {
    ($($arg:tt)*) => {
        if tracing::enabled!(tracing::Level::TRACE) {
            tracing::trace!($($arg)*);
        }
    };
}
