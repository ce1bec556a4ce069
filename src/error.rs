use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarpoonError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("uinput error: {0}")]
    Uinput(#[from] uinput::Error),

    #[error("D-Bus error: {0}")]
    DBus(#[from] zbus::Error),

    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Insufficient permissions: {0}")]
    Permission(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Command failed: {0}")]
    Command(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl HarpoonError {
    pub fn device_not_found<T>(msg: impl Into<String>) -> Result<T> {
        Err(HarpoonError::DeviceNotFound(msg.into()))
    }
}

pub type Result<T> = std::result::Result<T, HarpoonError>;

#[macro_export]
macro_rules! harpoon_error {
    (device_not_found, $($arg:tt)*) => {
        $crate::error::HarpoonError::DeviceNotFound(format!($($arg)*))
    };
    (permission, $($arg:tt)*) => {
        $crate::error::HarpoonError::Permission(format!($($arg)*))
    };
    (service_unavailable, $($arg:tt)*) => {
        $crate::error::HarpoonError::ServiceUnavailable(format!($($arg)*))
    };
    (command, $($arg:tt)*) => {
        $crate::error::HarpoonError::Command(format!($($arg)*))
    };
    (internal, $($arg:tt)*) => {
        $crate::error::HarpoonError::Internal(format!($($arg)*))
    };
}
