use crate::config::Config;
use crate::error::{HarpoonError, Result};
use crate::events::{WindowHandle, WindowInfo};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::dry_run::DryRunRegistry;
use super::sway::SwayRegistry;
use super::wmctrl::WmctrlRegistry;
use super::xdotool::XdotoolRegistry;

/// Window queries and actions the mark engine needs from the desktop.
///
/// Implementations report failures as `None`/`false`; the engine never treats a
/// registry failure as fatal.
pub trait WindowRegistry: Send + Sync {
    fn foreground_window(&self) -> Option<WindowHandle>;

    /// The window still exists and is a visible (or minimized) top-level window.
    fn is_valid(&self, handle: WindowHandle) -> bool;

    fn title(&self, handle: WindowHandle) -> Option<String>;

    fn process_name(&self, handle: WindowHandle) -> Option<String>;

    /// Focus the window, restoring it if minimized.
    fn activate(&self, handle: WindowHandle) -> bool;

    /// Every top-level window in backend order.
    fn enumerate(&self) -> Result<Vec<WindowInfo>>;

    /// First window owned by `process_name` whose title contains `title_pattern`.
    ///
    /// Shell and invisible windows are skipped. Enumeration order decides ties.
    fn find_by_process_and_title(&self, process_name: &str, title_pattern: &str) -> Option<WindowHandle> {
        let windows = match self.enumerate() {
            Ok(windows) => windows,
            Err(e) => {
                warn!("Window enumeration failed: {}", e);
                return None;
            }
        };

        let found = windows
            .into_iter()
            .find(|w| w.matches_binding(process_name, title_pattern))
            .map(|w| w.handle);

        debug!(
            "Lookup {} / \"{}\" -> {:?}",
            process_name, title_pattern, found
        );
        found
    }
}

/// Backend selected by `window.backend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryBackend {
    Auto,
    Xdotool,
    Wmctrl,
    Sway,
}

impl RegistryBackend {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "auto" => Some(RegistryBackend::Auto),
            "xdotool" => Some(RegistryBackend::Xdotool),
            "wmctrl" => Some(RegistryBackend::Wmctrl),
            "sway" => Some(RegistryBackend::Sway),
            _ => None,
        }
    }
}

/// Factory function to create the registry for the configured backend or the dry-run one
pub fn create_window_registry(
    config: &Config,
    dry_run: Option<Arc<DryRunRegistry>>,
) -> Result<Arc<dyn WindowRegistry>> {
    if let Some(registry) = dry_run {
        info!("Using dry-run window registry");
        return Ok(registry);
    }

    let backend = RegistryBackend::parse(&config.window.backend).ok_or_else(|| {
        HarpoonError::Internal(format!("Unknown window backend: {}", config.window.backend))
    })?;

    let registry: Arc<dyn WindowRegistry> = match backend {
        RegistryBackend::Xdotool => Arc::new(XdotoolRegistry::new()),
        RegistryBackend::Wmctrl => Arc::new(WmctrlRegistry::new()),
        RegistryBackend::Sway => Arc::new(SwayRegistry::new()),
        RegistryBackend::Auto => detect_backend()?,
    };

    Ok(registry)
}

fn detect_backend() -> Result<Arc<dyn WindowRegistry>> {
    info!("Detecting a working window backend...");

    if std::env::var_os("SWAYSOCK").is_some() {
        let sway = SwayRegistry::new();
        if sway.test().is_ok() {
            info!("Using sway");
            return Ok(Arc::new(sway));
        }
    }

    let xdotool = XdotoolRegistry::new();
    if xdotool.test().is_ok() {
        info!("Using xdotool");
        return Ok(Arc::new(xdotool));
    }

    let wmctrl = WmctrlRegistry::new();
    if wmctrl.test().is_ok() {
        info!("Using wmctrl");
        return Ok(Arc::new(wmctrl));
    }

    Err(HarpoonError::ServiceUnavailable(
        "No window backend works (tried sway, xdotool, wmctrl)".to_string(),
    ))
}
