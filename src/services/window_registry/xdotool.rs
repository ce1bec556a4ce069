use crate::error::{HarpoonError, Result};
use crate::events::{WindowHandle, WindowInfo};
use crate::utils::command::run_tool;
use crate::utils::process::process_name_for_pid;
use tracing::debug;

use super::r#trait::WindowRegistry;
use super::x11::{parse_window_list, read_window_props, XProps};

/// X11 registry: `xdotool` for focus, `xprop` for window metadata.
pub struct XdotoolRegistry;

impl XdotoolRegistry {
    pub fn new() -> Self {
        Self
    }

    pub fn test(&self) -> Result<()> {
        run_tool("xdotool", &["version"])?;
        run_tool("xprop", &["-root", "_NET_CLIENT_LIST"])?;
        Ok(())
    }

    fn props(&self, handle: WindowHandle) -> Result<XProps> {
        read_window_props("xprop", handle)
    }

    fn info(&self, handle: WindowHandle) -> Result<WindowInfo> {
        let props = self.props(handle)?;
        let mut info = WindowInfo::new(handle, props.title.clone().unwrap_or_default())
            .with_visible(props.is_managed())
            .with_shell(props.is_shell());

        if let Some(pid) = props.pid {
            info = info.with_pid(pid);
            if let Some(name) = process_name_for_pid(pid) {
                info = info.with_process(name);
            }
        }
        Ok(info)
    }
}

impl Default for XdotoolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowRegistry for XdotoolRegistry {
    fn foreground_window(&self) -> Option<WindowHandle> {
        match run_tool("xdotool", &["getactivewindow"]) {
            Ok(output) => WindowHandle::parse(&output),
            Err(e) => {
                debug!("xdotool getactivewindow: {}", e);
                None
            }
        }
    }

    fn is_valid(&self, handle: WindowHandle) -> bool {
        self.props(handle).map(|p| p.is_managed()).unwrap_or(false)
    }

    fn title(&self, handle: WindowHandle) -> Option<String> {
        self.props(handle).ok()?.title.filter(|t| !t.is_empty())
    }

    fn process_name(&self, handle: WindowHandle) -> Option<String> {
        self.props(handle).ok()?.pid.and_then(process_name_for_pid)
    }

    fn activate(&self, handle: WindowHandle) -> bool {
        let id = handle.value().to_string();
        match run_tool("xdotool", &["windowactivate", id.as_str()]) {
            Ok(_) => true,
            Err(e) => {
                debug!("xdotool windowactivate {}: {}", handle, e);
                false
            }
        }
    }

    fn enumerate(&self) -> Result<Vec<WindowInfo>> {
        let output = run_tool("xprop", &["-root", "_NET_CLIENT_LIST"])?;
        let handles = parse_window_list(&output);
        if handles.is_empty() {
            return Err(HarpoonError::Command("_NET_CLIENT_LIST is empty".to_string()));
        }

        // Windows can vanish between listing and probing.
        Ok(handles
            .into_iter()
            .filter_map(|handle| self.info(handle).ok())
            .collect())
    }
}
