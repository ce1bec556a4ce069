use crate::error::Result;
use crate::events::{WindowHandle, WindowInfo};
use crate::utils::command::run_tool;
use crate::utils::process::process_name_for_pid;
use tracing::debug;

use super::r#trait::WindowRegistry;
use super::x11::{parse_active_window, read_window_props, XProps};

/// X11 registry built on the EWMH `wmctrl` tool.
///
/// The window list is only read for searches. Questions about one window go to
/// `xprop -id`, so checking a cached handle stays a single call.
pub struct WmctrlRegistry {
    wmctrl: String,
    xprop: String,
}

impl WmctrlRegistry {
    pub fn new() -> Self {
        Self::with_tools("wmctrl", "xprop")
    }

    fn with_tools(wmctrl: impl Into<String>, xprop: impl Into<String>) -> Self {
        Self {
            wmctrl: wmctrl.into(),
            xprop: xprop.into(),
        }
    }

    pub fn test(&self) -> Result<()> {
        run_tool(&self.wmctrl, &["-l"])?;
        Ok(())
    }

    fn props(&self, handle: WindowHandle) -> Option<XProps> {
        match read_window_props(&self.xprop, handle) {
            Ok(props) => Some(props),
            Err(e) => {
                debug!("xprop -id {}: {}", handle, e);
                None
            }
        }
    }
}

impl Default for WmctrlRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses one line of `wmctrl -lp`: `<id> <desktop> <pid> <host> <title...>`.
pub fn parse_wmctrl_line(line: &str) -> Option<WindowInfo> {
    let mut parts = line.split_whitespace();
    let handle = WindowHandle::parse(parts.next()?)?;
    let desktop: i64 = parts.next()?.parse().ok()?;
    let pid: u32 = parts.next()?.parse().ok()?;
    let _host = parts.next()?;
    let title = parts.collect::<Vec<_>>().join(" ");

    // Desktop -1 with no pid is how wmctrl reports the desktop/panel surfaces.
    let shell = desktop < 0 && pid == 0;

    let mut info = WindowInfo::new(handle, title).with_shell(shell);
    if pid != 0 {
        info = info.with_pid(pid);
    }
    Some(info)
}

impl WindowRegistry for WmctrlRegistry {
    fn foreground_window(&self) -> Option<WindowHandle> {
        match run_tool(&self.xprop, &["-root", "_NET_ACTIVE_WINDOW"]) {
            Ok(output) => parse_active_window(&output),
            Err(e) => {
                debug!("xprop _NET_ACTIVE_WINDOW: {}", e);
                None
            }
        }
    }

    fn is_valid(&self, handle: WindowHandle) -> bool {
        self.props(handle).is_some_and(|p| p.is_managed())
    }

    fn title(&self, handle: WindowHandle) -> Option<String> {
        self.props(handle)?.title.filter(|t| !t.is_empty())
    }

    fn process_name(&self, handle: WindowHandle) -> Option<String> {
        self.props(handle)?.pid.and_then(process_name_for_pid)
    }

    fn activate(&self, handle: WindowHandle) -> bool {
        let id = handle.to_hex();
        match run_tool(&self.wmctrl, &["-i", "-a", id.as_str()]) {
            Ok(_) => true,
            Err(e) => {
                debug!("wmctrl -a {}: {}", handle, e);
                false
            }
        }
    }

    fn enumerate(&self) -> Result<Vec<WindowInfo>> {
        let output = run_tool(&self.wmctrl, &["-lp"])?;
        Ok(output
            .lines()
            .filter_map(parse_wmctrl_line)
            .map(|info| match info.pid.and_then(process_name_for_pid) {
                Some(name) => info.with_process(name),
                None => info,
            })
            .collect())
    }
}
