use crate::error::Result;
use crate::events::{WindowHandle, WindowInfo};
use crate::utils::command::run_tool;
use crate::utils::process::process_name_for_pid;
use serde_json::Value;
use tracing::debug;

use super::r#trait::WindowRegistry;

const SCRATCHPAD: &str = "__i3_scratchpad";

/// Wayland registry for sway, driven through `swaymsg`.
pub struct SwayRegistry;

impl SwayRegistry {
    pub fn new() -> Self {
        Self
    }

    pub fn test(&self) -> Result<()> {
        run_tool("swaymsg", &["-t", "get_version"])?;
        Ok(())
    }

    fn tree(&self) -> Result<Value> {
        let output = run_tool("swaymsg", &["-t", "get_tree", "-r"])?;
        Ok(serde_json::from_str(&output)?)
    }

    fn windows(&self) -> Vec<SwayWindow> {
        match self.tree() {
            Ok(tree) => collect_windows(&tree),
            Err(e) => {
                debug!("swaymsg get_tree: {}", e);
                Vec::new()
            }
        }
    }

    fn find(&self, handle: WindowHandle) -> Option<SwayWindow> {
        self.windows().into_iter().find(|w| w.info.handle == handle)
    }
}

impl Default for SwayRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwayWindow {
    pub info: WindowInfo,
    pub focused: bool,
}

/// Flattens the sway layout tree into its application windows, in tree order.
pub fn collect_windows(tree: &Value) -> Vec<SwayWindow> {
    let mut windows = Vec::new();
    walk(tree, false, &mut windows);
    windows
}

fn walk(node: &Value, in_scratchpad: bool, out: &mut Vec<SwayWindow>) {
    let in_scratchpad = in_scratchpad
        || (node["type"] == "workspace" && node["name"] == SCRATCHPAD);

    if let (Some(id), Some(pid)) = (node["id"].as_u64(), node["pid"].as_u64()) {
        let title = node["name"].as_str().unwrap_or_default().to_string();
        let mut info = WindowInfo::new(WindowHandle(id), title)
            .with_pid(pid as u32)
            .with_visible(!in_scratchpad);
        if let Some(name) = process_name_for_pid(pid as u32) {
            info = info.with_process(name);
        }
        out.push(SwayWindow {
            info,
            focused: node["focused"].as_bool().unwrap_or(false),
        });
    }

    for key in ["nodes", "floating_nodes"] {
        if let Some(children) = node[key].as_array() {
            for child in children {
                walk(child, in_scratchpad, out);
            }
        }
    }
}

impl WindowRegistry for SwayRegistry {
    fn foreground_window(&self) -> Option<WindowHandle> {
        self.windows()
            .into_iter()
            .find(|w| w.focused)
            .map(|w| w.info.handle)
    }

    fn is_valid(&self, handle: WindowHandle) -> bool {
        self.find(handle).is_some_and(|w| w.info.visible)
    }

    fn title(&self, handle: WindowHandle) -> Option<String> {
        self.find(handle).map(|w| w.info.title).filter(|t| !t.is_empty())
    }

    fn process_name(&self, handle: WindowHandle) -> Option<String> {
        self.find(handle)?.info.process_name
    }

    fn activate(&self, handle: WindowHandle) -> bool {
        let criteria = format!("[con_id={}]", handle.value());
        match run_tool("swaymsg", &[criteria.as_str(), "focus"]) {
            Ok(_) => true,
            Err(e) => {
                debug!("swaymsg focus {}: {}", handle.value(), e);
                false
            }
        }
    }

    fn enumerate(&self) -> Result<Vec<WindowInfo>> {
        Ok(collect_windows(&self.tree()?)
            .into_iter()
            .map(|w| w.info)
            .collect())
    }
}
