//! Parsers for `xprop` output shared by the X11 backends.

use crate::error::Result;
use crate::events::WindowHandle;
use crate::utils::command::run_tool;

/// Properties of one window read with
/// `xprop -id <id> WM_STATE _NET_WM_WINDOW_TYPE _NET_WM_PID _NET_WM_NAME WM_NAME`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XProps {
    pub state: Option<String>,
    pub window_types: Vec<String>,
    pub pid: Option<u32>,
    pub title: Option<String>,
}

pub const XPROP_WINDOW_ARGS: [&str; 5] = [
    "WM_STATE",
    "_NET_WM_WINDOW_TYPE",
    "_NET_WM_PID",
    "_NET_WM_NAME",
    "WM_NAME",
];

impl XProps {
    pub fn parse(output: &str) -> Self {
        let mut props = XProps::default();
        let mut legacy_title = None;

        for line in output.lines() {
            let line = line.trim();

            if let Some(state) = line.strip_prefix("window state:") {
                props.state = Some(state.trim().to_string());
            } else if let Some(value) = property_value(line, "_NET_WM_WINDOW_TYPE") {
                props.window_types = value.split(',').map(|t| t.trim().to_string()).collect();
            } else if let Some(value) = property_value(line, "_NET_WM_PID") {
                props.pid = value.trim().parse().ok();
            } else if let Some(value) = property_value(line, "_NET_WM_NAME") {
                props.title = unquote(value);
            } else if let Some(value) = property_value(line, "WM_NAME") {
                legacy_title = unquote(value);
            }
        }

        if props.title.is_none() {
            props.title = legacy_title;
        }
        props
    }

    /// ICCCM state Normal or Iconic: a managed window, shown or minimized.
    pub fn is_managed(&self) -> bool {
        matches!(self.state.as_deref(), Some("Normal") | Some("Iconic"))
    }

    pub fn is_shell(&self) -> bool {
        self.window_types.iter().any(|t| {
            t == "_NET_WM_WINDOW_TYPE_DESKTOP" || t == "_NET_WM_WINDOW_TYPE_DOCK"
        })
    }
}

/// Reads the properties of a single window; no client list is fetched.
pub fn read_window_props(xprop: &str, handle: WindowHandle) -> Result<XProps> {
    let id = handle.to_hex();
    let mut args = vec!["-id", id.as_str()];
    args.extend_from_slice(&XPROP_WINDOW_ARGS);
    let output = run_tool(xprop, &args)?;
    Ok(XProps::parse(&output))
}

/// Value after `NAME(TYPE) = ` for the given property name.
fn property_value<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(name)?;
    if !rest.starts_with('(') {
        return None;
    }
    let (_, value) = rest.split_once(" = ")?;
    Some(value)
}

fn unquote(value: &str) -> Option<String> {
    let inner = value.trim().strip_prefix('"')?.strip_suffix('"')?;
    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                result.push(escaped);
            }
        } else {
            result.push(c);
        }
    }
    Some(result)
}

/// Window ids from a root property such as `_NET_CLIENT_LIST(WINDOW): window id # 0x1, 0x2`.
pub fn parse_window_list(output: &str) -> Vec<WindowHandle> {
    output
        .split_once('#')
        .map(|(_, ids)| ids.split(',').filter_map(WindowHandle::parse).collect())
        .unwrap_or_default()
}

/// Active window from `xprop -root _NET_ACTIVE_WINDOW`; `0x0` means none.
pub fn parse_active_window(output: &str) -> Option<WindowHandle> {
    parse_window_list(output)
        .into_iter()
        .next()
        .filter(|handle| handle.value() != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: &str = r#"WM_STATE(WM_STATE):
		window state: Iconic
		icon window: 0x0
_NET_WM_WINDOW_TYPE(ATOM) = _NET_WM_WINDOW_TYPE_NORMAL
_NET_WM_PID(CARDINAL) = 4242
_NET_WM_NAME(UTF8_STRING) = "Say \"hi\" - Editor"
WM_NAME(STRING) = "legacy""#;

    #[test]
    fn test_parse_window_props() {
        let props = XProps::parse(WINDOW);
        assert_eq!(props.state.as_deref(), Some("Iconic"));
        assert!(props.is_managed());
        assert!(!props.is_shell());
        assert_eq!(props.pid, Some(4242));
        assert_eq!(props.title.as_deref(), Some("Say \"hi\" - Editor"));
    }

    #[test]
    fn test_missing_properties_and_legacy_title() {
        let output = "WM_STATE:  not found.\n\
                      _NET_WM_WINDOW_TYPE(ATOM) = _NET_WM_WINDOW_TYPE_DOCK\n\
                      _NET_WM_PID:  not found.\n\
                      _NET_WM_NAME:  not found.\n\
                      WM_NAME(STRING) = \"panel\"";
        let props = XProps::parse(output);
        assert!(!props.is_managed());
        assert!(props.is_shell());
        assert_eq!(props.pid, None);
        assert_eq!(props.title.as_deref(), Some("panel"));
    }

    #[test]
    fn test_parse_root_lists() {
        let list = "_NET_CLIENT_LIST(WINDOW): window id # 0x1a00003, 0x3a00007";
        assert_eq!(
            parse_window_list(list),
            vec![WindowHandle(0x1a00003), WindowHandle(0x3a00007)]
        );

        assert_eq!(
            parse_active_window("_NET_ACTIVE_WINDOW(WINDOW): window id # 0x3a00007"),
            Some(WindowHandle(0x3a00007))
        );
        assert_eq!(parse_active_window("_NET_ACTIVE_WINDOW(WINDOW): window id # 0x0"), None);
    }
}
