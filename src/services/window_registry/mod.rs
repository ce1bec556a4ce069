//! WindowRegistry service: responsibility and boundaries
//!
//! This module and its submodules ONLY answer window questions (foreground window,
//! title, owning process, validity, enumeration) and perform activation. They MUST NOT
//! contain mark, slot or mode logic; the mark engine decides what to look up and when.

mod dry_run;
mod sway;
mod r#trait;
mod wmctrl;
mod x11;
mod xdotool;

pub use self::dry_run::DryRunRegistry;
pub use self::r#trait::{create_window_registry, RegistryBackend, WindowRegistry};
