use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::marks::default_marks_path;
use crate::services::hotkey_listener::HotkeyMap;
use crate::services::window_registry::RegistryBackend;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub input: InputConfig,
    pub hotkeys: HotkeysConfig,
    pub marks: MarksConfig,
    pub window: WindowConfig,
    pub notifications: NotificationsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    pub device_path: String,
    /// Grab the keyboard and re-emit everything that is not a hotkey.
    pub grab: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HotkeysConfig {
    /// Held for every chord.
    pub modifiers: Vec<String>,
    pub mark_mode: String,
    pub cycle_next: String,
    pub cycle_prev: String,
    pub show_overlay: String,
    pub clear_all: String,
    /// Held on top of `modifiers`: digit N clears slot N.
    pub clear_modifier: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MarksConfig {
    /// Empty means `$XDG_CONFIG_HOME/harpoon/marks.json`.
    pub storage_path: String,
    pub mark_mode_timeout_ms: u64,
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    pub backend: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationsConfig {
    pub desktop: bool,
    pub timeout_ms: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            device_path: "auto".to_string(),
            grab: false,
        }
    }
}

impl Default for HotkeysConfig {
    fn default() -> Self {
        Self {
            modifiers: vec!["ctrl".to_string(), "shift".to_string()],
            mark_mode: "m".to_string(),
            cycle_next: "n".to_string(),
            cycle_prev: "p".to_string(),
            show_overlay: "h".to_string(),
            clear_all: "0".to_string(),
            clear_modifier: "alt".to_string(),
        }
    }
}

impl Default for MarksConfig {
    fn default() -> Self {
        Self {
            storage_path: String::new(),
            mark_mode_timeout_ms: 3000,
            poll_interval_ms: 100,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            backend: "auto".to_string(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            desktop: true,
            timeout_ms: 2000,
        }
    }
}

impl Config {
    /// Defaults, then the TOML file (if present), then `HARPOON_*` variables.
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();
        Self::figment(config_path)
            .extract::<Config>()
            .with_context(|| format!("Failed to load configuration from {:?}", config_path))
            .and_then(|config| {
                config.validate()?;
                Ok(config)
            })
    }

    fn figment(config_path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("HARPOON_").split("__"))
    }

    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Invalid log level: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "pretty" | "compact" => {}
            _ => anyhow::bail!("Invalid log format: {}", self.logging.format),
        }

        if self.input.device_path.is_empty() {
            anyhow::bail!("input.device_path must be \"auto\" or a device path");
        }

        if RegistryBackend::parse(&self.window.backend).is_none() {
            anyhow::bail!("Unknown window backend: {}", self.window.backend);
        }

        if self.marks.poll_interval_ms < 10 {
            anyhow::bail!("marks.poll_interval_ms must be at least 10");
        }

        if self.marks.mark_mode_timeout_ms <= self.marks.poll_interval_ms {
            anyhow::bail!("marks.mark_mode_timeout_ms must be greater than poll_interval_ms");
        }

        // Parses names and modifiers and rejects clashing chords.
        HotkeyMap::from_config(&self.hotkeys).map_err(|e| anyhow::anyhow!("Invalid hotkeys: {}", e))?;

        Ok(())
    }

    pub fn storage_path(&self) -> PathBuf {
        if self.marks.storage_path.is_empty() {
            default_marks_path()
        } else {
            PathBuf::from(&self.marks.storage_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.marks.mark_mode_timeout_ms, 3000);
        assert!(config.storage_path().ends_with("harpoon/marks.json"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("harpoon.toml");
        fs::write(
            &path,
            r#"
[hotkeys]
modifiers = ["super"]
mark_mode = "space"

[marks]
storage_path = "/tmp/marks.json"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.hotkeys.modifiers, vec!["super".to_string()]);
        assert_eq!(config.hotkeys.mark_mode, "space");
        assert_eq!(config.hotkeys.cycle_next, "n");
        assert_eq!(config.storage_path(), PathBuf::from("/tmp/marks.json"));
        assert_eq!(config.window.backend, "auto");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.window.backend = "kwin".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.marks.poll_interval_ms = 5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.marks.mark_mode_timeout_ms = 100;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.hotkeys.modifiers = vec!["hyper".to_string()];
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.hotkeys.cycle_prev = "n".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.hotkeys.show_overlay = "nosuchkey".to_string();
        assert!(config.validate().is_err());
    }
}
