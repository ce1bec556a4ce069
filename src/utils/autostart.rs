use crate::error::{HarpoonError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const DESKTOP_FILE: &str = "harpoon.desktop";

pub fn autostart_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("autostart"))
        .ok_or_else(|| HarpoonError::Internal("No config directory for autostart".to_string()))
}

pub fn desktop_entry(exec: &Path) -> String {
    format!(
        "[Desktop Entry]\n\
         Type=Application\n\
         Name=Harpoon\n\
         Comment=Jump between marked windows with global hotkeys\n\
         Exec={}\n\
         X-GNOME-Autostart-enabled=true\n\
         NoDisplay=true\n",
        exec.display()
    )
}

/// Writes the autostart entry for the running executable.
pub fn enable() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    enable_at(&autostart_dir()?, &exe)
}

pub fn disable() -> Result<bool> {
    disable_at(&autostart_dir()?)
}

pub fn is_enabled() -> Result<bool> {
    Ok(autostart_dir()?.join(DESKTOP_FILE).exists())
}

pub fn enable_at(dir: &Path, exe: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(DESKTOP_FILE);
    fs::write(&path, desktop_entry(exe))?;
    info!("Autostart enabled: {}", path.display());
    Ok(path)
}

/// Removes the entry. Returns whether one existed.
pub fn disable_at(dir: &Path) -> Result<bool> {
    let path = dir.join(DESKTOP_FILE);
    match fs::remove_file(&path) {
        Ok(()) => {
            info!("Autostart disabled: {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_enable_then_disable() {
        let dir = tempdir().unwrap();
        let autostart = dir.path().join("autostart");

        let path = enable_at(&autostart, Path::new("/usr/bin/harpoon")).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("[Desktop Entry]"));
        assert!(contents.contains("Exec=/usr/bin/harpoon\n"));

        assert!(disable_at(&autostart).unwrap());
        assert!(!path.exists());
        assert!(!disable_at(&autostart).unwrap());
    }
}
