use crate::error::{HarpoonError, Result};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tracing::{info, warn};

const INPUT_DIR: &str = "/dev/input";
const UINPUT_DEVICE: &str = "/dev/uinput";

/// Checks access to the input devices; uinput only matters when grabbing.
pub fn check_permissions(grab: bool) -> Result<()> {
    info!("Checking device permissions...");

    check_input_devices_access(Path::new(INPUT_DIR))?;
    if grab {
        check_uinput_access(Path::new(UINPUT_DEVICE))?;
    }
    check_not_root();

    Ok(())
}

fn check_input_devices_access(input_dir: &Path) -> Result<()> {
    if !input_dir.exists() {
        return Err(HarpoonError::Permission(format!(
            "{} does not exist",
            input_dir.display()
        )));
    }

    fs::read_dir(input_dir).map_err(|e| {
        HarpoonError::Permission(format!(
            "Cannot read {}: {}. Add your user to the 'input' group",
            input_dir.display(),
            e
        ))
    })?;

    info!("Access to {} confirmed", input_dir.display());
    Ok(())
}

fn check_uinput_access(uinput_device: &Path) -> Result<()> {
    if !uinput_device.exists() {
        warn!("{} does not exist, is the uinput module loaded?", uinput_device.display());
        return Ok(());
    }

    let mode = fs::metadata(uinput_device)
        .map_err(|e| {
            HarpoonError::Permission(format!("Cannot stat {}: {}", uinput_device.display(), e))
        })?
        .permissions()
        .mode();

    if !group_or_other_writable(mode) {
        return Err(HarpoonError::Permission(format!(
            "No write access to {}. Add your user to the 'uinput' or 'input' group",
            uinput_device.display()
        )));
    }

    info!("Access to {} confirmed", uinput_device.display());
    Ok(())
}

fn group_or_other_writable(mode: u32) -> bool {
    mode & 0o020 != 0 || mode & 0o002 != 0
}

fn check_not_root() {
    match std::env::var("USER") {
        Ok(user) if user == "root" => {
            warn!("Running as root. Prefer adding your user to the input group:");
            for line in setup_commands() {
                warn!("  {}", line);
            }
        }
        Ok(user) => info!("Running as {}", user),
        Err(_) => warn!("Could not determine the current user"),
    }
}

pub fn setup_commands() -> Vec<&'static str> {
    vec![
        "sudo usermod -a -G input,uinput $USER",
        "sudo modprobe uinput",
        "echo 'uinput' | sudo tee /etc/modules-load.d/uinput.conf",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_setup_commands() {
        let commands = setup_commands();
        assert!(commands.iter().any(|cmd| cmd.contains("usermod")));
        assert!(commands.iter().any(|cmd| cmd.contains("modprobe")));
    }

    #[test]
    fn test_missing_input_dir_is_permission_error() {
        let result = check_input_devices_access(Path::new("/definitely/not/dev/input"));
        assert!(matches!(result, Err(HarpoonError::Permission(_))));
    }

    #[test]
    fn test_readable_dir_passes() {
        let dir = tempdir().unwrap();
        assert!(check_input_devices_access(dir.path()).is_ok());
        // Missing uinput only warns.
        assert!(check_uinput_access(&dir.path().join("uinput")).is_ok());
    }

    #[test]
    fn test_uinput_mode_bits() {
        assert!(group_or_other_writable(0o660));
        assert!(group_or_other_writable(0o666));
        assert!(!group_or_other_writable(0o600));
    }
}
