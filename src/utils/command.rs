use crate::error::{HarpoonError, Result};
use crate::trace_if_enabled;
use std::process::Command;

/// Runs a desktop tool and returns its trimmed stdout.
pub fn run_tool(program: &str, args: &[&str]) -> Result<String> {
    trace_if_enabled!("exec {} {:?}", program, args);

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| HarpoonError::Command(format!("{} not found: {}", program, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(HarpoonError::Command(format!(
            "{} {} failed: {}",
            program,
            args.join(" "),
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
